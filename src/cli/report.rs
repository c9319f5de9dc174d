//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept separate from the core
//! so uixml can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, GenerateSummary, InitSummary, LoadSummary, SnapshotSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

/// Print a hint when files were skipped during scanning.
pub fn print_skipped_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) were skipped (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = &mut io::stdout().lock();
    report_to(&result.issues, stdout);
    print_command_output_to(&result.summary, stdout);

    let skipped = match &result.summary {
        CommandSummary::Load(summary) => summary.skipped_files,
        CommandSummary::Snapshot(summary) => summary.skipped_files,
        CommandSummary::Generate(_) | CommandSummary::Init(_) => 0,
    };
    print_skipped_warning_to(skipped, verbose, &mut io::stderr().lock());
}

pub fn print_command_output_to<W: Write>(summary: &CommandSummary, writer: &mut W) {
    match summary {
        CommandSummary::Load(summary) => print_load(summary, writer),
        CommandSummary::Generate(summary) => print_generate(summary, writer),
        CommandSummary::Snapshot(summary) => print_snapshot(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_load<W: Write>(summary: &LoadSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Loaded {} from {}: {}, {}",
            plural(summary.document_count, "document", "documents"),
            plural(summary.input_count, "file", "files"),
            plural(summary.template_count, "template", "templates"),
            plural(summary.label_count, "label", "labels"),
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} {}",
        "workbook:".bold(),
        summary.workbook_path.display()
    );
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} from {}",
            plural(summary.output_count, "document", "documents"),
            plural(summary.sheet_count, "sheet", "sheets"),
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} {}",
        "output:".bold(),
        summary.output_root.display()
    );
}

fn print_snapshot<W: Write>(summary: &SnapshotSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} with {}",
            plural(summary.file_count, "snapshot", "snapshots"),
            plural(summary.label_count, "label", "labels"),
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} {}",
        "properties:".bold(),
        summary.properties_root.display()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    match &summary.error {
        Some(error) => {
            let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error.red());
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
        }
    }
}
