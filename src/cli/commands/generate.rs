//! `generate`: templates plus workbook translations to localized documents.

use std::{collections::BTreeMap, fs, io::ErrorKind};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::{
    CommandResult, CommandSummary, GenerateSummary,
    helper::{clean_dir, display_path, finish, remove_stale, write_output},
};
use crate::{
    cli::args::GenerateCommand,
    core::{
        ProjectContext, Sheet, generate as fill_templates, parsers::xml::escape_text,
        workbook::load_workbook,
    },
    issues::{DecodeErrorIssue, Issue, ReadErrorIssue, UnresolvedPlaceholderIssue},
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    run_generate(&ctx, cmd.clean)
}

struct SheetOutcome {
    outputs_written: usize,
    issues: Vec<Issue>,
}

pub fn run_generate(ctx: &ProjectContext, clean: bool) -> Result<CommandResult> {
    // A missing or malformed workbook leaves nothing to generate from.
    let workbook = load_workbook(&ctx.workbook_path(), &ctx.languages)?;

    if clean {
        clean_dir(&ctx.output_root())?;
    }

    let outcomes: Vec<SheetOutcome> = workbook
        .sheets
        .into_par_iter()
        .map(|sheet| generate_sheet(ctx, sheet))
        .collect();

    let sheet_count = outcomes.len();
    let mut issues = Vec::new();
    let mut output_count = 0;
    for outcome in outcomes {
        output_count += outcome.outputs_written;
        issues.extend(outcome.issues);
    }

    let summary = GenerateSummary {
        sheet_count,
        output_count,
        output_root: ctx.output_root(),
    };
    Ok(finish(CommandSummary::Generate(summary), issues))
}

fn generate_sheet(ctx: &ProjectContext, sheet: Sheet) -> SheetOutcome {
    let mut issues = Vec::new();
    let mut templates = BTreeMap::new();
    let mut skipped = Vec::new();
    for language in ctx.languages.iter() {
        match read_template(ctx, language, &sheet.name) {
            Ok(Some(text)) => {
                templates.insert(language.to_string(), text);
            }
            Ok(None) => {
                if ctx.verbose {
                    eprintln!(
                        "{} No {} template for {}, skipping",
                        "warning:".bold().yellow(),
                        language,
                        sheet.name
                    );
                }
                skipped.push(language);
            }
            Err(issue) => {
                issues.push(issue);
                skipped.push(language);
            }
        }
    }

    // A skipped language must not keep the output of an earlier run.
    for language in skipped {
        if let Err(issue) = remove_stale(ctx, &ctx.output_path(language, &sheet.name)) {
            issues.push(issue);
        }
    }

    // Translations go into XML text, so they are escaped before substitution.
    let table = sheet.table.map_values(|value| escape_text(value).into_owned());
    let filled = fill_templates(&table, &templates);

    let mut outputs_written = 0;
    for (language, filled) in filled {
        let path = ctx.output_path(&language, &sheet.name);
        match write_output(ctx, &path, &filled.text) {
            Ok(()) => outputs_written += 1,
            Err(issue) => {
                issues.push(issue);
                continue;
            }
        }
        if !filled.is_complete() {
            issues.push(Issue::UnresolvedPlaceholder(UnresolvedPlaceholderIssue {
                file_path: display_path(ctx, &path),
                document: sheet.name.clone(),
                language,
                keys: filled.unresolved.into_iter().collect(),
            }));
        }
    }

    SheetOutcome {
        outputs_written,
        issues,
    }
}

/// Read a rendered template; `None` when the language has no template.
fn read_template(
    ctx: &ProjectContext,
    language: &str,
    document: &str,
) -> Result<Option<String>, Issue> {
    let path = ctx.template_path(language, document);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Issue::ReadError(ReadErrorIssue {
                file_path: display_path(ctx, &path),
                language: language.to_string(),
                error: e.to_string(),
            }));
        }
    };
    String::from_utf8(bytes).map(Some).map_err(|e| {
        Issue::DecodeError(DecodeErrorIssue {
            file_path: display_path(ctx, &path),
            language: language.to_string(),
            error: e.to_string(),
        })
    })
}
