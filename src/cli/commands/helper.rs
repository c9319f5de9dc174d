use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    core::{ProjectContext, TreeValue, parsers::xml::parse_tree},
    issues::{DecodeErrorIssue, Issue, ParseErrorIssue, ReadErrorIssue, Severity, WriteErrorIssue},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
    }
}

/// Path shown in reports: relative to the project root when possible.
pub fn display_path(ctx: &ProjectContext, path: &Path) -> String {
    path.strip_prefix(&ctx.root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches("./")
        .to_string()
}

/// Read, decode and parse one input document.
///
/// Each failure becomes the issue for this (document, language) unit.
pub fn read_document(
    ctx: &ProjectContext,
    path: &Path,
    language: &str,
) -> Result<TreeValue, Issue> {
    let file_path = display_path(ctx, path);

    let bytes = fs::read(path).map_err(|e| {
        Issue::ReadError(ReadErrorIssue {
            file_path: file_path.clone(),
            language: language.to_string(),
            error: e.to_string(),
        })
    })?;

    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let text = std::str::from_utf8(body).map_err(|e| {
        Issue::DecodeError(DecodeErrorIssue {
            file_path: file_path.clone(),
            language: language.to_string(),
            error: e.to_string(),
        })
    })?;

    parse_tree(text).map_err(|e| {
        Issue::ParseError(ParseErrorIssue {
            file_path,
            language: language.to_string(),
            error: format!("{:#}", e),
        })
    })
}

/// Write `content` to `path`, creating parent directories.
pub fn write_output(ctx: &ProjectContext, path: &Path, content: &str) -> Result<(), Issue> {
    let written = match path.parent() {
        Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::write(path, content)),
        None => fs::write(path, content),
    };
    written.map_err(|e| {
        Issue::WriteError(WriteErrorIssue {
            file_path: display_path(ctx, path),
            error: e.to_string(),
        })
    })
}

/// Remove a file an earlier run generated for a unit that produced nothing
/// this time. A missing file is fine.
pub fn remove_stale(ctx: &ProjectContext, path: &Path) -> Result<(), Issue> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(()),
        Err(e) => Err(Issue::WriteError(WriteErrorIssue {
            file_path: display_path(ctx, path),
            error: format!("cannot remove stale file: {}", e),
        })),
    }
}

/// Remove a generated directory tree before a run. A missing directory is fine.
pub fn clean_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove directory: {}", dir.display()))?;
    }
    Ok(())
}
