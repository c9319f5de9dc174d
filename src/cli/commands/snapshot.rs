//! `snapshot`: per-language `.properties` listings of document labels.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use super::{
    CommandResult, CommandSummary, SnapshotSummary,
    helper::{finish, read_document, write_output},
};
use crate::{
    cli::args::SnapshotCommand,
    core::{
        ExtractionPolicy, ProjectContext, extract, file_scanner::scan_documents,
        properties::write_properties,
    },
    issues::Issue,
};

pub fn snapshot(cmd: SnapshotCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    run_snapshot(&ctx)
}

pub fn run_snapshot(ctx: &ProjectContext) -> Result<CommandResult> {
    let scan = scan_documents(
        &ctx.input_root(),
        &ctx.languages,
        &ctx.document_pattern,
        ctx.verbose,
    );

    let units: Vec<(&str, &str, &Path)> = scan
        .by_language
        .iter()
        .flat_map(|(language, files)| {
            files
                .iter()
                .map(move |(name, path)| (language.as_str(), name.as_str(), path.as_path()))
        })
        .collect();

    let outcomes: Vec<Result<usize, Issue>> = units
        .par_iter()
        .map(|&(language, name, path)| snapshot_unit(ctx, language, name, path))
        .collect();

    let mut issues = Vec::new();
    let mut file_count = 0;
    let mut label_count = 0;
    for outcome in outcomes {
        match outcome {
            Ok(labels) => {
                file_count += 1;
                label_count += labels;
            }
            Err(issue) => issues.push(issue),
        }
    }

    let summary = SnapshotSummary {
        file_count,
        label_count,
        properties_root: ctx.properties_root(),
        skipped_files: scan.skipped_count,
    };
    Ok(finish(CommandSummary::Snapshot(summary), issues))
}

/// Snapshot one (language, document) unit, returning its label count.
fn snapshot_unit(
    ctx: &ProjectContext,
    language: &str,
    name: &str,
    path: &Path,
) -> Result<usize, Issue> {
    let tree = read_document(ctx, path, language)?;
    let extraction = extract(tree, ExtractionPolicy::ByFieldSuffix);
    let text = write_properties(
        &format!("{} labels ({})", name, language),
        &extraction.labels,
    );
    write_output(ctx, &ctx.properties_path(language, name), &text)?;
    Ok(extraction.labels.len())
}
