//! `load`: input documents to templates and the translation workbook.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use anyhow::Result;
use rayon::prelude::*;

use super::{
    CommandResult, CommandSummary, LoadSummary,
    helper::{clean_dir, display_path, finish, read_document, remove_stale, write_output},
};
use crate::{
    cli::args::LoadCommand,
    core::{
        ProjectContext, Sheet, Workbook, file_scanner::scan_documents, parsers::xml::render_tree,
        pivot, reconcile, workbook::save_workbook,
    },
    issues::{Issue, WriteErrorIssue},
};

pub fn load(cmd: LoadCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.common)?;
    run_load(&ctx, cmd.clean)
}

/// Everything one logical document produced.
struct DocumentOutcome {
    sheet: Option<Sheet>,
    templates_written: usize,
    issues: Vec<Issue>,
}

pub fn run_load(ctx: &ProjectContext, clean: bool) -> Result<CommandResult> {
    if clean {
        clean_dir(&ctx.template_root())?;
    }

    let scan = scan_documents(
        &ctx.input_root(),
        &ctx.languages,
        &ctx.document_pattern,
        ctx.verbose,
    );
    let documents = scan.by_document();

    let outcomes: Vec<DocumentOutcome> = documents
        .par_iter()
        .map(|(name, paths)| load_document(ctx, name, paths))
        .collect();

    let mut issues = Vec::new();
    let mut sheets = Vec::new();
    let mut template_count = 0;
    for outcome in outcomes {
        issues.extend(outcome.issues);
        template_count += outcome.templates_written;
        sheets.extend(outcome.sheet);
    }
    sheets.sort_by(|a, b| a.name.cmp(&b.name));

    let workbook = Workbook { sheets };
    let workbook_path = ctx.workbook_path();
    save_workbook(&workbook_path, &workbook)?;

    let summary = LoadSummary {
        document_count: documents.len(),
        input_count: scan.file_count(),
        template_count,
        label_count: workbook.label_count(),
        workbook_path,
        skipped_files: scan.skipped_count,
    };
    Ok(finish(CommandSummary::Load(summary), issues))
}

fn load_document(
    ctx: &ProjectContext,
    name: &str,
    paths: &BTreeMap<String, PathBuf>,
) -> DocumentOutcome {
    let mut issues = Vec::new();
    let mut trees = BTreeMap::new();
    for (language, path) in paths {
        match read_document(ctx, path, language) {
            Ok(tree) => {
                trees.insert(language.clone(), tree);
            }
            Err(issue) => issues.push(issue),
        }
    }

    let mut sheet = None;
    let mut templates_written = 0;
    let mut attempted = BTreeSet::new();
    if !trees.is_empty() {
        let reconciled = reconcile(trees, &ctx.languages);

        for (language, template) in &reconciled.templates {
            attempted.insert(language.clone());
            let path = ctx.template_path(language, name);
            let written = render_tree(template)
                .map_err(|e| {
                    Issue::WriteError(WriteErrorIssue {
                        file_path: display_path(ctx, &path),
                        error: format!("{:#}", e),
                    })
                })
                .and_then(|text| write_output(ctx, &path, &text));
            match written {
                Ok(()) => templates_written += 1,
                Err(issue) => issues.push(issue),
            }
        }

        sheet = Some(Sheet {
            name: name.to_string(),
            table: pivot(reconciled.contents, &ctx.languages),
        });
    }

    // A template from an earlier run would let `generate` fill a unit that
    // failed or disappeared this time.
    for language in ctx.languages.iter() {
        if attempted.contains(language) {
            continue;
        }
        if let Err(issue) = remove_stale(ctx, &ctx.template_path(language, name)) {
            issues.push(issue);
        }
    }

    DocumentOutcome {
        sheet,
        templates_written,
        issues,
    }
}
