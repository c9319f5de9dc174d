//! Per-document orchestration across the configured languages.
//!
//! `reconcile` runs templating extraction for every language a document is
//! available in and merges the labels into [`Content`] triples; `generate`
//! goes the other way, from a translated [`Table`] and rendered templates to
//! final per-language texts.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::{
    extract::{ExtractionPolicy, extract},
    language::LanguageSet,
    pivot::{Content, Table},
    template::{Filled, fill},
    tree::TreeValue,
};

/// Templated trees and the labels they were stripped of.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub templates: BTreeMap<String, TreeValue>,
    /// Labels of every language, grouped by language in configured order.
    pub contents: Vec<Content>,
}

/// Extract and template one logical document in each language it exists in.
///
/// Languages missing from `documents` are simply absent from the result;
/// documents for languages outside `languages` are ignored.
pub fn reconcile(documents: BTreeMap<String, TreeValue>, languages: &LanguageSet) -> Reconciled {
    let mut extracted: Vec<(usize, String, _)> = documents
        .into_par_iter()
        .filter_map(|(language, tree)| {
            let column = languages.position(&language)?;
            let extraction = extract(tree, ExtractionPolicy::ByTextNode);
            Some((column, language, extraction))
        })
        .collect();
    extracted.sort_by_key(|(column, _, _)| *column);

    let mut templates = BTreeMap::new();
    let mut contents = Vec::new();
    for (_, language, extraction) in extracted {
        contents.extend(
            extraction
                .labels
                .into_iter()
                .map(|label| Content::new(language.as_str(), label.key, label.value)),
        );
        templates.insert(language, extraction.tree);
    }

    Reconciled {
        templates,
        contents,
    }
}

/// Fill each language's template text with that language's column of `table`.
///
/// Languages without a template are skipped; rows without a value for a
/// language leave their placeholder unresolved.
pub fn generate<S>(table: &Table, templates: &BTreeMap<String, S>) -> BTreeMap<String, Filled>
where
    S: AsRef<str> + Sync,
{
    table
        .languages()
        .as_slice()
        .par_iter()
        .filter_map(|language| {
            let template = templates.get(language)?;
            let values = table.values_for(language);
            Some((language.clone(), fill(template.as_ref(), &values)))
        })
        .collect()
}
