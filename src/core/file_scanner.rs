//! Discovery of per-language input documents.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use walkdir::WalkDir;

use super::language::LanguageSet;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Document files found for one language, keyed by logical document name
/// (the file stem).
pub type LanguageDocuments = BTreeMap<String, PathBuf>;

/// Result of scanning all language directories.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Language code to its documents.
    pub by_language: BTreeMap<String, LanguageDocuments>,
    /// Entries that could not be accessed or were shadowed by a same-named file.
    pub skipped_count: usize,
}

impl ScanResult {
    /// Regroup by logical document: name -> language -> path.
    pub fn by_document(&self) -> BTreeMap<String, BTreeMap<String, PathBuf>> {
        let mut documents: BTreeMap<String, BTreeMap<String, PathBuf>> = BTreeMap::new();
        for (language, files) in &self.by_language {
            for (name, path) in files {
                documents
                    .entry(name.clone())
                    .or_default()
                    .insert(language.clone(), path.clone());
            }
        }
        documents
    }

    pub fn file_count(&self) -> usize {
        self.by_language.values().map(BTreeMap::len).sum()
    }
}

/// Scan `<root>/<LANG>` for every language in parallel.
///
/// A missing language directory is not an error; the language simply has no
/// documents. When two files in one language share a stem, the first in path
/// order wins.
pub fn scan_documents(
    root: &Path,
    languages: &LanguageSet,
    pattern: &Pattern,
    verbose: bool,
) -> ScanResult {
    let scanned: Vec<(String, LanguageDocuments, usize)> = languages
        .as_slice()
        .par_iter()
        .map(|language| {
            let (files, skipped) = scan_language(&root.join(language), pattern, verbose);
            (language.clone(), files, skipped)
        })
        .collect();

    let mut result = ScanResult::default();
    for (language, files, skipped) in scanned {
        result.skipped_count += skipped;
        result.by_language.insert(language, files);
    }
    result
}

fn scan_language(dir: &Path, pattern: &Pattern, verbose: bool) -> (LanguageDocuments, usize) {
    let mut files = LanguageDocuments::new();
    let mut skipped_count = 0;

    if !dir.is_dir() {
        if verbose {
            eprintln!(
                "{} Language directory does not exist: {}",
                "warning:".bold().yellow(),
                dir.display()
            );
        }
        return (files, skipped_count);
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_document(path, pattern) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if let Some(existing) = files.get(name) {
            skipped_count += 1;
            if verbose {
                eprintln!(
                    "{} {} has the same document name as {}, skipping",
                    "warning:".bold().yellow(),
                    path.display(),
                    existing.display()
                );
            }
            continue;
        }
        files.insert(name.to_string(), path.to_path_buf());
    }

    (files, skipped_count)
}

fn is_document(path: &Path, pattern: &Pattern) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| pattern.matches_with(name, MATCH_OPTIONS))
}
