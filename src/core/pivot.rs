//! Pivot per-language labels into one row per key.

use std::collections::{BTreeMap, HashMap, btree_map::Entry};

use super::language::LanguageSet;

/// A label value tagged with the language it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content {
    pub language: String,
    pub key: String,
    pub value: String,
}

impl Content {
    pub fn new(
        language: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: String,
    /// Language code to value; languages without a value are absent.
    pub values: BTreeMap<String, String>,
}

impl TableRow {
    pub fn get(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }
}

/// One row per key, sorted by key, one column per configured language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    languages: LanguageSet,
    rows: Vec<TableRow>,
}

impl Table {
    /// Build a table from rows in any order. Values for languages outside
    /// `languages` are dropped.
    pub fn from_rows(languages: LanguageSet, mut rows: Vec<TableRow>) -> Self {
        for row in &mut rows {
            row.values.retain(|language, _| languages.contains(language));
        }
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Self { languages, rows }
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Cells of `row` in language order.
    pub fn cells<'a>(&'a self, row: &'a TableRow) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.languages.iter().map(move |language| row.get(language))
    }

    /// Every `key -> value` pair available in `language`.
    pub fn values_for(&self, language: &str) -> HashMap<String, String> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.get(language)
                    .map(|value| (row.key.clone(), value.to_string()))
            })
            .collect()
    }

    /// Transform every cell value, keeping keys and shape.
    pub fn map_values<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        for row in &mut self.rows {
            for value in row.values.values_mut() {
                *value = f(value);
            }
        }
        self
    }
}

/// Group `contents` by key into a [`Table`].
///
/// The result only depends on the multiset of contents: rows are sorted by
/// key, columns follow `languages`, and if one language has two different
/// values for a key the smallest is kept.
pub fn pivot<I>(contents: I, languages: &LanguageSet) -> Table
where
    I: IntoIterator<Item = Content>,
{
    let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for content in contents {
        if !languages.contains(&content.language) {
            continue;
        }
        let row = grouped.entry(content.key).or_default();
        match row.entry(content.language) {
            Entry::Vacant(entry) => {
                entry.insert(content.value);
            }
            Entry::Occupied(mut entry) => {
                if content.value < *entry.get() {
                    entry.insert(content.value);
                }
            }
        }
    }

    Table {
        languages: languages.clone(),
        rows: grouped
            .into_iter()
            .map(|(key, values)| TableRow { key, values })
            .collect(),
    }
}
