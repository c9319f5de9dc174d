use std::collections::HashSet;

use anyhow::{Result, bail};

/// The ordered, fixed list of languages every document is handled in.
///
/// The order is the column order of every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    /// Build a set, rejecting an empty list, blank codes and duplicates.
    pub fn new<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            bail!("At least one language must be configured.");
        }

        let mut seen = HashSet::new();
        for code in &codes {
            if code.trim().is_empty() {
                bail!("Language codes must not be blank.");
            }
            if code.contains(['/', '\\']) {
                bail!("Invalid language code \"{}\": it is used as a directory name.", code);
            }
            if !seen.insert(code.as_str()) {
                bail!("Duplicate language code \"{}\".", code);
            }
        }

        Ok(Self { codes })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// Column of `code` among the languages.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }
}
