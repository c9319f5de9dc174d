//! Issue types for per-document failures.
//!
//! Every issue describes one (document, language) unit that was skipped or
//! finished incompletely. Issues never abort sibling units; they are
//! collected and reported after the command finishes.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ReadError,
    DecodeError,
    ParseError,
    WriteError,
    UnresolvedPlaceholder,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ReadError => write!(f, "read-error"),
            Rule::DecodeError => write!(f, "decode-error"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::WriteError => write!(f, "write-error"),
            Rule::UnresolvedPlaceholder => write!(f, "unresolved-placeholder"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A document file could not be read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub language: String,
    pub error: String,
}

/// A document's bytes are not valid in the expected encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecodeErrorIssue {
    pub file_path: String,
    pub language: String,
    pub error: String,
}

/// A document's markup could not be parsed into a tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub language: String,
    pub error: String,
}

/// An output file (template, document, snapshot) could not be written.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WriteErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// A generated document still contains placeholders without a translation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnresolvedPlaceholderIssue {
    pub file_path: String,
    pub document: String,
    pub language: String,
    pub keys: Vec<String>,
}

macro_rules! issue_kind {
    ($issue:ty, $severity:expr, $rule:expr) => {
        impl $issue {
            pub fn severity() -> Severity {
                $severity
            }

            pub fn rule() -> Rule {
                $rule
            }
        }
    };
}

issue_kind!(ReadErrorIssue, Severity::Error, Rule::ReadError);
issue_kind!(DecodeErrorIssue, Severity::Error, Rule::DecodeError);
issue_kind!(ParseErrorIssue, Severity::Error, Rule::ParseError);
issue_kind!(WriteErrorIssue, Severity::Error, Rule::WriteError);
issue_kind!(
    UnresolvedPlaceholderIssue,
    Severity::Warning,
    Rule::UnresolvedPlaceholder
);

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ReadError(ReadErrorIssue),
    DecodeError(DecodeErrorIssue),
    ParseError(ParseErrorIssue),
    WriteError(WriteErrorIssue),
    UnresolvedPlaceholder(UnresolvedPlaceholderIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    /// Sort by file, then rule, then message, for stable output.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File the issue is about.
    fn file_path(&self) -> &str;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ReadErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("cannot read {} document", self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for DecodeErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("{} document is not valid UTF-8", self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for ParseErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("cannot parse {} document", self.language)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for WriteErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        "cannot write file".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.error.clone())
    }
}

impl Report for UnresolvedPlaceholderIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!(
            "{} untranslated {} in {} ({})",
            self.keys.len(),
            if self.keys.len() == 1 { "label" } else { "labels" },
            self.document,
            self.language
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.keys.join(", "))
    }
}
