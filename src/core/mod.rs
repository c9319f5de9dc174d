//! Core engine: tree walking, label extraction, templating and pivoting.
//!
//! ## Module Structure
//!
//! - `tree`: generic document tree (`TreeValue`)
//! - `key_path`: path-derived keys and the pre-order walker
//! - `extract`: label classification policies and templating extraction
//! - `template`: `${key}` placeholder substitution
//! - `pivot`: per-language labels to a key × language table
//! - `reconcile`: per-document orchestration across languages
//! - `workbook`: persisted table file
//! - `properties`: `.properties` snapshot output
//! - `parsers`: XML to tree and back
//! - `file_scanner`: per-language document discovery
//! - `context`: resolved configuration shared by commands

pub mod context;
pub mod extract;
pub mod file_scanner;
pub mod key_path;
pub mod language;
pub mod parsers;
pub mod pivot;
pub mod properties;
pub mod reconcile;
pub mod template;
pub mod tree;
pub mod workbook;

pub use context::ProjectContext;
pub use extract::{Extraction, ExtractionPolicy, LabelEntry, extract};
pub use key_path::{KeyPath, Node, TreeVisitor, walk};
pub use language::LanguageSet;
pub use pivot::{Content, Table, TableRow, pivot};
pub use reconcile::{Reconciled, generate, reconcile};
pub use template::{Filled, fill};
pub use tree::TreeValue;
pub use workbook::{Sheet, Workbook};
