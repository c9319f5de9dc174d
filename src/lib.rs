//! uixml - localization round trip for UI definition documents
//!
//! uixml extracts translatable labels from per-language XML UI documents,
//! replaces them with `${key}` placeholders to produce templates, and pivots
//! the labels into a key × language workbook for translators. The reverse
//! direction fills the templates with the workbook's translations to produce
//! localized documents.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (load, generate, snapshot, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Tree walking, extraction, templating and pivoting
//! - `issues`: Per-document issue types and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
