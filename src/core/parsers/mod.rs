//! Document parsers.
//!
//! - `xml`: XML documents to `TreeValue` and back (uses quick-xml)

pub mod xml;
