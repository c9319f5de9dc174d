//! Java `.properties` output for reference label snapshots.

use std::fmt::Write as _;

use super::extract::LabelEntry;

/// Render labels as an ISO-8859-1 safe `.properties` file, sorted by key.
///
/// Escaping follows `java.util.Properties#store`: separators and comment
/// characters get a backslash, control characters use their short escapes,
/// everything outside printable ASCII becomes `\uXXXX` (UTF-16 code units).
pub fn write_properties(comment: &str, labels: &[LabelEntry]) -> String {
    let mut sorted: Vec<&LabelEntry> = labels.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut out = String::new();
    for line in comment.lines() {
        out.push('#');
        out.push_str(line);
        out.push('\n');
    }
    for label in sorted {
        out.push_str(&escape(&label.key, true));
        out.push('=');
        out.push_str(&escape(&label.value, false));
        out.push('\n');
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        match c {
            ' ' if index == 0 || is_key => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
    out
}
