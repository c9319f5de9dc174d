//! XML documents to [`TreeValue`] and back.
//!
//! Mapping:
//! - the document is an object keyed by its root element, plus `?xml` holding
//!   the declaration attributes and `!DOCTYPE` holding the document type
//!   declaration when present;
//! - an element with neither attributes nor child elements is a scalar of its
//!   text;
//! - any other element is an object: attributes as `-name`, child elements by
//!   tag name, text as `#text`;
//! - repeated sibling tags become an array under one key.
//!
//! Text is trimmed, comments and processing instructions are dropped.

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use quick_xml::{
    Reader,
    escape::escape,
    events::{BytesStart, Event},
};

use crate::core::tree::TreeValue;

pub const DECLARATION_KEY: &str = "?xml";
pub const DOCTYPE_KEY: &str = "!DOCTYPE";
pub const TEXT_KEY: &str = "#text";
pub const ATTRIBUTE_PREFIX: char = '-';

const INDENT: &str = "    ";

/// An element whose end tag has not been read yet.
struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: IndexMap<String, TreeValue>,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute =
                attribute.with_context(|| format!("Malformed attribute in <{}>", name))?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = attribute
                .unescape_value()
                .with_context(|| format!("Invalid attribute value for {} in <{}>", key, name))?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            children: IndexMap::new(),
            text: String::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    fn finish(self) -> (String, TreeValue) {
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, TreeValue::Scalar(self.text));
        }

        let mut map = IndexMap::new();
        for (key, value) in self.attributes {
            map.insert(format!("{}{}", ATTRIBUTE_PREFIX, key), TreeValue::Scalar(value));
        }
        map.extend(self.children);
        if !self.text.is_empty() {
            map.insert(TEXT_KEY.to_string(), TreeValue::Scalar(self.text));
        }
        (self.name, TreeValue::Object(map))
    }
}

/// Insert `value` under `name`, collapsing repeated names into an array.
fn insert_child(children: &mut IndexMap<String, TreeValue>, name: String, value: TreeValue) {
    match children.get_mut(&name) {
        None => {
            children.insert(name, value);
        }
        Some(TreeValue::Array(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, TreeValue::Array(Vec::new()));
            *existing = TreeValue::Array(vec![first, value]);
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).context("Element or attribute name is not valid UTF-8")
}

/// Parse XML text into a tree. Unbalanced or otherwise malformed markup fails.
pub fn parse_tree(text: &str) -> Result<TreeValue> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut document: IndexMap<String, TreeValue> = IndexMap::new();
    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("XML error at byte {}", reader.error_position()))?;
        match event {
            Event::Decl(decl) => {
                let mut parts = Vec::new();
                let version = decl.version().context("Malformed XML declaration")?;
                parts.push(format!("version=\"{}\"", String::from_utf8_lossy(&version)));
                if let Some(encoding) = decl.encoding() {
                    let encoding = encoding.context("Malformed XML declaration")?;
                    parts.push(format!("encoding=\"{}\"", String::from_utf8_lossy(&encoding)));
                }
                if let Some(standalone) = decl.standalone() {
                    let standalone = standalone.context("Malformed XML declaration")?;
                    parts.push(format!(
                        "standalone=\"{}\"",
                        String::from_utf8_lossy(&standalone)
                    ));
                }
                document.insert(DECLARATION_KEY.to_string(), TreeValue::Scalar(parts.join(" ")));
            }
            Event::DocType(doctype) => {
                let doctype = doctype.into_inner();
                let doctype =
                    std::str::from_utf8(&doctype).context("DOCTYPE is not valid UTF-8")?;
                document.insert(
                    DOCTYPE_KEY.to_string(),
                    TreeValue::Scalar(doctype.trim().to_string()),
                );
            }
            Event::Start(start) => stack.push(OpenElement::from_start(&start)?),
            Event::Empty(start) => {
                let (name, value) = OpenElement::from_start(&start)?.finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => insert_child(&mut document, name, value),
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    bail!("Unexpected closing tag at byte {}", reader.buffer_position());
                };
                let (name, value) = element.finish();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => insert_child(&mut document, name, value),
                }
            }
            Event::Text(text) => {
                let text = text.unescape().context("Invalid character reference")?;
                match stack.last_mut() {
                    Some(element) => element.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => bail!("Text outside of the root element: \"{}\"", text.trim()),
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                let text = utf8(&data)?;
                if let Some(element) = stack.last_mut() {
                    element.push_text(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = stack.last() {
        bail!("Unclosed element <{}>", element.name);
    }
    if !document.keys().any(|key| !is_prolog_key(key)) {
        bail!("Document has no root element");
    }

    Ok(TreeValue::Object(document))
}

fn is_prolog_key(key: &str) -> bool {
    key == DECLARATION_KEY || key == DOCTYPE_KEY
}

/// Render a tree produced by [`parse_tree`] back to indented XML.
///
/// The top level must be an object; its `?xml` and `!DOCTYPE` entries become
/// the prolog.
pub fn render_tree(tree: &TreeValue) -> Result<String> {
    let TreeValue::Object(document) = tree else {
        bail!("Document root must be an object");
    };

    let mut out = String::new();
    if let Some(TreeValue::Scalar(declaration)) = document.get(DECLARATION_KEY) {
        out.push_str("<?xml ");
        out.push_str(declaration);
        out.push_str("?>\n");
    }
    if let Some(TreeValue::Scalar(doctype)) = document.get(DOCTYPE_KEY) {
        out.push_str("<!DOCTYPE ");
        out.push_str(doctype);
        out.push_str(">\n");
    }
    for (name, value) in document {
        if is_prolog_key(name) {
            continue;
        }
        write_element(&mut out, name, value, 0);
    }
    Ok(out)
}

fn write_element(out: &mut String, name: &str, value: &TreeValue, depth: usize) {
    let indent = INDENT.repeat(depth);
    match value {
        TreeValue::Scalar(text) if text.is_empty() => {
            out.push_str(&format!("{}<{}/>\n", indent, name));
        }
        TreeValue::Scalar(text) => {
            out.push_str(&format!("{}<{}>{}</{}>\n", indent, name, escape(text), name));
        }
        TreeValue::Array(items) => {
            for item in items {
                write_element(out, name, item, depth);
            }
        }
        TreeValue::Object(map) => {
            let mut attributes = String::new();
            let mut text: Option<&str> = None;
            let mut children = Vec::new();
            for (key, child) in map {
                match (key.strip_prefix(ATTRIBUTE_PREFIX), child) {
                    (Some(attribute), TreeValue::Scalar(value)) => {
                        attributes.push_str(&format!(" {}=\"{}\"", attribute, escape(value)));
                    }
                    _ if key == TEXT_KEY => text = child.as_scalar(),
                    _ => children.push((key, child)),
                }
            }

            out.push_str(&format!("{}<{}{}", indent, name, attributes));
            match (text, children.is_empty()) {
                (None, true) => out.push_str("/>\n"),
                (Some(text), true) => {
                    out.push_str(&format!(">{}</{}>\n", escape(text), name));
                }
                (text, false) => {
                    out.push_str(">\n");
                    if let Some(text) = text {
                        out.push_str(&format!("{}{}{}\n", indent, INDENT, escape(text)));
                    }
                    for (key, child) in children {
                        write_element(out, key, child, depth + 1);
                    }
                    out.push_str(&format!("{}</{}>\n", indent, name));
                }
            }
        }
    }
}

/// Escape a value for insertion into rendered XML text or attributes.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text)
}
