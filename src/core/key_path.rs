//! Path-derived keys and the pre-order tree walker that computes them.
//!
//! Every node of a [`TreeValue`] gets a [`KeyPath`] built from the object keys
//! and array indices leading to it, e.g. `PAGE.BUTTONS.0.BTN_LBL`. Keys are
//! recomputed on each walk and never stored in the tree.

use std::fmt;

use super::tree::TreeValue;

/// Dot-separated position of a node inside a tree.
///
/// Object keys containing `.` or `\` are backslash-escaped, so two distinct
/// positions never share a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the object member `key` below this node.
    pub fn child_key(&self, key: &str) -> Self {
        let segment = escape_segment(key);
        self.join(&segment)
    }

    /// Path of the array element `index` below this node.
    pub fn child_index(&self, index: usize) -> Self {
        self.join(&index.to_string())
    }

    fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            KeyPath(segment.to_string())
        } else {
            KeyPath(format!("{}.{}", self.0, segment))
        }
    }

    /// Whether `${path}` can be found again verbatim in rendered text.
    pub fn is_placeholder_safe(&self) -> bool {
        !self.0.is_empty() && !self.0.contains(['$', '{', '}'])
    }

    /// The `${path}` marker substituted for a templated value.
    pub fn placeholder(&self) -> String {
        placeholder(&self.0)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn placeholder(key: &str) -> String {
    format!("${{{}}}", key)
}

fn escape_segment(key: &str) -> String {
    if !key.contains(['.', '\\']) {
        return key.to_string();
    }
    let mut escaped = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c == '.' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// What a visitor sees at each node.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    pub path: &'a KeyPath,
    /// Nearest enclosing object key. Array elements inherit the key the
    /// array is stored under; the root has none.
    pub name: Option<&'a str>,
}

/// Hooks called by [`walk`], one per [`TreeValue`] variant.
pub trait TreeVisitor {
    fn on_object(&mut self, _node: Node<'_>, _len: usize) {}

    fn on_array(&mut self, _node: Node<'_>, _len: usize) {}

    fn on_scalar(&mut self, node: Node<'_>, value: &mut String);
}

/// Visit every node of `tree` in pre-order.
///
/// Object members are visited in insertion order and array elements in index
/// order. The walker itself never changes the tree; `on_scalar` may.
pub fn walk<V: TreeVisitor + ?Sized>(tree: &mut TreeValue, visitor: &mut V) {
    walk_node(tree, &KeyPath::root(), None, visitor);
}

fn walk_node<V: TreeVisitor + ?Sized>(
    value: &mut TreeValue,
    path: &KeyPath,
    name: Option<&str>,
    visitor: &mut V,
) {
    match value {
        TreeValue::Object(map) => {
            visitor.on_object(Node { path, name }, map.len());
            for (key, child) in map.iter_mut() {
                let child_path = path.child_key(key);
                walk_node(child, &child_path, Some(key.as_str()), visitor);
            }
        }
        TreeValue::Array(items) => {
            visitor.on_array(Node { path, name }, items.len());
            for (index, item) in items.iter_mut().enumerate() {
                let child_path = path.child_index(index);
                walk_node(item, &child_path, name, visitor);
            }
        }
        TreeValue::Scalar(text) => visitor.on_scalar(Node { path, name }, text),
    }
}
