//! Label extraction: classify scalar nodes and optionally template them.

use super::{
    key_path::{Node, TreeVisitor, walk},
    tree::TreeValue,
};

/// How translatable nodes are recognised, and whether they get templated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPolicy {
    /// Field names `LBL`, `TITLE`, `BUTTON_LBL` or `content`. Read-only,
    /// used for reference snapshots.
    ByFieldSuffix,
    /// Field names ending in `LBL` or `TITLE`, or XML text nodes (`#text`).
    /// Values are replaced by `${key}` placeholders.
    ByTextNode,
}

impl ExtractionPolicy {
    pub fn is_translatable(self, name: &str) -> bool {
        match self {
            ExtractionPolicy::ByFieldSuffix => {
                matches!(name, "LBL" | "TITLE" | "BUTTON_LBL" | "content")
            }
            ExtractionPolicy::ByTextNode => {
                name.ends_with("LBL") || name.ends_with("TITLE") || name == "#text"
            }
        }
    }

    /// Whether extraction rewrites matched values into placeholders.
    pub fn templates(self) -> bool {
        matches!(self, ExtractionPolicy::ByTextNode)
    }
}

/// One translatable value found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    pub key: String,
    pub value: String,
}

impl LabelEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result of [`extract`]: the (possibly templated) tree and its labels in walk order.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub tree: TreeValue,
    pub labels: Vec<LabelEntry>,
}

/// Collect the labels of `tree` under `policy`.
///
/// With [`ExtractionPolicy::ByTextNode`] every matched scalar is overwritten
/// with its placeholder; with [`ExtractionPolicy::ByFieldSuffix`] the tree is
/// returned untouched. Nodes whose key cannot be written as a placeholder
/// (it contains `$`, `{` or `}`) are never matched.
pub fn extract(mut tree: TreeValue, policy: ExtractionPolicy) -> Extraction {
    let mut collector = LabelCollector {
        policy,
        labels: Vec::new(),
    };
    walk(&mut tree, &mut collector);
    Extraction {
        tree,
        labels: collector.labels,
    }
}

struct LabelCollector {
    policy: ExtractionPolicy,
    labels: Vec<LabelEntry>,
}

impl TreeVisitor for LabelCollector {
    fn on_scalar(&mut self, node: Node<'_>, value: &mut String) {
        let Some(name) = node.name else {
            return;
        };
        if !self.policy.is_translatable(name) || !node.path.is_placeholder_safe() {
            return;
        }

        if self.policy.templates() {
            let original = std::mem::replace(value, node.path.placeholder());
            self.labels.push(LabelEntry::new(node.path.as_str(), original));
        } else {
            self.labels.push(LabelEntry::new(node.path.as_str(), value.clone()));
        }
    }
}
