use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an element inside a [`Document`](crate::Document).
///
/// Ids are never reused, so a stale id simply stops resolving once its
/// element has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn generate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Snapshot of a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    // Identity
    pub tag: String,

    // Attributes
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,

    // Live properties (not reflected into attributes)
    /// The `value` property of form controls. `None` until first set.
    pub value: Option<String>,
    pub text: Option<String>,

    // Tree
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            value: None,
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add each whitespace-separated class name not already present.
    pub fn add_class(&mut self, class_names: &str) {
        for class in class_names.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// The effective value: the live property if set, otherwise the `value` attribute.
    pub fn effective_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .or_else(|| self.attributes.get("value").map(String::as_str))
    }
}
