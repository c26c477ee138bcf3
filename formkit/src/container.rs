//! Container - owns an element and the widgets constructed inside it.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use webdom::{Document, NodeId};

use crate::widget::{Mounted, Registry, SharedRegistry, Widget, lock};

/// Configuration for a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Tag of the container element. Defaults to `div`.
    pub element: String,
    /// Additional CSS class(es), whitespace separated.
    pub class_name: Option<String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            element: "div".to_string(),
            class_name: None,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(mut self, tag: impl Into<String>) -> Self {
        self.element = tag.into();
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// Owns one element and the ordered list of widgets appended to it.
///
/// The list order matches the order of the widgets' elements under the
/// container element. Every widget in the list is attached under the
/// container, and removing it (through its [`Mounted`] handle, [`clear`],
/// or [`remove`]) takes it out of both exactly once.
///
/// [`clear`]: Container::clear
/// [`remove`]: Widget::remove
///
/// # Example
///
/// ```ignore
/// let doc = Document::new();
/// let container = Container::new(&doc, doc.body(), ContainerConfig::default());
///
/// let first = container.append(|doc, parent| Container::new(doc, parent, ContainerConfig::default()))?;
/// let second = container.append(|doc, parent| Container::new(doc, parent, ContainerConfig::default()))?;
/// assert_eq!(container.len(), 2);
///
/// first.remove();
/// assert_eq!(container.len(), 1);
/// ```
pub struct Container {
    document: Document,
    element: NodeId,
    registry: SharedRegistry,
    removed: AtomicBool,
}

impl Container {
    /// Create the container element and append it to `parent`.
    pub fn new(document: &Document, parent: NodeId, config: ContainerConfig) -> Self {
        let element = document.create_element(&config.element);
        if let Some(class_name) = &config.class_name {
            document.add_class(element, class_name);
        }
        if !document.append_child(parent, element) {
            warn!("container {element} created under missing parent {parent}");
        }

        Self {
            document: document.clone(),
            element,
            registry: Arc::new(Mutex::new(Registry::default())),
            removed: AtomicBool::new(false),
        }
    }

    /// Construct a widget inside this container and keep track of it.
    ///
    /// `ctor` receives the document and the container element, which it must
    /// use as the widget's parent. Returns `None` without calling `ctor` once
    /// the container has been removed.
    pub fn append<W, F>(&self, ctor: F) -> Option<Mounted<W>>
    where
        W: Widget + 'static,
        F: FnOnce(&Document, NodeId) -> W,
    {
        if self.is_removed() || !self.document.contains(self.element) {
            warn!("append on removed container {}", self.element);
            return None;
        }
        let widget = ctor(&self.document, self.element);
        debug!("{} appended {}", self.element, widget.element());
        Some(Mounted::register(widget, &self.registry))
    }

    /// Replace everything in the container with a single new widget.
    pub fn set<W, F>(&self, ctor: F) -> Option<Mounted<W>>
    where
        W: Widget + 'static,
        F: FnOnce(&Document, NodeId) -> W,
    {
        self.clear();
        self.append(ctor)
    }

    /// Remove every widget in the container.
    pub fn clear(&self) -> &Self {
        // Drain first: removing a child must not observe the list mid-iteration.
        let widgets = lock(&self.registry).drain();
        for widget in widgets {
            widget.remove();
        }
        self
    }

    /// Number of widgets currently in the container.
    pub fn len(&self) -> usize {
        lock(&self.registry).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of the contained widgets, in insertion order.
    pub fn child_elements(&self) -> Vec<NodeId> {
        lock(&self.registry).elements()
    }

    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }
}

impl Widget for Container {
    fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self) -> NodeId {
        self.element
    }

    /// Remove all children depth-first, then detach the container element.
    fn remove(&self) {
        if self.removed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.clear();
        self.document.remove(self.element);
        debug!("container {} removed", self.element);
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("element", &self.element)
            .field("children", &self.len())
            .field("removed", &self.is_removed())
            .finish()
    }
}
