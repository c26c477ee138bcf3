//! Shared in-memory element tree.
//!
//! A [`Document`] owns every element in an arena keyed by [`NodeId`]. Handles
//! are cheap to clone and can be shared across threads; all mutation goes
//! through a single `RwLock`.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::debug;

use crate::element::{ElementData, NodeId};
use crate::event::{Dispatch, Event, EventKind, Handler, ListenerId};

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

struct DocumentInner {
    body: NodeId,
    nodes: HashMap<NodeId, ElementData>,
    listeners: HashMap<NodeId, Vec<Listener>>,
    next_listener: u64,
}

impl DocumentInner {
    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(&node).and_then(|el| el.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get_mut(&node).and_then(|el| el.parent.take());
        if let Some(parent) = parent {
            if let Some(parent_el) = self.nodes.get_mut(&parent) {
                parent_el.children.retain(|c| *c != node);
            }
        }
    }

    fn collect_subtree(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        if let Some(el) = self.nodes.get(&node) {
            for child in &el.children {
                self.collect_subtree(*child, out);
            }
        }
    }
}

/// Handle to an element tree.
///
/// # Example
///
/// ```ignore
/// let doc = Document::new();
/// let form = doc.create_element("form");
/// doc.append_child(doc.body(), form);
/// assert_eq!(doc.children(doc.body()), vec![form]);
/// ```
#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

/// Non-owning handle, for listeners that must not keep their document alive.
#[derive(Clone)]
pub struct WeakDocument {
    inner: Weak<RwLock<DocumentInner>>,
}

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Document")
            .field("body", &inner.body)
            .field("nodes", &inner.nodes.len())
            .finish()
    }
}

impl Document {
    /// Create an empty document containing only a `body` element.
    pub fn new() -> Self {
        let body = NodeId::generate();
        let mut nodes = HashMap::new();
        nodes.insert(body, ElementData::new("body"));
        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                body,
                nodes,
                listeners: HashMap::new(),
                next_listener: 0,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn body(&self) -> NodeId {
        self.read().body
    }

    /// Number of elements currently in the document, `body` included.
    pub fn len(&self) -> usize {
        self.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    // =========================================================================
    // Tree
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let id = NodeId::generate();
        self.write().nodes.insert(id, ElementData::new(tag));
        id
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    ///
    /// Returns false if either node is missing or the move would create a cycle.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> bool {
        let mut inner = self.write();
        if !inner.nodes.contains_key(&parent) || !inner.nodes.contains_key(&child) {
            return false;
        }
        if inner.is_ancestor(child, parent) {
            return false;
        }

        inner.detach(child);
        if let Some(el) = inner.nodes.get_mut(&child) {
            el.parent = Some(parent);
        }
        if let Some(el) = inner.nodes.get_mut(&parent) {
            el.children.push(child);
        }
        true
    }

    /// Detach `node` from its parent and drop it and all of its descendants,
    /// together with their listeners.
    ///
    /// Returns false if the node does not exist. The body cannot be removed.
    pub fn remove(&self, node: NodeId) -> bool {
        let mut inner = self.write();
        if node == inner.body || !inner.nodes.contains_key(&node) {
            return false;
        }

        inner.detach(node);
        let mut subtree = Vec::new();
        inner.collect_subtree(node, &mut subtree);
        for id in &subtree {
            inner.nodes.remove(id);
            inner.listeners.remove(id);
        }
        debug!("removed {node} ({} element(s))", subtree.len());
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.read().nodes.contains_key(&node)
    }

    /// Whether `node` is reachable from the body.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let inner = self.read();
        inner.nodes.contains_key(&node) && inner.is_ancestor(inner.body, node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.read().nodes.get(&node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.read()
            .nodes
            .get(&node)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    /// All descendants of `node` in document order, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let inner = self.read();
        let mut out = Vec::new();
        inner.collect_subtree(node, &mut out);
        if !out.is_empty() {
            out.remove(0);
        }
        out.retain(|id| inner.nodes.contains_key(id));
        out
    }

    /// Descendants of `node` with the given tag, in document order.
    pub fn query_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.descendants(node)
            .into_iter()
            .filter(|id| self.tag(*id).as_deref() == Some(tag.as_str()))
            .collect()
    }

    /// Descendants of `node` carrying the given class, in document order.
    pub fn query_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Find a connected element by its `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let body = self.body();
        std::iter::once(body)
            .chain(self.descendants(body))
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    /// Snapshot of an element.
    pub fn element(&self, node: NodeId) -> Option<ElementData> {
        self.read().nodes.get(&node).cloned()
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.read().nodes.get(&node).map(|el| el.tag.clone())
    }

    // =========================================================================
    // Attributes & properties
    // =========================================================================

    pub fn add_class(&self, node: NodeId, class_names: &str) -> bool {
        self.update(node, |el| el.add_class(class_names))
    }

    pub fn remove_class(&self, node: NodeId, class: &str) -> bool {
        self.update(node, |el| el.remove_class(class))
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.read()
            .nodes
            .get(&node)
            .is_some_and(|el| el.has_class(class))
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.read()
            .nodes
            .get(&node)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(node, |el| {
            el.attributes.insert(name.to_ascii_lowercase(), value);
        })
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.read()
            .nodes
            .get(&node)
            .and_then(|el| el.attributes.get(&name.to_ascii_lowercase()).cloned())
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> bool {
        self.update(node, |el| {
            el.attributes.remove(&name.to_ascii_lowercase());
        })
    }

    /// Set the live `value` property. The `value` attribute is left alone.
    pub fn set_value(&self, node: NodeId, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(node, |el| el.value = Some(value))
    }

    /// The live value, falling back to the `value` attribute.
    pub fn value(&self, node: NodeId) -> Option<String> {
        self.read()
            .nodes
            .get(&node)
            .and_then(|el| el.effective_value().map(str::to_string))
    }

    pub fn set_text(&self, node: NodeId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(node, |el| el.text = Some(text))
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.read().nodes.get(&node).and_then(|el| el.text.clone())
    }

    fn update(&self, node: NodeId, f: impl FnOnce(&mut ElementData)) -> bool {
        match self.write().nodes.get_mut(&node) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a listener for `kind` events reaching `node`.
    ///
    /// Returns `None` if the node does not exist.
    pub fn add_listener<F>(&self, node: NodeId, kind: EventKind, handler: F) -> Option<ListenerId>
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        let mut inner = self.write();
        if !inner.nodes.contains_key(&node) {
            return None;
        }
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.listeners.entry(node).or_default().push(Listener {
            id,
            kind,
            handler: Arc::new(handler),
        });
        Some(id)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.write();
        for listeners in inner.listeners.values_mut() {
            if let Some(pos) = listeners.iter().position(|l| l.id == id) {
                listeners.remove(pos);
                return true;
            }
        }
        false
    }

    /// Dispatch an event on `target` and bubble it up to the root.
    ///
    /// Handlers run without the document lock held, so they are free to read
    /// and mutate the document.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> Dispatch {
        let mut path = Vec::new();
        {
            let inner = self.read();
            let mut current = inner.nodes.contains_key(&target).then_some(target);
            while let Some(node) = current {
                path.push(node);
                current = inner.nodes.get(&node).and_then(|el| el.parent);
            }
        }

        let mut event = Event::new(kind, target);
        let mut delivered = 0;
        for node in path {
            let handlers: Vec<Handler> = self
                .read()
                .listeners
                .get(&node)
                .map(|ls| {
                    ls.iter()
                        .filter(|l| l.kind == kind)
                        .map(|l| Arc::clone(&l.handler))
                        .collect()
                })
                .unwrap_or_default();

            event.set_current_target(node);
            for handler in handlers {
                handler(&mut event);
                delivered += 1;
            }
            if event.propagation_stopped() {
                break;
            }
        }

        debug!(
            "dispatched {} on {target}: {delivered} listener(s), default prevented: {}",
            kind.name(),
            event.default_prevented()
        );
        Dispatch::new(delivered, event.default_prevented())
    }
}
