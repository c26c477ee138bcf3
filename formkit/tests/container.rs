use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formkit::{Container, ContainerConfig, Widget};
use webdom::{Document, NodeId};

/// Widget relying on the default `remove`.
struct Leaf {
    document: Document,
    element: NodeId,
}

impl Leaf {
    fn new(document: &Document, parent: NodeId) -> Self {
        let element = document.create_element("span");
        document.append_child(parent, element);
        Self {
            document: document.clone(),
            element,
        }
    }
}

impl Widget for Leaf {
    fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self) -> NodeId {
        self.element
    }
}

/// Widget counting how often its own `remove` runs.
struct Counted {
    leaf: Leaf,
    removals: Arc<AtomicUsize>,
}

impl Widget for Counted {
    fn document(&self) -> &Document {
        &self.leaf.document
    }

    fn element(&self) -> NodeId {
        self.leaf.element
    }

    fn remove(&self) {
        self.removals.fetch_add(1, Ordering::SeqCst);
        self.leaf.document.remove(self.leaf.element);
    }
}

fn container(doc: &Document) -> Container {
    Container::new(doc, doc.body(), ContainerConfig::default())
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_creates_element_under_parent() {
    let doc = Document::new();
    let c = Container::new(
        &doc,
        doc.body(),
        ContainerConfig::new().element("section").class_name("panel"),
    );

    assert_eq!(doc.children(doc.body()), vec![c.element()]);
    assert_eq!(doc.tag(c.element()).as_deref(), Some("section"));
    assert!(doc.has_class(c.element(), "panel"));
    assert!(c.is_empty());
}

#[test]
fn test_default_element_is_div() {
    let doc = Document::new();
    let c = container(&doc);

    assert_eq!(doc.tag(c.element()).as_deref(), Some("div"));
    assert!(doc.classes(c.element()).is_empty());
}

// ============================================================================
// Append / set
// ============================================================================

#[test]
fn test_append_order_matches_dom_order() {
    let doc = Document::new();
    let c = container(&doc);

    let handles: Vec<_> = (0..5).map(|_| c.append(Leaf::new).unwrap()).collect();
    let elements: Vec<NodeId> = handles.iter().map(|h| h.element()).collect();

    assert_eq!(c.len(), 5);
    assert_eq!(c.child_elements(), elements);
    assert_eq!(doc.children(c.element()), elements);
}

#[test]
fn test_set_leaves_exactly_one_child() {
    let doc = Document::new();
    let c = container(&doc);
    c.append(Leaf::new);
    c.append(Leaf::new);

    let only = c.set(Leaf::new).unwrap();

    assert_eq!(c.len(), 1);
    assert_eq!(doc.children(c.element()), vec![only.element()]);
}

#[test]
fn test_set_on_empty_container() {
    let doc = Document::new();
    let c = container(&doc);

    c.set(Leaf::new);

    assert_eq!(c.len(), 1);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_mounted_remove_unregisters_and_detaches() {
    let doc = Document::new();
    let c = container(&doc);
    let first = c.append(Leaf::new).unwrap();
    let second = c.append(Leaf::new).unwrap();
    let third = c.append(Leaf::new).unwrap();

    second.remove();

    assert_eq!(c.len(), 2);
    assert_eq!(c.child_elements(), vec![first.element(), third.element()]);
    assert_eq!(
        doc.children(c.element()),
        vec![first.element(), third.element()]
    );
    assert!(!doc.contains(second.element()));
    assert!(!second.is_mounted());
    assert!(first.is_mounted());
}

#[test]
fn test_double_remove_is_noop() {
    let doc = Document::new();
    let c = container(&doc);
    let removals = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&removals);
    let handle = c
        .append(move |doc, parent| Counted {
            leaf: Leaf::new(doc, parent),
            removals: counter,
        })
        .unwrap();
    let other = c.append(Leaf::new).unwrap();

    handle.remove();
    handle.remove();
    handle.clone().remove();

    assert_eq!(removals.load(Ordering::SeqCst), 1);
    assert_eq!(c.len(), 1);
    assert!(other.is_mounted());
}

#[test]
fn test_remove_after_clear_is_noop() {
    let doc = Document::new();
    let c = container(&doc);
    let removals = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&removals);
    let handle = c
        .append(move |doc, parent| Counted {
            leaf: Leaf::new(doc, parent),
            removals: counter,
        })
        .unwrap();

    c.clear();
    handle.remove();

    assert_eq!(removals.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clear_removes_all_children() {
    let doc = Document::new();
    let c = container(&doc);
    for _ in 0..4 {
        c.append(Leaf::new);
    }
    assert_eq!(doc.len(), 6);

    c.clear();

    assert!(c.is_empty());
    assert!(doc.children(c.element()).is_empty());
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_clear_falls_back_to_detaching_element() {
    let doc = Document::new();
    let c = container(&doc);
    let leaf = c.append(Leaf::new).unwrap();

    c.clear();

    assert!(!doc.contains(leaf.element()));
}

#[test]
fn test_nested_remove_cascades() {
    let doc = Document::new();
    let outer = container(&doc);
    let inner = outer
        .append(|doc, parent| Container::new(doc, parent, ContainerConfig::default()))
        .unwrap();
    let removals = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let counter = Arc::clone(&removals);
        inner.append(move |doc, parent| Counted {
            leaf: Leaf::new(doc, parent),
            removals: counter,
        });
    }

    outer.remove();

    assert_eq!(removals.load(Ordering::SeqCst), 3);
    assert!(inner.is_removed());
    assert!(outer.is_removed());
    assert!(outer.is_empty());
    assert!(doc.children(doc.body()).is_empty());
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_container_remove_is_idempotent() {
    let doc = Document::new();
    let c = container(&doc);
    c.append(Leaf::new);

    c.remove();
    c.remove();

    assert!(c.is_removed());
    assert!(!doc.contains(c.element()));
}

#[test]
fn test_child_container_removed_through_handle() {
    let doc = Document::new();
    let outer = container(&doc);
    let inner = outer
        .append(|doc, parent| Container::new(doc, parent, ContainerConfig::default()))
        .unwrap();
    inner.append(Leaf::new);

    inner.remove();

    assert!(outer.is_empty());
    assert!(inner.is_removed());
    assert!(doc.children(outer.element()).is_empty());
}

#[test]
fn test_widget_removed_directly_is_dropped_from_container() {
    let doc = Document::new();
    let c = container(&doc);
    let first = c.append(Leaf::new).unwrap();
    let second = c.append(Leaf::new).unwrap();

    second.widget().remove();

    assert_eq!(c.len(), 1);
    assert_eq!(c.child_elements(), vec![first.element()]);
    assert!(!second.is_mounted());
    assert!(first.is_mounted());
}

#[test]
fn test_handle_remove_after_direct_remove_is_noop() {
    let doc = Document::new();
    let c = container(&doc);
    let removals = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&removals);
    let handle = c
        .append(move |doc, parent| Counted {
            leaf: Leaf::new(doc, parent),
            removals: counter,
        })
        .unwrap();

    handle.widget().remove();
    handle.remove();
    c.clear();

    assert_eq!(removals.load(Ordering::SeqCst), 1);
    assert!(c.is_empty());
}

#[test]
fn test_element_removed_from_document_is_dropped_from_container() {
    let doc = Document::new();
    let c = container(&doc);
    let leaf = c.append(Leaf::new).unwrap();

    doc.remove(leaf.element());

    assert!(c.is_empty());
    assert!(c.child_elements().is_empty());
}

#[test]
fn test_append_on_removed_container_builds_nothing() {
    let doc = Document::new();
    let c = container(&doc);
    c.append(Leaf::new);
    c.remove();
    let nodes = doc.len();

    let mut built = false;
    let handle = c.append(|doc, parent| {
        built = true;
        Leaf::new(doc, parent)
    });

    assert!(handle.is_none());
    assert!(!built);
    assert_eq!(doc.len(), nodes);
    assert!(c.is_empty());
    assert!(c.set(Leaf::new).is_none());
}

#[test]
fn test_append_on_detached_container_builds_nothing() {
    let doc = Document::new();
    let c = container(&doc);

    doc.remove(c.element());

    assert!(c.append(Leaf::new).is_none());
    assert_eq!(doc.len(), 1);
}
