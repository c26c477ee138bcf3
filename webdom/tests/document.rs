use webdom::Document;

// ============================================================================
// Tree structure
// ============================================================================

#[test]
fn test_new_document_has_only_body() {
    let doc = Document::new();
    assert_eq!(doc.len(), 1);
    assert!(doc.is_empty());
    assert_eq!(doc.tag(doc.body()).as_deref(), Some("body"));
}

#[test]
fn test_append_preserves_order() {
    let doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("span");
    let c = doc.create_element("p");

    assert!(doc.append_child(doc.body(), a));
    assert!(doc.append_child(doc.body(), b));
    assert!(doc.append_child(doc.body(), c));

    assert_eq!(doc.children(doc.body()), vec![a, b, c]);
    assert_eq!(doc.parent(b), Some(doc.body()));
}

#[test]
fn test_append_moves_attached_child() {
    let doc = Document::new();
    let first = doc.create_element("div");
    let second = doc.create_element("div");
    let child = doc.create_element("input");
    doc.append_child(doc.body(), first);
    doc.append_child(doc.body(), second);

    doc.append_child(first, child);
    doc.append_child(second, child);

    assert!(doc.children(first).is_empty());
    assert_eq!(doc.children(second), vec![child]);
    assert_eq!(doc.parent(child), Some(second));
}

#[test]
fn test_append_rejects_cycles() {
    let doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(outer, inner);

    assert!(!doc.append_child(inner, outer));
    assert!(!doc.append_child(outer, outer));
    assert_eq!(doc.children(outer), vec![inner]);
}

#[test]
fn test_remove_drops_whole_subtree() {
    let doc = Document::new();
    let form = doc.create_element("form");
    let row = doc.create_element("div");
    let input = doc.create_element("input");
    doc.append_child(doc.body(), form);
    doc.append_child(form, row);
    doc.append_child(row, input);
    assert_eq!(doc.len(), 4);

    assert!(doc.remove(row));

    assert!(doc.children(form).is_empty());
    assert!(!doc.contains(row));
    assert!(!doc.contains(input));
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_remove_missing_node_is_noop() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.append_child(doc.body(), el);

    assert!(doc.remove(el));
    assert!(!doc.remove(el));
    assert!(!doc.remove(doc.body()));
    assert!(doc.contains(doc.body()));
}

#[test]
fn test_descendants_in_document_order() {
    let doc = Document::new();
    let form = doc.create_element("form");
    let row1 = doc.create_element("div");
    let in1 = doc.create_element("input");
    let row2 = doc.create_element("div");
    let in2 = doc.create_element("input");
    doc.append_child(doc.body(), form);
    doc.append_child(form, row1);
    doc.append_child(row1, in1);
    doc.append_child(form, row2);
    doc.append_child(row2, in2);

    assert_eq!(doc.descendants(form), vec![row1, in1, row2, in2]);
    assert_eq!(doc.query_tag(form, "INPUT"), vec![in1, in2]);
}

#[test]
fn test_is_connected() {
    let doc = Document::new();
    let detached = doc.create_element("div");
    let attached = doc.create_element("div");
    doc.append_child(doc.body(), attached);

    assert!(!doc.is_connected(detached));
    assert!(doc.is_connected(attached));
}

// ============================================================================
// Attributes & properties
// ============================================================================

#[test]
fn test_classes() {
    let doc = Document::new();
    let el = doc.create_element("div");

    doc.add_class(el, "form  wide");
    doc.add_class(el, "form");

    assert_eq!(doc.classes(el), vec!["form".to_string(), "wide".to_string()]);
    assert!(doc.has_class(el, "wide"));

    doc.remove_class(el, "wide");
    assert!(!doc.has_class(el, "wide"));
}

#[test]
fn test_query_class() {
    let doc = Document::new();
    let form = doc.create_element("form");
    let row = doc.create_element("div");
    doc.append_child(form, row);
    doc.add_class(row, "formfield");

    assert_eq!(doc.query_class(form, "formfield"), vec![row]);
}

#[test]
fn test_attributes_are_case_insensitive() {
    let doc = Document::new();
    let el = doc.create_element("input");

    doc.set_attribute(el, "Name", "runtime");
    assert_eq!(doc.attribute(el, "name").as_deref(), Some("runtime"));

    doc.remove_attribute(el, "NAME");
    assert_eq!(doc.attribute(el, "name"), None);
}

#[test]
fn test_value_property_overrides_attribute() {
    let doc = Document::new();
    let el = doc.create_element("input");

    assert_eq!(doc.value(el), None);

    doc.set_attribute(el, "value", "3");
    assert_eq!(doc.value(el).as_deref(), Some("3"));

    doc.set_value(el, "10");
    assert_eq!(doc.value(el).as_deref(), Some("10"));
    assert_eq!(doc.attribute(el, "value").as_deref(), Some("3"));
}

#[test]
fn test_get_element_by_id() {
    let doc = Document::new();
    let main = doc.create_element("div");
    doc.set_attribute(main, "id", "main");

    assert_eq!(doc.get_element_by_id("main"), None);

    doc.append_child(doc.body(), main);
    assert_eq!(doc.get_element_by_id("main"), Some(main));
}

#[test]
fn test_updates_on_missing_node_fail() {
    let doc = Document::new();
    let el = doc.create_element("div");
    doc.remove(el);

    assert!(!doc.set_attribute(el, "name", "x"));
    assert!(!doc.set_value(el, "x"));
    assert!(!doc.add_class(el, "x"));
    assert_eq!(doc.element(el), None);
}

#[test]
fn test_handles_share_state() {
    let doc = Document::new();
    let other = doc.clone();
    let el = other.create_element("div");

    assert!(doc.contains(el));

    let weak = doc.downgrade();
    assert!(weak.upgrade().is_some());
    drop(doc);
    drop(other);
    assert!(weak.upgrade().is_none());
}
