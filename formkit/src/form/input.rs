//! Leaf widgets wrapping a single `<input>` element.

use std::collections::BTreeMap;
use std::ops::Deref;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use webdom::{Document, NodeId};

use crate::widget::Widget;

/// Configuration of an input field.
///
/// This is the shape of one entry of a form template's `fields` list:
/// the well-known keys below plus any other HTML input attribute, which end
/// up in `attributes`.
///
/// ```json
/// { "name": "nservers", "type": "number", "label": "Servers", "min": 1 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Initial value. Numbers and booleans from JSON templates are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl InputConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Copy of this config with `type` forced to `kind`.
    fn with_kind(&self, kind: &str) -> Self {
        let mut config = self.clone();
        config.kind = Some(kind.to_string());
        config
    }
}

/// Attribute text for a JSON value, or `None` if the attribute should be omitted.
fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// =============================================================================
// InputField
// =============================================================================

/// A single `<input>`, optionally wrapped in a `<label>`.
pub struct InputField {
    document: Document,
    element: NodeId,
    input: NodeId,
}

impl InputField {
    pub fn new(document: &Document, parent: NodeId, config: InputConfig) -> Self {
        let input = document.create_element("input");
        for (name, value) in &config.attributes {
            if let Some(text) = attribute_text(value) {
                document.set_attribute(input, name, text);
            }
        }
        // Well-known keys win over loose attributes of the same name.
        document.set_attribute(input, "type", config.kind.as_deref().unwrap_or("text"));
        if let Some(name) = &config.name {
            document.set_attribute(input, "name", name.as_str());
        }
        if let Some(placeholder) = &config.placeholder {
            document.set_attribute(input, "placeholder", placeholder.as_str());
        }
        if let Some(value) = config.value.as_ref().and_then(attribute_text) {
            document.set_attribute(input, "value", value);
        }

        let element = match &config.label {
            Some(label) => {
                let wrapper = document.create_element("label");
                document.set_text(wrapper, label.as_str());
                document.append_child(wrapper, input);
                wrapper
            }
            None => input,
        };
        document.append_child(parent, element);
        debug!(
            "input {input} ({:?}, type {:?})",
            config.name,
            document.attribute(input, "type")
        );

        Self {
            document: document.clone(),
            element,
            input,
        }
    }

    /// The `<input>` element itself.
    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn name(&self) -> Option<String> {
        self.document.attribute(self.input, "name")
    }

    /// The effective `type` attribute.
    pub fn input_type(&self) -> String {
        self.document
            .attribute(self.input, "type")
            .unwrap_or_else(|| "text".to_string())
    }

    pub fn label(&self) -> Option<String> {
        if self.element == self.input {
            return None;
        }
        self.document.text(self.element)
    }

    /// Current value of the input.
    pub fn value(&self) -> String {
        self.document.value(self.input).unwrap_or_default()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.document.set_value(self.input, value);
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.document.attribute(self.input, name)
    }
}

impl Widget for InputField {
    fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self) -> NodeId {
        self.element
    }
}

// =============================================================================
// Typed fields
// =============================================================================

/// Input field with `type="text"`.
pub struct TextField(InputField);

impl TextField {
    pub fn new(document: &Document, parent: NodeId, config: InputConfig) -> Self {
        Self(InputField::new(document, parent, config.with_kind("text")))
    }
}

impl Deref for TextField {
    type Target = InputField;

    fn deref(&self) -> &InputField {
        &self.0
    }
}

impl Widget for TextField {
    fn document(&self) -> &Document {
        self.0.document()
    }

    fn element(&self) -> NodeId {
        self.0.element()
    }
}

/// Input field with `type="number"`.
pub struct NumberField(InputField);

impl NumberField {
    pub fn new(document: &Document, parent: NodeId, config: InputConfig) -> Self {
        Self(InputField::new(document, parent, config.with_kind("number")))
    }

    /// The current value parsed as a number. `None` when empty or not numeric.
    pub fn number(&self) -> Option<f64> {
        self.value().trim().parse().ok()
    }

    pub fn set_number(&self, value: f64) {
        self.set_value(value.to_string());
    }
}

impl Deref for NumberField {
    type Target = InputField;

    fn deref(&self) -> &InputField {
        &self.0
    }
}

impl Widget for NumberField {
    fn document(&self) -> &Document {
        self.0.document()
    }

    fn element(&self) -> NodeId {
        self.0.element()
    }
}
