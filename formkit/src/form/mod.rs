//! Forms built from container-managed rows of input fields.

mod data;
mod field;
mod input;
mod template;

pub use data::FormData;
pub use field::{FORM_FIELD_CLASS, FormField};
pub use input::{InputConfig, InputField, NumberField, TextField};
pub use template::FormTemplate;

use std::ops::Deref;

use log::debug;
use webdom::{Dispatch, Document, EventKind, ListenerId, NodeId};

use crate::container::{Container, ContainerConfig};
use crate::events::{BusEvent, EventBus, SubscriptionId};
use crate::widget::{Mounted, Widget};

/// CSS class carried by every form element.
pub const FORM_CLASS: &str = "form";

/// Events published by a [`Form`] with events enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The form was submitted; carries the values at submit time.
    Submit(FormData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEventKind {
    Submit,
}

impl BusEvent for FormEvent {
    type Kind = FormEventKind;

    fn kind(&self) -> FormEventKind {
        match self {
            FormEvent::Submit(_) => FormEventKind::Submit,
        }
    }
}

struct FormEvents {
    bus: EventBus<FormEvent>,
    listener: Option<ListenerId>,
}

/// A `<form class="form">` whose rows are [`FormField`]s.
///
/// The form holds no data of its own: its schema is the set of rows, and
/// [`Form::data`] reads the live values of its inputs.
///
/// # Example
///
/// ```ignore
/// let form = Form::new(&doc, doc.body(), FormTemplate::default()).with_events();
/// form.number(InputConfig::new("runtime"))?.set_value("10");
///
/// form.on(FormEventKind::Submit, |event| {
///     let FormEvent::Submit(data) = event;
///     assert_eq!(data.get("runtime"), Some("10"));
/// });
/// form.submit();
/// ```
pub struct Form {
    container: Container,
    events: Option<FormEvents>,
}

impl Form {
    /// Create the form under `parent` with one input row per template field.
    pub fn new(document: &Document, parent: NodeId, template: FormTemplate) -> Self {
        let form = Self {
            container: Container::new(
                document,
                parent,
                ContainerConfig::new().element("form").class_name(FORM_CLASS),
            ),
            events: None,
        };
        for config in template.fields {
            form.input(config);
        }
        debug!("form {} built with {} row(s)", form.element(), form.rows());
        form
    }

    /// Enable event publishing.
    ///
    /// Submitting the form then cancels the default navigation and publishes
    /// [`FormEvent::Submit`] with the collected data.
    pub fn with_events(mut self) -> Self {
        if self.events.is_none() {
            self.events = Some(self.install_events());
        }
        self
    }

    fn install_events(&self) -> FormEvents {
        let bus = EventBus::new();
        let emitter = bus.clone();
        let document = self.document().downgrade();
        let element = self.element();

        let listener = self
            .document()
            .add_listener(element, EventKind::Submit, move |event| {
                event.prevent_default();
                let Some(document) = document.upgrade() else {
                    return;
                };
                let data = collect_data(&document, element);
                emitter.emit(&FormEvent::Submit(data));
            });

        FormEvents { bus, listener }
    }

    pub fn has_events(&self) -> bool {
        self.events.is_some()
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Add an empty row. Returns `None` once the form has been removed.
    pub fn field(&self) -> Option<Mounted<FormField>> {
        self.container.append(FormField::new)
    }

    /// Add a row holding an input configured by `config`.
    pub fn input(&self, config: InputConfig) -> Option<Mounted<InputField>> {
        self.field()?
            .append(|document, parent| InputField::new(document, parent, config))
    }

    /// Add a row holding a text input. Any `type` in `config` is ignored.
    pub fn text(&self, config: InputConfig) -> Option<Mounted<TextField>> {
        self.field()?
            .append(|document, parent| TextField::new(document, parent, config))
    }

    /// Add a row holding a number input. Any `type` in `config` is ignored.
    pub fn number(&self, config: InputConfig) -> Option<Mounted<NumberField>> {
        self.field()?
            .append(|document, parent| NumberField::new(document, parent, config))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.container.len()
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Current `{name: value}` of every named input in the form, in document order.
    pub fn data(&self) -> FormData {
        collect_data(self.document(), self.element())
    }

    /// Names of the form's inputs, in document order.
    pub fn field_names(&self) -> Vec<String> {
        self.data().names().map(str::to_string).collect()
    }

    /// Set the value of the first input named `name`.
    ///
    /// Returns false if the form has no such input.
    pub fn set_value(&self, name: &str, value: impl Into<String>) -> bool {
        let document = self.document();
        let input = document
            .query_tag(self.element(), "input")
            .into_iter()
            .find(|input| document.attribute(*input, "name").as_deref() == Some(name));
        match input {
            Some(input) => document.set_value(input, value),
            None => false,
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to form events. Returns `None` if events are not enabled.
    pub fn on<F>(&self, kind: FormEventKind, listener: F) -> Option<SubscriptionId>
    where
        F: Fn(&FormEvent) + Send + Sync + 'static,
    {
        self.events.as_ref().map(|events| events.bus.on(kind, listener))
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.events
            .as_ref()
            .is_some_and(|events| events.bus.off(id))
    }

    /// Perform the submit action on the form element.
    pub fn submit(&self) -> Dispatch {
        self.document().dispatch(self.element(), EventKind::Submit)
    }
}

fn collect_data(document: &Document, form: NodeId) -> FormData {
    let mut data = FormData::new();
    for input in document.query_tag(form, "input") {
        if let Some(name) = document.attribute(input, "name") {
            data.set(name, document.value(input).unwrap_or_default());
        }
    }
    data
}

impl Deref for Form {
    type Target = Container;

    fn deref(&self) -> &Container {
        &self.container
    }
}

impl Widget for Form {
    fn document(&self) -> &Document {
        self.container.document()
    }

    fn element(&self) -> NodeId {
        self.container.element()
    }

    fn remove(&self) {
        if let Some(events) = &self.events {
            if let Some(listener) = events.listener {
                self.document().remove_listener(listener);
            }
            events.bus.clear();
        }
        self.container.remove();
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("element", &self.element())
            .field("rows", &self.rows())
            .field("events", &self.has_events())
            .finish()
    }
}
