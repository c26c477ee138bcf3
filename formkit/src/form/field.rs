use std::ops::Deref;

use webdom::{Document, NodeId};

use crate::container::{Container, ContainerConfig};
use crate::widget::Widget;

/// CSS class carried by every form row.
pub const FORM_FIELD_CLASS: &str = "formfield";

/// Layout slot for one logical form row.
///
/// Only acts as a container; the actual input is appended into it.
pub struct FormField {
    container: Container,
}

impl FormField {
    pub fn new(document: &Document, parent: NodeId) -> Self {
        Self {
            container: Container::new(
                document,
                parent,
                ContainerConfig::new().class_name(FORM_FIELD_CLASS),
            ),
        }
    }
}

impl Deref for FormField {
    type Target = Container;

    fn deref(&self) -> &Container {
        &self.container
    }
}

impl Widget for FormField {
    fn document(&self) -> &Document {
        self.container.document()
    }

    fn element(&self) -> NodeId {
        self.container.element()
    }

    fn remove(&self) {
        self.container.remove();
    }
}
