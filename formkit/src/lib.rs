//! Container-managed widgets and forms on top of a `webdom` document.

pub mod container;
pub mod events;
pub mod form;
pub mod widget;

pub use container::{Container, ContainerConfig};
pub use events::{BusEvent, EventBus, SubscriptionId};
pub use form::{
    Form, FormData, FormEvent, FormEventKind, FormField, FormTemplate, InputConfig, InputField,
    NumberField, TextField,
};
pub use widget::{Mounted, Widget};

pub mod prelude {
    pub use crate::container::{Container, ContainerConfig};
    pub use crate::form::{Form, FormData, FormEvent, FormEventKind, FormTemplate, InputConfig};
    pub use crate::widget::{Mounted, Widget};
    pub use webdom::{Document, NodeId};
}
