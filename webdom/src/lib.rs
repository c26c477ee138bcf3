pub mod document;
pub mod element;
pub mod event;

pub use document::{Document, WeakDocument};
pub use element::{ElementData, NodeId};
pub use event::{Dispatch, Event, EventKind, ListenerId};
