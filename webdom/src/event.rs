use std::sync::Arc;

use crate::element::NodeId;

/// Kinds of events that can be dispatched on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Input,
    Change,
    Click,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Submit => "submit",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Click => "click",
        }
    }
}

/// Handle returned by `Document::add_listener`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub(crate) type Handler = Arc<dyn Fn(&mut Event) + Send + Sync>;

/// An event as seen by a listener while it bubbles towards the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    target: NodeId,
    current_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The element the event was dispatched on.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The element whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }

    /// Cancel the default action (e.g. navigation on form submit).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop bubbling after the listeners of the current element have run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Outcome of `Document::dispatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Number of listeners that ran.
    pub delivered: usize,
    default_prevented: bool,
}

impl Dispatch {
    pub(crate) fn new(delivered: usize, default_prevented: bool) -> Self {
        Self {
            delivered,
            default_prevented,
        }
    }

    /// Whether any listener cancelled the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
