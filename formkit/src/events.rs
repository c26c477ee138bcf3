//! Minimal event bus for widgets that publish events to listeners.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Events carried by an [`EventBus`] are grouped by kind for subscription.
pub trait BusEvent {
    type Kind: Copy + Eq + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventBus::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct BusInner<E: BusEvent> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, E::Kind, Listener<E>)>,
}

/// Publish/subscribe channel keyed by event kind.
///
/// Clones share the same listener list.
pub struct EventBus<E: BusEvent> {
    inner: Arc<Mutex<BusInner<E>>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BusInner<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to events of `kind`.
    pub fn on<F>(&self, kind: E::Kind, listener: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, kind, Arc::new(listener)));
        id
    }

    /// Unsubscribe. Returns false if the subscription was unknown.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sid, _, _)| *sid != id);
        inner.listeners.len() != before
    }

    /// Deliver `event` to every listener of its kind, in subscription order.
    ///
    /// Returns the number of listeners called.
    pub fn emit(&self, event: &E) -> usize {
        let kind = event.kind();
        let listeners: Vec<Listener<E>> = self
            .lock()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, l)| Arc::clone(l))
            .collect();

        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.lock()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    pub fn clear(&self) {
        self.lock().listeners.clear();
    }
}
