//! Widget trait and the handle containers hand out for mounted widgets.
//!
//! A widget is anything built under a parent element that can remove itself
//! again. Containers keep track of the widgets they construct; removing a
//! widget through its [`Mounted`] handle unregisters it from the owning
//! container before the widget's own removal runs, so the container's list
//! and the element tree never disagree.

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use webdom::{Document, NodeId};

/// Trait for objects that live under an element of a document.
///
/// # Example
///
/// ```ignore
/// struct Badge {
///     document: Document,
///     element: NodeId,
/// }
///
/// impl Widget for Badge {
///     fn document(&self) -> &Document {
///         &self.document
///     }
///
///     fn element(&self) -> NodeId {
///         self.element
///     }
/// }
/// ```
pub trait Widget: Send + Sync {
    /// Document the widget's element lives in.
    fn document(&self) -> &Document;

    /// Outermost element owned by the widget.
    fn element(&self) -> NodeId;

    /// Tear the widget down.
    ///
    /// The default detaches the widget's element. Widgets owning children or
    /// listeners override this to clean those up first.
    fn remove(&self) {
        self.document().remove(self.element());
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered list of the widgets a container has constructed.
///
/// Entries whose element no longer exists in the document were torn down
/// without going through their [`Mounted`] handle. They are dropped on the
/// next access, so the list only ever reports attached widgets.
#[derive(Default)]
pub(crate) struct Registry {
    next_key: u64,
    entries: Vec<(u64, Arc<dyn Widget>)>,
}

impl Registry {
    pub(crate) fn insert(&mut self, widget: Arc<dyn Widget>) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.push((key, widget));
        key
    }

    fn prune(&mut self) {
        self.entries.retain(|(key, widget)| {
            let attached = widget.document().contains(widget.element());
            if !attached {
                debug!("dropping detached entry {key} ({})", widget.element());
            }
            attached
        });
    }

    /// Remove and return the entry for `key`, if it is still registered.
    pub(crate) fn take(&mut self, key: u64) -> Option<Arc<dyn Widget>> {
        self.prune();
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub(crate) fn contains(&mut self, key: u64) -> bool {
        self.prune();
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub(crate) fn drain(&mut self) -> Vec<Arc<dyn Widget>> {
        self.prune();
        self.entries.drain(..).map(|(_, w)| w).collect()
    }

    pub(crate) fn elements(&mut self) -> Vec<NodeId> {
        self.prune();
        self.entries.iter().map(|(_, w)| w.element()).collect()
    }

    pub(crate) fn len(&mut self) -> usize {
        self.prune();
        self.entries.len()
    }
}

pub(crate) type SharedRegistry = Arc<Mutex<Registry>>;

pub(crate) fn lock(registry: &SharedRegistry) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Mounted
// =============================================================================

/// Handle to a widget constructed by a [`Container`](crate::Container).
///
/// Derefs to the widget. Use [`Mounted::remove`] rather than calling the
/// widget's own `remove`, so the owning container forgets it too.
pub struct Mounted<W: Widget> {
    widget: Arc<W>,
    key: u64,
    registry: SharedRegistry,
}

impl<W: Widget + 'static> Mounted<W> {
    pub(crate) fn register(widget: W, registry: &SharedRegistry) -> Self {
        let widget = Arc::new(widget);
        let key = lock(registry).insert(Arc::clone(&widget) as Arc<dyn Widget>);
        Self {
            widget,
            key,
            registry: Arc::clone(registry),
        }
    }
}

impl<W: Widget> Mounted<W> {
    /// Unregister the widget from its container, then remove it.
    ///
    /// Only the first call has an effect; later calls, or calls after the
    /// container already cleared the widget, do nothing.
    pub fn remove(&self) {
        let taken = lock(&self.registry).take(self.key);
        match taken {
            Some(widget) => widget.remove(),
            None => debug!("{} already removed", self.widget.element()),
        }
    }

    /// Whether the widget is still registered with its container.
    pub fn is_mounted(&self) -> bool {
        lock(&self.registry).contains(self.key)
    }

    pub fn widget(&self) -> &Arc<W> {
        &self.widget
    }
}

impl<W: Widget> Clone for Mounted<W> {
    fn clone(&self) -> Self {
        Self {
            widget: Arc::clone(&self.widget),
            key: self.key,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<W: Widget> Deref for Mounted<W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.widget
    }
}

impl<W: Widget> std::fmt::Debug for Mounted<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("element", &self.widget.element())
            .field("key", &self.key)
            .finish()
    }
}
