//! Store change and activation events
//!
//! Replaces toolkit signal/slot wiring: embedders register callbacks on the
//! store and the store invokes them synchronously on the mutating thread.

use crate::model::EntryLocation;
use std::fmt;

/// Events emitted by the bookmark store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The tree changed; unsaved modifications exist.
    Changed,
    /// A bookmark was invoked by the user.
    BookmarkActivated {
        url: String,
        location: EntryLocation,
        /// Open in a new tab instead of the current one.
        new_tab: bool,
    },
}

/// A registered observer callback.
pub type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Synchronous fan-out of store events to registered observers.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Observer>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn emit(&mut self, event: &StoreEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_observer() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            observers.subscribe(Box::new(move |event| {
                seen.borrow_mut().push((tag, event.clone()));
            }));
        }

        observers.emit(&StoreEvent::Changed);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("a", StoreEvent::Changed));
        assert_eq!(seen[1], ("b", StoreEvent::Changed));
    }
}
