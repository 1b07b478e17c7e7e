#![forbid(unsafe_code)]

//! Change notification for language and dictionary updates.
//!
//! # Design
//!
//! [`Notifier`] keeps an ordered list of [`ChangeListener`] handles. A
//! notification pass snapshots the list before invoking anything, so
//! listeners may subscribe, unsubscribe, or read the localizer while the
//! pass is running. Changes to the list take effect from the next pass.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Listener panics | Logged at `error`; remaining listeners still run |
//! | Unsubscribe of unknown handle | No-op, returns `false` |
//! | Same listener subscribed twice | Invoked twice per pass |

use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use tracing::{error, trace_span};

/// What changed in the localizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// The active language was replaced.
    LanguageChanged,
    /// The dictionary set was replaced.
    DictionariesChanged,
}

impl ChangeKind {
    /// Stable tag for logs and host bindings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LanguageChanged => "language",
            Self::DictionariesChanged => "dictionaries",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives change notifications.
///
/// Implemented for every `Fn(ChangeKind)` closure.
pub trait ChangeListener {
    /// Called once per change, in subscription order.
    fn on_change(&self, kind: ChangeKind);
}

impl<F: Fn(ChangeKind)> ChangeListener for F {
    fn on_change(&self, kind: ChangeKind) {
        self(kind);
    }
}

/// Shared handle to a subscribed listener. Identity is the allocation.
pub type ListenerHandle = Rc<dyn ChangeListener>;

/// Ordered list of change listeners.
#[derive(Default)]
pub struct Notifier {
    listeners: RefCell<Vec<ListenerHandle>>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listener_count", &self.len())
            .finish()
    }
}

impl Notifier {
    /// Create a notifier with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener`. Duplicates are allowed.
    pub fn subscribe(&self, listener: ListenerHandle) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Remove the first registration of `listener` (by identity).
    ///
    /// Returns `false` when the listener was not registered.
    pub fn unsubscribe(&self, listener: &ListenerHandle) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let position = listeners
            .iter()
            .position(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)));
        match position {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registrations (duplicates counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Invoke every listener registered at call time, in order.
    ///
    /// Returns the number of listeners that completed without panicking.
    pub fn notify(&self, kind: ChangeKind) -> usize {
        // Snapshot so listeners can touch the list re-entrantly.
        let snapshot: Vec<ListenerHandle> = self.listeners.borrow().clone();
        if snapshot.is_empty() {
            return 0;
        }

        let _span = trace_span!(
            "localizable.notify",
            kind = kind.as_str(),
            listeners = snapshot.len()
        )
        .entered();

        let mut delivered = 0;
        for (index, listener) in snapshot.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| listener.on_change(kind))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    error!(
                        listener = index,
                        kind = kind.as_str(),
                        panic = panic_message(payload.as_ref()),
                        "change listener panicked"
                    );
                }
            }
        }
        delivered
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
