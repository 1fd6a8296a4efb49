use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::foundation::core::{ScrollProgress, Timestamp};
use crate::scroll::geometry::{ScrollGeometry, progress_of};

/// Callback invoked with the new progress whenever it changes.
pub type ProgressListener = Rc<dyn Fn(Timestamp, ScrollProgress)>;

struct Inner {
    progress: Cell<ScrollProgress>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, ProgressListener)>>,
}

impl Inner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(i, _)| *i == id)
    }
}

/// Progress source for one scroll container.
///
/// Feed it geometry on every scroll and resize event; listeners hear about a new value only
/// when it differs from the last one. Cloning yields another handle to the same container.
#[derive(Clone)]
pub struct ScrollObserver {
    inner: Rc<Inner>,
}

impl ScrollObserver {
    /// Observer for an unmounted container (progress 0, no listeners).
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                progress: Cell::new(ScrollProgress::START),
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register `listener`. It stays registered until the returned handle is dropped.
    pub fn subscribe(&self, listener: impl Fn(Timestamp, ScrollProgress) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            observer: Rc::downgrade(&self.inner),
        }
    }

    /// Last published progress.
    pub fn current(&self) -> ScrollProgress {
        self.inner.progress.get()
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Recompute progress from `geometry` (`None` when unmounted) and notify on change.
    /// Returns whether listeners were notified.
    pub fn update(&self, now: Timestamp, geometry: Option<ScrollGeometry>) -> bool {
        self.publish(now, progress_of(geometry))
    }

    /// Publish an already-normalized progress value; duplicates are dropped.
    pub fn publish(&self, now: Timestamp, progress: ScrollProgress) -> bool {
        if progress == self.inner.progress.get() {
            return false;
        }
        self.inner.progress.set(progress);

        // Listeners may subscribe or unsubscribe while we iterate.
        let snapshot = self.inner.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.inner.is_subscribed(id) {
                listener(now, progress);
            }
        }
        true
    }
}

impl Default for ScrollObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollObserver")
            .field("progress", &self.current())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    observer: Weak<Inner>,
}

impl Subscription {
    /// `true` while both the observer and this registration are alive.
    pub fn is_active(&self) -> bool {
        self.observer
            .upgrade()
            .is_some_and(|inner| inner.is_subscribed(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.observer.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/observer.rs"]
mod tests;
