use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::driver::gallery::{GalleryAnimator, GalleryFrame, StageChange};
use crate::foundation::core::Timestamp;
use crate::scroll::observer::{ScrollObserver, Subscription};
use crate::stage::classify::Stage;

/// Undrained stage changes kept per view; older ones are dropped first.
pub const CHANGE_LOG_CAPACITY: usize = 64;

fn record(log: &RefCell<VecDeque<StageChange>>, change: StageChange) {
    let mut log = log.borrow_mut();
    if log.len() == CHANGE_LOG_CAPACITY {
        log.pop_front();
        tracing::trace!("stage change log full; dropped oldest entry");
    }
    log.push_back(change);
}

/// A mounted gallery: an animator bound to the scroll observer of its container.
///
/// Dropping the view unsubscribes from the observer and disposes the animator, so no listener
/// or running tween outlives it.
pub struct GalleryView {
    animator: Rc<RefCell<GalleryAnimator>>,
    changes: Rc<RefCell<VecDeque<StageChange>>>,
    last_seen: Rc<Cell<Timestamp>>,
    subscription: Option<Subscription>,
}

impl GalleryView {
    /// Bind `animator` to `observer` and apply the observer's current progress at `now`.
    pub fn mount(observer: &ScrollObserver, animator: GalleryAnimator, now: Timestamp) -> Self {
        let animator = Rc::new(RefCell::new(animator));
        let changes = Rc::new(RefCell::new(VecDeque::with_capacity(CHANGE_LOG_CAPACITY)));
        let last_seen = Rc::new(Cell::new(now));

        if let Some(change) = animator.borrow_mut().on_progress(now, observer.current()) {
            record(&changes, change);
        }

        let target = Rc::downgrade(&animator);
        let log = Rc::clone(&changes);
        let clock = Rc::clone(&last_seen);
        let subscription = observer.subscribe(move |at, progress| {
            let Some(animator) = target.upgrade() else {
                return;
            };
            clock.set(at);
            if let Some(change) = animator.borrow_mut().on_progress(at, progress) {
                record(&log, change);
            }
        });

        Self {
            animator,
            changes,
            last_seen,
            subscription: Some(subscription),
        }
    }

    /// Snapshot for rendering at `now`. Finished tweens are dropped along the way.
    pub fn frame(&self, now: Timestamp) -> GalleryFrame {
        self.last_seen.set(self.last_seen.get().max(now));
        let mut animator = self.animator.borrow_mut();
        animator.settle(now);
        animator.sample(now)
    }

    /// Current logical stage.
    pub fn stage(&self) -> Stage {
        self.animator.borrow().stage()
    }

    /// Read access to the bound animator.
    pub fn animator(&self) -> Ref<'_, GalleryAnimator> {
        self.animator.borrow()
    }

    /// Stage changes applied since the last call, oldest first. At most
    /// [`CHANGE_LOG_CAPACITY`] are kept between calls.
    pub fn drain_changes(&self) -> Vec<StageChange> {
        self.changes.borrow_mut().drain(..).collect()
    }

    /// `true` until the view is unmounted.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Tear down at an explicit time.
    pub fn unmount(mut self, now: Timestamp) {
        self.teardown(now);
    }

    fn teardown(&mut self, now: Timestamp) {
        if self.subscription.take().is_none() {
            return;
        }
        match self.animator.try_borrow_mut() {
            Ok(mut animator) => animator.dispose(now),
            Err(_) => tracing::warn!("gallery animator busy during unmount; not disposed"),
        }
    }
}

impl Drop for GalleryView {
    fn drop(&mut self) {
        self.teardown(self.last_seen.get());
    }
}

impl std::fmt::Debug for GalleryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryView")
            .field("mounted", &self.is_mounted())
            .field("last_seen", &self.last_seen.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gallery_view.rs"]
mod tests;
