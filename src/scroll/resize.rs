use crate::foundation::core::{Timestamp, ViewportSize};

/// Quiet period after the last resize event before a size is committed.
pub const RESIZE_QUIET_MS: u64 = 150;

/// Coalesces bursts of resize events into one committed size.
///
/// Each [`ResizeDebouncer::resize`] restarts the quiet period; [`ResizeDebouncer::poll`]
/// commits the latest size once the period has passed without further events.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    quiet_ms: u64,
    committed: ViewportSize,
    pending: Option<(ViewportSize, Timestamp)>,
}

impl ResizeDebouncer {
    /// Debouncer starting from `initial` with the default quiet period.
    pub fn new(initial: ViewportSize) -> Self {
        Self::with_quiet_period(initial, RESIZE_QUIET_MS)
    }

    /// Debouncer with a custom quiet period.
    pub fn with_quiet_period(initial: ViewportSize, quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            committed: initial,
            pending: None,
        }
    }

    /// Record a resize event.
    pub fn resize(&mut self, now: Timestamp, size: ViewportSize) {
        self.pending = Some((size, now));
    }

    /// Commit the pending size if the quiet period has elapsed. Returns the newly committed
    /// size when it differs from the previous one.
    pub fn poll(&mut self, now: Timestamp) -> Option<ViewportSize> {
        let (size, at) = self.pending?;
        if now.since(at) < self.quiet_ms {
            return None;
        }
        self.pending = None;
        if size == self.committed {
            return None;
        }
        let previous = self.committed;
        self.committed = size;
        tracing::debug!(
            width = size.width,
            height = size.height,
            was_mobile = previous.is_mobile(),
            mobile = size.is_mobile(),
            "viewport committed"
        );
        Some(size)
    }

    /// Last committed size.
    pub fn size(&self) -> ViewportSize {
        self.committed
    }

    /// `true` while a resize burst is still settling.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/resize.rs"]
mod tests;
