use crate::app::image::LoadOutcome;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{StageError, StageResult};

/// Splash timing, relative to app start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplashPolicy {
    /// The splash never closes before this.
    pub min_ms: u64,
    /// The splash always closes at this point, loaded or not.
    pub max_ms: u64,
}

impl Default for SplashPolicy {
    fn default() -> Self {
        Self {
            min_ms: 3000,
            max_ms: 5000,
        }
    }
}

impl SplashPolicy {
    /// `min_ms <= max_ms`.
    pub fn validate(self) -> StageResult<()> {
        if self.min_ms > self.max_ms {
            return Err(StageError::validation(format!(
                "splash min_ms ({}) exceeds max_ms ({})",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

/// Counts settled asset loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreloadTracker {
    total: usize,
    loaded: usize,
    failed: usize,
}

impl PreloadTracker {
    /// Tracker for `total` assets.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Count one result; extra results past `total` are ignored.
    pub fn record(&mut self, outcome: LoadOutcome) {
        if self.is_complete() {
            return;
        }
        match outcome {
            LoadOutcome::Loaded => self.loaded += 1,
            LoadOutcome::Failed => self.failed += 1,
        }
    }

    /// Share of assets settled, failures included. An empty list is complete.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.settled() as f64 / self.total as f64
    }

    /// Loads that finished either way.
    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    /// Loads that failed.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Every asset has settled.
    pub fn is_complete(&self) -> bool {
        self.settled() >= self.total
    }
}

/// Why the splash went away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DismissReason {
    /// Preload finished and the minimum time passed.
    Preloaded,
    /// The splash reported its exit animation done and the minimum time passed.
    TransitionComplete,
    /// The hard maximum was reached.
    Timeout,
}

/// Whether the app shows the splash or its routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SplashPhase {
    /// Splash on screen.
    Showing,
    /// Splash gone; routes are live.
    Dismissed(DismissReason),
}

/// Owns the splash lifecycle for one app instance.
///
/// The host calls [`AppController::poll`] from its timer (or on every frame) and reports asset
/// loads and the splash exit animation as they happen. After [`AppController::cancel`] nothing
/// changes any more.
#[derive(Clone, Debug)]
pub struct AppController {
    policy: SplashPolicy,
    started: Timestamp,
    preload: PreloadTracker,
    transition_done: bool,
    phase: SplashPhase,
    cancelled: bool,
}

impl AppController {
    /// Start the app at `now`, preloading `assets` images.
    pub fn start(now: Timestamp, assets: usize, policy: SplashPolicy) -> StageResult<Self> {
        policy.validate()?;
        tracing::debug!(assets, min_ms = policy.min_ms, max_ms = policy.max_ms, "splash shown");
        Ok(Self {
            policy,
            started: now,
            preload: PreloadTracker::new(assets),
            transition_done: false,
            phase: SplashPhase::Showing,
            cancelled: false,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// `true` while the splash should be on screen.
    pub fn show_splash(&self) -> bool {
        self.phase == SplashPhase::Showing
    }

    /// Preload bookkeeping.
    pub fn preload(&self) -> &PreloadTracker {
        &self.preload
    }

    /// Record one asset load result at `now`.
    pub fn record_load(&mut self, now: Timestamp, outcome: LoadOutcome) -> Option<DismissReason> {
        if self.cancelled {
            return None;
        }
        self.preload.record(outcome);
        self.poll(now)
    }

    /// The splash finished its exit animation at `now`.
    pub fn finish_transition(&mut self, now: Timestamp) -> Option<DismissReason> {
        if self.cancelled {
            return None;
        }
        self.transition_done = true;
        self.poll(now)
    }

    /// Re-evaluate timers at `now`. Returns the reason when this call dismisses the splash.
    pub fn poll(&mut self, now: Timestamp) -> Option<DismissReason> {
        if self.cancelled || !self.show_splash() {
            return None;
        }
        let elapsed = now.since(self.started);
        let reason = if elapsed >= self.policy.max_ms {
            DismissReason::Timeout
        } else if elapsed < self.policy.min_ms {
            return None;
        } else if self.preload.is_complete() {
            DismissReason::Preloaded
        } else if self.transition_done {
            DismissReason::TransitionComplete
        } else {
            return None;
        };
        self.phase = SplashPhase::Dismissed(reason);
        tracing::debug!(?reason, elapsed, failed = self.preload.failed(), "splash dismissed");
        Some(reason)
    }

    /// Next time at which [`AppController::poll`] could dismiss the splash, if any.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        if self.cancelled || !self.show_splash() {
            return None;
        }
        if self.preload.is_complete() || self.transition_done {
            Some(self.started.after(self.policy.min_ms))
        } else {
            Some(self.started.after(self.policy.max_ms))
        }
    }

    /// Tear down: drop every pending timer. The phase is frozen from here on.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether [`AppController::cancel`] has run.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/splash.rs"]
mod tests;
