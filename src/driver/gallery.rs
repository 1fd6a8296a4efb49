use crate::animation::anim::Animated;
use crate::driver::config::AnimatorConfig;
use crate::driver::text::{TextFrame, TextReveal};
use crate::foundation::core::{ScrollProgress, Timestamp, Transform, Vec2, VisualState};
use crate::foundation::error::StageResult;
use crate::stage::classify::Stage;

/// What the text block did on a stage change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextTransition {
    /// Staggered entry (entering the final stage).
    Reveal,
    /// Simultaneous exit (leaving the final stage).
    Hide,
}

/// A stage change applied by [`GalleryAnimator::on_progress`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageChange {
    /// Stage before the update.
    pub from: Stage,
    /// Stage after the update.
    pub to: Stage,
    /// Text motion started by this change, if any.
    pub text: Option<TextTransition>,
}

impl StageChange {
    /// Number of stages jumped over without their targets being applied.
    pub fn skipped(&self) -> usize {
        usize::from(self.from.number().abs_diff(self.to.number())).saturating_sub(1)
    }
}

/// Sampled state of a whole gallery.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalleryFrame {
    /// Current logical stage.
    pub stage: Stage,
    /// Per-item placement, in item order.
    pub items: Vec<VisualState>,
    /// Text block placement.
    pub text: TextFrame,
}

#[derive(Clone, Debug)]
struct ItemChannels {
    offset: Animated<Vec2>,
    rotation_deg: Animated<f64>,
    opacity: Animated<f64>,
}

impl ItemChannels {
    fn at_rest(state: VisualState) -> Self {
        Self {
            offset: Animated::new(state.offset),
            rotation_deg: Animated::new(state.rotation_deg),
            opacity: Animated::new(state.opacity),
        }
    }

    fn sample(&self, now: Timestamp) -> VisualState {
        VisualState {
            offset: self.offset.sample(now),
            rotation_deg: self.rotation_deg.sample(now),
            opacity: self.opacity.sample(now),
        }
    }

    fn target(&self) -> VisualState {
        VisualState {
            offset: *self.offset.target(),
            rotation_deg: *self.rotation_deg.target(),
            opacity: *self.opacity.target(),
        }
    }

    fn is_animating(&self, now: Timestamp) -> bool {
        self.offset.is_animating(now)
            || self.rotation_deg.is_animating(now)
            || self.opacity.is_animating(now)
    }

    fn settle(&mut self, now: Timestamp) {
        self.offset.settle(now);
        self.rotation_deg.settle(now);
        self.opacity.settle(now);
    }

    fn stop(&mut self, now: Timestamp) {
        self.offset.stop(now);
        self.rotation_deg.stop(now);
        self.opacity.stop(now);
    }
}

/// Scroll-driven state machine for one gallery.
///
/// The stage is a pure function of the latest progress sample. Every time it changes, each
/// item retargets from wherever it currently is toward the new stage's placement, and the text
/// block reveals (entering stage 4) or hides (leaving it). Intermediate stages are not
/// replayed when one sample jumps several bands: the latest sample wins.
#[derive(Clone, Debug)]
pub struct GalleryAnimator {
    config: AnimatorConfig,
    transforms: Vec<Transform>,
    items: Vec<ItemChannels>,
    text: TextReveal,
    stage: Stage,
    progress: ScrollProgress,
    disposed: bool,
}

impl GalleryAnimator {
    /// Mount with explicit stage-1 transforms. Items and text are placed instantly.
    pub fn mount(transforms: Vec<Transform>, config: AnimatorConfig) -> StageResult<Self> {
        config.validate()?;
        let items = transforms
            .iter()
            .enumerate()
            .map(|(i, t)| {
                ItemChannels::at_rest(config.targets.resolve(Stage::Scattered, i, *t))
            })
            .collect();
        let text = TextReveal::hidden(config.text);
        tracing::debug!(items = transforms.len(), "gallery mounted");
        Ok(Self {
            config,
            transforms,
            items,
            text,
            stage: Stage::Scattered,
            progress: ScrollProgress::START,
            disposed: false,
        })
    }

    /// Mount `count` items with transforms drawn from the config's limits.
    pub fn mount_seeded(count: usize, seed: u64, config: AnimatorConfig) -> StageResult<Self> {
        let transforms = config.limits.generate_seeded(count, seed);
        Self::mount(transforms, config)
    }

    /// Feed one progress sample. Returns the applied change, or `None` when the stage is
    /// unchanged (nothing restarts) or the animator has been disposed.
    #[tracing::instrument(level = "trace", skip(self), fields(p = progress.get()))]
    pub fn on_progress(&mut self, now: Timestamp, progress: ScrollProgress) -> Option<StageChange> {
        if self.disposed {
            return None;
        }
        self.progress = progress;
        let next = self.config.thresholds.classify(progress);
        if next == self.stage {
            return None;
        }

        let from = self.stage;
        self.stage = next;
        self.retarget_items(now);

        let text = if next.shows_text() && self.text.reveal(now) {
            Some(TextTransition::Reveal)
        } else if !next.shows_text() && self.text.hide(now) {
            Some(TextTransition::Hide)
        } else {
            None
        };

        let change = StageChange {
            from,
            to: next,
            text,
        };
        tracing::debug!(%from, to = %next, ?text, skipped = change.skipped(), "stage change");
        Some(change)
    }

    fn retarget_items(&mut self, now: Timestamp) {
        let motion = self.config.motion;
        for (i, (item, transform)) in self.items.iter_mut().zip(&self.transforms).enumerate() {
            let target = self.config.targets.resolve(self.stage, i, *transform);
            item.offset.animate_to(now, target.offset, motion.position);
            item.rotation_deg
                .animate_to(now, target.rotation_deg, motion.position);
            item.opacity.animate_to(now, target.opacity, motion.opacity);
        }
    }

    /// Current logical stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Last progress sample seen.
    pub fn progress(&self) -> ScrollProgress {
        self.progress
    }

    /// Whether the call-to-action text is logically shown.
    pub fn text_visible(&self) -> bool {
        self.text.is_visible()
    }

    /// Number of gallery items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Stage-1 transforms the gallery was mounted with.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Active configuration.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Placement of item `index` at `now`.
    pub fn item_state(&self, index: usize, now: Timestamp) -> Option<VisualState> {
        self.items.get(index).map(|item| item.sample(now))
    }

    /// Placement item `index` is heading to.
    pub fn item_target(&self, index: usize) -> Option<VisualState> {
        self.items.get(index).map(ItemChannels::target)
    }

    /// Text block, for per-element sampling.
    pub fn text(&self) -> &TextReveal {
        &self.text
    }

    /// Snapshot of every item and the text block at `now`.
    pub fn sample(&self, now: Timestamp) -> GalleryFrame {
        GalleryFrame {
            stage: self.stage,
            items: self.items.iter().map(|item| item.sample(now)).collect(),
            text: self.text.frame(now),
        }
    }

    /// `true` when nothing is waiting or moving at `now`.
    pub fn is_settled(&self, now: Timestamp) -> bool {
        !self.text.is_animating(now) && !self.items.iter().any(|i| i.is_animating(now))
    }

    /// Drop finished tweens; call once per frame to keep retargeting cheap.
    pub fn settle(&mut self, now: Timestamp) {
        for item in &mut self.items {
            item.settle(now);
        }
        self.text.settle(now);
    }

    /// Tear down: freeze every value where it is and ignore further progress.
    pub fn dispose(&mut self, now: Timestamp) {
        if self.disposed {
            return;
        }
        for item in &mut self.items {
            item.stop(now);
        }
        self.text.stop(now);
        self.disposed = true;
        tracing::debug!(stage = %self.stage, "gallery disposed");
    }

    /// Whether [`GalleryAnimator::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/gallery.rs"]
mod tests;
