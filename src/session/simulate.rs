use std::path::Path;

use crate::driver::config::AnimatorConfig;
use crate::driver::gallery::{GalleryAnimator, GalleryFrame, StageChange};
use crate::foundation::core::{Fps, ScrollProgress, Timestamp, Transform};
use crate::foundation::error::{StageError, StageResult};
use crate::scroll::observer::ScrollObserver;
use crate::session::gallery_view::GalleryView;

/// One scroll position reported by the host at `at_ms`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSample {
    /// Clock time of the sample.
    pub at_ms: u64,
    /// Normalized scroll progress (clamped on load).
    pub progress: ScrollProgress,
}

/// Longest replay accepted: one hour at 60 fps.
pub const MAX_FRAMES: u64 = 216_000;

/// Largest gallery a script may mount.
pub const MAX_ITEMS: usize = 1024;

fn default_tail_ms() -> u64 {
    2000
}

fn default_frame_stride() -> u64 {
    1
}

/// A recorded scroll session to replay headlessly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollScript {
    /// Number of gallery items.
    pub items: usize,
    /// Seed for the stage-1 transforms (ignored when `transforms` is given).
    #[serde(default)]
    pub seed: u64,
    /// Frame rate of the simulated clock.
    #[serde(default)]
    pub fps: Fps,
    /// Scroll samples sorted by time.
    pub samples: Vec<ScrollSample>,
    /// Time to keep running after the last sample.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
    /// Record every n-th frame.
    #[serde(default = "default_frame_stride")]
    pub frame_stride: u64,
    /// Explicit stage-1 transforms, one per item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transforms: Option<Vec<Transform>>,
}

impl ScrollScript {
    /// Check structural invariants and the replay size limits.
    pub fn validate(&self) -> StageResult<()> {
        self.fps.validate()?;
        if self.frame_stride == 0 {
            return Err(StageError::validation("frame_stride must be >= 1"));
        }
        if self.items > MAX_ITEMS {
            return Err(StageError::validation(format!(
                "items ({}) exceeds {MAX_ITEMS}",
                self.items
            )));
        }
        if let Some(pair) = self.samples.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            return Err(StageError::validation(format!(
                "samples must be sorted by at_ms ({} after {})",
                pair[1].at_ms, pair[0].at_ms
            )));
        }
        let frames = self.frame_count();
        if frames > MAX_FRAMES {
            return Err(StageError::validation(format!(
                "script spans {frames} frames ({} ms at {}/{} fps), limit is {MAX_FRAMES}",
                self.end_ms(),
                self.fps.num,
                self.fps.den
            )));
        }
        if let Some(transforms) = &self.transforms {
            if transforms.len() != self.items {
                return Err(StageError::validation(format!(
                    "transforms has {} entries for {} items",
                    transforms.len(),
                    self.items
                )));
            }
            let finite = |t: &Transform| t.offset.is_finite() && t.rotation_deg.is_finite();
            if !transforms.iter().all(finite) {
                return Err(StageError::validation("transforms must be finite"));
            }
        }
        Ok(())
    }

    /// Time of the last simulated frame.
    pub fn end_ms(&self) -> u64 {
        self.samples
            .last()
            .map_or(0, |s| s.at_ms)
            .saturating_add(self.tail_ms)
    }

    /// Frames walked by [`simulate`], the one at `end_ms` included.
    pub fn frame_count(&self) -> u64 {
        self.fps
            .frame_at(Timestamp(self.end_ms()))
            .saturating_add(1)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a JSON script file.
    pub fn load(path: &Path) -> StageResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| StageError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }
}

/// A stage change together with the sample that caused it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChangeRecord {
    /// Frame on which the sample was applied.
    pub frame: u64,
    /// Clock time of that frame.
    pub at_ms: u64,
    /// Progress that triggered the change.
    pub progress: ScrollProgress,
    /// The change itself.
    pub change: StageChange,
}

/// A recorded frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRecord {
    /// Frame index.
    pub frame: u64,
    /// Clock time of the frame.
    pub at_ms: u64,
    /// Gallery state at that time.
    pub state: GalleryFrame,
}

/// Everything a replay produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationReport {
    /// Number of gallery items.
    pub items: usize,
    /// Stage-1 transforms actually used.
    pub transforms: Vec<Transform>,
    /// Frame rate of the simulated clock.
    pub fps: Fps,
    /// Number of frames simulated.
    pub frame_count: u64,
    /// Time of the last frame.
    pub end_ms: u64,
    /// Applied stage changes in order.
    pub changes: Vec<ChangeRecord>,
    /// Every `frame_stride`-th frame.
    pub frames: Vec<FrameRecord>,
    /// State on the last frame.
    pub final_state: GalleryFrame,
}

impl SimulationReport {
    /// Stages visited, starting with the initial one.
    pub fn stage_path(&self) -> Vec<u8> {
        let mut path = vec![self.changes.first().map_or(
            self.final_state.stage.number(),
            |c| c.change.from.number(),
        )];
        path.extend(self.changes.iter().map(|c| c.change.to.number()));
        path
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> StageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Replay `script` through a scroll observer bound to a freshly mounted gallery.
///
/// Frames are walked at `script.fps` from 0 through [`ScrollScript::end_ms`]. On each frame
/// only the latest sample that has come due is published, the way a browser reads the scroll
/// position once per animation frame.
#[tracing::instrument(skip_all, fields(items = script.items, samples = script.samples.len()))]
pub fn simulate(script: &ScrollScript, config: AnimatorConfig) -> StageResult<SimulationReport> {
    script.validate()?;
    let animator = match &script.transforms {
        Some(transforms) => GalleryAnimator::mount(transforms.clone(), config)?,
        None => GalleryAnimator::mount_seeded(script.items, script.seed, config)?,
    };

    let observer = ScrollObserver::new();
    let view = GalleryView::mount(&observer, animator, Timestamp::ZERO);
    let transforms = view.animator().transforms().to_vec();

    let last_frame = script.frame_count() - 1;
    let mut pending = script.samples.iter().peekable();
    let mut changes = Vec::new();
    let mut frames = Vec::new();

    for frame in 0..=last_frame {
        let now = script.fps.frame_time(frame);
        let mut due = None;
        while let Some(sample) = pending.next_if(|s| s.at_ms <= now.as_millis()) {
            due = Some(sample.progress);
        }
        if let Some(progress) = due {
            observer.publish(now, progress);
            changes.extend(view.drain_changes().into_iter().map(|change| ChangeRecord {
                frame,
                at_ms: now.as_millis(),
                progress,
                change,
            }));
        }
        if frame % script.frame_stride == 0 {
            frames.push(FrameRecord {
                frame,
                at_ms: now.as_millis(),
                state: view.frame(now),
            });
        }
    }

    let end = script.fps.frame_time(last_frame);
    let final_state = view.frame(end);
    view.unmount(end);
    tracing::debug!(changes = changes.len(), frames = frames.len(), "simulation finished");

    Ok(SimulationReport {
        items: script.items,
        transforms,
        fps: script.fps,
        frame_count: last_frame + 1,
        end_ms: end.as_millis(),
        changes,
        frames,
        final_state,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/simulate.rs"]
mod tests;
