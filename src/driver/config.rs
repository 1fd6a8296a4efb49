use std::path::Path;

use crate::animation::anim::TweenSpec;
use crate::animation::ease::Ease;
use crate::foundation::core::ViewportSize;
use crate::foundation::error::{StageError, StageResult};
use crate::stage::classify::StageThresholds;
use crate::stage::generate::TransformLimits;
use crate::stage::targets::TargetTable;

/// Timing of item motion on a stage change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionConfig {
    /// Offset and rotation tween.
    pub position: TweenSpec,
    /// Opacity tween, on its own timeline.
    pub opacity: TweenSpec,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            position: TweenSpec::new(1200, Ease::EaseInOut),
            opacity: TweenSpec::new(800, Ease::EaseInOut),
        }
    }
}

/// Call-to-action text timing. Arrays are ordered heading, subheading, button.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextConfig {
    /// Vertical offset of each element while hidden (negative is above its rest position).
    pub hidden_offset: [f64; 3],
    /// Entry tween applied to each element.
    pub reveal: TweenSpec,
    /// Extra delay of each element's entry.
    pub stagger_ms: [u64; 3],
    /// Exit tween, shared by all elements.
    pub hide: TweenSpec,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            hidden_offset: [-100.0, -80.0, -60.0],
            reveal: TweenSpec::new(800, Ease::EaseOut),
            stagger_ms: [0, 200, 400],
            hide: TweenSpec::new(600, Ease::EaseIn),
        }
    }
}

/// Everything the gallery animator needs besides its items.
///
/// Missing JSON fields fall back to the desktop defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Progress breakpoints between stages.
    pub thresholds: StageThresholds,
    /// Per-stage item targets.
    pub targets: TargetTable,
    /// Ranges for the generated stage-1 transforms.
    pub limits: TransformLimits,
    /// Item tween timing.
    pub motion: MotionConfig,
    /// Text reveal and hide timing.
    pub text: TextConfig,
}

impl AnimatorConfig {
    /// Desktop preset.
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Mobile preset: identical timing, earlier exit from the chaotic stage.
    pub fn mobile() -> Self {
        Self {
            thresholds: StageThresholds::MOBILE,
            ..Self::default()
        }
    }

    /// Preset matching the viewport class.
    pub fn for_viewport(size: ViewportSize) -> Self {
        if size.is_mobile() {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }

    /// Check every section.
    pub fn validate(&self) -> StageResult<()> {
        self.thresholds.validate()?;
        self.targets.validate()?;
        self.limits.validate()?;
        self.motion.position.validate()?;
        self.motion.opacity.validate()?;
        self.text.reveal.validate()?;
        self.text.hide.validate()?;
        if self.text.hidden_offset.iter().any(|v| !v.is_finite()) {
            return Err(StageError::validation("text hidden_offset must be finite"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> StageResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| StageError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
            .map_err(|e| StageError::config(format!("load '{}': {e}", path.display())))
    }

    /// Pretty JSON rendering of this config.
    pub fn to_json_pretty(&self) -> StageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/config.rs"]
mod tests;
