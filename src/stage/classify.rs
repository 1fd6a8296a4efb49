use std::fmt;

use crate::foundation::core::ScrollProgress;
use crate::foundation::error::{StageError, StageResult};

/// Discrete arrangement phase of the gallery.
///
/// Serialized as its number (`1..=4`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    /// Stage 1: random offsets and heavy rotations.
    Scattered,
    /// Stage 2: random offsets, rotations removed.
    Straightened,
    /// Stage 3: small hand-authored residual shifts.
    Settling,
    /// Stage 4: final layout; call-to-action text visible.
    Organized,
}

impl Stage {
    /// All stages in scroll order.
    pub const ALL: [Stage; 4] = [
        Stage::Scattered,
        Stage::Straightened,
        Stage::Settling,
        Stage::Organized,
    ];

    /// Stage number, `1..=4`.
    pub fn number(self) -> u8 {
        match self {
            Self::Scattered => 1,
            Self::Straightened => 2,
            Self::Settling => 3,
            Self::Organized => 4,
        }
    }

    /// Whether the call-to-action text is shown in this stage.
    pub fn shows_text(self) -> bool {
        self == Self::Organized
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = StageError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::Scattered),
            2 => Ok(Self::Straightened),
            3 => Ok(Self::Settling),
            4 => Ok(Self::Organized),
            other => Err(StageError::validation(format!(
                "stage must be in 1..=4, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.number())
    }
}

/// Inclusive upper progress bounds of stages 1-3; anything above the last is stage 4.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageThresholds {
    /// Progress up to and including this value is [`Stage::Scattered`].
    pub scattered_max: f64,
    /// Progress up to and including this value is [`Stage::Straightened`].
    pub straightened_max: f64,
    /// Progress up to and including this value is [`Stage::Settling`].
    pub settling_max: f64,
}

impl StageThresholds {
    /// Desktop breakpoints; the final stage triggers early so it holds longer.
    pub const DESKTOP: Self = Self {
        scattered_max: 0.10,
        straightened_max: 0.25,
        settling_max: 0.45,
    };

    /// Mobile breakpoints; the chaotic stage is shorter on small screens.
    pub const MOBILE: Self = Self {
        scattered_max: 0.05,
        straightened_max: 0.25,
        settling_max: 0.45,
    };

    /// Check `0 <= scattered_max < straightened_max < settling_max <= 1`.
    pub fn validate(&self) -> StageResult<()> {
        let bounds = [self.scattered_max, self.straightened_max, self.settling_max];
        if bounds.iter().any(|b| !b.is_finite() || !(0.0..=1.0).contains(b)) {
            return Err(StageError::validation(
                "stage thresholds must be finite and within [0, 1]",
            ));
        }
        if !bounds.windows(2).all(|w| w[0] < w[1]) {
            return Err(StageError::validation(
                "stage thresholds must be strictly increasing",
            ));
        }
        Ok(())
    }

    /// Map progress to its stage. Boundary values belong to the lower stage.
    pub fn classify(&self, progress: ScrollProgress) -> Stage {
        let p = progress.get();
        if p <= self.scattered_max {
            Stage::Scattered
        } else if p <= self.straightened_max {
            Stage::Straightened
        } else if p <= self.settling_max {
            Stage::Settling
        } else {
            Stage::Organized
        }
    }
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self::DESKTOP
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/classify.rs"]
mod tests;
