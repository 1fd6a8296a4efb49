use crate::foundation::core::{Transform, Vec2, VisualState};
use crate::foundation::error::{StageError, StageResult};
use crate::stage::classify::Stage;

/// Per-stage placement rules for gallery items.
///
/// Stage 1 uses each item's generated transform, stage 2 keeps its offset but drops the
/// rotation, stage 3 uses the hand-authored `settling_shifts` table, and stage 4 is the final
/// layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TargetTable {
    /// Opacity for stages 1 through 4.
    pub opacity: [f64; 4],
    /// Stage-3 offset per item index.
    pub settling_shifts: Vec<Vec2>,
    /// Item indices that keep a residual tilt in stage 3.
    pub tilted: Vec<usize>,
    /// Residual tilt in degrees.
    pub tilt_deg: f64,
}

impl Default for TargetTable {
    fn default() -> Self {
        Self {
            opacity: [0.7, 0.8, 0.9, 1.0],
            // Outer-left top, outer-left bottom, inner-left, middle, inner-right,
            // outer-right bottom, outer-right top.
            settling_shifts: vec![
                Vec2::new(30.0, -20.0),
                Vec2::new(-25.0, 35.0),
                Vec2::new(40.0, 15.0),
                Vec2::new(-15.0, -30.0),
                Vec2::new(25.0, 20.0),
                Vec2::new(-35.0, -15.0),
                Vec2::new(20.0, 25.0),
            ],
            tilted: vec![4, 5],
            tilt_deg: 15.0,
        }
    }
}

impl TargetTable {
    /// Check opacities are in `[0, 1]` and every number is finite.
    pub fn validate(&self) -> StageResult<()> {
        if self
            .opacity
            .iter()
            .any(|o| !o.is_finite() || !(0.0..=1.0).contains(o))
        {
            return Err(StageError::validation(
                "stage opacities must be finite and within [0, 1]",
            ));
        }
        if self.settling_shifts.iter().any(|s| !s.is_finite()) {
            return Err(StageError::validation("settling shifts must be finite"));
        }
        if !self.tilt_deg.is_finite() {
            return Err(StageError::validation("tilt_deg must be finite"));
        }
        Ok(())
    }

    /// Opacity an item takes in `stage`.
    pub fn opacity_for(&self, stage: Stage) -> f64 {
        self.opacity[usize::from(stage.number() - 1)]
    }

    /// Stage-3 offset of item `index`; indices past the table get no shift.
    pub fn settling_shift(&self, index: usize) -> Vec2 {
        self.settling_shifts.get(index).copied().unwrap_or(Vec2::ZERO)
    }

    /// Where item `index`, generated with `transform`, should head in `stage`.
    pub fn resolve(&self, stage: Stage, index: usize, transform: Transform) -> VisualState {
        let opacity = self.opacity_for(stage);
        match stage {
            Stage::Scattered => VisualState {
                offset: transform.offset,
                rotation_deg: transform.rotation_deg,
                opacity,
            },
            Stage::Straightened => VisualState {
                offset: transform.offset,
                rotation_deg: 0.0,
                opacity,
            },
            Stage::Settling => {
                // Items past the table get the neutral placement, tilt included.
                let (offset, rotation_deg) = match self.settling_shifts.get(index) {
                    Some(shift) if self.tilted.contains(&index) => (*shift, self.tilt_deg),
                    Some(shift) => (*shift, 0.0),
                    None => (Vec2::ZERO, 0.0),
                };
                VisualState {
                    offset,
                    rotation_deg,
                    opacity,
                }
            }
            Stage::Organized => VisualState {
                offset: Vec2::ZERO,
                rotation_deg: 0.0,
                opacity,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/targets.rs"]
mod tests;
