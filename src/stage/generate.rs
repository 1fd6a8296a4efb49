use crate::foundation::core::Transform;
use crate::foundation::error::{StageError, StageResult};
use crate::foundation::math::Rng64;

/// Closed interval used as a sampling range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Span {
    /// Build a span; ordering is checked by [`TransformLimits::validate`].
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` when `v` lies inside the span.
    pub fn contains(self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    fn validate(self, what: &str) -> StageResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(StageError::validation(format!(
                "{what} span must be finite with min <= max"
            )));
        }
        Ok(())
    }
}

/// Ranges the chaotic stage-1 transforms are drawn from.
///
/// The defaults cluster items toward the bottom (positive y is down) with wide left/right
/// scatter and heavy rotations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformLimits {
    /// Horizontal offset range.
    pub x: Span,
    /// Vertical offset range.
    pub y: Span,
    /// Rotation range in degrees.
    pub rotation_deg: Span,
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self {
            x: Span::new(-200.0, 200.0),
            y: Span::new(80.0, 200.0),
            rotation_deg: Span::new(-60.0, 60.0),
        }
    }
}

impl TransformLimits {
    /// Check every span is finite and ordered.
    pub fn validate(&self) -> StageResult<()> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.rotation_deg.validate("rotation_deg")
    }

    /// `true` when `t` could have been produced by [`TransformLimits::generate`].
    pub fn admits(&self, t: Transform) -> bool {
        self.x.contains(t.offset.x)
            && self.y.contains(t.offset.y)
            && self.rotation_deg.contains(t.rotation_deg)
    }

    /// Draw `count` independent transforms.
    pub fn generate(&self, count: usize, rng: &mut Rng64) -> Vec<Transform> {
        (0..count)
            .map(|_| {
                let x = rng.next_in(self.x.min, self.x.max);
                let y = rng.next_in(self.y.min, self.y.max);
                let rotation = rng.next_in(self.rotation_deg.min, self.rotation_deg.max);
                Transform::new(x, y, rotation)
            })
            .collect()
    }

    /// [`TransformLimits::generate`] with a fresh generator seeded by `seed`.
    pub fn generate_seeded(&self, count: usize, seed: u64) -> Vec<Transform> {
        self.generate(count, &mut Rng64::new(seed))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/generate.rs"]
mod tests;
