use crate::foundation::error::{StageError, StageResult};

pub use kurbo::{Affine, Vec2};

/// Viewport widths strictly below this value use the mobile presets.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Point on the host's animation clock, in milliseconds since its origin.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Clock origin.
    pub const ZERO: Self = Self(0);

    /// Build a timestamp from milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Milliseconds since the clock origin.
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Shift forward by `ms`, saturating at `u64::MAX`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (0 if `earlier` is in the future).
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StageResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Check `num > 0` and `den > 0`.
    pub fn validate(self) -> StageResult<()> {
        if self.den == 0 {
            return Err(StageError::validation("Fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(StageError::validation("Fps num must be > 0"));
        }
        Ok(())
    }

    /// Clock time at which frame `frame` is presented, floored to whole milliseconds.
    pub fn frame_time(self, frame: u64) -> Timestamp {
        let ms = u128::from(frame) * 1000 * u128::from(self.den) / u128::from(self.num);
        Timestamp(u64::try_from(ms).unwrap_or(u64::MAX))
    }

    /// Index of the last frame presented at or before `at`.
    pub fn frame_at(self, at: Timestamp) -> u64 {
        let frames = u128::from(at.0) * u128::from(self.num) / (1000 * u128::from(self.den));
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// How far a container has scrolled through the viewport, normalized to `[0, 1]`.
///
/// Construction never fails: values are clamped and NaN maps to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    /// Container top aligned with viewport top (or not mounted).
    pub const START: Self = Self(0.0);
    /// Container bottom aligned with viewport bottom.
    pub const END: Self = Self(1.0);

    /// Normalize a raw value into `[0, 1]`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for ScrollProgress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

/// Randomized placement of a gallery item: offset from its final slot plus a rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Offset from the item's final slot, in CSS pixels (positive y points down).
    pub offset: Vec2,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
}

impl Transform {
    /// Build a transform from components.
    pub fn new(x: f64, y: f64, rotation_deg: f64) -> Self {
        Self {
            offset: Vec2::new(x, y),
            rotation_deg,
        }
    }

    /// Affine matrix (rotate about the slot origin, then translate).
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::rotate(self.rotation_deg.to_radians())
    }
}

/// Everything a renderer needs to place one gallery item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Offset from the item's final slot.
    pub offset: Vec2,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl VisualState {
    /// Final arrangement: in place, upright and fully opaque.
    pub const ORGANIZED: Self = Self {
        offset: Vec2::ZERO,
        rotation_deg: 0.0,
        opacity: 1.0,
    };

    /// Build a state from components.
    pub fn new(x: f64, y: f64, rotation_deg: f64, opacity: f64) -> Self {
        Self {
            offset: Vec2::new(x, y),
            rotation_deg,
            opacity,
        }
    }

    /// Geometric part of the state.
    pub fn transform(self) -> Transform {
        Transform {
            offset: self.offset,
            rotation_deg: self.rotation_deg,
        }
    }

    /// Component-wise comparison with absolute tolerance `eps`.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.offset.x - other.offset.x).abs() <= eps
            && (self.offset.y - other.offset.y).abs() <= eps
            && (self.rotation_deg - other.rotation_deg).abs() <= eps
            && (self.opacity - other.opacity).abs() <= eps
    }
}

/// Browser viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ViewportSize {
    /// Build a size from components.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` for phone-sized viewports.
    pub fn is_mobile(self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }
}

impl Default for ViewportSize {
    // Size assumed before the first measurement.
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
