use crate::{
    animation::anim::Lerp,
    animation::ease::Ease,
    foundation::core::ScrollProgress,
    foundation::error::{StageError, StageResult},
};

fn linear() -> Ease {
    Ease::Linear
}

/// One breakpoint of a [`ProgressMap`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stop<T> {
    /// Input position, usually a scroll progress in `[0, 1]`.
    pub at: f64,
    /// Output at `at`.
    pub value: T,
    /// Easing applied toward the next stop.
    #[serde(default = "linear")]
    pub ease: Ease,
}

impl<T> Stop<T> {
    /// Linear stop.
    pub fn new(at: f64, value: T) -> Self {
        Self {
            at,
            value,
            ease: Ease::Linear,
        }
    }
}

/// Piecewise mapping from an input range to values.
///
/// Inputs before the first stop hold the first value and inputs past the last stop hold the
/// last one. Between two stops the value is interpolated with the earlier stop's easing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProgressMap<T> {
    stops: Vec<Stop<T>>,
}

impl<T> ProgressMap<T>
where
    T: Lerp + Clone,
{
    /// Validated map over `stops`.
    pub fn new(stops: Vec<Stop<T>>) -> StageResult<Self> {
        let map = Self { stops };
        map.validate()?;
        Ok(map)
    }

    /// Linear map through `(at, value)` pairs.
    pub fn linear(points: impl IntoIterator<Item = (f64, T)>) -> StageResult<Self> {
        Self::new(points.into_iter().map(|(at, v)| Stop::new(at, v)).collect())
    }

    /// At least one stop, finite and sorted positions, evaluable easings.
    pub fn validate(&self) -> StageResult<()> {
        if self.stops.is_empty() {
            return Err(StageError::validation("progress map needs at least one stop"));
        }
        if !self.stops.iter().all(|s| s.at.is_finite()) {
            return Err(StageError::validation("progress map stops must be finite"));
        }
        if !self.stops.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(StageError::validation(
                "progress map stops must be sorted by position",
            ));
        }
        if let Some(stop) = self.stops.iter().find(|s| !s.ease.is_valid()) {
            return Err(StageError::validation(format!(
                "invalid easing {:?} at stop {}",
                stop.ease, stop.at
            )));
        }
        Ok(())
    }

    /// Breakpoints in order.
    pub fn stops(&self) -> &[Stop<T>] {
        &self.stops
    }

    /// Value at input `x`.
    pub fn map(&self, x: f64) -> T {
        let idx = self.stops.partition_point(|s| s.at <= x);
        if idx == 0 {
            return self.stops[0].value.clone();
        }
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].value.clone();
        }

        let a = &self.stops[idx - 1];
        let b = &self.stops[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return a.value.clone();
        }
        let t = (x - a.at) / span;
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }

    /// Value at scroll position `progress`.
    pub fn at(&self, progress: ScrollProgress) -> T {
        self.map(progress.get())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/keyframes.rs"]
mod tests;
