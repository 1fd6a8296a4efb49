use crate::{
    animation::ease::Ease,
    foundation::core::{Timestamp, Vec2, VisualState},
    foundation::error::{StageError, StageResult},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            rotation_deg: a.rotation_deg + (b.rotation_deg - a.rotation_deg) * t,
            opacity: a.opacity + (b.opacity - a.opacity) * t,
        }
    }
}

/// Timing of one tween: how long it runs, how long it waits first, and its easing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenSpec {
    /// Active duration in milliseconds (0 jumps to the target once the delay elapses).
    pub duration_ms: u64,
    /// Wait before the tween starts moving, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
    /// Easing applied over the active duration.
    pub ease: Ease,
}

impl TweenSpec {
    /// Spec with no delay.
    pub const fn new(duration_ms: u64, ease: Ease) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            ease,
        }
    }

    /// Same spec, started `delay_ms` after the request.
    pub const fn with_delay(self, delay_ms: u64) -> Self {
        Self { delay_ms, ..self }
    }

    /// Time from request to completion.
    pub fn total_ms(self) -> u64 {
        self.delay_ms.saturating_add(self.duration_ms)
    }

    /// Reject easings that cannot be evaluated.
    pub fn validate(self) -> StageResult<()> {
        if !self.ease.is_valid() {
            return Err(StageError::validation(format!(
                "invalid easing {:?}: bezier x control points must be in [0, 1]",
                self.ease
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Origin<T> {
    Fixed(T),
    // Keep sampling the superseded tween until this one starts; its origin is always Fixed.
    Follow(Box<Tween<T>>),
}

/// One eased interpolation toward a target, possibly waiting on a delay first.
///
/// A tween is immutable once built; retargeting produces a new tween that starts from the
/// value the old one had reached (or, for delayed requests, keeps following the old one until
/// the delay elapses).
#[derive(Clone, Debug)]
pub struct Tween<T> {
    origin: Origin<T>,
    to: T,
    start: Timestamp,
    duration_ms: u64,
    ease: Ease,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    /// Tween from `from` to `to`, requested at `requested`; starts after `spec.delay_ms`.
    pub fn new(from: T, to: T, requested: Timestamp, spec: TweenSpec) -> Self {
        Self {
            origin: Origin::Fixed(from),
            to,
            start: requested.after(spec.delay_ms),
            duration_ms: spec.duration_ms,
            ease: spec.ease,
        }
    }

    /// Time at which the tween starts moving.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Time at which the tween reaches its target.
    pub fn end(&self) -> Timestamp {
        self.start.after(self.duration_ms)
    }

    /// Target value.
    pub fn target(&self) -> &T {
        &self.to
    }

    /// `true` while still waiting on the delay.
    pub fn is_pending(&self, now: Timestamp) -> bool {
        now < self.start
    }

    /// `true` once the target has been reached.
    pub fn is_done(&self, now: Timestamp) -> bool {
        now >= self.end()
    }

    /// Value at `now`.
    pub fn sample(&self, now: Timestamp) -> T {
        if now < self.start {
            return self.origin_at(now);
        }
        if self.duration_ms == 0 || now >= self.end() {
            return self.to.clone();
        }
        let from = self.origin_at(self.start);
        let t = now.since(self.start) as f64 / self.duration_ms as f64;
        T::lerp(&from, &self.to, self.ease.apply(t))
    }

    /// Replace this tween with one heading to `to`, requested at `now`.
    ///
    /// The new tween starts from the current value; with a delay it keeps following this
    /// tween's motion until it starts. A request that arrives while this tween is still
    /// waiting supersedes its pending motion entirely.
    pub fn retarget(self, now: Timestamp, to: T, spec: TweenSpec) -> Self {
        if spec.delay_ms == 0 {
            let from = self.sample(now);
            return Self::new(from, to, now, spec);
        }

        let origin = if now < self.start {
            self.origin
        } else if self.is_done(now) {
            Origin::Fixed(self.to)
        } else {
            Origin::Follow(Box::new(self.detached()))
        };

        Self {
            origin,
            to,
            start: now.after(spec.delay_ms),
            duration_ms: spec.duration_ms,
            ease: spec.ease,
        }
    }

    fn origin_at(&self, at: Timestamp) -> T {
        match &self.origin {
            Origin::Fixed(v) => v.clone(),
            Origin::Follow(prev) => prev.sample(at),
        }
    }

    // Running tweens no longer need the history they followed during their delay.
    fn detached(self) -> Self {
        let from = self.origin_at(self.start);
        Self {
            origin: Origin::Fixed(from),
            ..self
        }
    }
}

/// A property value that may be moving toward a target.
///
/// This is the unit the gallery driver owns per item property: it can be set instantly or
/// animated, and is always sampled at an explicit timestamp.
#[derive(Clone, Debug)]
pub struct Animated<T> {
    rest: T,
    tween: Option<Tween<T>>,
}

impl<T> Animated<T>
where
    T: Lerp + Clone,
{
    /// Property resting at `value`.
    pub fn new(value: T) -> Self {
        Self {
            rest: value,
            tween: None,
        }
    }

    /// Jump to `value`, cancelling any tween.
    pub fn set(&mut self, value: T) {
        self.rest = value;
        self.tween = None;
    }

    /// Start moving toward `to`, retargeting from the current value if already moving.
    pub fn animate_to(&mut self, now: Timestamp, to: T, spec: TweenSpec) {
        let next = match self.tween.take() {
            Some(tween) => tween.retarget(now, to, spec),
            None => Tween::new(self.rest.clone(), to, now, spec),
        };
        self.tween = Some(next);
    }

    /// Value at `now`.
    pub fn sample(&self, now: Timestamp) -> T {
        match &self.tween {
            Some(tween) => tween.sample(now),
            None => self.rest.clone(),
        }
    }

    /// Value the property is heading to (or resting at).
    pub fn target(&self) -> &T {
        match &self.tween {
            Some(tween) => tween.target(),
            None => &self.rest,
        }
    }

    /// `true` while a tween is waiting or moving at `now`.
    pub fn is_animating(&self, now: Timestamp) -> bool {
        self.tween.as_ref().is_some_and(|t| !t.is_done(now))
    }

    /// Drop a finished tween so the property rests at its target.
    pub fn settle(&mut self, now: Timestamp) {
        if let Some(tween) = self.tween.take_if(|t| t.is_done(now)) {
            self.rest = tween.to;
        }
    }

    /// Freeze at the value reached by `now`, cancelling any waiting or running tween.
    pub fn stop(&mut self, now: Timestamp) {
        if let Some(tween) = self.tween.take() {
            self.rest = tween.sample(now);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
