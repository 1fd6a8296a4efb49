use crate::foundation::core::Timestamp;
use crate::foundation::error::{StageError, StageResult};

/// Physical parameters of a [`Spring`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement.
    pub stiffness: f64,
    /// Opposing force per unit of velocity.
    pub damping: f64,
    /// Inertia of the follower.
    pub mass: f64,
    /// Distance from the target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed (units per second) under which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    /// Heavy, overdamped follower used by the scroll-reveal section.
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 35.0,
            mass: 1.2,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Damping that returns fastest without overshoot for `stiffness` and `mass`.
    pub fn critical(stiffness: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping: 2.0 * (stiffness * mass).sqrt(),
            mass,
            ..Self::default()
        }
    }

    /// Positive stiffness and mass, non-negative damping and rest thresholds.
    pub fn validate(self) -> StageResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !positive(self.stiffness) || !positive(self.mass) {
            return Err(StageError::validation(format!(
                "spring stiffness ({}) and mass ({}) must be positive",
                self.stiffness, self.mass
            )));
        }
        if !non_negative(self.damping)
            || !non_negative(self.rest_delta)
            || !non_negative(self.rest_speed)
        {
            return Err(StageError::validation(
                "spring damping and rest thresholds must be non-negative",
            ));
        }
        Ok(())
    }

    /// Undamped angular frequency in rad/s.
    pub fn natural_frequency(self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// `< 1` oscillates, `1` is critical, `> 1` creeps.
    pub fn damping_ratio(self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    // Displacement from the target and velocity after `t` seconds.
    fn solve(self, x0: f64, v0: f64, t: f64) -> (f64, f64) {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            let b = v0 + w0 * x0;
            let e = (-w0 * t).exp();
            let x = e * (x0 + b * t);
            return (x, e * b - w0 * x);
        }
        if zeta < 1.0 {
            let a = zeta * w0;
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * x0) / wd;
            let (sin, cos) = (wd * t).sin_cos();
            let e = (-a * t).exp();
            let x = e * (x0 * cos + b * sin);
            let v = e * ((b * wd - a * x0) * cos - (a * b + x0 * wd) * sin);
            return (x, v);
        }

        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - root);
        let r2 = -w0 * (zeta + root);
        let c1 = (v0 - r2 * x0) / (r1 - r2);
        let c2 = x0 - c1;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    }
}

/// A scalar that chases its target like a damped mass on a spring.
///
/// Motion is solved in closed form from the last retarget, so sampling is exact at any
/// timestamp and independent of how often the host asks. Once both the distance to the target
/// and the speed fall under the rest thresholds the value snaps to the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    target: f64,
    // Displacement and velocity at `anchor`.
    x0: f64,
    v0: f64,
    anchor: Timestamp,
}

impl Spring {
    /// Spring resting at `value`.
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            config,
            target: value,
            x0: 0.0,
            v0: 0.0,
            anchor: Timestamp::ZERO,
        }
    }

    /// Parameters.
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Value being chased.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Value and velocity at `now`; times before the last retarget read as that instant.
    pub fn state(&self, now: Timestamp) -> (f64, f64) {
        if self.x0 == 0.0 && self.v0 == 0.0 {
            return (self.target, 0.0);
        }
        let t = now.since(self.anchor) as f64 / 1000.0;
        let (x, v) = self.config.solve(self.x0, self.v0, t);
        if x.abs() < self.config.rest_delta && v.abs() < self.config.rest_speed {
            return (self.target, 0.0);
        }
        (self.target + x, v)
    }

    /// Value at `now`.
    pub fn sample(&self, now: Timestamp) -> f64 {
        self.state(now).0
    }

    /// Chase `target` from wherever the spring is at `now`, keeping its velocity.
    pub fn set_target(&mut self, now: Timestamp, target: f64) {
        if target == self.target {
            return;
        }
        let (value, velocity) = self.state(now);
        self.target = target;
        self.x0 = value - target;
        self.v0 = velocity;
        self.anchor = now;
    }

    /// Jump to `value` and stop.
    pub fn jump(&mut self, value: f64) {
        self.target = value;
        self.x0 = 0.0;
        self.v0 = 0.0;
    }

    /// Freeze at the value reached by `now`.
    pub fn stop(&mut self, now: Timestamp) {
        self.jump(self.sample(now));
    }

    /// `true` once the spring has come to rest on its target.
    pub fn is_at_rest(&self, now: Timestamp) -> bool {
        self.state(now) == (self.target, 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/spring.rs"]
mod tests;
