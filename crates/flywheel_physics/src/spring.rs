//! Spring physics
//!
//! Damped harmonic springs integrated with RK4. Used for overscroll
//! spring-back, where the stiff critically-damped default gives an
//! elastic snap with no rebound.

/// Spring tuning parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per unit displacement
    pub stiffness: f32,
    /// Velocity damping coefficient
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Very stiff, slightly overdamped spring for fast snap with no rebound.
    /// Critical damping for stiffness 3000 is 2 * sqrt(3000) ~= 109.5.
    pub const fn snap() -> Self {
        Self::new(3000.0, 110.0, 1.0)
    }

    /// Stiff spring (less wobbly)
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Gentle spring (more wobbly)
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snap()
    }
}

/// Displacement below which a spring counts as at rest
const REST_DELTA: f32 = 0.1;
/// Speed below which a spring counts as at rest
const REST_SPEED: f32 = 0.5;

/// A damped spring animating a scalar value toward a target
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Seed the spring with an initial velocity (e.g. residual fling speed)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once displacement and speed are both inside the rest window
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Reset to a new start value at rest, keeping the configuration
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.target = value;
    }

    /// Advance by `dt` seconds with a single RK4 step.
    ///
    /// Large `dt` (dropped frames) is subdivided so stiff springs stay
    /// stable at any tick rate.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        // Stiff springs need small steps; 4ms sub-steps keep RK4 stable
        // well past the default stiffness.
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(0.004);
            self.rk4_step(h);
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn accel(&self, value: f32, velocity: f32) -> f32 {
        let displacement = value - self.target;
        (-self.config.stiffness * displacement - self.config.damping * velocity) / self.config.mass
    }

    fn rk4_step(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.accel(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.accel(x + 0.5 * h * k1x, v + 0.5 * h * k1v);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.accel(x + 0.5 * h * k2x, v + 0.5 * h * k2v);

        let k4x = v + h * k3v;
        let k4v = self.accel(x + h * k3x, v + h * k3v);

        self.value = x + (h / 6.0) * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + (h / 6.0) * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_settled(spring: &mut Spring, max_secs: f32) -> f32 {
        let mut t = 0.0;
        while !spring.is_settled() && t < max_secs {
            spring.step(1.0 / 120.0);
            t += 1.0 / 120.0;
        }
        t
    }

    #[test]
    fn test_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::snap(), 100.0);
        spring.set_target(0.0);

        let t = run_until_settled(&mut spring, 5.0);
        assert!(t < 5.0, "snap spring should settle quickly, took {t}s");
        assert!((spring.value() - 0.0).abs() < 0.5);
        assert_eq!(spring.value(), spring.target());
    }

    #[test]
    fn test_overdamped_snap_does_not_overshoot() {
        let mut spring = Spring::new(SpringConfig::snap(), 50.0);
        spring.set_target(0.0);

        for _ in 0..600 {
            spring.step(1.0 / 120.0);
            assert!(
                spring.value() >= -0.5,
                "snap spring overshot to {}",
                spring.value()
            );
        }
    }

    #[test]
    fn test_initial_velocity_stretches_before_return() {
        // Seeded away from the target, the value first moves further out.
        let mut spring = Spring::new(SpringConfig::gentle(), 10.0);
        spring.set_target(0.0);
        spring.set_velocity(500.0);

        spring.step(1.0 / 120.0);
        assert!(spring.value() > 10.0);

        run_until_settled(&mut spring, 10.0);
        assert!((spring.value() - 0.0).abs() < 0.5);
    }

    #[test]
    fn test_at_rest_spring_stays_put() {
        let mut spring = Spring::new(SpringConfig::default(), 42.0);
        spring.step(1.0);
        assert_eq!(spring.value(), 42.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::snap(), 200.0);
        spring.set_target(0.0);
        // One giant step (e.g. app resumed after suspension).
        spring.step(2.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 0.0).abs() < 1.0);
    }
}
