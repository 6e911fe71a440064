//! Fling integration
//!
//! The black-box "current position / still moving" integrator the gesture
//! controller consults each animation tick. A fling is constant friction
//! applied against the velocity; overscroll return is handed off to a
//! spring. Callers own exactly one integrator per list and reset it
//! between gestures instead of reallocating.

use crate::spring::{Spring, SpringConfig};

/// What the integrator is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Fling,
    SpringBack,
}

/// Friction/spring integrator for fling and spring-back motion
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    phase: Phase,
    position: f32,
    velocity: f32,
    /// Deceleration magnitude in px/s^2 applied against the velocity
    deceleration: f32,
    /// Speed below which a fling counts as finished, px/s
    min_velocity: f32,
    spring: Spring,
}

impl MotionIntegrator {
    pub fn new(deceleration: f32, min_velocity: f32, spring_config: SpringConfig) -> Self {
        Self {
            phase: Phase::Idle,
            position: 0.0,
            velocity: 0.0,
            deceleration,
            min_velocity,
            spring: Spring::new(spring_config, 0.0),
        }
    }

    /// Start a fling from `start` with `velocity` px/s
    pub fn fling(&mut self, start: f32, velocity: f32) {
        self.phase = Phase::Fling;
        self.position = start;
        self.velocity = velocity;
        tracing::debug!(start, velocity, "fling start");
    }

    /// Start a spring-back from `start` toward `target`, seeded with any
    /// residual velocity (zero for a plain overscroll release)
    pub fn spring_back(&mut self, start: f32, target: f32, velocity: f32) {
        self.phase = Phase::SpringBack;
        self.position = start;
        self.velocity = velocity;
        self.spring.reset(start);
        self.spring.set_velocity(velocity);
        self.spring.set_target(target);
        tracing::debug!(start, target, velocity, "spring-back start");
    }

    /// Advance by `dt` seconds. Returns true while motion remains.
    pub fn step(&mut self, dt: f32) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Fling => {
                self.position += self.velocity * dt;

                let decel = self.deceleration * dt;
                if self.velocity > 0.0 {
                    self.velocity = (self.velocity - decel).max(0.0);
                } else {
                    self.velocity = (self.velocity + decel).min(0.0);
                }

                if self.velocity.abs() < self.min_velocity {
                    self.velocity = 0.0;
                    self.phase = Phase::Idle;
                    tracing::trace!(position = self.position, "fling settled");
                    return false;
                }
                true
            }
            Phase::SpringBack => {
                self.spring.step(dt);
                self.position = self.spring.value();
                self.velocity = self.spring.velocity();
                if self.spring.is_settled() {
                    self.position = self.spring.target();
                    self.velocity = 0.0;
                    self.phase = Phase::Idle;
                    tracing::trace!(position = self.position, "spring-back settled");
                    return false;
                }
                true
            }
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_springing(&self) -> bool {
        self.phase == Phase::SpringBack
    }

    /// Abort any in-flight motion, keeping the current position
    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.velocity = 0.0;
    }
}
