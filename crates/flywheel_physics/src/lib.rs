//! Flywheel Motion Support
//!
//! Physics and timing primitives behind fling and overscroll:
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Fling Integrator**: friction deceleration with spring-back hand-off
//! - **Velocity Tracking**: impulse-strategy estimation over recent samples
//! - **Deferred Tasks**: cancellable timers driven from the host run loop
//!
//! Everything here is single-threaded and tick-driven; nothing blocks.

pub mod fling;
pub mod scheduler;
pub mod spring;
pub mod velocity;

pub use fling::MotionIntegrator;
pub use scheduler::{TaskId, TickScheduler, Token};
pub use spring::{Spring, SpringConfig};
pub use velocity::VelocityTracker;
