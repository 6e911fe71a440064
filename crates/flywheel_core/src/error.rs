//! Error taxonomy
//!
//! Recoverable, caller-reportable failures get typed errors here.
//! Programming errors (kind count below one, handle aliasing) are caller
//! bugs and fail fast with panics at the violation site instead.

use thiserror::Error;

/// Rejected scroll configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("touch slop must be finite and non-negative, got {0}")]
    InvalidTouchSlop(f32),

    #[error("fling velocity bounds must satisfy 0 < min <= max, got {min}..{max}")]
    InvalidVelocityRange { min: f32, max: f32 },

    #[error("fling deceleration must be finite and positive, got {0}")]
    InvalidDeceleration(f32),

    #[error("max overscroll must be within 0.0..=1.0 of the viewport, got {0}")]
    InvalidOverscroll(f32),
}
