//! Scroll and gesture tuning
//!
//! All the thresholds a host may want to retune live here. Defaults track
//! conventional touch-screen values at ~160dpi; hosts with different
//! densities scale the pixel-valued fields.

use flywheel_core::ConfigError;
use flywheel_physics::SpringConfig;

/// Tuning for touch handling, fling physics, and overscroll
#[derive(Debug, Clone, Copy)]
pub struct ScrollConfig {
    /// Pointer travel in px before a press becomes a scroll
    pub touch_slop: f32,
    /// Delay before a press is treated as a deliberate tap
    pub tap_timeout_ms: u64,
    /// Additional delay before a held tap becomes a long press
    pub long_press_timeout_ms: u64,
    /// Release speeds below this never start a fling, px/s
    pub min_fling_velocity: f32,
    /// Release speeds are capped to this before flinging, px/s
    pub max_fling_velocity: f32,
    /// Friction applied against a fling, px/s^2
    pub fling_deceleration: f32,
    /// Maximum overscroll displacement as a fraction of viewport height
    pub max_overscroll: f32,
    /// When false, edge hits stop motion dead instead of stretching
    pub overscroll_enabled: bool,
    /// Spring used for overscroll return
    pub spring: SpringConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            tap_timeout_ms: 100,
            long_press_timeout_ms: 400,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            fling_deceleration: 2000.0,
            max_overscroll: 0.3,
            overscroll_enabled: true,
            spring: SpringConfig::snap(),
        }
    }
}

impl ScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hard-stop edges, no rubber band
    pub fn no_overscroll() -> Self {
        Self {
            overscroll_enabled: false,
            max_overscroll: 0.0,
            ..Self::default()
        }
    }

    /// Faster, tighter overscroll return
    pub fn stiff_spring() -> Self {
        Self {
            spring: SpringConfig::stiff(),
            ..Self::default()
        }
    }

    /// Check field ranges before the engine accepts the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(ConfigError::InvalidTouchSlop(self.touch_slop));
        }
        if !self.min_fling_velocity.is_finite()
            || !self.max_fling_velocity.is_finite()
            || self.min_fling_velocity < 0.0
            || self.max_fling_velocity < self.min_fling_velocity
        {
            return Err(ConfigError::InvalidVelocityRange {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        if !self.fling_deceleration.is_finite() || self.fling_deceleration <= 0.0 {
            return Err(ConfigError::InvalidDeceleration(self.fling_deceleration));
        }
        if !self.max_overscroll.is_finite()
            || self.max_overscroll < 0.0
            || self.max_overscroll > 1.0
        {
            return Err(ConfigError::InvalidOverscroll(self.max_overscroll));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScrollConfig::default().validate().is_ok());
        assert!(ScrollConfig::no_overscroll().validate().is_ok());
        assert!(ScrollConfig::stiff_spring().validate().is_ok());
    }

    #[test]
    fn test_inverted_velocity_range_rejected() {
        let config = ScrollConfig {
            min_fling_velocity: 100.0,
            max_fling_velocity: 50.0,
            ..ScrollConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidVelocityRange { .. })
        ));
    }

    #[test]
    fn test_negative_slop_rejected() {
        let config = ScrollConfig {
            touch_slop: -1.0,
            ..ScrollConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTouchSlop(_))
        ));
    }

    #[test]
    fn test_overscroll_fraction_bounded() {
        let config = ScrollConfig {
            max_overscroll: 1.5,
            ..ScrollConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOverscroll(_))
        ));
    }
}
