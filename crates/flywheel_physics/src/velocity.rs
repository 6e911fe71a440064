//! Pointer velocity estimation
//!
//! Impulse-strategy 1D velocity tracking: velocity is recovered from the
//! kinetic energy the recent samples would have imparted, which is far
//! more robust against jittery pointer input than a two-point difference.
//! Samples live in a fixed ring buffer; the tracker is reset, not
//! reallocated, between gestures.

/// Ring buffer capacity for samples
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the estimate
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped
const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute pointer positions
#[derive(Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record a pointer position at the given time
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Estimated velocity in units/second.
    ///
    /// Zero with fewer than two usable samples or after a stop gap.
    pub fn velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut current = self.index;
        while let Some(sample) = self.samples[current] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 || (count > 0 && gap_exceeds_stop(&self.samples, current)) {
                break;
            }

            positions[count] = sample.position;
            times[count] = -age;

            current = if current == 0 { HISTORY_SIZE - 1 } else { current - 1 };
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Estimated velocity clamped to `[-max, max]` units/second
    pub fn velocity_capped(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let v = self.velocity();
        if v == 0.0 || v.is_nan() {
            return 0.0;
        }
        v.clamp(-max, max)
    }

    /// Forget all samples (gesture boundary)
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Whether the sample at `current` is separated from its successor by a
/// stop-length gap
fn gap_exceeds_stop(samples: &[Option<Sample>; HISTORY_SIZE], current: usize) -> bool {
    let next = (current + 1) % HISTORY_SIZE;
    match (samples[current], samples[next]) {
        (Some(older), Some(newer)) => (newer.time_ms - older.time_ms) > ASSUME_STOPPED_MS,
        _ => false,
    }
}

/// Impulse-strategy velocity: accumulate the work each inter-sample
/// velocity change performs, then convert the kinetic energy back to a
/// signed speed with E = v^2 / 2 (unit mass).
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let count = positions.len();
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_returns_zero() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_single_sample_returns_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker::new();
        // 100 px per 10ms = 10000 px/s
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 100.0);
        tracker.add_sample(20, 200.0);
        tracker.add_sample(30, 300.0);

        let v = tracker.velocity();
        assert!((v - 10000.0).abs() < 1000.0, "expected ~10000, got {v}");
    }

    #[test]
    fn test_negative_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 300.0);
        tracker.add_sample(10, 200.0);
        tracker.add_sample(20, 100.0);
        assert!(tracker.velocity() < 0.0);
    }

    #[test]
    fn test_velocity_capped_both_signs() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(1, 10_000.0);
        assert_eq!(tracker.velocity_capped(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_sample(0, 10_000.0);
        tracker.add_sample(1, 0.0);
        assert_eq!(tracker.velocity_capped(8_000.0), -8_000.0);
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_samples_past_horizon_ignored() {
        let mut tracker = VelocityTracker::new();
        // Stale sample well outside the horizon.
        tracker.add_sample(0, 0.0);
        tracker.add_sample(150, 100.0);
        tracker.add_sample(160, 200.0);
        tracker.add_sample(170, 300.0);
        assert!(tracker.velocity().abs() > 0.0);
    }

    #[test]
    fn test_stop_gap_returns_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }
}
