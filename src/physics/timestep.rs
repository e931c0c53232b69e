//! Fixed-timestep scheduler
//!
//! Render frames arrive at a variable rate; the simulation only ever advances
//! in whole fixed steps. Frame time is banked in an accumulator and drained one
//! fixed step at a time. Whatever is left over becomes the interpolation alpha.

use crate::consts::MAX_CATCH_UP_FACTOR;

/// Accumulator and step bookkeeping for one world generation
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_ms: f64,
    max_frame_ms: f64,
    accumulator: f64,
    step_count: u64,
    captured_alpha: f32,
}

impl FixedTimestep {
    /// `fixed_ms` must be finite and > 0 (checked by config validation)
    pub fn new(fixed_ms: f64) -> Self {
        debug_assert!(fixed_ms.is_finite() && fixed_ms > 0.0);
        Self {
            fixed_ms,
            max_frame_ms: fixed_ms * MAX_CATCH_UP_FACTOR,
            accumulator: 0.0,
            step_count: 0,
            captured_alpha: 0.0,
        }
    }

    /// Bank a frame's elapsed time; returns the amount actually banked.
    ///
    /// Deltas are clamped in time (not in iterations) to `MAX_CATCH_UP_FACTOR`
    /// fixed steps, so one frame never runs more than that many steps no matter
    /// how small the timestep is configured. Negative and NaN deltas bank nothing.
    pub fn accumulate(&mut self, delta_ms: f64) -> f64 {
        let delta = if delta_ms.is_nan() || delta_ms <= 0.0 {
            0.0
        } else {
            delta_ms.min(self.max_frame_ms)
        };
        if delta < delta_ms {
            log::debug!("Frame delta {delta_ms:.2}ms clamped to {delta:.2}ms");
        }
        self.accumulator += delta;
        delta
    }

    /// Whether at least one whole fixed step is owed
    #[inline]
    pub fn step_due(&self) -> bool {
        self.accumulator >= self.fixed_ms
    }

    /// Pay for one fixed step that has just run
    pub fn complete_step(&mut self) {
        self.step_count += 1;
        // Repeated subtraction can dip a hair below zero
        self.accumulator = (self.accumulator - self.fixed_ms).max(0.0);
    }

    /// Fraction of the way into the next pending step, in [0, 1]
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.fixed_ms).clamp(0.0, 1.0) as f32
    }

    /// Freeze the current alpha for debug overlays
    pub fn capture_alpha(&mut self) -> f32 {
        self.captured_alpha = self.alpha();
        self.captured_alpha
    }

    #[inline]
    pub fn captured_alpha(&self) -> f32 {
        self.captured_alpha
    }

    #[inline]
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator
    }

    #[inline]
    pub fn fixed_ms(&self) -> f64 {
        self.fixed_ms
    }

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Zero the accumulator, step count and captured alpha
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.step_count = 0;
        self.captured_alpha = 0.0;
    }
}
