//! The fixed reveal timing script.
//!
//! All windows are measured on one continuous clock whose origin is the end of the startup
//! delay; phases do not reset elapsed time.

use crate::{animation::phase::Phase, foundation::math::clamp01};

/// Idle time between scheduling a run and the start of the halftone window.
pub const STARTUP_DELAY_MS: f64 = 1000.0;

/// One phase window and the stagger parameters of the per-dot progress curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseWindow {
    pub phase: Phase,
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Fraction of the window over which per-dot delays are spread.
    pub spread: f64,
    /// Slope of the per-dot ramp; large enough that `(1 - spread) * accel >= 1`.
    pub accel: f64,
}

impl PhaseWindow {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Window-local progress in `[0, 1]` at `elapsed_ms` after the run origin.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        clamp01((elapsed_ms - self.start_ms) / self.duration_ms)
    }

    /// Staggered progress of a dot with delay fraction `delay` at window progress `p`.
    pub fn dot_progress(&self, p: f64, delay: f64) -> f64 {
        clamp01((p - delay * self.spread) * self.accel)
    }

    pub fn contains(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.start_ms && elapsed_ms < self.end_ms()
    }
}

pub const HALFTONE_WINDOW: PhaseWindow = PhaseWindow {
    phase: Phase::Halftone,
    start_ms: 0.0,
    duration_ms: 2000.0,
    spread: 0.5,
    accel: 2.0,
};

pub const COLOR_WINDOW: PhaseWindow = PhaseWindow {
    phase: Phase::Color,
    start_ms: 2000.0,
    duration_ms: 4500.0,
    spread: 0.4,
    accel: 2.5,
};

pub const REFINEMENT_WINDOW: PhaseWindow = PhaseWindow {
    phase: Phase::Refinement,
    start_ms: 6500.0,
    duration_ms: 2000.0,
    spread: 0.3,
    accel: 1.43,
};

pub const WINDOWS: [PhaseWindow; 3] = [HALFTONE_WINDOW, COLOR_WINDOW, REFINEMENT_WINDOW];

/// Elapsed time at which a run reaches [`Phase::Complete`].
pub const COMPLETE_AT_MS: f64 = 8500.0;

/// Color-window progress after which refinement starts being computed ahead of time.
pub const LOOKAHEAD_FROM: f64 = 0.6;
const LOOKAHEAD_OFFSET: f64 = 0.5;
const LOOKAHEAD_RAMP: f64 = 2.0;
const LOOKAHEAD_ACCEL: f64 = 1.5;

/// Phase in effect `elapsed_ms` after the run origin.
pub fn phase_at(elapsed_ms: f64) -> Phase {
    if elapsed_ms < 0.0 {
        return Phase::Blank;
    }
    WINDOWS
        .iter()
        .find(|w| w.contains(elapsed_ms))
        .map(|w| w.phase)
        .unwrap_or(Phase::Complete)
}

/// Refinement progress precomputed during the tail of the color window.
///
/// `None` until color progress exceeds [`LOOKAHEAD_FROM`].
pub fn refinement_lookahead(color_progress: f64, refinement_delay: f64) -> Option<f64> {
    if color_progress <= LOOKAHEAD_FROM {
        return None;
    }
    let ramp = clamp01((color_progress - LOOKAHEAD_OFFSET) * LOOKAHEAD_RAMP);
    Some(clamp01(
        (ramp - refinement_delay * REFINEMENT_WINDOW.spread) * LOOKAHEAD_ACCEL,
    ))
}

/// Total wall-clock length of a run including the startup delay.
pub fn run_length_ms(startup_delay_ms: f64) -> f64 {
    startup_delay_ms + COMPLETE_AT_MS
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
