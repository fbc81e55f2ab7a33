use crate::{
    animation::timeline::{COLOR_WINDOW, HALFTONE_WINDOW, REFINEMENT_WINDOW, refinement_lookahead},
    foundation::math::Rng64,
};

/// Per-dot animation progress plus the delays drawn for the current run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DotState {
    pub halftone: f64,
    pub color: f64,
    pub refinement: f64,
    pub halftone_delay: f64,
    pub color_delay: f64,
    pub refinement_delay: f64,
}

impl DotState {
    fn fresh(rng: &mut Rng64) -> Self {
        Self {
            halftone: 0.0,
            color: 0.0,
            refinement: 0.0,
            halftone_delay: rng.next_unit(),
            color_delay: rng.next_unit(),
            refinement_delay: rng.next_unit(),
        }
    }

    /// Raise progress to its value at `elapsed_ms`; values are never lowered.
    fn advance(&mut self, elapsed_ms: f64) {
        let ht = HALFTONE_WINDOW.dot_progress(
            HALFTONE_WINDOW.progress_at(elapsed_ms),
            self.halftone_delay,
        );
        self.halftone = self.halftone.max(ht);

        if elapsed_ms >= COLOR_WINDOW.start_ms {
            let cp = COLOR_WINDOW.progress_at(elapsed_ms);
            let c = COLOR_WINDOW.dot_progress(cp, self.color_delay);
            self.color = self.color.max(c);

            if let Some(ahead) = refinement_lookahead(cp, self.refinement_delay) {
                self.refinement = self.refinement.max(ahead);
            }
        }

        if elapsed_ms >= REFINEMENT_WINDOW.start_ms {
            let r = REFINEMENT_WINDOW.dot_progress(
                REFINEMENT_WINDOW.progress_at(elapsed_ms),
                self.refinement_delay,
            );
            self.refinement = self.refinement.max(r);
        }
    }
}

/// One [`DotState`] per dot, indexed by dot index.
///
/// The buffer is reused across frames and across runs; only [`DotStates::reset`] touches
/// the delays.
#[derive(Clone, Debug, Default)]
pub struct DotStates {
    states: Vec<DotState>,
}

impl DotStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run: zero all progress and draw fresh delays for `count` dots.
    pub fn reset(&mut self, count: usize, rng: &mut Rng64) {
        self.states.clear();
        self.states.reserve(count);
        self.states.extend((0..count).map(|_| DotState::fresh(rng)));
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms < 0.0 {
            return;
        }
        for s in &mut self.states {
            s.advance(elapsed_ms);
        }
    }

    pub fn get(&self, idx: usize) -> Option<&DotState> {
        self.states.get(idx)
    }

    pub fn as_slice(&self) -> &[DotState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.states.capacity()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
