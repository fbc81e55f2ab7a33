use crate::animation::phase::Phase;

/// Receives reveal notifications synchronously from [`PhaseAnimator::tick`].
///
/// Both methods default to no-ops so hosts only implement what they listen for.
///
/// [`PhaseAnimator::tick`]: crate::PhaseAnimator::tick
pub trait RevealObserver {
    /// Called once on entry to each of `Halftone`, `Color`, `Refinement` and `Complete`.
    fn on_phase_change(&mut self, _phase: Phase) {}

    /// Called exactly once per run, right after the `Complete` phase change.
    fn on_animation_complete(&mut self) {}
}

impl RevealObserver for () {}

impl<O: RevealObserver + ?Sized> RevealObserver for &mut O {
    fn on_phase_change(&mut self, phase: Phase) {
        (**self).on_phase_change(phase);
    }

    fn on_animation_complete(&mut self) {
        (**self).on_animation_complete();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", content = "phase", rename_all = "snake_case")]
pub enum RevealEvent {
    PhaseChanged(Phase),
    AnimationComplete,
}

/// Observer that records every notification in arrival order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<RevealEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RevealEvent::PhaseChanged(p) => Some(*p),
                RevealEvent::AnimationComplete => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RevealEvent::AnimationComplete))
            .count()
    }
}

impl RevealObserver for EventLog {
    fn on_phase_change(&mut self, phase: Phase) {
        self.events.push(RevealEvent::PhaseChanged(phase));
    }

    fn on_animation_complete(&mut self) {
        self.events.push(RevealEvent::AnimationComplete);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/observer.rs"]
mod tests;
