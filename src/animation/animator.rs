//! The phase machine that drives a reveal run and redraws it.

use std::sync::Arc;

use crate::{
    animation::observer::RevealObserver,
    animation::phase::Phase,
    animation::state::DotStates,
    animation::timeline::{self, STARTUP_DELAY_MS},
    foundation::core::{Millis, SurfaceSize},
    foundation::error::{HalftoneError, HalftoneResult},
    foundation::math::Rng64,
    render::cpu::CpuSurface,
    sampling::dot::Dot,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorOpts {
    pub startup_delay_ms: f64,
    /// Seed for per-dot delays; each run derives its own stream from it.
    pub seed: u64,
}

impl Default for AnimatorOpts {
    fn default() -> Self {
        Self {
            startup_delay_ms: STARTUP_DELAY_MS,
            seed: 0x4841_4C46_544F_4E45, // "HALFTONE"
        }
    }
}

impl AnimatorOpts {
    pub fn validate(&self) -> HalftoneResult<()> {
        if !self.startup_delay_ms.is_finite() || self.startup_delay_ms < 0.0 {
            return Err(HalftoneError::validation(
                "startup delay must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// What the host should do before the next [`PhaseAnimator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameRequest {
    /// Call `tick` again on the next display frame.
    NextFrame,
    /// The startup timer is pending; nothing changes before this instant.
    WakeAt(Millis),
    /// Nothing scheduled: never started, complete, or torn down.
    Idle,
}

/// Drives one dot set through `Blank -> Halftone -> Color -> Refinement -> Complete`.
///
/// The animator is single threaded and frame driven. Each [`tick`](Self::tick) fires the
/// startup timer if due, advances every [`DotState`](crate::DotState) to the current
/// time, emits phase notifications, and then redraws the attached surface.
pub struct PhaseAnimator {
    dots: Arc<[Dot]>,
    states: DotStates,
    phase: Phase,
    opts: AnimatorOpts,
    runs: u64,
    start_deadline: Option<Millis>,
    origin: Option<Millis>,
    frame_requested: bool,
    torn_down: bool,
    surface: Option<CpuSurface>,
    frames_drawn: u64,
    frames_skipped: u64,
}

impl std::fmt::Debug for PhaseAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseAnimator")
            .field("dots", &self.dots.len())
            .field("phase", &self.phase)
            .field("runs", &self.runs)
            .field("origin", &self.origin)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl PhaseAnimator {
    pub fn new(dots: impl Into<Arc<[Dot]>>, opts: AnimatorOpts) -> HalftoneResult<Self> {
        opts.validate()?;
        Ok(Self {
            dots: dots.into(),
            states: DotStates::new(),
            phase: Phase::Blank,
            opts,
            runs: 0,
            start_deadline: None,
            origin: None,
            frame_requested: false,
            torn_down: false,
            surface: None,
            frames_drawn: 0,
            frames_skipped: 0,
        })
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn states(&self) -> &DotStates {
        &self.states
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn opts(&self) -> &AnimatorOpts {
        &self.opts
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Instant the halftone window opened for the current run.
    pub fn origin(&self) -> Option<Millis> {
        self.origin
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    pub fn surface(&self) -> Option<&CpuSurface> {
        self.surface.as_ref()
    }

    pub fn attach_surface(&mut self, surface: CpuSurface) {
        self.surface = Some(surface);
    }

    pub fn detach_surface(&mut self) -> Option<CpuSurface> {
        self.surface.take()
    }

    /// Arm the startup timer; the run begins `startup_delay_ms` after `now`.
    ///
    /// Returns `false` when there is nothing to animate: an empty dot set leaves the
    /// animator in `Blank` without ever notifying the observer. Scheduling again after a
    /// finished run starts a fresh run with new delays.
    #[tracing::instrument(skip(self), fields(dots = self.dots.len()))]
    pub fn schedule_start(&mut self, now: Millis) -> HalftoneResult<bool> {
        if self.torn_down {
            return Err(HalftoneError::animation(
                "cannot schedule a run on a torn-down animator",
            ));
        }
        if self.dots.is_empty() {
            tracing::warn!("no dots to animate; staying blank");
            return Ok(false);
        }
        if self.origin.is_some() && !self.phase.is_terminal() {
            return Err(HalftoneError::animation(format!(
                "a run is already in progress (phase {})",
                self.phase
            )));
        }

        self.phase = Phase::Blank;
        self.origin = None;
        self.frame_requested = false;
        self.start_deadline = Some(now.after(self.opts.startup_delay_ms));
        Ok(true)
    }

    /// Run one unit of frame work at `now`.
    ///
    /// Order within a tick: startup timer, state advance, phase notifications, draw.
    #[tracing::instrument(level = "trace", skip(self, observer))]
    pub fn tick(
        &mut self,
        now: Millis,
        observer: &mut dyn RevealObserver,
    ) -> HalftoneResult<FrameRequest> {
        if self.torn_down {
            return Ok(FrameRequest::Idle);
        }

        if let Some(deadline) = self.start_deadline {
            if now < deadline {
                return Ok(FrameRequest::WakeAt(deadline));
            }
            self.begin_run(deadline);
        }

        let Some(origin) = self.origin else {
            return Ok(FrameRequest::Idle);
        };
        if !self.frame_requested {
            return Ok(FrameRequest::Idle);
        }

        let elapsed = now.since(origin);
        self.states.advance(elapsed);
        self.advance_phase(timeline::phase_at(elapsed), observer);
        self.redraw()?;

        if self.phase.is_terminal() {
            self.frame_requested = false;
            return Ok(FrameRequest::Idle);
        }
        Ok(FrameRequest::NextFrame)
    }

    /// Resize the surface backing store and redraw at once. The timeline is untouched.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, size: SurfaceSize) -> HalftoneResult<()> {
        match self.surface.as_mut() {
            Some(surface) => surface.resize(size)?,
            None => self.surface = Some(CpuSurface::new(size)?),
        }
        self.redraw()?;
        Ok(())
    }

    /// Paint the current states. Returns `false` (and counts a skipped frame) when no
    /// surface is attached.
    pub fn redraw(&mut self) -> HalftoneResult<bool> {
        let Some(surface) = self.surface.as_mut() else {
            self.frames_skipped += 1;
            tracing::trace!("no surface attached; skipping frame");
            return Ok(false);
        };
        if self.states.len() == self.dots.len() {
            surface.draw_dots(&self.dots, &self.states)?;
        } else {
            surface.clear();
        }
        self.frames_drawn += 1;
        Ok(true)
    }

    /// Cancel the pending startup timer and any requested frame. Later ticks are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.start_deadline = None;
        self.frame_requested = false;
        self.torn_down = true;
        tracing::debug!(phase = %self.phase, "reveal torn down");
    }

    fn begin_run(&mut self, origin: Millis) {
        self.start_deadline = None;
        self.runs += 1;
        let mut rng = Rng64::new(self.opts.seed ^ self.runs.wrapping_mul(0xD6E8_FEB8_6659_FD93));
        self.states.reset(self.dots.len(), &mut rng);
        self.origin = Some(origin);
        self.frame_requested = true;
        tracing::debug!(run = self.runs, origin_ms = origin.0, "reveal run started");
    }

    fn advance_phase(&mut self, target: Phase, observer: &mut dyn RevealObserver) {
        while self.phase < target {
            let Some(next) = self.phase.next() else {
                break;
            };
            self.phase = next;
            tracing::debug!(phase = %next, "phase change");
            observer.on_phase_change(next);

            if next.is_terminal() {
                tracing::info!(
                    dots = self.dots.len(),
                    frames_drawn = self.frames_drawn,
                    frames_skipped = self.frames_skipped,
                    "reveal complete"
                );
                observer.on_animation_complete();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
