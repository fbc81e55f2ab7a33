//! Fixed-rate frame loop standing in for a display's vsync callback.

use crate::{
    animation::animator::{FrameRequest, PhaseAnimator},
    animation::observer::RevealObserver,
    driver::clock::{CancelToken, Clock},
    foundation::error::{HalftoneError, HalftoneResult},
    render::cpu::CpuSurface,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLoopOpts {
    /// Upper bound on ticks per second.
    pub max_fps: u32,
}

impl Default for FrameLoopOpts {
    fn default() -> Self {
        Self { max_fps: 120 }
    }
}

impl FrameLoopOpts {
    fn frame_interval_ms(&self) -> HalftoneResult<f64> {
        if self.max_fps == 0 {
            return Err(HalftoneError::validation("frame loop max_fps must be > 0"));
        }
        Ok(1000.0 / f64::from(self.max_fps))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// The animator went idle (run complete or nothing to animate).
    Finished,
    /// The cancel token fired; the animator has been torn down.
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub frames_presented: u64,
}

/// Tick `animator` until it goes idle or `cancel` fires.
///
/// `present` is called after every tick that produced a frame on an attached surface.
/// Cancellation is checked before each tick and after each sleep, so no tick runs once
/// the token is observed; the animator is torn down before returning `Cancelled`.
pub fn run_frame_loop<C, F>(
    animator: &mut PhaseAnimator,
    clock: &C,
    observer: &mut dyn RevealObserver,
    cancel: &CancelToken,
    opts: FrameLoopOpts,
    mut present: F,
) -> HalftoneResult<(LoopExit, LoopStats)>
where
    C: Clock + ?Sized,
    F: FnMut(&CpuSurface) -> HalftoneResult<()>,
{
    let interval = opts.frame_interval_ms()?;
    let mut stats = LoopStats::default();

    loop {
        if cancel.is_cancelled() {
            animator.teardown();
            return Ok((LoopExit::Cancelled, stats));
        }

        let now = clock.now();
        let drawn_before = animator.frames_drawn();
        let request = animator.tick(now, observer)?;
        stats.ticks += 1;

        if animator.frames_drawn() > drawn_before
            && let Some(surface) = animator.surface()
        {
            present(surface)?;
            stats.frames_presented += 1;
        }

        match request {
            FrameRequest::Idle => return Ok((LoopExit::Finished, stats)),
            FrameRequest::NextFrame => clock.sleep_until(now.after(interval)),
            FrameRequest::WakeAt(deadline) => {
                // Sleep in frame-sized slices so cancellation stays responsive.
                let slice_end = now.after(interval);
                clock.sleep_until(if deadline < slice_end { deadline } else { slice_end });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/frame_loop.rs"]
mod tests;
