use std::path::PathBuf;

use crate::{
    animation::animator::{AnimatorOpts, PhaseAnimator},
    animation::observer::RevealObserver,
    animation::timeline,
    encode::ffmpeg::{EncodeConfig, Mp4Encoder},
    foundation::core::{Millis, Rgb8, SurfaceSize},
    foundation::error::{HalftoneError, HalftoneResult},
    render::{FrameRGBA, cpu::CpuSurface},
    sampling::dot::Dot,
};

/// Options for rendering a reveal offline at a fixed frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    pub size: SurfaceSize,
    pub fps: u32,
    pub seed: u64,
    pub startup_delay_ms: f64,
    pub background: Rgb8,
}

impl RenderOpts {
    pub fn validate(&self) -> HalftoneResult<()> {
        self.size.validate()?;
        if self.fps == 0 {
            return Err(HalftoneError::validation("render fps must be > 0"));
        }
        self.animator_opts().validate()
    }

    pub fn animator_opts(&self) -> AnimatorOpts {
        AnimatorOpts {
            startup_delay_ms: self.startup_delay_ms,
            seed: self.seed,
        }
    }

    /// Timestamp of frame `index`, measured from the moment the run is scheduled.
    pub fn frame_time(&self, index: u64) -> Millis {
        Millis(index as f64 * 1000.0 / f64::from(self.fps))
    }
}

/// Number of frames from t=0 through the first frame at or past completion.
pub fn timeline_frame_count(opts: &RenderOpts) -> HalftoneResult<u64> {
    opts.validate()?;
    let run = timeline::run_length_ms(opts.startup_delay_ms);
    let last = (run * f64::from(opts.fps) / 1000.0).ceil();
    Ok(last as u64 + 1)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Frames painted by the animator; the rest are startup-delay background.
    pub frames_animated: u64,
}

fn prepared_animator(dots: &[Dot], opts: &RenderOpts) -> HalftoneResult<PhaseAnimator> {
    opts.validate()?;
    let mut animator = PhaseAnimator::new(dots, opts.animator_opts())?;
    animator.attach_surface(CpuSurface::with_background(opts.size, opts.background)?);
    animator.schedule_start(Millis::ZERO)?;
    Ok(animator)
}

fn read_surface(animator: &PhaseAnimator) -> HalftoneResult<FrameRGBA> {
    animator
        .surface()
        .map(CpuSurface::readback)
        .ok_or_else(|| HalftoneError::render("render surface went missing"))
}

/// Render the single frame a fresh run shows at `time_ms`.
///
/// The run is scheduled at t=0, so times before the startup delay yield the background.
#[tracing::instrument(skip(dots), fields(dots = dots.len()))]
pub fn render_frame_at(dots: &[Dot], time_ms: f64, opts: &RenderOpts) -> HalftoneResult<FrameRGBA> {
    if !time_ms.is_finite() || time_ms < 0.0 {
        return Err(HalftoneError::validation(
            "frame time must be finite and non-negative",
        ));
    }
    let mut animator = prepared_animator(dots, opts)?;
    animator.tick(Millis(time_ms), &mut ())?;
    read_surface(&animator)
}

/// Render every frame of a run, handing each to `sink` in order.
///
/// `observer` sees the same notifications a live host would, one tick per frame.
#[tracing::instrument(skip(dots, observer, sink), fields(dots = dots.len()))]
pub fn render_frames<F>(
    dots: &[Dot],
    opts: &RenderOpts,
    observer: &mut dyn RevealObserver,
    mut sink: F,
) -> HalftoneResult<RenderStats>
where
    F: FnMut(u64, &FrameRGBA) -> HalftoneResult<()>,
{
    let total = timeline_frame_count(opts)?;
    let mut animator = prepared_animator(dots, opts)?;
    let mut stats = RenderStats::default();

    for index in 0..total {
        let drawn_before = animator.frames_drawn();
        animator.tick(opts.frame_time(index), observer)?;
        if animator.frames_drawn() > drawn_before {
            stats.frames_animated += 1;
        }
        let frame = read_surface(&animator)?;
        sink(index, &frame)?;
        stats.frames_total += 1;
    }

    tracing::info!(
        frames = stats.frames_total,
        animated = stats.frames_animated,
        phase = %animator.phase(),
        "offline render finished"
    );
    Ok(stats)
}

/// Render a full run into an MP4 via the system `ffmpeg` binary.
///
/// Output dimensions must be even; `ffmpeg` must be on `PATH`.
pub fn render_to_mp4(
    dots: &[Dot],
    out_path: impl Into<PathBuf>,
    opts: &RenderOpts,
    observer: &mut dyn RevealObserver,
) -> HalftoneResult<RenderStats> {
    opts.validate()?;
    let cfg = EncodeConfig {
        width: opts.size.width,
        height: opts.size.height,
        fps: opts.fps,
        out_path: out_path.into(),
        overwrite: true,
    };
    cfg.validate()?;

    let bg = opts.background;
    let mut encoder = Mp4Encoder::new(cfg, [bg.r, bg.g, bg.b])?;
    let stats = render_frames(dots, opts, observer, |_, frame| encoder.encode_frame(frame))?;
    let written = encoder.finish()?;
    tracing::debug!(frames = written, "mp4 finalized");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
