//! Halftone dot reveal.
//!
//! A photograph is sampled into a sparse field of luminance-sized [`Dot`]s, then revealed
//! on a CPU surface over three timed phases:
//!
//! - `halftone`: dots fade in as white points with staggered per-dot delays
//! - `color`: each dot blends from white toward its sampled color
//! - `refinement`: dots grow and darken slightly before the run completes
//!
//! Hosts drive a [`PhaseAnimator`] with [`PhaseAnimator::tick`] from their own frame
//! callback, or hand it to [`run_frame_loop`]. [`render_frames`] and [`render_to_mp4`]
//! render a whole run offline at a fixed frame rate.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod assets;
pub mod config;
pub mod driver;
pub mod encode;
pub mod render;
pub mod sampling;

pub use crate::foundation::core::{Millis, Point, Rgb8, SurfaceSize};
pub use crate::foundation::error::{HalftoneError, HalftoneResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::animator::{AnimatorOpts, FrameRequest, PhaseAnimator};
pub use crate::animation::observer::{EventLog, RevealEvent, RevealObserver};
pub use crate::animation::phase::Phase;
pub use crate::animation::state::{DotState, DotStates};
pub use crate::assets::sidecar::{
    SidecarResponse, read_sidecar, sidecar_path_for, sidecar_response, write_sidecar,
};
pub use crate::assets::store::DotSource;
pub use crate::config::reveal::RevealConfig;
pub use crate::driver::clock::{CancelToken, Clock, ManualClock, SystemClock};
pub use crate::driver::frame_loop::{FrameLoopOpts, LoopExit, LoopStats, run_frame_loop};
pub use crate::encode::ffmpeg::{EncodeConfig, Mp4Encoder};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::pipeline::{
    RenderOpts, RenderStats, render_frame_at, render_frames, render_to_mp4,
    timeline_frame_count,
};
pub use crate::sampling::dot::Dot;
pub use crate::sampling::sampler::{SamplerOpts, sample_image, sample_rgba8};
