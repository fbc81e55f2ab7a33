use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use halftone::{
    CancelToken, Clock as _, CpuSurface, FrameLoopOpts, FrameRGBA, LoopExit, Phase,
    PhaseAnimator, RevealConfig, RevealObserver, SamplerOpts, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "halftone", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample an image into a dot sidecar JSON.
    Sample(SampleArgs),
    /// Render a single frame of the reveal as a PNG.
    Frame(FrameArgs),
    /// Render the whole reveal as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Play the reveal in real time, printing phase changes.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Reveal config JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source image to sample.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Precomputed dot sidecar (takes precedence over --image).
    #[arg(long)]
    sidecar: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Seed for per-dot reveal delays.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long)]
    image: PathBuf,

    /// Output JSON path (defaults to `<image>.halftone.json` beside the image).
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    max_dimension: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Milliseconds since the run was scheduled (includes the startup delay).
    #[arg(long)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Save the last presented frame as a PNG.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Cancel the run after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SourceArgs) -> anyhow::Result<RevealConfig> {
    let mut cfg = match &args.config {
        Some(path) => RevealConfig::from_path(path)?,
        None => RevealConfig::default(),
    };
    cfg.apply_env();

    if let Some(image) = &args.image {
        cfg.image = Some(image.clone());
    }
    if let Some(sidecar) = &args.sidecar {
        cfg.sidecar = Some(sidecar.clone());
    }
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if let Some(height) = args.height {
        cfg.height = height;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_dots(cfg: &RevealConfig) -> anyhow::Result<Vec<halftone::Dot>> {
    let _span = tracing::info_span!("reveal", class_name = cfg.class_name.as_deref()).entered();
    Ok(cfg.dot_source()?.load()?)
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    halftone::encode::ffmpeg::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut cfg = RevealConfig::default();
    cfg.apply_env();
    let sampler = SamplerOpts {
        max_dimension: args.max_dimension.unwrap_or(cfg.max_dimension),
    };
    let img = halftone::assets::decode::load_image(&args.image)?;
    let dots = halftone::sample_image(&img, &sampler)?;

    let out = args
        .out
        .unwrap_or_else(|| halftone::sidecar_path_for(&args.image));
    halftone::write_sidecar(&out, &dots)?;
    eprintln!("wrote {} ({} dots)", out.display(), dots.len());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let dots = load_dots(&cfg)?;
    let frame = halftone::render_frame_at(&dots, args.time_ms, &cfg.render_opts()?)?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let dots = load_dots(&cfg)?;
    let stats = halftone::render_to_mp4(&dots, &args.out, &cfg.render_opts()?, &mut ())?;
    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

struct PrintPhases;

impl RevealObserver for PrintPhases {
    fn on_phase_change(&mut self, phase: Phase) {
        println!("phase {phase}");
    }

    fn on_animation_complete(&mut self) {
        println!("complete");
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let dots = load_dots(&cfg)?;
    let opts = cfg.render_opts()?;

    let mut animator = PhaseAnimator::new(dots, opts.animator_opts())?;
    animator.attach_surface(CpuSurface::with_background(opts.size, opts.background)?);

    let clock = SystemClock::new();
    let cancel = CancelToken::new();
    if let Some(timeout) = args.timeout_ms {
        let cancel = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(timeout));
            cancel.cancel();
        });
    }

    animator.schedule_start(clock.now())?;
    let mut last: Option<FrameRGBA> = None;
    let (exit, stats) = halftone::run_frame_loop(
        &mut animator,
        &clock,
        &mut PrintPhases,
        &cancel,
        FrameLoopOpts { max_fps: cfg.fps },
        |surface| {
            if args.out.is_some() {
                last = Some(surface.readback());
            }
            Ok(())
        },
    )?;

    if exit == LoopExit::Cancelled {
        println!("cancelled in phase {}", animator.phase());
    }
    if let Some(out) = &args.out {
        let frame = match last {
            Some(frame) => frame,
            None => CpuSurface::with_background(opts.size, opts.background)?.readback(),
        };
        write_png(out, &frame)?;
        eprintln!("wrote {}", out.display());
    }
    tracing::info!(ticks = stats.ticks, presented = stats.frames_presented, "playback done");
    Ok(())
}
