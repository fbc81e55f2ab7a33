use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{HalftoneError, HalftoneResult},
    foundation::math::mul_div255,
    render::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> HalftoneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HalftoneError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(HalftoneError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p subsamples chroma 2x2.
            return Err(HalftoneError::validation(
                "encode width/height must be even for yuv420p mp4 output",
            ));
        }
        Ok(())
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> HalftoneResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams opaque RGBA frames into the system `ffmpeg` binary as H.264 MP4.
pub struct Mp4Encoder {
    cfg: EncodeConfig,
    background: [u8; 3],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
    frames: u64,
}

impl Mp4Encoder {
    pub fn new(cfg: EncodeConfig, background: [u8; 3]) -> HalftoneResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(HalftoneError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(HalftoneError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if cfg.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-r", &cfg.fps.to_string()])
            .args(["-i", "pipe:0", "-an"])
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(&cfg.out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| HalftoneError::render(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HalftoneError::render("ffmpeg stdin was not captured"))?;

        tracing::debug!(
            out = %cfg.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps,
            "spawned ffmpeg"
        );
        Ok(Self {
            scratch: vec![0u8; cfg.frame_len()],
            cfg,
            background,
            child,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> HalftoneResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(HalftoneError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        flatten_to_opaque(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.background,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(HalftoneError::render("mp4 encoder is already finished"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| HalftoneError::render(format!("write frame to ffmpeg: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    pub fn finish(mut self) -> HalftoneResult<u64> {
        drop(self.stdin.take());
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| HalftoneError::render(format!("wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HalftoneError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(self.frames)
    }
}

/// Composite RGBA8 over an opaque background, writing alpha 255.
fn flatten_to_opaque(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    background: [u8; 3],
) -> HalftoneResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HalftoneError::validation(
            "frame byte length does not match width*height*4",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(u16::from(background[c]), inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
