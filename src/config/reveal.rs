use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::animator::AnimatorOpts,
    animation::timeline::STARTUP_DELAY_MS,
    assets::store::DotSource,
    foundation::core::{Rgb8, SurfaceSize},
    foundation::error::{HalftoneError, HalftoneResult},
    render::pipeline::RenderOpts,
    sampling::sampler::{DEFAULT_MAX_DIMENSION, SamplerOpts},
};

/// Host-facing configuration for one reveal.
///
/// Loaded from JSON; every field has a default so a config may be as small as
/// `{ "image": "photo.jpg" }`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Source photograph, sampled when no sidecar is configured.
    pub image: Option<PathBuf>,
    /// Precomputed dot sidecar; takes precedence over `image`.
    pub sidecar: Option<PathBuf>,
    /// Styling hook carried through to logs and output metadata.
    pub class_name: Option<String>,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub max_dimension: u32,
    pub seed: u64,
    pub startup_delay_ms: f64,
    pub background: Rgb8,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            image: None,
            sidecar: None,
            class_name: None,
            width: 1280,
            height: 720,
            fps: 60,
            max_dimension: DEFAULT_MAX_DIMENSION,
            seed: AnimatorOpts::default().seed,
            startup_delay_ms: STARTUP_DELAY_MS,
            background: Rgb8::BLACK,
        }
    }
}

impl RevealConfig {
    /// Read a JSON config; relative asset paths resolve against the file's directory.
    pub fn from_path(path: &Path) -> HalftoneResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            HalftoneError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    pub fn resolve_paths(&mut self, root: &Path) {
        for p in [&mut self.image, &mut self.sidecar].into_iter().flatten() {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        }
    }

    /// Apply `HALFTONE_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`; unparsable or zero values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("HALFTONE_MAX_DIMENSION")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.max_dimension = v;
        }
        if let Some(v) = lookup("HALFTONE_SEED").and_then(|v| v.parse::<u64>().ok()) {
            self.seed = v;
        }
        if let Some(v) = lookup("HALFTONE_FPS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.fps = v;
        }
    }

    pub fn validate(&self) -> HalftoneResult<()> {
        self.surface_size()?;
        if self.fps == 0 {
            return Err(HalftoneError::validation("fps must be > 0"));
        }
        if self.max_dimension == 0 {
            return Err(HalftoneError::validation("max_dimension must be > 0"));
        }
        self.animator_opts().validate()?;
        self.dot_source()?;
        Ok(())
    }

    pub fn surface_size(&self) -> HalftoneResult<SurfaceSize> {
        SurfaceSize::new(self.width, self.height)
    }

    pub fn sampler_opts(&self) -> SamplerOpts {
        SamplerOpts {
            max_dimension: self.max_dimension,
        }
    }

    pub fn animator_opts(&self) -> AnimatorOpts {
        AnimatorOpts {
            startup_delay_ms: self.startup_delay_ms,
            seed: self.seed,
        }
    }

    pub fn render_opts(&self) -> HalftoneResult<RenderOpts> {
        Ok(RenderOpts {
            size: self.surface_size()?,
            fps: self.fps,
            seed: self.seed,
            startup_delay_ms: self.startup_delay_ms,
            background: self.background,
        })
    }

    /// Where dots come from: the sidecar when present, else the image.
    pub fn dot_source(&self) -> HalftoneResult<DotSource> {
        match (&self.sidecar, &self.image) {
            (Some(sidecar), _) => Ok(DotSource::Sidecar(sidecar.clone())),
            (None, Some(image)) => Ok(DotSource::Image {
                path: image.clone(),
                sampler: self.sampler_opts(),
            }),
            (None, None) => Err(HalftoneError::validation(
                "config needs an `image` or a `sidecar`",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/reveal.rs"]
mod tests;
