use std::path::{Path, PathBuf};

use crate::{
    assets::{decode::load_image, sidecar::read_sidecar},
    foundation::error::HalftoneResult,
    sampling::{
        dot::Dot,
        sampler::{SamplerOpts, sample_image},
    },
};

/// Where a reveal's dots come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DotSource {
    /// Precomputed sidecar JSON. Read failures are returned, never papered over.
    Sidecar(PathBuf),
    /// Decode the image and sample it in-process.
    Image { path: PathBuf, sampler: SamplerOpts },
}

impl DotSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Sidecar(path) | Self::Image { path, .. } => path,
        }
    }

    /// Front-load all IO and sampling so the animator only ever sees ready dots.
    #[tracing::instrument(skip(self), fields(path = %self.path().display()))]
    pub fn load(&self) -> HalftoneResult<Vec<Dot>> {
        let dots = match self {
            Self::Sidecar(path) => read_sidecar(path)?,
            Self::Image { path, sampler } => sample_image(&load_image(path)?, sampler)?,
        };
        if dots.is_empty() {
            tracing::warn!("dot source produced no visible dots");
        }
        Ok(dots)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
