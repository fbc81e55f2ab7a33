//! Precomputed dot datasets ("sidecars").
//!
//! A sidecar is a JSON array of [`Dot`] objects written next to the source image as
//! `<image file name>.halftone.json`. Loading one skips sampling entirely; a sidecar that
//! cannot be read or parsed is an explicit error and never falls back to sampling.

use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{HalftoneError, HalftoneResult},
    sampling::dot::Dot,
};

/// `Cache-Control` value served with sidecar payloads.
pub const SIDECAR_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
/// Body served when the sidecar is unavailable.
pub const SIDECAR_ERROR_BODY: &str = r#"{"error":"Failed to load halftone data"}"#;

/// Conventional sidecar location for an image: `photo.jpg` -> `photo.jpg.halftone.json`.
pub fn sidecar_path_for(image_path: &Path) -> PathBuf {
    let mut name = image_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".halftone.json");
    image_path.with_file_name(name)
}

pub fn parse_sidecar(bytes: &[u8]) -> HalftoneResult<Vec<Dot>> {
    let dots: Vec<Dot> = serde_json::from_slice(bytes)
        .map_err(|e| HalftoneError::sidecar(format!("parse sidecar JSON: {e}")))?;

    for (idx, dot) in dots.iter().enumerate() {
        if !dot.in_bounds() {
            return Err(HalftoneError::sidecar(format!(
                "dot {idx} position ({}, {}) is outside [0,100]",
                dot.position.x, dot.position.y
            )));
        }
        if !dot.size.is_finite() || dot.size <= 0.0 {
            return Err(HalftoneError::sidecar(format!(
                "dot {idx} has invalid size {}",
                dot.size
            )));
        }
    }
    Ok(dots)
}

#[tracing::instrument]
pub fn read_sidecar(path: &Path) -> HalftoneResult<Vec<Dot>> {
    let bytes = std::fs::read(path).map_err(|e| {
        HalftoneError::sidecar(format!("read sidecar '{}': {e}", path.display()))
    })?;
    let dots = parse_sidecar(&bytes)?;
    tracing::debug!(dots = dots.len(), "loaded dot sidecar");
    Ok(dots)
}

pub fn write_sidecar(path: &Path, dots: &[Dot]) -> HalftoneResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    let json = serde_json::to_vec(dots).map_err(|e| HalftoneError::serde(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| {
        HalftoneError::sidecar(format!("write sidecar '{}': {e}", path.display()))
    })?;
    Ok(())
}

/// HTTP-shaped answer for a sidecar request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidecarResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl SidecarResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

/// Serve the sidecar at `path`: `200` with long-lived caching, or `500` with an error body.
pub fn sidecar_response(path: &Path) -> SidecarResponse {
    let loaded = read_sidecar(path).and_then(|dots| {
        serde_json::to_string(&dots).map_err(|e| HalftoneError::serde(e.to_string()))
    });

    match loaded {
        Ok(body) => SidecarResponse {
            status: 200,
            headers: vec![
                ("Cache-Control", SIDECAR_CACHE_CONTROL),
                ("Content-Type", "application/json"),
            ],
            body,
        },
        Err(err) => {
            tracing::error!(error = %err, "failed to load halftone data");
            SidecarResponse {
                status: 500,
                headers: vec![("Content-Type", "application/json")],
                body: SIDECAR_ERROR_BODY.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sidecar.rs"]
mod tests;
