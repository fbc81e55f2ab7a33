use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::HalftoneResult;

/// Decode encoded image bytes (PNG/JPEG) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> HalftoneResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
#[tracing::instrument]
pub fn load_image(path: &Path) -> HalftoneResult<RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = decode_image(&bytes)
        .map_err(|e| anyhow::anyhow!("decode image '{}': {e}", path.display()))?;
    tracing::debug!(width = img.width(), height = img.height(), "decoded source image");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
