use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::core::{Point, Rgb8},
    foundation::error::{HalftoneError, HalftoneResult},
    foundation::math::luminance,
    sampling::dot::Dot,
};

/// Longest side an image is reduced to before sampling.
pub const DEFAULT_MAX_DIMENSION: u32 = 800;

/// Shadow compression applied to normalized luminance.
pub const SIZE_EXPONENT: f64 = 0.8;
/// Radius of a dot sampled from a pure white pixel.
pub const MAX_DOT_SIZE: f64 = 1.6;
/// Dots at or below this size are never emitted.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerOpts {
    pub max_dimension: u32,
}

impl Default for SamplerOpts {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Target dot radius for one pixel; `0.0` for black.
pub fn dot_size(r: u8, g: u8, b: u8) -> f64 {
    let normalized = luminance(r, g, b) / 255.0;
    (normalized.powf(SIZE_EXPONENT) * MAX_DOT_SIZE).max(0.0)
}

/// Sample every pixel of a straight-alpha RGBA8 buffer into dots, row-major.
pub fn sample_rgba8(width: u32, height: u32, rgba: &[u8]) -> HalftoneResult<Vec<Dot>> {
    if width == 0 || height == 0 {
        return Err(HalftoneError::validation(
            "sample source width/height must be non-zero",
        ));
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(HalftoneError::validation(format!(
            "rgba buffer is {} bytes, expected {expected} for {width}x{height}",
            rgba.len()
        )));
    }

    let w = f64::from(width);
    let h = f64::from(height);
    let mut dots = Vec::new();
    for (idx, px) in rgba.chunks_exact(4).enumerate() {
        // Transparent pixels read back as black from a cleared canvas.
        let (r, g, b) = if px[3] == 0 {
            (0, 0, 0)
        } else {
            (px[0], px[1], px[2])
        };

        let size = dot_size(r, g, b);
        if size <= VISIBILITY_THRESHOLD {
            continue;
        }

        let x = (idx % width as usize) as f64;
        let y = (idx / width as usize) as f64;
        dots.push(Dot {
            position: Point::new(x / w * 100.0, y / h * 100.0),
            size,
            color: Rgb8::new(r, g, b),
        });
    }
    Ok(dots)
}

/// Aspect-preserving dimensions whose longest side is at most `max_dimension`.
///
/// Images already within the bound keep their size. The limiting side lands exactly on
/// `max_dimension`; the other side is floored and kept at least one pixel.
pub fn downscaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }
    let scaled = |side: u32, limiting: u32| -> u32 {
        let v = u64::from(side) * u64::from(max_dimension) / u64::from(limiting);
        (v as u32).max(1)
    };
    if width >= height {
        (max_dimension, scaled(height, width))
    } else {
        (scaled(width, height), max_dimension)
    }
}

/// Downscale (if needed) and sample a decoded image.
#[tracing::instrument(skip(img), fields(width = img.width(), height = img.height()))]
pub fn sample_image(img: &RgbaImage, opts: &SamplerOpts) -> HalftoneResult<Vec<Dot>> {
    if opts.max_dimension == 0 {
        return Err(HalftoneError::validation("max_dimension must be non-zero"));
    }

    let (w, h) = downscaled_dimensions(img.width(), img.height(), opts.max_dimension);
    let dots = if (w, h) == img.dimensions() {
        sample_rgba8(w, h, img.as_raw())?
    } else {
        let scaled = image::imageops::resize(img, w, h, FilterType::Triangle);
        sample_rgba8(w, h, scaled.as_raw())?
    };

    tracing::debug!(
        sample_width = w,
        sample_height = h,
        dots = dots.len(),
        "sampled halftone dots"
    );
    Ok(dots)
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/sampler.rs"]
mod tests;
