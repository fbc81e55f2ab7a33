use crate::foundation::error::{HalftoneError, HalftoneResult};

pub use kurbo::Point;

/// Straight (non-premultiplied) RGB8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

/// Pixel dimensions of a drawing surface.
///
/// Both sides must be non-zero and fit the `u16` range the CPU rasterizer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> HalftoneResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(self) -> HalftoneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HalftoneError::validation(
                "surface width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(HalftoneError::validation(format!(
                "surface {}x{} exceeds {} pixels per side",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    pub(crate) fn as_u16(self) -> HalftoneResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| HalftoneError::render("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| HalftoneError::render("surface height exceeds u16"))?;
        Ok((w, h))
    }

    /// Map a percentage position (`[0,100]` on both axes) into pixel space.
    pub fn denormalize(self, position: Point) -> Point {
        Point::new(
            position.x / 100.0 * f64::from(self.width),
            position.y / 100.0 * f64::from(self.height),
        )
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A point on the monotonic animation clock, in milliseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub f64);

impl Millis {
    pub const ZERO: Self = Self(0.0);

    pub fn after(self, delta_ms: f64) -> Self {
        Self(self.0 + delta_ms)
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is in the future).
    pub fn since(self, earlier: Self) -> f64 {
        self.0 - earlier.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
