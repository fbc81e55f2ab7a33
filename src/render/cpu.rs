use vello_cpu::kurbo::Shape as _;

use crate::{
    animation::state::DotStates,
    foundation::core::{Point, Rgb8, SurfaceSize},
    foundation::error::{HalftoneError, HalftoneResult},
    render::{FrameRGBA, appearance::appearance},
    sampling::dot::Dot,
};

/// Flattening tolerance for dot outlines, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.05;

/// CPU drawing surface the reveal paints into.
pub struct CpuSurface {
    size: SurfaceSize,
    background: Rgb8,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.size)
            .field("background", &self.background)
            .finish()
    }
}

impl CpuSurface {
    pub fn new(size: SurfaceSize) -> HalftoneResult<Self> {
        Self::with_background(size, Rgb8::BLACK)
    }

    pub fn with_background(size: SurfaceSize, background: Rgb8) -> HalftoneResult<Self> {
        size.validate()?;
        let (w, h) = size.as_u16()?;
        let mut surface = Self {
            size,
            background,
            pixmap: vello_cpu::Pixmap::new(w, h),
        };
        surface.clear();
        Ok(surface)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Reallocate the backing pixmap; contents are cleared to the background.
    pub fn resize(&mut self, size: SurfaceSize) -> HalftoneResult<()> {
        size.validate()?;
        if size == self.size {
            return Ok(());
        }
        let (w, h) = size.as_u16()?;
        self.size = size;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.clear();
        Ok(())
    }

    pub fn clear(&mut self) {
        let rgba = self.background.to_rgba(255);
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Clear and paint every appeared dot in insertion order. Returns the number drawn.
    pub fn draw_dots(&mut self, dots: &[Dot], states: &DotStates) -> HalftoneResult<usize> {
        if dots.len() != states.len() {
            return Err(HalftoneError::render(format!(
                "{} dots but {} dot states",
                dots.len(),
                states.len()
            )));
        }

        let (w, h) = self.size.as_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        let bg = self.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        let mut drawn = 0usize;
        for (dot, state) in dots.iter().zip(states.as_slice()) {
            let Some(a) = appearance(dot, state, self.size) else {
                continue;
            };
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                a.color.r,
                a.color.g,
                a.color.b,
                a.alpha_u8(),
            ));
            let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(a.center), a.radius);
            ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
            drawn += 1;
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(drawn)
    }

    /// Copy the current pixels out. The background is opaque, so the frame is too.
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
