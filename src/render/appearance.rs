use crate::{
    animation::state::DotState,
    foundation::core::{Point, Rgb8, SurfaceSize},
    foundation::math::channel_u8,
    sampling::dot::Dot,
};

/// Opacity of a fully appeared dot.
pub const BASE_OPACITY: f64 = 0.9;
/// Extra radius gained at full refinement, as a fraction of the base size.
pub const REFINEMENT_GROWTH: f64 = 0.8;
/// Speed-up of the white-to-source blend relative to color progress.
pub const COLOR_BLEND_BOOST: f64 = 1.5;
/// Brightness lost at full refinement.
pub const REFINEMENT_DARKEN: f64 = 0.3;

/// Everything needed to paint one dot on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotAppearance {
    pub center: Point,
    pub radius: f64,
    pub color: Rgb8,
    pub opacity: f64,
}

impl DotAppearance {
    pub fn alpha_u8(&self) -> u8 {
        channel_u8(self.opacity * 255.0)
    }
}

/// Blend white toward `source` by color progress, then darken by refinement progress.
pub fn blend_color(source: Rgb8, color_progress: f64, refinement_progress: f64) -> Rgb8 {
    if color_progress <= 0.0 {
        return Rgb8::WHITE;
    }
    let t = (color_progress * COLOR_BLEND_BOOST).min(1.0);
    let brightness = 1.0 - REFINEMENT_DARKEN * refinement_progress;
    let channel = |src: u8| channel_u8((255.0 * (1.0 - t) + f64::from(src) * t) * brightness);
    Rgb8::new(channel(source.r), channel(source.g), channel(source.b))
}

/// Derive a dot's appearance on a surface of `size`; `None` while it has not appeared.
pub fn appearance(dot: &Dot, state: &DotState, size: SurfaceSize) -> Option<DotAppearance> {
    if state.halftone <= 0.0 {
        return None;
    }
    Some(DotAppearance {
        center: size.denormalize(dot.position),
        radius: dot.size * (1.0 + REFINEMENT_GROWTH * state.refinement),
        color: blend_color(dot.color, state.color, state.refinement),
        opacity: BASE_OPACITY * state.halftone,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/appearance.rs"]
mod tests;
