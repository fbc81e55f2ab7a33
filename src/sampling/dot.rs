use crate::foundation::core::{Point, Rgb8};

/// One halftone dot, as produced by the sampler or loaded from a sidecar.
///
/// `position` is resolution independent: both axes are percentages of the source image
/// dimensions. `size` is the base radius before refinement growth.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dot {
    pub position: Point,
    pub size: f64,
    pub color: Rgb8,
}

impl Dot {
    pub fn in_bounds(&self) -> bool {
        let p = self.position;
        (0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y)
    }
}
