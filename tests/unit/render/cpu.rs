use super::*;
use crate::foundation::math::Rng64;

fn white_dot_at_center() -> Vec<Dot> {
    vec![Dot {
        position: Point::new(50.0, 50.0),
        size: 1.6,
        color: Rgb8::WHITE,
    }]
}

fn states_at(count: usize, elapsed_ms: f64) -> DotStates {
    let mut states = DotStates::new();
    states.reset(count, &mut Rng64::new(5));
    states.advance(elapsed_ms);
    states
}

#[test]
fn new_surface_is_opaque_background() {
    let surface = CpuSurface::new(SurfaceSize::new(8, 4).unwrap()).unwrap();
    let frame = surface.readback();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn blank_states_draw_nothing() {
    let mut surface = CpuSurface::new(SurfaceSize::new(20, 20).unwrap()).unwrap();
    let drawn = surface
        .draw_dots(&white_dot_at_center(), &states_at(1, -1.0))
        .unwrap();
    assert_eq!(drawn, 0);
    assert_eq!(surface.readback().pixel(10, 10), Some([0, 0, 0, 255]));
}

#[test]
fn revealed_dot_paints_its_center_and_leaves_corners_black() {
    let mut surface = CpuSurface::new(SurfaceSize::new(20, 20).unwrap()).unwrap();
    let drawn = surface
        .draw_dots(&white_dot_at_center(), &states_at(1, 8500.0))
        .unwrap();
    assert_eq!(drawn, 1);

    let frame = surface.readback();
    let [r, g, b, a] = frame.pixel(10, 10).unwrap();
    assert!(r > 100, "center r = {r}");
    assert_eq!((r, g), (g, b));
    assert_eq!(a, 255);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(19, 19), Some([0, 0, 0, 255]));
}

#[test]
fn custom_background_is_used_for_clears() {
    let surface =
        CpuSurface::with_background(SurfaceSize::new(2, 2).unwrap(), Rgb8::new(18, 20, 28))
            .unwrap();
    assert_eq!(surface.readback().pixel(1, 1), Some([18, 20, 28, 255]));
}

#[test]
fn resize_reallocates_at_new_dimensions() {
    let mut surface = CpuSurface::new(SurfaceSize::new(20, 20).unwrap()).unwrap();
    surface.resize(SurfaceSize::new(40, 10).unwrap()).unwrap();
    assert_eq!(surface.size(), SurfaceSize::new(40, 10).unwrap());
    let frame = surface.readback();
    assert_eq!((frame.width, frame.height), (40, 10));
    assert!(surface.resize(SurfaceSize { width: 0, height: 3 }).is_err());
}

#[test]
fn mismatched_state_buffer_is_a_render_error() {
    let mut surface = CpuSurface::new(SurfaceSize::new(4, 4).unwrap()).unwrap();
    let err = surface
        .draw_dots(&white_dot_at_center(), &states_at(2, 0.0))
        .unwrap_err();
    assert!(matches!(err, HalftoneError::Render(_)));
}
