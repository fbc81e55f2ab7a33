use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba(rgba))
}

#[test]
fn white_and_black_pair_emits_one_dot() {
    let rgba = [255, 255, 255, 255, 0, 0, 0, 255];
    let dots = sample_rgba8(2, 1, &rgba).unwrap();

    assert_eq!(dots.len(), 1);
    let dot = dots[0];
    assert!((dot.size - 1.6).abs() < 1e-9);
    assert_eq!(dot.position, Point::new(0.0, 0.0));
    assert_eq!(dot.color, Rgb8::WHITE);
}

#[test]
fn second_column_of_two_lands_at_fifty_percent() {
    let rgba = [0, 0, 0, 255, 255, 255, 255, 255];
    let dots = sample_rgba8(2, 1, &rgba).unwrap();
    assert_eq!(dots.len(), 1);
    assert_eq!(dots[0].position, Point::new(50.0, 0.0));
}

#[test]
fn dots_at_or_below_threshold_are_never_emitted() {
    for v in 0..=255u8 {
        let dots = sample_rgba8(1, 1, &[v, v, v, 255]).unwrap();
        let size = dot_size(v, v, v);
        if size <= VISIBILITY_THRESHOLD {
            assert!(dots.is_empty(), "gray {v} (size {size}) produced a dot");
        } else {
            assert_eq!(dots.len(), 1);
            assert!(dots[0].size > VISIBILITY_THRESHOLD);
        }
    }
}

#[test]
fn threshold_sits_between_dark_and_mid_grays() {
    assert!(dot_size(40, 40, 40) <= VISIBILITY_THRESHOLD);
    assert!(dot_size(128, 128, 128) > VISIBILITY_THRESHOLD);
}

#[test]
fn positions_stay_in_bounds_for_any_aspect() {
    for (w, h) in [(1, 1), (7, 3), (3, 7), (64, 1), (1, 64)] {
        let img = solid(w, h, [255, 255, 255, 255]);
        let dots = sample_rgba8(w, h, img.as_raw()).unwrap();
        assert_eq!(dots.len(), (w * h) as usize);
        assert!(dots.iter().all(Dot::in_bounds));
        assert!(dots.iter().all(|d| d.position.x < 100.0 && d.position.y < 100.0));
    }
}

#[test]
fn emission_is_row_major() {
    let img = solid(3, 2, [255, 255, 255, 255]);
    let dots = sample_rgba8(3, 2, img.as_raw()).unwrap();
    let ys: Vec<f64> = dots.iter().map(|d| d.position.y).collect();
    assert_eq!(ys[0], 0.0);
    assert_eq!(ys[2], 0.0);
    assert_eq!(ys[3], 50.0);
    assert!(dots[1].position.x > dots[0].position.x);
}

#[test]
fn transparent_pixels_sample_as_black() {
    let dots = sample_rgba8(1, 1, &[255, 255, 255, 0]).unwrap();
    assert!(dots.is_empty());
}

#[test]
fn buffer_length_mismatch_is_rejected() {
    assert!(sample_rgba8(2, 2, &[0u8; 12]).is_err());
    assert!(sample_rgba8(0, 2, &[]).is_err());
}

#[test]
fn downscale_preserves_aspect_and_never_upscales() {
    assert_eq!(downscaled_dimensions(2, 1, 800), (2, 1));
    assert_eq!(downscaled_dimensions(800, 400, 800), (800, 400));
    assert_eq!(downscaled_dimensions(1600, 900, 800), (800, 450));
    assert_eq!(downscaled_dimensions(1000, 3000, 800), (266, 800));
    assert_eq!(downscaled_dimensions(5000, 1, 800), (800, 1));
}

#[test]
fn sample_image_downscales_large_inputs() {
    let img = solid(40, 20, [255, 255, 255, 255]);
    let dots = sample_image(&img, &SamplerOpts { max_dimension: 10 }).unwrap();
    assert_eq!(dots.len(), 10 * 5);
    assert!(dots.iter().all(Dot::in_bounds));
}

#[test]
fn sample_image_rejects_zero_max_dimension() {
    let img = solid(2, 2, [255, 255, 255, 255]);
    assert!(sample_image(&img, &SamplerOpts { max_dimension: 0 }).is_err());
}
