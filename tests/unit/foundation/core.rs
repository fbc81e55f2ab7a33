use super::*;

#[test]
fn surface_size_rejects_zero_and_oversized() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    assert!(SurfaceSize::new(70_000, 10).is_err());
    assert!(SurfaceSize::new(1920, 1080).is_ok());
}

#[test]
fn denormalize_maps_percent_to_pixels() {
    let size = SurfaceSize::new(200, 100).unwrap();
    assert_eq!(size.denormalize(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
    assert_eq!(size.denormalize(Point::new(50.0, 50.0)), Point::new(100.0, 50.0));
    assert_eq!(size.denormalize(Point::new(100.0, 25.0)), Point::new(200.0, 25.0));
}

#[test]
fn millis_since_and_after() {
    let t0 = Millis(1000.0);
    let t1 = t0.after(250.0);
    assert_eq!(t1, Millis(1250.0));
    assert_eq!(t1.since(t0), 250.0);
    assert_eq!(t0.since(t1), -250.0);
}
