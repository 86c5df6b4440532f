use super::*;

#[test]
fn rejects_bad_scale() {
    assert!(matches!(PngBackend::new(0.0), Err(e) if e.is_configuration()));
    assert!(PngBackend::new(f64::INFINITY).is_err());
}

#[test]
fn to_px_rounds_up_and_caps() {
    assert_eq!(to_px(10.2).unwrap(), 11);
    assert_eq!(to_px(0.3).unwrap(), 1);
    assert!(to_px(0.0).is_err());
    assert!(to_px(f64::from(MAX_DIM) + 1.0).is_err());
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = vec![64, 32, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 64, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[0, 0, 0, 0]);
}

#[test]
fn writes_png_with_page_colours() {
    let path = std::path::PathBuf::from("target")
        .join("unit_raster")
        .join("page.png");
    let _ = std::fs::remove_file(&path);

    let mut backend = PngBackend::new(1.0).unwrap();
    backend.begin_document(&path, 40.0, 20.0).unwrap();
    backend
        .draw_rect(Rect::new(0.0, 0.0, 40.0, 20.0), None, Rgb::WHITE)
        .unwrap();
    backend
        .draw_rect(Rect::new(20.0, 0.0, 40.0, 20.0), None, Rgb::BLACK)
        .unwrap();
    backend.end_page().unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 20));
    assert_eq!(img.get_pixel(5, 10).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(35, 10).0, [0, 0, 0, 255]);
}
