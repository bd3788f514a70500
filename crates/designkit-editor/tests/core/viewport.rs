use designkit_editor::{Bounds, Point, Viewport};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_screen_world_roundtrip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0);
    vp.set_pan(40.0, -10.0);

    let world = vp.screen_to_world(140.0, 90.0);
    assert_eq!(world, Point::new(50.0, 50.0));
    assert_eq!(vp.world_to_screen(world.x, world.y), (140.0, 90.0));
}

#[test]
fn test_set_zoom_ignores_out_of_range() {
    let mut vp = Viewport::default();
    vp.set_zoom(3.0);
    vp.set_zoom(0.0);
    assert_eq!(vp.zoom(), 3.0);
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 3.0);
}

#[test]
fn test_fit_to_bounds_uses_tighter_axis() {
    let mut vp = Viewport::new(1000.0, 1000.0);
    let bounds = Bounds::new(50.0, 0.0, 900.0, 1200.0);

    let zoom = vp.fit_to_bounds(&bounds, 0.85).expect("fit");
    assert!(approx(zoom, 0.85 * 1000.0 / 1200.0));

    let (sx, sy) = vp.world_to_screen(500.0, 600.0);
    assert!(approx(sx, 500.0));
    assert!(approx(sy, 500.0));
}

#[test]
fn test_fit_to_degenerate_bounds() {
    let mut vp = Viewport::new(1000.0, 1000.0);
    assert_eq!(vp.fit_to_bounds(&Bounds::new(0.0, 0.0, 0.0, 10.0), 0.85), None);

    let mut empty = Viewport::new(0.0, 600.0);
    assert_eq!(
        empty.fit_to_bounds(&Bounds::new(0.0, 0.0, 10.0, 10.0), 0.85),
        None
    );
}

#[test]
fn test_zoom_in_keeps_center_fixed() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_pan(25.0, 75.0);
    let before = vp.center_world();

    vp.zoom_in();
    assert!(vp.zoom() > 1.0);
    let after = vp.center_world();
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));

    vp.zoom_out();
    assert!(approx(vp.zoom(), 1.0));
}

#[test]
fn test_transform_matrix() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(0.5);
    vp.set_pan(10.0, 20.0);
    assert_eq!(vp.transform(), [0.5, 0.0, 0.0, 0.5, 10.0, 20.0]);
}
