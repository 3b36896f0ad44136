use face_core::camera::{auto_rotate_rad_per_sec, Camera};

#[test]
fn default_camera_looks_at_origin_from_z() {
    let c = Camera::default();
    assert_eq!(c.eye.z, 50.0);
    assert!((c.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
    let p = c.projection_matrix() * c.view_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
}

#[test]
fn orbit_keeps_radius_and_height() {
    let mut c = Camera::default();
    for _ in 0..1000 {
        c.orbit(1.0 / 60.0);
    }
    let r = c.eye.x.hypot(c.eye.z);
    assert!((r - 50.0).abs() < 1e-3, "radius {r}");
    assert_eq!(c.eye.y, 0.0);
    assert!(c.eye.x.abs() > 1.0, "camera moved");
}

#[test]
fn rotation_rate_matches_orbit_controls() {
    let full_turn_sec = std::f32::consts::TAU / auto_rotate_rad_per_sec();
    assert!((full_turn_sec - 200.0).abs() < 1e-2, "{full_turn_sec}");
}

#[test]
fn zero_sized_viewport_keeps_aspect() {
    let mut c = Camera::default();
    c.set_viewport(1600, 800);
    assert_eq!(c.aspect, 2.0);
    c.set_viewport(0, 800);
    assert_eq!(c.aspect, 2.0);
}
