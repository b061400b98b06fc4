use std::f64::consts::FRAC_PI_2;

use arrival_targeting::frames::{
    AsymptoteAngles, Axis, PoleOrientation, mat_mul, mat_vec, rotation, transpose,
};
use arrival_targeting::vector;

fn assert_vec_close(a: &[f64; 3], b: &[f64; 3], tol: f64) {
    for k in 0..3 {
        assert!((a[k] - b[k]).abs() < tol, "component {}: {} vs {}", k, a[k], b[k]);
    }
}

#[test]
fn elementary_rotations_are_passive() {
    let x = [1.0, 0.0, 0.0];
    assert_vec_close(&mat_vec(&rotation(Axis::Z, FRAC_PI_2), &x), &[0.0, -1.0, 0.0], 1e-15);
    let z = [0.0, 0.0, 1.0];
    assert_vec_close(&mat_vec(&rotation(Axis::Y, FRAC_PI_2), &z), &[-1.0, 0.0, 0.0], 1e-15);
    let y = [0.0, 1.0, 0.0];
    assert_vec_close(&mat_vec(&rotation(Axis::X, FRAC_PI_2), &y), &[0.0, 0.0, -1.0], 1e-15);
}

#[test]
fn rotation_transpose_is_inverse() {
    let m = mat_mul(&rotation(Axis::X, 0.4), &rotation(Axis::Z, -1.3));
    let identity = mat_mul(&transpose(&m), &m);
    for (i, row) in identity.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((value - expected).abs() < 1e-14);
        }
    }
}

#[test]
fn body_frame_puts_north_pole_on_z() {
    let pole = PoleOrientation::from_degrees(299.36, 43.36);
    let in_body = pole.to_body_fixed(&pole.north_pole());
    assert_vec_close(&in_body, &[0.0, 0.0, 1.0], 1e-14);
}

#[test]
fn body_frame_preserves_length() {
    let pole = PoleOrientation::from_degrees(257.311, -15.175);
    let v = [17.78952518, 8.62038536, 3.15801163];
    let body = pole.to_body_fixed(&v);
    assert!((vector::norm(&body) - vector::norm(&v)).abs() < 1e-12);
}

#[test]
fn asymptote_frame_round_trips() {
    let angles = AsymptoteAngles::from_excess_velocity(&[-3.0, 5.0, -7.0]);
    let v = [0.2, -0.9, 0.4];
    let back = angles.from_asymptote_frame(&angles.to_asymptote_frame(&v));
    assert_vec_close(&back, &v, 1e-14);
}

#[test]
fn asymptote_angles_align_southward_vectors() {
    let v = [-3.0, 5.0, -7.0];
    let angles = AsymptoteAngles::from_excess_velocity(&v);
    let aligned = angles.to_asymptote_frame(&v);
    assert_vec_close(&aligned, &[0.0, 0.0, vector::norm(&v)], 1e-12);
}
