//! Float-tolerant assertions for vectors and matrices.
use approx::abs_diff_eq;
use glam::{Mat4, Vec3};

/// Tolerance used when none is given.
pub const EPSILON: f32 = 1e-5;

/// Assert that two vectors agree component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors if any component differs by more than `epsilon`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::assert_vec3_near;
/// assert_vec3_near(Vec3::new(0.1 + 0.2, 0.0, 0.0), Vec3::new(0.3, 0.0, 0.0), 1e-6);
/// ```
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    let close = actual
        .to_array()
        .iter()
        .zip(expected.to_array())
        .all(|(a, e)| abs_diff_eq!(*a, e, epsilon = epsilon));
    assert!(close, "vectors differ: {actual:?} != {expected:?}");
}

/// Assert that two matrices agree element-wise within `epsilon`.
///
/// # Panics
/// Panics with both matrices if any element differs by more than `epsilon`.
pub fn assert_mat4_near(actual: Mat4, expected: Mat4, epsilon: f32) {
    let close = actual
        .to_cols_array()
        .iter()
        .zip(expected.to_cols_array())
        .all(|(a, e)| abs_diff_eq!(*a, e, epsilon = epsilon));
    assert!(close, "matrices differ:\n{actual:?}\n{expected:?}");
}
