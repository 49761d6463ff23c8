//! Small helpers for look directions, basis vectors and headings.
use glam::Vec3;

/// Returns the unit vector in the direction of `vector`.
///
/// Non-finite and zero vectors normalise to [`Vec3::ZERO`] instead of
/// producing NaNs.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use escape::vector_math::safe_normalize;
/// let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
/// assert!((n.x - 0.6).abs() < 1e-6);
/// assert!((n.z - 0.8).abs() < 1e-6);
/// assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Unit look direction for a yaw/pitch pair given in degrees.
///
/// Yaw is measured from positive X towards positive Z, so a yaw of `-90`
/// looks down negative Z.
///
/// # Examples
///
/// ```
/// use escape::vector_math::look_direction;
/// let front = look_direction(-90.0, 0.0);
/// assert!(front.x.abs() < 1e-6);
/// assert!((front.z + 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn look_direction(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let (yaw, pitch) = (yaw_degrees.to_radians(), pitch_degrees.to_radians());
    safe_normalize(Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    ))
}

/// Right-hand basis vector for a front/up pair.
#[must_use]
pub fn right_of(front: Vec3, up: Vec3) -> Vec3 {
    safe_normalize(front.cross(up))
}

/// Horizontal heading in degrees for a direction, measured about world up.
///
/// Matches the yaw convention of the transform engine: a heading of zero
/// faces positive Z.
#[must_use]
pub fn heading_degrees(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Projects `front` onto the ground plane without renormalising.
///
/// The length is the cosine of the pitch of a unit `front`, so a view tilted
/// up or down walks shorter steps.
#[must_use]
pub const fn ground_direction(front: Vec3) -> Vec3 {
    Vec3::new(front.x, 0.0, front.z)
}
