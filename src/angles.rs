//! Angle policies used by entities and the camera.
//!
//! Two policies coexist. Yaw and roll wrap around the full circle, while the
//! camera's look pitch is hard clamped so the view never flips over. The
//! carried item uses a third, softer rule: an update that would leave the
//! open pitch range is skipped rather than clamped.

use crate::constants::LOOK_PITCH_LIMIT;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// # Examples
/// ```
/// use escape::angles::wrap_degrees;
/// assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
/// assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a look pitch into `[-89, 89]`.
///
/// # Examples
/// ```
/// use escape::angles::clamp_look_pitch;
/// assert_eq!(clamp_look_pitch(120.0), 89.0);
/// assert_eq!(clamp_look_pitch(-120.0), -89.0);
/// ```
#[must_use]
pub fn clamp_look_pitch(pitch: f32) -> f32 {
    pitch.clamp(-LOOK_PITCH_LIMIT, LOOK_PITCH_LIMIT)
}

/// Returns `true` when `pitch` lies strictly inside `(-89, 89)`.
///
/// Used as a pre-check for carried-item pitch updates.
#[must_use]
pub fn within_open_pitch_range(pitch: f32) -> bool {
    pitch > -LOOK_PITCH_LIMIT && pitch < LOOK_PITCH_LIMIT
}
