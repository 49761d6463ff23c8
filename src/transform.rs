//! Transform engine turning entity placement into per-sub-model matrices.
//!
//! The composition order is fixed and not commutative:
//!
//! 1. translate to the anchor;
//! 2. yaw about world up, if non-zero;
//! 3. pitch about world right, if non-zero;
//! 4. roll about world forward, if non-zero;
//! 5. when the anchor differs from the position, undo the anchor and
//!    translate to the position, so rotation pivots around the anchor;
//! 6. bob, then the sub-model's local offset;
//! 7. the sub-model's local scale.
//!
//! Rotations are always about world axes in that order; there is no combined
//! orientation quaternion.
use glam::{Mat4, Vec3};

use crate::entity::{Entity, SubModel};

/// World matrix for the sub-model at `index`.
///
/// Returns `None` when `index` is outside the entity's sub-model table.
/// A sub-model with a pitch oscillator is drawn at `pitch + offset`; the
/// entity's stored pitch is left untouched.
///
/// # Examples
/// ```
/// use glam::{Mat4, Vec3};
/// use escape::{transform::model_matrix, Entity, SubModel};
///
/// let e = Entity::new(Vec3::new(1.0, 0.0, 0.0), Vec3::NEG_Z, Vec3::Y)
///     .with_model(vec![SubModel::new(Vec3::ONE, Vec3::ZERO)]);
/// assert_eq!(model_matrix(&e, 0), Some(Mat4::from_translation(Vec3::X)));
/// assert_eq!(model_matrix(&e, 1), None);
/// ```
#[must_use]
pub fn model_matrix(entity: &Entity, index: usize) -> Option<Mat4> {
    let sub_model = entity.sub_models().get(index)?;
    let swing = entity.oscillator(index).map_or(0.0, |osc| osc.offset);
    Some(compose(entity, entity.pitch() + swing, sub_model))
}

/// Matrices for every sub-model of `entity`, in table order.
#[must_use]
pub fn model_matrices(entity: &Entity) -> Vec<Mat4> {
    (0..entity.sub_models().len())
        .filter_map(|index| model_matrix(entity, index))
        .collect()
}

fn compose(entity: &Entity, pitch: f32, sub_model: &SubModel) -> Mat4 {
    let anchor = entity.anchor();
    let position = entity.position();

    let mut model = Mat4::from_translation(anchor);
    if entity.yaw() != 0.0 {
        model *= Mat4::from_rotation_y(entity.yaw().to_radians());
    }
    if pitch != 0.0 {
        model *= Mat4::from_rotation_x(pitch.to_radians());
    }
    if entity.roll() != 0.0 {
        model *= Mat4::from_rotation_z(entity.roll().to_radians());
    }
    if anchor != position {
        model *= Mat4::from_translation(-anchor);
        model *= Mat4::from_translation(position);
    }

    let bob = entity.animation.bob_offset();
    if bob != Vec3::ZERO {
        model *= Mat4::from_translation(bob);
    }
    model *= Mat4::from_translation(sub_model.offset);
    model * Mat4::from_scale(sub_model.scale)
}
