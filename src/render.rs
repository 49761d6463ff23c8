//! Renderer contract: model matrices paired with texture sets.
//!
//! The core never touches a graphics API. It produces [`DrawCall`]s and
//! hands them to whatever implements [`DrawSink`].
use glam::{Mat4, Vec3};

use crate::entity::{Entity, TextureHandle, TextureSet};
use crate::transform::model_matrices;

/// One sub-model ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// World matrix.
    pub model: Mat4,
    /// Textures bound for this draw.
    pub textures: TextureSet,
}

/// Receiver of draw submissions.
#[cfg_attr(test, mockall::automock)]
pub trait DrawSink {
    /// Draws the unit cube transformed by `model` with `textures` bound.
    fn draw(&mut self, model: Mat4, textures: &[TextureHandle]);
}

impl DrawSink for Vec<DrawCall> {
    fn draw(&mut self, model: Mat4, textures: &[TextureHandle]) {
        self.push(DrawCall {
            model,
            textures: textures.to_vec(),
        });
    }
}

/// One draw per sub-model of `entity`, in table order.
///
/// Every sub-model shares the entity's texture set.
#[must_use]
pub fn draw_calls(entity: &Entity) -> Vec<DrawCall> {
    model_matrices(entity)
        .into_iter()
        .map(|model| DrawCall {
            model,
            textures: entity.textures().to_vec(),
        })
        .collect()
}

/// Forwards `calls` to `sink` in order.
pub fn submit<S: DrawSink + ?Sized>(calls: &[DrawCall], sink: &mut S) {
    for call in calls {
        sink.draw(call.model, &call.textures);
    }
}

/// Scene lighting derived from the current light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Where the light originates.
    pub position: Vec3,
    /// Facing of the light source.
    pub direction: Vec3,
    /// Room light switched on.
    pub room_lit: bool,
    /// Light is carried by the player.
    pub carried: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SubModel;
    use mockall::Sequence;

    fn two_part_entity() -> Entity {
        Entity::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_model(vec![
                SubModel::new(Vec3::ONE, Vec3::X),
                SubModel::new(Vec3::ONE, Vec3::Y),
            ])
            .with_textures(vec![TextureHandle(3), TextureHandle(4)])
    }

    #[test]
    fn one_call_per_sub_model() {
        let calls = draw_calls(&two_part_entity());
        assert_eq!(calls.len(), 2);
        assert!(calls
            .iter()
            .all(|call| call.textures == vec![TextureHandle(3), TextureHandle(4)]));
        assert_eq!(calls.first().map(|c| c.model), Some(Mat4::from_translation(Vec3::X)));
    }

    #[test]
    fn submit_forwards_in_order() {
        let mut sink = MockDrawSink::new();
        let mut seq = Sequence::new();
        sink.expect_draw()
            .withf(|model, _| *model == Mat4::from_translation(Vec3::X))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_draw()
            .withf(|model, textures| {
                *model == Mat4::from_translation(Vec3::Y) && textures.len() == 2
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        submit(&draw_calls(&two_part_entity()), &mut sink);
    }

    #[test]
    fn vec_sink_records_calls() {
        let calls = draw_calls(&two_part_entity());
        let mut recorded: Vec<DrawCall> = Vec::new();
        submit(&calls, &mut recorded);
        assert_eq!(recorded, calls);
    }
}
