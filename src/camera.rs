//! First-person camera controller.
//!
//! Cursor samples drive the look angles, which in turn drive the camera's
//! `front` and `right` vectors. The camera may carry an item (the lantern)
//! that is kept rigidly attached when walking and turned in lock-step with
//! the view. The carried item is a separate registry entity referred to by
//! handle; it pivots around the camera's head through its explicit anchor.
use glam::Vec3;

use crate::angles::{clamp_look_pitch, within_open_pitch_range, wrap_degrees};
use crate::constants::{DEFAULT_LOOK_PITCH, DEFAULT_LOOK_YAW, SPRINT_MULTIPLIER};
use crate::entity::{Entity, EntityKind};
use crate::input::MoveKeys;
use crate::registry::{EntityId, Registry};
use crate::vector_math::{ground_direction, look_direction};

/// Look angles applied by one cursor sample, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookDelta {
    /// Change in yaw; positive turns right.
    pub yaw: f32,
    /// Change in pitch; positive looks up.
    pub pitch: f32,
}

/// Camera-specific state carried in [`EntityKind::Camera`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Look yaw in degrees, within `[0, 360)`.
    pub look_yaw: f32,
    /// Look pitch in degrees, within `[-89, 89]`.
    pub look_pitch: f32,
    /// Degrees of rotation per pixel of cursor travel.
    pub sensitivity: f32,
    last_cursor: (f64, f64),
    first_sample: bool,
    /// Carried item, if one is attached.
    pub item: Option<EntityId>,
    /// Whether the carried item is drawn.
    pub item_visible: bool,
}

impl CameraState {
    /// Fresh look state with the cursor assumed at the viewport centre.
    #[must_use]
    pub fn new(sensitivity: f32, viewport: (f64, f64)) -> Self {
        Self {
            look_yaw: wrap_degrees(DEFAULT_LOOK_YAW),
            look_pitch: DEFAULT_LOOK_PITCH,
            sensitivity,
            last_cursor: (viewport.0 / 2.0, viewport.1 / 2.0),
            first_sample: true,
            item: None,
            item_visible: false,
        }
    }

    /// Treats the next cursor sample as the new reference point.
    ///
    /// Call after the cursor was released and recaptured so the view does not
    /// snap by the distance travelled in between.
    pub fn reactivate(&mut self) {
        self.first_sample = true;
    }

    /// Last cursor position seen.
    #[must_use]
    pub const fn last_cursor(&self) -> (f64, f64) {
        self.last_cursor
    }

    /// Consumes a cursor sample and updates the look angles.
    ///
    /// Screen y grows downwards, so moving the cursor up looks up.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cursor deltas are a few hundred pixels at most."
    )]
    pub fn apply_cursor(&mut self, x: f64, y: f64) -> LookDelta {
        if self.first_sample {
            self.last_cursor = (x, y);
            self.first_sample = false;
        }
        let (last_x, last_y) = self.last_cursor;
        self.last_cursor = (x, y);

        let delta = LookDelta {
            yaw: (x - last_x) as f32 * self.sensitivity,
            pitch: (last_y - y) as f32 * self.sensitivity,
        };
        self.look_yaw = wrap_degrees(self.look_yaw + delta.yaw);
        self.look_pitch = clamp_look_pitch(self.look_pitch + delta.pitch);
        delta
    }

    /// Unit look direction for the current angles.
    #[must_use]
    pub fn look_front(&self) -> Vec3 {
        look_direction(self.look_yaw, self.look_pitch)
    }
}

/// Builds the camera entity.
#[must_use]
pub fn new_camera(position: Vec3, sensitivity: f32, viewport: (f64, f64)) -> Entity {
    let state = CameraState::new(sensitivity, viewport);
    let front = state.look_front();
    Entity::new(position, front, Vec3::Y).with_kind(EntityKind::Camera(state))
}

/// Places `item` at `offset` from the camera, pivoting on the camera's head,
/// and records it as the camera's carried item. The item starts hidden.
///
/// Returns the item's handle, or `None` if `camera` does not resolve to a
/// camera.
pub fn attach_item(
    registry: &mut Registry,
    camera: EntityId,
    item: Entity,
    offset: Vec3,
) -> Option<EntityId> {
    let head = registry
        .get(camera)
        .filter(|entity| entity.as_camera().is_some())?
        .position();
    let mut held = item.with_anchor(head);
    held.set_position(head + offset);
    let item_id = registry.insert_entity(held);
    let state = registry.get_mut(camera)?.as_camera_mut()?;
    state.item = Some(item_id);
    state.item_visible = false;
    Some(item_id)
}

/// Feeds one cursor sample to the camera.
///
/// Does nothing, and returns `None`, while the camera is dead or the handle
/// is stale. A carried item turns with the view: its yaw follows the look
/// yaw and its pitch follows unless that would leave `(-89, 89)`.
pub fn on_cursor(
    registry: &mut Registry,
    camera: EntityId,
    x: f64,
    y: f64,
) -> Option<LookDelta> {
    let entity = registry.get_mut(camera)?;
    if !entity.is_alive() {
        return None;
    }
    let state = entity.as_camera_mut()?;
    let delta = state.apply_cursor(x, y);
    let front = state.look_front();
    let item = state.item;
    entity.set_basis(front);

    if let Some(item) = item.and_then(|id| registry.get_mut(id)) {
        turn_item(item, delta);
    }
    Some(delta)
}

fn turn_item(item: &mut Entity, delta: LookDelta) {
    item.change_yaw_by(-delta.yaw);
    let pitch = item.pitch() + delta.pitch;
    if within_open_pitch_range(pitch) {
        item.set_pitch(pitch);
    }
}

/// Translates the camera and its carried item together.
pub fn move_camera(registry: &mut Registry, camera: EntityId, offset: Vec3) {
    let Some(entity) = registry.get_mut(camera) else {
        return;
    };
    entity.translate(offset);
    let item = entity.as_camera().and_then(|state| state.item);
    if let Some(item) = item.and_then(|id| registry.get_mut(id)) {
        item.translate(offset);
    }
}

/// Returns `true` if `position` touches or crosses the square world boundary.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use escape::camera::hits_world_boundary;
/// assert!(hits_world_boundary(Vec3::new(35.0, 0.0, 0.0), 35.0));
/// assert!(!hits_world_boundary(Vec3::new(34.9, 0.0, -34.9), 35.0));
/// ```
#[must_use]
pub fn hits_world_boundary(position: Vec3, half_extent: f32) -> bool {
    position.x.abs() >= half_extent || position.z.abs() >= half_extent
}

/// Walks the camera for one tick.
///
/// Forward and back follow the look direction flattened onto the ground, so
/// they shorten by the cosine of the look pitch. Strafing follows `right`. Each held key is applied in turn and denied on its own if its
/// destination hits the world boundary. Returns the total displacement.
pub fn walk(
    registry: &mut Registry,
    camera: EntityId,
    keys: MoveKeys,
    step: f32,
    half_extent: f32,
) -> Vec3 {
    let Some(entity) = registry.get_mut(camera) else {
        return Vec3::ZERO;
    };
    if !entity.is_alive() {
        return Vec3::ZERO;
    }
    entity.speed = if keys.sprint {
        step * SPRINT_MULTIPLIER
    } else {
        step
    };
    let speed = entity.speed;
    let ahead = ground_direction(entity.front);
    let right = entity.right;

    let moves = [
        (keys.forward, ahead),
        (keys.back, -ahead),
        (keys.left, -right),
        (keys.right, right),
    ];
    let mut travelled = Vec3::ZERO;
    for (held, direction) in moves {
        if !held {
            continue;
        }
        let Some(position) = registry.get(camera).map(Entity::position) else {
            break;
        };
        let offset = direction * speed;
        if hits_world_boundary(position + offset, half_extent) {
            log::trace!("step to {:?} blocked by world boundary", position + offset);
            continue;
        }
        move_camera(registry, camera, offset);
        travelled += offset;
    }
    travelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::SubModel;
    use approx::assert_relative_eq;

    const VIEWPORT: (f64, f64) = (800.0, 800.0);

    fn setup() -> (Registry, EntityId) {
        let mut registry = Registry::new(0);
        let camera =
            registry.insert_entity(new_camera(Vec3::new(0.0, 0.9, 3.0), 0.05, VIEWPORT));
        (registry, camera)
    }

    fn look(registry: &Registry, camera: EntityId) -> (f32, f32) {
        registry
            .get(camera)
            .and_then(Entity::as_camera)
            .map_or((f32::NAN, f32::NAN), |s| (s.look_yaw, s.look_pitch))
    }

    #[test]
    fn first_sample_does_not_snap() {
        let (mut registry, camera) = setup();
        let delta = on_cursor(&mut registry, camera, 10.0, 700.0);
        assert_eq!(delta, Some(LookDelta::default()));
        assert_eq!(look(&registry, camera), (270.0, 0.0));
    }

    #[test]
    fn cursor_motion_turns_and_tilts() {
        let (mut registry, camera) = setup();
        on_cursor(&mut registry, camera, 400.0, 400.0);
        on_cursor(&mut registry, camera, 500.0, 300.0);
        let (yaw, pitch) = look(&registry, camera);
        assert_relative_eq!(yaw, 275.0, epsilon = 1e-4);
        assert_relative_eq!(pitch, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn look_pitch_clamps_at_limit() {
        let (mut registry, camera) = setup();
        on_cursor(&mut registry, camera, 400.0, 400.0);
        for step in 1..=40 {
            on_cursor(&mut registry, camera, 400.0, 400.0 - f64::from(step) * 100.0);
        }
        assert_eq!(look(&registry, camera).1, 89.0);
    }

    #[test]
    fn front_tracks_look_angles() {
        let (mut registry, camera) = setup();
        on_cursor(&mut registry, camera, 400.0, 400.0);
        on_cursor(&mut registry, camera, 2200.0, 400.0);
        let Some(entity) = registry.get(camera) else {
            panic!("camera missing");
        };
        // 1800 px * 0.05 = 90 degrees: from -Z round to +X.
        assert!(entity.front.abs_diff_eq(Vec3::X, 1e-5), "{:?}", entity.front);
        assert!(entity.right.abs_diff_eq(Vec3::Z, 1e-5), "{:?}", entity.right);
    }

    #[test]
    fn dead_camera_ignores_cursor() {
        let (mut registry, camera) = setup();
        if let Some(entity) = registry.get_mut(camera) {
            entity.die();
        }
        assert!(on_cursor(&mut registry, camera, 0.0, 0.0).is_none());
        assert_eq!(look(&registry, camera), (270.0, 0.0));
    }

    #[test]
    fn carried_item_pitch_skips_instead_of_clamping() {
        let (mut registry, camera) = setup();
        let lantern = Entity::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_model(vec![SubModel::new(Vec3::splat(0.1), Vec3::ZERO)]);
        let Some(item) = attach_item(&mut registry, camera, lantern, Vec3::new(0.2, -0.2, -0.5))
        else {
            panic!("camera should accept an item");
        };
        on_cursor(&mut registry, camera, 400.0, 400.0);
        // Two 50 degree steps: the camera clamps at 89, the item stops at 50.
        on_cursor(&mut registry, camera, 400.0, -600.0);
        on_cursor(&mut registry, camera, 400.0, -1600.0);
        assert_eq!(look(&registry, camera).1, 89.0);
        assert_eq!(registry.get(item).map(Entity::pitch), Some(50.0));
    }

    #[test]
    fn carried_item_moves_rigidly() {
        let (mut registry, camera) = setup();
        let lantern = Entity::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let Some(item) = attach_item(&mut registry, camera, lantern, Vec3::new(0.2, -0.2, -0.5))
        else {
            panic!("camera should accept an item");
        };
        move_camera(&mut registry, camera, Vec3::new(1.0, 0.0, -2.0));
        let Some(item) = registry.get(item) else {
            panic!("item missing");
        };
        assert!(item.position().abs_diff_eq(Vec3::new(1.2, 0.7, 0.5), 1e-6));
        assert!(item.anchor().abs_diff_eq(Vec3::new(1.0, 0.9, 1.0), 1e-6));
    }

    #[test]
    fn walking_is_blocked_at_boundary() {
        let mut registry = Registry::new(0);
        let camera =
            registry.insert_entity(new_camera(Vec3::new(0.0, 0.9, -34.9), 0.05, VIEWPORT));
        let keys = MoveKeys {
            forward: true,
            right: true,
            ..MoveKeys::default()
        };
        let travelled = walk(&mut registry, camera, keys, 0.5, 35.0);
        assert!(travelled.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6), "{travelled:?}");
    }

    #[test]
    fn pitched_view_shortens_forward_step() {
        let (mut registry, camera) = setup();
        on_cursor(&mut registry, camera, 400.0, 400.0);
        // 1200 px * 0.05 = 60 degrees up.
        on_cursor(&mut registry, camera, 400.0, -800.0);
        let keys = MoveKeys {
            forward: true,
            ..MoveKeys::default()
        };
        let travelled = walk(&mut registry, camera, keys, 0.25, 35.0);
        assert_relative_eq!(travelled.z, -0.125, epsilon = 1e-5);
        assert_relative_eq!(travelled.y, 0.0);
    }

    #[test]
    fn sprint_doubles_step() {
        let (mut registry, camera) = setup();
        let keys = MoveKeys {
            forward: true,
            sprint: true,
            ..MoveKeys::default()
        };
        let travelled = walk(&mut registry, camera, keys, 0.1, 35.0);
        assert_relative_eq!(travelled.z, -0.2, epsilon = 1e-6);
    }
}
