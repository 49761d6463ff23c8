//! Matrices of the lantern carried in front of the camera.
use escape::transform::model_matrix;
use escape::{Entity, World};
use glam::{Mat4, Vec3};
use test_utils::{assert_mat4_near, assert_vec3_near, press, Key, Script};

fn carried(world: &World) -> &Entity {
    world
        .camera_entity()
        .and_then(Entity::as_camera)
        .and_then(|state| state.item)
        .and_then(|id| world.registry().get(id))
        .unwrap_or_else(|| panic!("carried lantern should resolve"))
}

#[test]
fn item_pivots_around_the_head() {
    let mut world = World::default();
    world.on_cursor(400.0, 400.0);
    // 1800 px at 0.05 deg/px: the view turns 90 degrees to the right.
    world.on_cursor(2200.0, 400.0);

    let item = carried(&world);
    let head = world.config().camera.position;
    let offset = world.config().lantern.carried.position;
    assert_eq!(item.anchor(), head);
    assert_eq!(item.yaw(), 270.0);

    let Some(matrix) = model_matrix(item, 0) else {
        panic!("carried lantern has a sub-model");
    };
    let scale = world
        .config()
        .lantern
        .carried
        .sub_models
        .first()
        .map_or(Vec3::ONE, |sub| sub.scale);
    let expected = Mat4::from_translation(head)
        * Mat4::from_rotation_y(270f32.to_radians())
        * Mat4::from_translation(-head)
        * Mat4::from_translation(head + offset)
        * Mat4::from_scale(scale);
    assert_mat4_near(matrix, expected, 1e-5);

    let swung = Mat4::from_rotation_y(270f32.to_radians()).transform_point3(offset);
    assert_vec3_near(matrix.transform_point3(Vec3::ZERO), head + swung, 1e-5);
}

#[test]
fn item_pitch_stops_short_of_the_camera_clamp() {
    let mut world = World::default();
    world.on_cursor(400.0, 400.0);
    // 50 deg up, then another 50: the camera clamps at 89, the item holds at 50.
    world.on_cursor(400.0, -600.0);
    world.on_cursor(400.0, -1600.0);

    let camera_pitch = world
        .camera_entity()
        .and_then(Entity::as_camera)
        .map(|state| state.look_pitch);
    assert_eq!(camera_pitch, Some(89.0));
    approx::assert_abs_diff_eq!(carried(&world).pitch(), 50.0, epsilon = 1e-3);
}

#[test]
fn item_walks_with_the_camera() {
    let mut script = Script::default();
    script.walk_to_table().step(&press(Key::Interact));
    let world = &script.world;
    let head = world
        .camera_entity()
        .map(Entity::position)
        .unwrap_or_else(|| panic!("camera should resolve"));
    let item = carried(world);
    assert_vec3_near(item.anchor(), head, 1e-5);
    assert_vec3_near(
        item.position(),
        head + world.config().lantern.carried.position,
        1e-5,
    );
}

#[test]
fn nudged_camera_carries_the_item_past_the_boundary() {
    let mut world = World::default();
    let shift = Vec3::new(100.0, 0.0, 0.0);
    world.move_camera(shift);

    let head = world.config().camera.position + shift;
    let camera = world
        .camera_entity()
        .map(Entity::position)
        .unwrap_or_else(|| panic!("camera should resolve"));
    assert_vec3_near(camera, head, 1e-5);

    let item = carried(&world);
    assert!(item.has_explicit_anchor());
    assert_vec3_near(item.anchor(), head, 1e-5);
    assert_vec3_near(
        item.position(),
        head + world.config().lantern.carried.position,
        1e-5,
    );
}
