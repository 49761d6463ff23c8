//! Restart tears the world down and rebuilds it from configuration.
use escape::{World, WorldConfig};
use rstest::rstest;
use test_utils::{press, Key, Script};

#[rstest]
#[case::built_in(WorldConfig::default(), 9, 4)]
#[case::no_goals(WorldConfig { pickups: Vec::new(), ..WorldConfig::default() }, 9, 1)]
#[case::bare_room(WorldConfig { scenery: Vec::new(), ..WorldConfig::default() }, 7, 4)]
fn sizes_match_configuration(
    #[case] config: WorldConfig,
    #[case] entities: usize,
    #[case] pickups: usize,
) {
    let mut world = World::new(config);
    assert_eq!(world.registry().entity_count(), entities);
    assert_eq!(world.registry().pickup_count(), pickups);

    world.restart();
    assert_eq!(world.registry().entity_count(), entities);
    assert_eq!(world.registry().pickup_count(), pickups);
}

#[test]
fn old_handles_go_stale() {
    let mut script = Script::default();
    let camera = script.world.camera();
    let enemy = script.world.enemy();
    script.step(&press(Key::Restart));

    let world = &script.world;
    assert_eq!(world.generation(), 1);
    assert!(world.registry().get(camera).is_none());
    assert!(world.registry().get(enemy).is_none());
    assert!(world.registry().get(world.camera()).is_some());
}

#[test]
fn collected_pickups_come_back() {
    let mut script = Script::default();
    script.walk_to_table().step(&press(Key::Interact));
    assert_eq!(script.world.registry().pickup_count(), 3);

    script.world.restart();
    assert_eq!(script.world.registry().pickup_count(), 4);
    assert!(script.world.registry().get(script.world.lantern()).is_some());
}

#[test]
fn restart_forgets_the_selected_pickup() {
    let mut script = Script::default();
    script.walk_to_table();
    assert!(script.world.closest_pickup().is_some());

    script.world.restart();
    assert!(script.world.closest_pickup().is_none());
}
