//! Behavioural tests for the world tick pipeline.
//!
//! Each suite rebuilds the built-in room before every example and drives it
//! with scripted input.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use escape::input::MoveKeys;
use escape::{Entity, TickInput, World, WorldEvent};
use rspec_runner::run_serial;
use test_utils::{press, walking, Key, Script};

#[derive(Debug, Clone, Default)]
struct Env {
    script: Arc<Mutex<Script>>,
}

impl Env {
    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reset(&self) {
        *self.script() = Script::default();
    }
}

fn idle() -> TickInput {
    TickInput::idle(0.1)
}

#[test]
fn taking_the_lantern() {
    run_serial(&rspec::given("a player standing at the table", Env::default(), |ctx| {
        ctx.before_each(|env| {
            env.reset();
            env.script().walk_to_table().step(&press(Key::Interact));
        });
        ctx.then("the lantern is collected once", |env| {
            let script = env.script();
            assert_eq!(script.count(WorldEvent::LanternTaken), 1);
            assert_eq!(script.world.registry().pickup_count(), 3);
        });
        ctx.then("the light follows the camera", |env| {
            let script = env.script();
            let light = script.world.light();
            assert!(light.carried);
            assert_eq!(script.world.light_source(), script.world.camera());
            assert_eq!(
                Some(light.position),
                script.world.camera_entity().map(Entity::position)
            );
        });
        ctx.then("the lantern pickup handle no longer resolves", |env| {
            let script = env.script();
            assert!(script.world.registry().get(script.world.lantern()).is_none());
        });
    }));
}

#[test]
fn holding_the_switch() {
    run_serial(&rspec::given("a player holding the switch key", Env::default(), |ctx| {
        ctx.before_each(|env| {
            env.reset();
            env.script()
                .walk_to_table()
                .repeat(25, &press(Key::Toggle));
        });
        ctx.then("the switch flips on, then off after the cooldown", |env| {
            let script = env.script();
            assert_eq!(
                script.events,
                vec![
                    WorldEvent::SwitchToggled { on: true },
                    WorldEvent::SwitchToggled { on: false },
                ]
            );
        });
        ctx.then("the room is dark again", |env| {
            let script = env.script();
            assert!(!script.world.light().room_lit);
            assert_eq!(script.world.switch().cooldown(), 16);
        });
    }));
}

#[test]
fn enemy_reaches_the_player() {
    run_serial(&rspec::given("a player standing still", Env::default(), |ctx| {
        ctx.before_each(|env| {
            env.reset();
            env.script().repeat(600, &idle());
        });
        ctx.then("the player is caught exactly once", |env| {
            let script = env.script();
            assert_eq!(script.count(WorldEvent::Caught), 1);
            assert!(!script.world.player_alive());
        });
        ctx.then("the enemy stops just inside the catch distance", |env| {
            let script = env.script();
            let world = &script.world;
            let enemy = world.registry().get(world.enemy()).map(Entity::position);
            let head = world.camera_entity().map(Entity::position);
            let Some((enemy, head)) = enemy.zip(head) else {
                panic!("enemy and camera should resolve");
            };
            let gap = enemy.distance(head);
            let threshold = world.config().enemy.catch_threshold;
            assert!(gap <= threshold, "gap {gap}");
            assert!(gap > threshold - world.config().enemy.speed - 1e-4, "gap {gap}");
        });
        ctx.then("a caught player can no longer walk", |env| {
            let mut script = env.script();
            let before = script.world.camera_entity().map(Entity::position);
            script.step(&walking(MoveKeys {
                forward: true,
                ..MoveKeys::default()
            }));
            assert_eq!(script.world.camera_entity().map(Entity::position), before);
        });
    }));
}

#[test]
fn restarting_after_play() {
    run_serial(&rspec::given("a world restarted mid-game", Env::default(), |ctx| {
        ctx.before_each(|env| {
            env.reset();
            env.script()
                .walk_to_table()
                .step(&press(Key::Interact))
                .step(&press(Key::Toggle))
                .step(&idle())
                .step(&press(Key::Restart));
        });
        ctx.then("the registry matches a fresh world", |env| {
            let script = env.script();
            let fresh = World::default();
            assert_eq!(
                script.world.registry().entity_count(),
                fresh.registry().entity_count()
            );
            assert_eq!(
                script.world.registry().pickup_count(),
                fresh.registry().pickup_count()
            );
            assert_eq!(script.world.generation(), 1);
        });
        ctx.then("scene state is back to its defaults", |env| {
            let script = env.script();
            let world = &script.world;
            assert_eq!(world.light_source(), world.lamp());
            assert!(!world.light().room_lit);
            assert_eq!(
                world.camera_entity().map(Entity::position),
                Some(world.config().camera.position)
            );
            assert_eq!(script.count(WorldEvent::Restarted { generation: 1 }), 1);
        });
    }));
}
