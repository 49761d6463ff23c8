//! The world: owner of the registry and every singleton handle.
//!
//! [`World::tick`] runs one fixed simulation step in this order: switch
//! cooldown, cursor samples, walking, animation, enemy pursuit, interaction,
//! then restart. Matrices are produced on demand afterwards through
//! [`World::draw_calls`] or [`World::render`].
use glam::Vec3;

use crate::animation;
use crate::camera::{self, LookDelta};
use crate::config::WorldConfig;
use crate::enemy::{new_enemy, pursue, Pursuit};
use crate::entity::{Entity, EntityKind, PickupKind, PickupState};
use crate::input::{EdgeTrigger, TickInput};
use crate::interaction::{Interaction, Switch};
use crate::registry::{EntityId, Registry};
use crate::render::{self, DrawCall, DrawSink, Light};

/// Gameplay transitions reported by [`World::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A pickup other than the lantern was collected.
    PickedUp {
        /// Role of the collected pickup.
        kind: PickupKind,
    },
    /// The lantern was picked up and now lights the player's way.
    LanternTaken,
    /// The room light switch flipped.
    SwitchToggled {
        /// New switch state.
        on: bool,
    },
    /// The enemy reached the player.
    Caught,
    /// The world was torn down and rebuilt.
    Restarted {
        /// Generation of the fresh registry.
        generation: u32,
    },
}

/// Handles into one registry generation.
#[derive(Debug)]
struct Scene {
    registry: Registry,
    camera: EntityId,
    enemy: EntityId,
    lantern: EntityId,
    lamp: EntityId,
    switch_cap: EntityId,
    logo: EntityId,
    light_source: EntityId,
    switch: Switch,
}

impl Scene {
    fn build(config: &WorldConfig, generation: u32) -> Self {
        let mut registry = Registry::new(generation);
        for archetype in &config.scenery {
            registry.insert_entity(archetype.build());
        }
        let lamp = registry.insert_entity(config.lamp.build());
        registry.insert_entity(config.switch.case.build());
        let switch_cap = registry.insert_entity(config.switch.cap.build());
        let logo = registry.insert_entity(config.logo.build());

        let camera = registry.insert_entity(camera::new_camera(
            config.camera.position,
            config.camera.sensitivity,
            config.camera.viewport,
        ));
        let carried = &config.lantern.carried;
        if camera::attach_item(&mut registry, camera, carried.build(), carried.position).is_none()
        {
            log::warn!("camera {camera} could not take the carried lantern");
        }

        let enemy = registry.insert_entity(new_enemy(
            config.enemy.body.build(),
            camera,
            config.enemy.speed,
            config.enemy.catch_threshold,
        ));

        let lantern = registry.insert_pickup(config.lantern.pickup.build().with_kind(
            EntityKind::Pickup(PickupState {
                kind: PickupKind::Lantern,
            }),
        ));
        for pickup in &config.pickups {
            registry.insert_pickup(
                pickup
                    .body
                    .build()
                    .with_kind(EntityKind::Pickup(PickupState { kind: pickup.kind })),
            );
        }

        log::info!(
            "Built world generation {generation}: {} entities, {} pickups",
            registry.entity_count(),
            registry.pickup_count()
        );
        Self {
            registry,
            camera,
            enemy,
            lantern,
            lamp,
            switch_cap,
            logo,
            light_source: lamp,
            switch: Switch::new(config.switch.point, config.tuning.switch_cooldown_ticks),
        }
    }
}

/// A running game world.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    scene: Scene,
    interaction: Interaction,
    restart_key: EdgeTrigger,
    ticks: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Builds generation zero from `config`.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let scene = Scene::build(&config, 0);
        Self {
            config,
            scene,
            interaction: Interaction::default(),
            restart_key: EdgeTrigger::default(),
            ticks: 0,
        }
    }

    /// Tears the world down and rebuilds it from the configuration.
    ///
    /// Every handle issued before the restart goes stale.
    pub fn restart(&mut self) -> u32 {
        let generation = self.scene.registry.generation().wrapping_add(1);
        self.scene = Scene::build(&self.config, generation);
        self.interaction.clear();
        log::info!("World restarted as generation {generation}");
        generation
    }

    /// Runs one simulation step and reports what happened.
    pub fn tick(&mut self, input: &TickInput) -> Vec<WorldEvent> {
        let mut events = Vec::new();
        self.ticks += 1;

        self.scene.switch.tick();
        for &(x, y) in &input.cursor {
            self.on_cursor(x, y);
        }
        camera::walk(
            &mut self.scene.registry,
            self.scene.camera,
            input.movement,
            self.config.tuning.walk_speed * input.delta_seconds,
            self.config.tuning.half_extent,
        );
        for entity in self.scene.registry.iter_mut() {
            animation::advance(entity);
        }
        self.chase(&mut events);
        self.interact(input, &mut events);

        if self.restart_key.pressed(input.restart) {
            let generation = self.restart();
            events.push(WorldEvent::Restarted { generation });
        }
        if !events.is_empty() {
            log::debug!("tick {}: {events:?}", self.ticks);
        }
        events
    }

    fn chase(&mut self, events: &mut Vec<WorldEvent>) {
        if let Pursuit::Caught { fresh: true } = pursue(&mut self.scene.registry, self.scene.enemy)
        {
            if let Some(enemy) = self.scene.registry.get_mut(self.scene.enemy) {
                enemy.animation.enabled = false;
            }
            log::info!("The enemy caught the player");
            events.push(WorldEvent::Caught);
        }
    }

    fn interact(&mut self, input: &TickInput, events: &mut Vec<WorldEvent>) {
        let Some(head) = self.camera_entity().map(Entity::position) else {
            return;
        };
        let reach = self.config.tuning.interact_distance;

        if let Some((id, pickup)) =
            self.interaction
                .update(&mut self.scene.registry, head, reach, input.interact)
        {
            if id == self.scene.lantern {
                self.take_lantern();
                events.push(WorldEvent::LanternTaken);
            } else {
                let kind = pickup.pickup_kind().unwrap_or(PickupKind::Trinket);
                log::info!("Picked up {kind:?}");
                events.push(WorldEvent::PickedUp { kind });
            }
        }

        if self.scene.switch.try_toggle(input.toggle, head, reach) {
            let on = self.scene.switch.is_on();
            self.apply_switch(on);
            log::info!("Light switched {}", if on { "on" } else { "off" });
            events.push(WorldEvent::SwitchToggled { on });
        }
    }

    fn take_lantern(&mut self) {
        let camera = self.scene.camera;
        if let Some(state) = self
            .scene
            .registry
            .get_mut(camera)
            .and_then(Entity::as_camera_mut)
        {
            state.item_visible = true;
        }
        self.scene.light_source = camera;
        log::info!("Lantern taken; the light now follows the camera");
    }

    fn apply_switch(&mut self, on: bool) {
        let switch = &self.config.switch;
        if let Some(cap) = self.scene.registry.get_mut(self.scene.switch_cap) {
            let sink = if on {
                self.config.tuning.switch_press_depth
            } else {
                0.0
            };
            cap.set_position(switch.cap.position - Vec3::Y * sink);
            let textures = if on {
                switch.bright_textures.clone()
            } else {
                switch.cap.textures.clone()
            };
            cap.replace_textures(textures);
        }
        if let Some(logo) = self.scene.registry.get_mut(self.scene.logo) {
            logo.animation.enabled = on;
        }
    }

    /// Feeds one cursor sample to the camera outside of [`World::tick`].
    pub fn on_cursor(&mut self, x: f64, y: f64) -> Option<LookDelta> {
        camera::on_cursor(&mut self.scene.registry, self.scene.camera, x, y)
    }

    /// Makes the next cursor sample a fresh reference, e.g. after the window
    /// regains focus.
    pub fn reactivate_cursor(&mut self) {
        if let Some(state) = self
            .scene
            .registry
            .get_mut(self.scene.camera)
            .and_then(Entity::as_camera_mut)
        {
            state.reactivate();
        }
    }

    /// Moves the camera and its carried item, ignoring the world boundary.
    pub fn move_camera(&mut self, offset: Vec3) {
        camera::move_camera(&mut self.scene.registry, self.scene.camera, offset);
    }

    fn hidden_item(&self) -> Option<EntityId> {
        let state = self.camera_entity()?.as_camera()?;
        state.item.filter(|_| !state.item_visible)
    }

    /// Draws for every visible entity: general entities first, then pickups.
    #[must_use]
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        let hidden = self.hidden_item();
        self.scene
            .registry
            .iter()
            .filter(|(id, _)| Some(*id) != hidden)
            .flat_map(|(_, entity)| render::draw_calls(entity))
            .collect()
    }

    /// Submits [`World::draw_calls`] to `sink`.
    pub fn render<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        render::submit(&self.draw_calls(), sink);
    }

    /// Current scene lighting.
    #[must_use]
    pub fn light(&self) -> Light {
        let source = self.scene.registry.get(self.scene.light_source);
        Light {
            position: source.map_or(Vec3::ZERO, Entity::position),
            direction: source.map_or(Vec3::NEG_Z, |entity| entity.front),
            room_lit: self.scene.switch.is_on(),
            carried: self.scene.light_source == self.scene.camera,
        }
    }

    /// Configuration the world is built from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Entity registry of the current generation.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.scene.registry
    }

    /// Current registry generation; bumped by every restart.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.scene.registry.generation()
    }

    /// Ticks run since the world was created.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Handle of the camera.
    #[must_use]
    pub const fn camera(&self) -> EntityId {
        self.scene.camera
    }

    /// The camera entity.
    #[must_use]
    pub fn camera_entity(&self) -> Option<&Entity> {
        self.scene.registry.get(self.scene.camera)
    }

    /// Whether the player is still alive.
    #[must_use]
    pub fn player_alive(&self) -> bool {
        self.camera_entity().is_some_and(Entity::is_alive)
    }

    /// Handle of the enemy.
    #[must_use]
    pub const fn enemy(&self) -> EntityId {
        self.scene.enemy
    }

    /// Handle of the lantern pickup; stale once it has been taken.
    #[must_use]
    pub const fn lantern(&self) -> EntityId {
        self.scene.lantern
    }

    /// Handle of the ceiling lamp.
    #[must_use]
    pub const fn lamp(&self) -> EntityId {
        self.scene.lamp
    }

    /// Handle of the logo.
    #[must_use]
    pub const fn logo(&self) -> EntityId {
        self.scene.logo
    }

    /// Handle of the switch cap.
    #[must_use]
    pub const fn switch_cap(&self) -> EntityId {
        self.scene.switch_cap
    }

    /// Entity whose placement feeds the lighting.
    #[must_use]
    pub const fn light_source(&self) -> EntityId {
        self.scene.light_source
    }

    /// The room light switch.
    #[must_use]
    pub const fn switch(&self) -> &Switch {
        &self.scene.switch
    }

    /// Pickup currently within reach, if any.
    #[must_use]
    pub const fn closest_pickup(&self) -> Option<EntityId> {
        self.interaction.closest()
    }
}
