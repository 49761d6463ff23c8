//! World configuration: archetype tables and tuning values.
//!
//! Every drawable thing in the world is described by an [`Archetype`]: a
//! placement plus a table of `(scale, offset)` sub-models around it. The
//! [`Default`] configuration is the built-in room. Configurations can also be
//! read from JSON; missing sections fall back to the built-in values.
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, Oscillator};
use crate::constants::{
    BOB_AMPLITUDE, CATCH_THRESHOLD, DEFAULT_SENSITIVITY, ENEMY_SPEED, INTERACT_DISTANCE,
    LIMB_SWING_STEP, MAX_TEXTURES, SWITCH_COOLDOWN_TICKS, SWITCH_PRESS_DEPTH, WALK_SPEED,
    WALL_HEIGHT, WALL_THICKNESS, WORLD_HALF_EXTENT,
};
use crate::entity::{Entity, PickupKind, SubModel, TextureHandle, TextureSet};
use crate::error::ConfigError;

/// Numeric knobs of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Walking is denied at `|x|` or `|z|` at or beyond this.
    pub half_extent: f32,
    /// Reach for pickups and the switch.
    pub interact_distance: f32,
    /// Walking speed in units per second; doubled while sprinting.
    pub walk_speed: f32,
    /// Ticks before the switch responds again.
    pub switch_cooldown_ticks: u32,
    /// How far the switch cap sinks while on.
    pub switch_press_depth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            half_extent: WORLD_HALF_EXTENT,
            interact_distance: INTERACT_DISTANCE,
            walk_speed: WALK_SPEED,
            switch_cooldown_ticks: SWITCH_COOLDOWN_TICKS,
            switch_press_depth: SWITCH_PRESS_DEPTH,
        }
    }
}

/// Pitch swing attached to one sub-model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    /// Index into the archetype's sub-model table.
    pub sub_model: usize,
    /// Initial oscillator state.
    pub oscillator: Oscillator,
}

/// Placement and model table for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Label used in logs and validation errors.
    pub name: String,
    /// World position, also the rotation pivot.
    pub position: Vec3,
    /// Initial yaw in degrees.
    #[serde(default)]
    pub yaw: f32,
    /// Drawable parts.
    pub sub_models: Vec<SubModel>,
    /// Textures shared by every part.
    #[serde(default)]
    pub textures: TextureSet,
    /// Per-part pitch swings.
    #[serde(default)]
    pub swings: Vec<Swing>,
    /// Spin and bob settings.
    #[serde(default)]
    pub animation: Animation,
}

impl Archetype {
    /// Creates an archetype with no textures, swings or animation.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3, sub_models: Vec<SubModel>) -> Self {
        Self {
            name: name.into(),
            position,
            yaw: 0.0,
            sub_models,
            textures: Vec::new(),
            swings: Vec::new(),
            animation: Animation::default(),
        }
    }

    /// Sets the texture set.
    #[must_use]
    pub fn textured(mut self, textures: TextureSet) -> Self {
        self.textures = textures;
        self
    }

    /// Sets the animation.
    #[must_use]
    pub fn animated(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Builds a plain entity facing −Z.
    #[must_use]
    pub fn build(&self) -> Entity {
        let mut base = Entity::new(self.position, Vec3::NEG_Z, Vec3::Y)
            .with_model(self.sub_models.clone())
            .with_textures(self.textures.clone())
            .with_animation(self.animation);
        base.set_yaw(self.yaw);
        self.swings.iter().fold(base, |entity, swing| {
            entity.with_oscillator(swing.sub_model, swing.oscillator)
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sub_models.is_empty() {
            return Err(ConfigError::invalid(&self.name, "has no sub-models"));
        }
        if self.textures.len() > MAX_TEXTURES {
            return Err(ConfigError::invalid(
                &self.name,
                format!(
                    "binds {} textures, at most {MAX_TEXTURES} are supported",
                    self.textures.len()
                ),
            ));
        }
        if let Some(swing) = self
            .swings
            .iter()
            .find(|swing| swing.sub_model >= self.sub_models.len())
        {
            return Err(ConfigError::invalid(
                &self.name,
                format!(
                    "swing targets sub-model {} of {}",
                    swing.sub_model,
                    self.sub_models.len()
                ),
            ));
        }
        Ok(())
    }
}

/// First-person camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Head position.
    pub position: Vec3,
    /// Degrees of turn per pixel of cursor motion.
    pub sensitivity: f32,
    /// Window size in pixels; the first cursor reference is its centre.
    pub viewport: (f64, f64),
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.9, 3.0),
            sensitivity: DEFAULT_SENSITIVITY,
            viewport: (800.0, 800.0),
        }
    }
}

/// Wall switch sitting on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Point the player must be near to operate it.
    pub point: Vec3,
    /// Housing.
    pub case: Archetype,
    /// Cap drawn with its own textures and sunk while on.
    pub cap: Archetype,
    /// Cap textures while on.
    pub bright_textures: TextureSet,
}

/// The lantern, both lying in the world and in the player's hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanternConfig {
    /// Lantern waiting to be picked up.
    pub pickup: Archetype,
    /// Lantern in hand. Its `position` is the offset from the camera head.
    pub carried: Archetype,
}

/// A collectible other than the lantern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupConfig {
    /// Role reported on collection.
    pub kind: PickupKind,
    /// Placement and model.
    pub body: Archetype,
}

/// The pursuing enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Placement, body parts and limb swings.
    pub body: Archetype,
    /// Step length per tick.
    pub speed: f32,
    /// Distance at or below which the player is caught.
    pub catch_threshold: f32,
}

/// Complete description of a fresh world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Numeric knobs.
    pub tuning: Tuning,
    /// Camera placement.
    pub camera: CameraConfig,
    /// Static scenery, drawn in order.
    pub scenery: Vec<Archetype>,
    /// Ceiling lamp; the light source until the lantern is taken.
    pub lamp: Archetype,
    /// Light switch.
    pub switch: SwitchConfig,
    /// Logo that spins and bobs while the light is on.
    pub logo: Archetype,
    /// Lantern.
    pub lantern: LanternConfig,
    /// Other collectibles, in scan order after the lantern.
    pub pickups: Vec<PickupConfig>,
    /// Pursuer.
    pub enemy: EnemyConfig,
}

impl WorldConfig {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// JSON for this schema, or fails [`WorldConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded world config from {}", file.display());
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Every archetype that produces an entity.
    pub fn archetypes(&self) -> impl Iterator<Item = &Archetype> + '_ {
        self.scenery
            .iter()
            .chain([
                &self.lamp,
                &self.switch.case,
                &self.switch.cap,
                &self.logo,
                &self.lantern.pickup,
                &self.lantern.carried,
                &self.enemy.body,
            ])
            .chain(self.pickups.iter().map(|pickup| &pickup.body))
    }

    /// Checks that the configuration describes a usable world.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tuning.half_extent", self.tuning.half_extent),
            ("tuning.interact_distance", self.tuning.interact_distance),
            ("tuning.walk_speed", self.tuning.walk_speed),
            ("camera.sensitivity", self.camera.sensitivity),
        ];
        if let Some((what, value)) = positive.into_iter().find(|(_, value)| *value <= 0.0) {
            return Err(ConfigError::invalid(
                what,
                format!("must be positive, got {value}"),
            ));
        }
        if self.enemy.catch_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "enemy.catch_threshold",
                "must not be negative",
            ));
        }
        for archetype in self.archetypes() {
            archetype.validate()?;
        }
        if self.switch.bright_textures.len() != self.switch.cap.textures.len() {
            return Err(ConfigError::invalid(
                "switch.bright_textures",
                "must bind as many textures as the cap",
            ));
        }
        if let Some(pickup) = self
            .pickups
            .iter()
            .find(|pickup| pickup.kind == PickupKind::Lantern)
        {
            return Err(ConfigError::invalid(
                &pickup.body.name,
                "only the lantern section may hold a lantern",
            ));
        }
        Ok(())
    }
}

fn texture_pair(diffuse: u32) -> TextureSet {
    vec![TextureHandle(diffuse), TextureHandle(diffuse + 1)]
}

const WOOD: u32 = 0;
const MARBLE: u32 = 2;
const RED_DARK: u32 = 4;
const RED_BRIGHT: u32 = 6;
const LOGO: u32 = 8;
const LANTERN: u32 = 10;
const GOAL: u32 = 12;
const ENEMY: u32 = 14;

fn walls() -> Archetype {
    let span = WORLD_HALF_EXTENT * 2.0;
    let lift = WALL_HEIGHT / 2.0;
    Archetype::new(
        "walls",
        Vec3::ZERO,
        vec![
            SubModel::new(
                Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
                Vec3::new(0.0, lift, -WORLD_HALF_EXTENT),
            ),
            SubModel::new(
                Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
                Vec3::new(0.0, lift, WORLD_HALF_EXTENT),
            ),
            SubModel::new(
                Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
                Vec3::new(WORLD_HALF_EXTENT, lift, 0.0),
            ),
            SubModel::new(
                Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
                Vec3::new(-WORLD_HALF_EXTENT, lift, 0.0),
            ),
        ],
    )
    .textured(texture_pair(WOOD))
}

fn table() -> Archetype {
    let leg = Vec3::new(0.1, 0.5, 0.1);
    Archetype::new(
        "table",
        Vec3::ZERO,
        vec![
            SubModel::new(Vec3::new(1.0, 0.1, 1.0), Vec3::new(0.0, 0.55, 0.0)),
            SubModel::new(leg, Vec3::new(-0.45, 0.25, 0.45)),
            SubModel::new(leg, Vec3::new(0.45, 0.25, 0.45)),
            SubModel::new(leg, Vec3::new(-0.45, 0.25, -0.45)),
            SubModel::new(leg, Vec3::new(0.45, 0.25, -0.45)),
        ],
    )
    .textured(texture_pair(WOOD))
}

fn goal(name: &str, position: Vec3) -> PickupConfig {
    PickupConfig {
        kind: PickupKind::Goal,
        body: Archetype::new(
            name,
            position,
            vec![SubModel::new(Vec3::splat(0.2), Vec3::ZERO)],
        )
        .textured(texture_pair(GOAL))
        .animated(Animation::hovering(BOB_AMPLITUDE)),
    }
}

fn enemy() -> EnemyConfig {
    let arm = Vec3::new(0.1, 0.6, 0.1);
    let leg = Vec3::new(0.12, 0.9, 0.12);
    let swing = |sub_model, increment| Swing {
        sub_model,
        oscillator: Oscillator::new(0.0, increment),
    };
    let mut body = Archetype::new(
        "enemy",
        Vec3::new(0.0, 0.9, -25.0),
        vec![
            SubModel::new(Vec3::new(0.4, 0.6, 0.2), Vec3::new(0.0, 0.3, 0.0)),
            SubModel::new(Vec3::splat(0.25), Vec3::new(0.0, 0.75, 0.0)),
            SubModel::new(arm, Vec3::new(-0.25, 0.3, 0.0)),
            SubModel::new(arm, Vec3::new(0.25, 0.3, 0.0)),
            SubModel::new(leg, Vec3::new(-0.1, -0.45, 0.0)),
            SubModel::new(leg, Vec3::new(0.1, -0.45, 0.0)),
        ],
    )
    .textured(texture_pair(ENEMY));
    body.swings = vec![
        swing(2, LIMB_SWING_STEP),
        swing(3, -LIMB_SWING_STEP),
        swing(4, -LIMB_SWING_STEP),
        swing(5, LIMB_SWING_STEP),
    ];
    EnemyConfig {
        body,
        speed: ENEMY_SPEED,
        catch_threshold: CATCH_THRESHOLD,
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        let switch_point = Vec3::new(0.0, 0.56, 0.25);
        let mut logo = Archetype::new(
            "logo",
            Vec3::new(0.0, 0.9, -0.35),
            vec![SubModel::new(Vec3::new(0.2, 0.2, 0.001), Vec3::ZERO)],
        )
        .textured(texture_pair(LOGO))
        .animated(Animation::hovering(BOB_AMPLITUDE));
        logo.animation.enabled = false;

        Self {
            tuning: Tuning::default(),
            camera: CameraConfig::default(),
            scenery: vec![walls(), table()],
            lamp: Archetype::new(
                "lamp",
                Vec3::new(0.0, 1.0, 0.1),
                vec![SubModel::new(Vec3::splat(0.01), Vec3::ZERO)],
            ),
            switch: SwitchConfig {
                point: switch_point,
                case: Archetype::new(
                    "switch case",
                    switch_point,
                    vec![SubModel::new(
                        Vec3::new(0.2, 0.12, 0.2),
                        Vec3::new(0.0, 0.06, 0.0),
                    )],
                )
                .textured(texture_pair(MARBLE)),
                cap: Archetype::new(
                    "switch cap",
                    switch_point,
                    vec![SubModel::new(Vec3::splat(0.12), Vec3::new(0.0, 0.11, 0.0))],
                )
                .textured(texture_pair(RED_DARK)),
                bright_textures: texture_pair(RED_BRIGHT),
            },
            logo,
            lantern: LanternConfig {
                pickup: Archetype::new(
                    "lantern",
                    Vec3::new(0.35, 0.7, -0.3),
                    vec![SubModel::new(Vec3::new(0.1, 0.2, 0.1), Vec3::ZERO)],
                )
                .textured(texture_pair(LANTERN))
                .animated(Animation::hovering(BOB_AMPLITUDE / 2.0)),
                carried: Archetype::new(
                    "carried lantern",
                    Vec3::new(0.25, -0.25, -0.5),
                    vec![SubModel::new(Vec3::new(0.05, 0.1, 0.05), Vec3::ZERO)],
                )
                .textured(texture_pair(LANTERN)),
            },
            pickups: vec![
                goal("goal north-west", Vec3::new(-8.0, 0.5, -6.0)),
                goal("goal east", Vec3::new(12.0, 0.5, 4.0)),
                goal("goal far north", Vec3::new(4.0, 0.5, -20.0)),
            ],
            enemy: enemy(),
        }
    }
}
