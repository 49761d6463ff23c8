//! Gameplay and world constants shared across the simulation.
//!
//! These are the built-in defaults. Values that a level may override are
//! mirrored in [`crate::config::Tuning`].

/// Half the width and length of the square play area, in world units.
pub const WORLD_HALF_EXTENT: f32 = 35.0;
/// Height of the boundary walls.
pub const WALL_HEIGHT: f32 = 10.0;
/// Thickness of the boundary walls.
pub const WALL_THICKNESS: f32 = 0.01;

/// Maximum camera distance at which a pickup or switch can be used.
pub const INTERACT_DISTANCE: f32 = 1.6;

/// Pitch oscillators reverse once their offset magnitude exceeds this bound.
pub const PITCH_SWING_LIMIT: f32 = 25.0;
/// Hard limit applied to the camera's look pitch, in degrees.
pub const LOOK_PITCH_LIMIT: f32 = 89.0;

/// Degrees added to spin and bob phases every tick.
pub const ANIMATION_STEP_DEGREES: f32 = 6.0;
/// Peak vertical displacement of a bobbing entity.
pub const BOB_AMPLITUDE: f32 = 0.1;

/// Look yaw a fresh camera starts with, facing down negative Z.
pub const DEFAULT_LOOK_YAW: f32 = -90.0;
/// Look pitch a fresh camera starts with.
pub const DEFAULT_LOOK_PITCH: f32 = 0.0;
/// Cursor-to-degree conversion factor.
pub const DEFAULT_SENSITIVITY: f32 = 0.05;

/// Walking speed in world units per second.
pub const WALK_SPEED: f32 = 2.5;
/// Factor applied to the walking speed while sprinting.
pub const SPRINT_MULTIPLIER: f32 = 2.0;

/// Ticks the switch stays locked after being flipped.
pub const SWITCH_COOLDOWN_TICKS: u32 = 20;
/// How far the switch cap sinks while the switch is on.
pub const SWITCH_PRESS_DEPTH: f32 = 0.02;

/// Per-tick step of the pursuing enemy.
pub const ENEMY_SPEED: f32 = 0.05;
/// Distance at which the enemy catches its target.
pub const CATCH_THRESHOLD: f32 = 1.0;
/// Per-tick swing increment applied to the enemy's limbs, in degrees.
pub const LIMB_SWING_STEP: f32 = 2.5;

/// Maximum texture handles bound for a single draw (diffuse and specular).
pub const MAX_TEXTURES: usize = 2;
