//! Entity data model shared by every "thing" in the world.
//!
//! An [`Entity`] carries placement, orientation, a fixed table of sub-models
//! and its texture set. Variant-specific state lives in [`EntityKind`], so
//! the transform, animation and AI components dispatch with a `match`
//! rather than through trait objects.
use glam::Vec3;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::angles::wrap_degrees;
use crate::animation::{Animation, Oscillator};
use crate::camera::CameraState;
use crate::enemy::EnemyState;
use crate::vector_math::right_of;

/// Opaque reference to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(pub u32);

/// Ordered texture handles bound for every draw of an entity.
pub type TextureSet = Vec<TextureHandle>;

/// One drawable unit inside an entity's composite shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubModel {
    /// Local scale applied last in the transform chain.
    pub scale: Vec3,
    /// Local offset from the entity position.
    pub offset: Vec3,
}

impl SubModel {
    /// Creates a sub-model from its local scale and offset.
    #[must_use]
    pub const fn new(scale: Vec3, offset: Vec3) -> Self {
        Self { scale, offset }
    }
}

/// What a pickup does once collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// The lantern; collecting it lights the player's way.
    Lantern,
    /// An item the player must gather to escape.
    Goal,
    /// Anything else worth picking up.
    Trinket,
}

/// Variant state of a pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupState {
    /// Role of the pickup when collected.
    pub kind: PickupKind,
}

/// Variant payload selecting the behaviour of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// Static scenery with no behaviour beyond its animation.
    Plain,
    /// The first-person camera.
    Camera(CameraState),
    /// A collectible item.
    Pickup(PickupState),
    /// The pursuing enemy.
    Enemy(EnemyState),
}

/// A positioned, oriented, renderable thing in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    position: Vec3,
    anchor: Option<Vec3>,
    /// Facing direction.
    pub front: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Right direction; only refreshed by [`Entity::set_basis`].
    pub right: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,
    /// Movement rate; units depend on the owner (per tick or per second).
    pub speed: f32,
    alive: bool,
    sub_models: Vec<SubModel>,
    textures: TextureSet,
    oscillators: HashMap<usize, Oscillator>,
    /// Spin and bob settings.
    pub animation: Animation,
    /// Variant-specific state.
    pub kind: EntityKind,
}

impl Entity {
    /// Creates a plain entity at `position` facing `front`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use escape::Entity;
    /// let e = Entity::new(Vec3::ONE, Vec3::NEG_Z, Vec3::Y);
    /// assert_eq!(e.anchor(), e.position());
    /// assert!(e.is_alive());
    /// ```
    #[must_use]
    pub fn new(position: Vec3, front: Vec3, up: Vec3) -> Self {
        Self {
            position,
            anchor: None,
            front,
            up,
            right: right_of(front, up),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            speed: 0.0,
            alive: true,
            sub_models: Vec::new(),
            textures: Vec::new(),
            oscillators: HashMap::new(),
            animation: Animation::default(),
            kind: EntityKind::Plain,
        }
    }

    /// Sets the sub-model table. The table length is fixed from here on.
    #[must_use]
    pub fn with_model(mut self, sub_models: Vec<SubModel>) -> Self {
        self.sub_models = sub_models;
        self
    }

    /// Sets the texture set. Later replacements must keep the same length.
    #[must_use]
    pub fn with_textures(mut self, textures: TextureSet) -> Self {
        self.textures = textures;
        self
    }

    /// Attaches a pitch oscillator to the sub-model at `index`.
    #[must_use]
    pub fn with_oscillator(mut self, index: usize, oscillator: Oscillator) -> Self {
        self.oscillators.insert(index, oscillator);
        self
    }

    /// Replaces the animation settings.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Replaces the variant payload.
    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the movement rate.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Pins the rotation pivot to `anchor` instead of the position.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// World-space origin of the entity.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation pivot. Equals [`Entity::position`] unless set explicitly.
    #[must_use]
    pub fn anchor(&self) -> Vec3 {
        self.anchor.unwrap_or(self.position)
    }

    /// Returns `true` if the pivot was set independently of the position.
    #[must_use]
    pub const fn has_explicit_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// Moves the entity. An explicit anchor stays where it is.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Sets an explicit rotation pivot.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = Some(anchor);
    }

    /// Translates the position and, if set, the explicit anchor together.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor += offset;
        }
    }

    /// Sets the facing direction and recomputes `right` from it.
    pub fn set_basis(&mut self, front: Vec3) {
        self.front = front;
        self.right = right_of(front, self.up);
    }

    /// Yaw in degrees, always within `[0, 360)`.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees. Stored signed and unwrapped.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Roll in degrees, always within `[0, 360)`.
    #[must_use]
    pub const fn roll(&self) -> f32 {
        self.roll
    }

    /// Sets the yaw, wrapping into `[0, 360)`.
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = wrap_degrees(degrees);
    }

    /// Sets the pitch as given.
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees;
    }

    /// Sets the roll, wrapping into `[0, 360)`.
    pub fn set_roll(&mut self, degrees: f32) {
        self.roll = wrap_degrees(degrees);
    }

    /// Adds `delta` degrees of yaw.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use escape::Entity;
    /// let mut e = Entity::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
    /// e.change_yaw_by(370.0);
    /// assert!((e.yaw() - 10.0).abs() < 1e-4);
    /// ```
    pub fn change_yaw_by(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Adds `delta` degrees of pitch.
    pub fn change_pitch_by(&mut self, delta: f32) {
        self.pitch += delta;
    }

    /// Adds `delta` degrees of roll.
    pub fn change_roll_by(&mut self, delta: f32) {
        self.set_roll(self.roll + delta);
    }

    /// Whether the entity still takes part in target-dependent logic.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the entity as dead. Idempotent.
    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Sub-model table in draw order.
    #[must_use]
    pub fn sub_models(&self) -> &[SubModel] {
        &self.sub_models
    }

    /// Texture handles bound for every draw of this entity.
    #[must_use]
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    /// Swaps in a new texture set of the same length.
    ///
    /// Returns `false`, leaving the current set in place, when the lengths
    /// differ.
    pub fn replace_textures(&mut self, textures: TextureSet) -> bool {
        if textures.len() != self.textures.len() {
            log::warn!(
                "ignoring texture set of length {} for entity with {} textures",
                textures.len(),
                self.textures.len()
            );
            return false;
        }
        self.textures = textures;
        true
    }

    /// Pitch oscillator for the sub-model at `index`, if any.
    #[must_use]
    pub fn oscillator(&self, index: usize) -> Option<&Oscillator> {
        self.oscillators.get(&index)
    }

    /// Mutable access to every pitch oscillator.
    pub fn oscillators_mut(&mut self) -> impl Iterator<Item = (&usize, &mut Oscillator)> {
        self.oscillators.iter_mut()
    }

    /// Camera state when this entity is the camera.
    #[must_use]
    pub const fn as_camera(&self) -> Option<&CameraState> {
        match &self.kind {
            EntityKind::Camera(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable camera state when this entity is the camera.
    pub fn as_camera_mut(&mut self) -> Option<&mut CameraState> {
        match &mut self.kind {
            EntityKind::Camera(state) => Some(state),
            _ => None,
        }
    }

    /// Enemy state when this entity is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyState> {
        match &self.kind {
            EntityKind::Enemy(state) => Some(state),
            _ => None,
        }
    }

    /// Pickup role when this entity is a pickup.
    #[must_use]
    pub const fn pickup_kind(&self) -> Option<PickupKind> {
        match &self.kind {
            EntityKind::Pickup(state) => Some(state.kind),
            _ => None,
        }
    }
}
