//! Tick-driven animation: spin, bob and per-sub-model pitch swing.
//!
//! Everything here advances by a fixed step per tick, so animation state is
//! deterministic for a given tick count and independent per entity. The
//! transform engine only reads this state; it never advances it.
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::angles::wrap_degrees;
use crate::constants::{ANIMATION_STEP_DEGREES, PITCH_SWING_LIMIT};
use crate::entity::Entity;

/// Additive pitch swing for a single sub-model, reflected at ±25°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Current pitch offset in degrees.
    pub offset: f32,
    /// Change applied to `offset` every tick.
    pub increment: f32,
}

impl Oscillator {
    /// Creates an oscillator starting at `offset`.
    #[must_use]
    pub const fn new(offset: f32, increment: f32) -> Self {
        Self { offset, increment }
    }

    /// Advances one tick, reversing direction once past the swing limit.
    ///
    /// # Examples
    /// ```
    /// use escape::animation::Oscillator;
    /// let mut swing = Oscillator::new(20.0, 10.0);
    /// swing.advance();
    /// assert_eq!((swing.offset, swing.increment), (30.0, -10.0));
    /// swing.advance();
    /// assert_eq!(swing.offset, 20.0);
    /// ```
    pub fn advance(&mut self) {
        self.offset += self.increment;
        if self.offset.abs() > PITCH_SWING_LIMIT {
            self.increment = -self.increment;
        }
    }
}

/// Vertical sine bobbing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bob {
    /// Peak displacement in world units.
    pub amplitude: f32,
    /// Phase in degrees, within `[0, 360)`.
    #[serde(default)]
    pub phase: f32,
}

impl Bob {
    /// Bob starting at phase zero.
    #[must_use]
    pub const fn new(amplitude: f32) -> Self {
        Self {
            amplitude,
            phase: 0.0,
        }
    }

    /// Current vertical displacement.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.amplitude * self.phase.to_radians().sin()
    }
}

/// Spin and bob settings carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// When `false` nothing advances; the last pose is held.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Rotate about world up by one step per tick.
    #[serde(default)]
    pub spin: bool,
    /// Optional vertical bobbing.
    #[serde(default)]
    pub bob: Option<Bob>,
}

const fn enabled_by_default() -> bool {
    true
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            enabled: true,
            spin: false,
            bob: None,
        }
    }
}

impl Animation {
    /// Spinning, bobbing animation used by pickups.
    #[must_use]
    pub const fn hovering(amplitude: f32) -> Self {
        Self {
            enabled: true,
            spin: true,
            bob: Some(Bob::new(amplitude)),
        }
    }

    /// Translation contributed by bobbing; zero without a bob.
    #[must_use]
    pub fn bob_offset(&self) -> Vec3 {
        self.bob.map_or(Vec3::ZERO, |bob| Vec3::Y * bob.height())
    }
}

/// Advances an entity's animation state by one tick.
pub fn advance(entity: &mut Entity) {
    if !entity.animation.enabled {
        return;
    }
    if entity.animation.spin {
        entity.change_yaw_by(ANIMATION_STEP_DEGREES);
    }
    if let Some(bob) = entity.animation.bob.as_mut() {
        bob.phase = wrap_degrees(bob.phase + ANIMATION_STEP_DEGREES);
    }
    for (_, oscillator) in entity.oscillators_mut() {
        oscillator.advance();
    }
}
