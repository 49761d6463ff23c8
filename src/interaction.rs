//! Proximity-gated interactions: collecting pickups and flipping the switch.
use glam::Vec3;

use crate::entity::Entity;
use crate::input::EdgeTrigger;
use crate::registry::{EntityId, Registry};

/// Returns `true` when `a` and `b` are at most `distance` apart.
///
/// The bound is inclusive.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use escape::interaction::is_close_to;
/// assert!(is_close_to(Vec3::ZERO, Vec3::new(1.6, 0.0, 0.0), 1.6));
/// assert!(!is_close_to(Vec3::ZERO, Vec3::new(1.61, 0.0, 0.0), 1.6));
/// ```
#[must_use]
pub fn is_close_to(a: Vec3, b: Vec3, distance: f32) -> bool {
    a.distance(b) <= distance
}

/// Scans pickups in list order and keeps the last one within `reach`.
///
/// This is deliberately not the nearest pickup: when several are in range
/// the one inserted last wins.
#[must_use]
pub fn last_in_reach(registry: &Registry, from: Vec3, reach: f32) -> Option<EntityId> {
    registry
        .pickups()
        .filter(|(_, pickup)| is_close_to(from, pickup.position(), reach))
        .map(|(id, _)| id)
        .last()
}

/// Pickup selection and the edge-triggered interact key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    key: EdgeTrigger,
    closest: Option<EntityId>,
}

impl Interaction {
    /// Pickup selected by the most recent scan.
    #[must_use]
    pub const fn closest(&self) -> Option<EntityId> {
        self.closest
    }

    /// Refreshes the selected pickup and, on a fresh press of the interact
    /// key, removes it from the registry and hands it back.
    ///
    /// The key state is recorded every tick so a press made while nothing is
    /// in range is not replayed later.
    pub fn update(
        &mut self,
        registry: &mut Registry,
        from: Vec3,
        reach: f32,
        interact_down: bool,
    ) -> Option<(EntityId, Entity)> {
        self.closest = last_in_reach(registry, from, reach);
        if !self.key.pressed(interact_down) {
            return None;
        }
        let id = self.closest.take()?;
        let pickup = registry.remove_pickup(id)?;
        log::debug!("removed pickup {id} at {:?}", pickup.position());
        Some((id, pickup))
    }

    /// Forgets the selection while keeping the key state.
    pub fn clear(&mut self) {
        self.closest = None;
    }
}

/// Wall switch with a repeat cooldown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Switch {
    /// Point the player must be near to operate the switch.
    pub position: Vec3,
    on: bool,
    cooldown: u32,
    cooldown_ticks: u32,
}

impl Switch {
    /// Creates a switch that starts off and ready.
    #[must_use]
    pub const fn new(position: Vec3, cooldown_ticks: u32) -> Self {
        Self {
            position,
            on: false,
            cooldown: 0,
            cooldown_ticks,
        }
    }

    /// Whether the switch is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Ticks left before the switch responds again.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Counts the cooldown down by one tick.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Flips the switch if the key is held, `from` is within `reach` and
    /// the cooldown has run out. Returns `true` when it flipped.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use escape::interaction::Switch;
    /// let mut switch = Switch::new(Vec3::ZERO, 2);
    /// assert!(switch.try_toggle(true, Vec3::X, 1.6));
    /// assert!(!switch.try_toggle(true, Vec3::X, 1.6));
    /// switch.tick();
    /// switch.tick();
    /// assert!(switch.try_toggle(true, Vec3::X, 1.6));
    /// assert!(!switch.is_on());
    /// ```
    pub fn try_toggle(&mut self, held: bool, from: Vec3, reach: f32) -> bool {
        if !held || self.cooldown > 0 || !is_close_to(from, self.position, reach) {
            return false;
        }
        self.on = !self.on;
        self.cooldown = self.cooldown_ticks;
        true
    }
}
