//! Entity registry with generation-tagged handles.
//!
//! The registry is the sole owner of every entity. It keeps two ordered
//! collections: general entities, which are only drawn, and pickups, which
//! are drawn and also tested for interaction. Other parts of the world refer
//! to entities through [`EntityId`] handles. A handle carries the registry
//! generation it was issued by, so handles from a torn-down world simply fail
//! to resolve after a restart.
use std::fmt;

use crate::entity::Entity;

/// Handle to an entity owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    generation: u32,
    slot: usize,
}

impl EntityId {
    /// Registry generation that issued this handle.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Storage slot within that generation.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}g{}", self.slot, self.generation)
    }
}

/// Owner of all live entities for one world generation.
#[derive(Debug, Default)]
pub struct Registry {
    generation: u32,
    slots: Vec<Option<Entity>>,
    entities: Vec<EntityId>,
    pickups: Vec<EntityId>,
}

impl Registry {
    /// Creates an empty registry issuing handles for `generation`.
    #[must_use]
    pub const fn new(generation: u32) -> Self {
        Self {
            generation,
            slots: Vec::new(),
            entities: Vec::new(),
            pickups: Vec::new(),
        }
    }

    /// Generation stamped on every handle this registry issues.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId {
            generation: self.generation,
            slot: self.slots.len(),
        };
        self.slots.push(Some(entity));
        id
    }

    /// Adds a general entity, drawn every tick.
    pub fn insert_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.push(entity);
        self.entities.push(id);
        id
    }

    /// Adds a pickup, drawn every tick and tested for interaction.
    pub fn insert_pickup(&mut self, entity: Entity) -> EntityId {
        let id = self.push(entity);
        self.pickups.push(id);
        id
    }

    /// Returns `true` when `id` resolves to a live slot of this generation.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a handle.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if id.generation != self.generation {
            return None;
        }
        self.slots.get(id.slot)?.as_ref()
    }

    /// Resolves a handle mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.generation != self.generation {
            return None;
        }
        self.slots.get_mut(id.slot)?.as_mut()
    }

    /// Resolves two distinct handles mutably at once.
    ///
    /// Returns `None` if either handle is stale or both name the same slot.
    pub fn get_pair_mut(
        &mut self,
        first: EntityId,
        second: EntityId,
    ) -> Option<(&mut Entity, &mut Entity)> {
        if first.slot == second.slot || !self.contains(first) || !self.contains(second) {
            return None;
        }
        let swapped = first.slot > second.slot;
        let (low, high) = if swapped {
            (second.slot, first.slot)
        } else {
            (first.slot, second.slot)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let low_entity = head.get_mut(low)?.as_mut()?;
        let high_entity = tail.first_mut()?.as_mut()?;
        Some(if swapped {
            (high_entity, low_entity)
        } else {
            (low_entity, high_entity)
        })
    }

    /// Removes a pickup and hands back ownership of it.
    ///
    /// Returns `None` if `id` is not a live pickup of this generation.
    pub fn remove_pickup(&mut self, id: EntityId) -> Option<Entity> {
        if id.generation != self.generation {
            return None;
        }
        let index = self.pickups.iter().position(|pickup| *pickup == id)?;
        self.pickups.remove(index);
        self.slots.get_mut(id.slot)?.take()
    }

    /// Handles of the general entities, in insertion order.
    #[must_use]
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entities
    }

    /// Handles of the pickups still in the world, in insertion order.
    #[must_use]
    pub fn pickup_ids(&self) -> &[EntityId] {
        &self.pickups
    }

    /// Pickups with their handles, in insertion order.
    pub fn pickups(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.pickups
            .iter()
            .filter_map(|id| self.get(*id).map(|entity| (*id, entity)))
    }

    /// Every live entity in draw order: general entities, then pickups.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities
            .iter()
            .chain(self.pickups.iter())
            .filter_map(|id| self.get(*id).map(|entity| (*id, entity)))
    }

    /// Every live entity, mutably, in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Number of general entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of pickups still in the world.
    #[must_use]
    pub fn pickup_count(&self) -> usize {
        self.pickups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, PickupKind, PickupState};
    use glam::Vec3;

    fn entity_at(x: f32) -> Entity {
        Entity::new(Vec3::new(x, 0.0, 0.0), Vec3::NEG_Z, Vec3::Y)
    }

    fn pickup_at(x: f32) -> Entity {
        entity_at(x).with_kind(EntityKind::Pickup(PickupState {
            kind: PickupKind::Goal,
        }))
    }

    #[test]
    fn keeps_collections_apart() {
        let mut registry = Registry::new(0);
        let first = registry.insert_entity(entity_at(0.0));
        let pickup = registry.insert_pickup(pickup_at(1.0));
        let second = registry.insert_entity(entity_at(2.0));
        assert_eq!(registry.entity_count(), 2);
        assert_eq!(registry.pickup_count(), 1);
        assert_eq!(registry.entity_ids(), &[first, second]);
        assert_eq!(registry.pickup_ids(), &[pickup]);
        // Both collections share one slot arena.
        assert_eq!([first.slot(), pickup.slot(), second.slot()], [0, 1, 2]);

        let order: Vec<f32> = registry.iter().map(|(_, e)| e.position().x).collect();
        assert_eq!(order, vec![0.0, 2.0, 1.0]);
    }

    #[test]
    fn removed_pickup_handle_goes_stale() {
        let mut registry = Registry::new(0);
        let first = registry.insert_pickup(pickup_at(1.0));
        let second = registry.insert_pickup(pickup_at(2.0));

        let removed = registry.remove_pickup(first);
        assert_eq!(removed.map(|e| e.position().x), Some(1.0));
        assert!(registry.get(first).is_none());
        assert!(registry.remove_pickup(first).is_none());
        assert_eq!(registry.pickup_ids(), &[second]);
    }

    #[test]
    fn general_entities_cannot_be_removed_as_pickups() {
        let mut registry = Registry::new(0);
        let wall = registry.insert_entity(entity_at(0.0));
        assert!(registry.remove_pickup(wall).is_none());
        assert!(registry.contains(wall));
    }

    #[test]
    fn handles_from_other_generations_do_not_resolve() {
        let mut old = Registry::new(0);
        let id = old.insert_entity(entity_at(0.0));
        let mut fresh = Registry::new(1);
        fresh.insert_entity(entity_at(5.0));
        assert!(fresh.get(id).is_none());
        assert!(fresh.get_mut(id).is_none());
    }

    #[test]
    fn pair_access_preserves_argument_order() {
        let mut registry = Registry::new(0);
        let a = registry.insert_entity(entity_at(1.0));
        let b = registry.insert_entity(entity_at(2.0));

        let Some((second, first)) = registry.get_pair_mut(b, a) else {
            panic!("both handles should resolve");
        };
        assert_eq!(second.position().x, 2.0);
        assert_eq!(first.position().x, 1.0);
        assert!(registry.get_pair_mut(a, a).is_none());
    }
}
