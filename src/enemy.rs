//! Pursuing enemy: straight-line seek until close enough to catch.
//!
//! The enemy holds only a weak handle to its target. There is no stored
//! "caught" state: once the target is dead the distance guard fails on every
//! later tick, so the catch latches through the target's `alive` flag.
use crate::entity::{Entity, EntityKind};
use crate::registry::{EntityId, Registry};
use crate::vector_math::{heading_degrees, safe_normalize};

/// Enemy-specific state carried in [`EntityKind::Enemy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyState {
    /// Entity being chased. Not owned.
    pub target: EntityId,
    /// Distance at or below which the target is caught.
    pub catch_threshold: f32,
}

/// Outcome of one pursuit tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pursuit {
    /// The enemy stepped towards its target.
    Chasing {
        /// Distance to the target before the step.
        distance: f32,
    },
    /// The target is caught. `fresh` is `true` only on the tick that killed it.
    Caught {
        /// Whether this tick performed the kill.
        fresh: bool,
    },
    /// The enemy or its target no longer resolves.
    Idle,
}

/// Turns `body` into an enemy chasing `target`.
#[must_use]
pub fn new_enemy(body: Entity, target: EntityId, speed: f32, catch_threshold: f32) -> Entity {
    log::debug!(
        "Creating enemy at {:?} chasing {target} with speed {speed}",
        body.position()
    );
    body.with_speed(speed)
        .with_kind(EntityKind::Enemy(EnemyState {
            target,
            catch_threshold,
        }))
}

/// Advances the enemy behind `enemy` by one tick.
///
/// While the target is alive and farther than the catch threshold the enemy
/// turns to face it and steps `speed` units along the normalised direction.
/// Otherwise the target is killed.
pub fn pursue(registry: &mut Registry, enemy: EntityId) -> Pursuit {
    let Some(state) = registry.get(enemy).and_then(Entity::as_enemy).copied() else {
        return Pursuit::Idle;
    };
    let Some((seeker, target)) = registry.get_pair_mut(enemy, state.target) else {
        log::trace!("enemy {enemy} has no resolvable target");
        return Pursuit::Idle;
    };

    let to_target = target.position() - seeker.position();
    let distance = to_target.length();
    if distance > state.catch_threshold && target.is_alive() {
        let direction = safe_normalize(to_target);
        seeker.set_yaw(heading_degrees(direction));
        seeker.set_basis(direction);
        seeker.translate(direction * seeker.speed);
        log::trace!(
            "enemy {enemy} at {:?}, {distance:.2} from target",
            seeker.position()
        );
        Pursuit::Chasing { distance }
    } else {
        let fresh = target.is_alive();
        target.die();
        if fresh {
            log::debug!("enemy {enemy} caught {} at distance {distance:.2}", state.target);
        }
        Pursuit::Caught { fresh }
    }
}
