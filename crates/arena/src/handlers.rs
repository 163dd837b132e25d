//! Collision reaction dispatch table
//!
//! One closed table keyed on `(initiator kind, candidate kind)`. The
//! registry hands every candidate pair to [`react`]; rows that do not appear
//! in the table fall through to no reaction. Handlers mutate the two
//! entities directly and defer membership changes through [`SweepEffects`]
//! so the active set stays frozen for the duration of the sweep.

use drive_engine::physics::response;
use drive_engine::prelude::*;
use log::debug;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Entity, EntityId};

/// Deferred outcomes of one sweep
///
/// Drained by the registry after the last pair is tested: removals land in
/// the pending set, slot clears land on the vehicle's projectile reserve.
#[derive(Debug, Default)]
pub struct SweepEffects {
    /// Entities whose removal was requested this sweep
    pub removals: Vec<EntityId>,
    /// Vehicle projectile slots freed by destroyed blades
    pub slot_clears: Vec<usize>,
}

/// Evaluate one candidate pair and apply the initiator's reaction
///
/// `a` is the initiator, `b` the candidate it was handed. The bounds test
/// runs first; the reaction row is then selected by kind. Vehicles never
/// appear as `a` (the registry skips them on the initiating side).
pub fn react<R: Rng>(
    a: &mut Entity,
    b: &mut Entity,
    tuning: &Tuning,
    cache: &mut BoundsCache,
    effects: &mut SweepEffects,
    rng: &mut R,
) {
    if !a.world_bounds(cache).intersects(&b.world_bounds(cache)) {
        return;
    }

    match (a, b) {
        // Walls stop the vehicle: push it back out along the wall's facing
        // normal and bleed half its speed
        (Entity::Wall(wall), Entity::Vehicle(vehicle)) => {
            response::resolve_penetration(
                &mut vehicle.transform,
                &wall.transform,
                tuning.push_strength,
            );
            vehicle.penalize_speed(tuning.speed_penalty);
            debug!("vehicle hit wall {:?}, speed now {}", wall.id, vehicle.speed);
        }

        // Projectiles knock cones out of the world
        (Entity::Cone(cone), Entity::Blade(_)) => {
            cone.in_world = false;
            effects.removals.push(cone.id);
        }
        (Entity::Cone(cone), Entity::Bomb(bomb)) if bomb.launched => {
            cone.in_world = false;
            effects.removals.push(cone.id);
        }

        // Cones have no facing, so the vehicle is pushed center-to-center
        (Entity::Cone(cone), Entity::Vehicle(vehicle)) => {
            response::resolve_penetration_by_push(
                &mut vehicle.transform,
                &cone.transform,
                tuning.push_strength,
            );
            vehicle.penalize_speed(tuning.speed_penalty);
        }

        // A blade that strikes a cone is spent: free its reserve slot and
        // remove it alongside the cone
        (Entity::Blade(blade), Entity::Cone(_)) => {
            if let Some(slot) = blade.slot.take() {
                effects.slot_clears.push(slot);
            }
            effects.removals.push(blade.id);
        }

        // Launched blades ricochet off walls until their bounce budget runs out
        (Entity::Blade(blade), Entity::Wall(wall)) if blade.launched => {
            response::resolve_penetration(
                &mut blade.transform,
                &wall.transform,
                tuning.push_strength,
            );
            let normal = response::surface_normal(&wall.transform);
            let bounces = blade.bounce(normal, tuning.bounce_retention);
            if bounces > tuning.max_bounces {
                effects.removals.push(blade.id);
            }
        }

        // Launched bombs detonate on any solid impact; the exploded gate
        // keeps an in-progress explosion from re-triggering
        (Entity::Bomb(bomb), Entity::Cone(_) | Entity::Wall(_))
            if bomb.launched && !bomb.exploded() =>
        {
            bomb.explode();
        }
        (Entity::Ground(_), Entity::Bomb(bomb)) if bomb.launched && !bomb.exploded() => {
            bomb.explode();
        }

        // Pickups grant a random power-up and disappear
        (Entity::Pickup(pickup), Entity::Vehicle(vehicle)) if !pickup.collected => {
            pickup.collected = true;
            vehicle.grant_power_up(rng.gen(), tuning.power_up_duration);
            effects.removals.push(pickup.id);
        }

        // Every other pairing has no reaction
        _ => {}
    }
}
