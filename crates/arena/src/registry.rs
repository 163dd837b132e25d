//! Collision registry
//!
//! Holds the live set of collidable entities and drives the per-frame
//! all-pairs sweep. Removals requested during a sweep are deferred to the
//! sweep boundary so the active list is never mutated while it is being
//! iterated.
//!
//! The sweep is intentionally brute-force O(n^2): no broad phase, no
//! spatial partitioning. Acceptable for object counts in the tens.

use std::collections::HashSet;

use drive_engine::prelude::*;
use log::debug;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Entity, EntityId, EntityKind};
use crate::handlers::{self, SweepEffects};

/// The live set of collidable entities plus the deferred-removal queue
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    /// Live entities in registration order (order affects only sweep order)
    active: Vec<Entity>,
    /// Entities slated for removal at the next sweep boundary
    pending_removal: HashSet<EntityId>,
}

impl CollisionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, appending it to the active set
    ///
    /// Returns the entity's id for later removal requests. No duplicate
    /// check: registering the same entity twice is a caller error.
    pub fn register(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        debug!("registered {:?} as {:?}", entity.kind(), id);
        self.active.push(entity);
        id
    }

    /// Request removal at the next sweep boundary; idempotent
    pub fn request_removal(&mut self, id: EntityId) {
        self.pending_removal.insert(id);
    }

    /// Remove an entity immediately; safe only outside a sweep
    pub fn remove_now(&mut self, id: EntityId) {
        self.active.retain(|e| e.id() != id);
        self.pending_removal.remove(&id);
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the registry holds no entities
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether an entity is currently live
    pub fn contains(&self, id: EntityId) -> bool {
        self.active.iter().any(|e| e.id() == id)
    }

    /// Look up a live entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.active.iter().find(|e| e.id() == id)
    }

    /// Iterate the live entities in registration order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.active.iter()
    }

    /// Iterate the live entities mutably (per-frame updates)
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.active.iter_mut()
    }

    /// The vehicle, if one is registered
    pub fn vehicle(&self) -> Option<&crate::entities::Vehicle> {
        self.active.iter().find_map(|e| match e {
            Entity::Vehicle(v) => Some(v),
            _ => None,
        })
    }

    /// Mutable access to the vehicle, if one is registered
    pub fn vehicle_mut(&mut self) -> Option<&mut crate::entities::Vehicle> {
        self.active.iter_mut().find_map(|e| match e {
            Entity::Vehicle(v) => Some(v),
            _ => None,
        })
    }

    /// Run one full all-pairs collision sweep, then apply pending removals
    ///
    /// Every entity initiates a test against every other entity, with one
    /// exception preserved from the original design: the vehicle never
    /// initiates, it only appears as the candidate handed to other entities'
    /// handlers. Exactly one side of a vehicle overlap owns the reaction,
    /// which avoids double-counting it.
    pub fn tick<R: Rng>(&mut self, tuning: &Tuning, cache: &mut BoundsCache, rng: &mut R) {
        let mut effects = SweepEffects::default();
        let count = self.active.len();

        for i in 0..count {
            if self.active[i].kind() == EntityKind::Vehicle {
                continue;
            }
            for j in 0..count {
                if i == j {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.active, i, j);
                handlers::react(a, b, tuning, cache, &mut effects, rng);
            }
        }

        // Membership is frozen for the whole sweep
        debug_assert_eq!(self.active.len(), count);

        for id in effects.removals {
            self.pending_removal.insert(id);
        }
        if !effects.slot_clears.is_empty() {
            if let Some(vehicle) = self.vehicle_mut() {
                for slot in effects.slot_clears {
                    vehicle.clear_slot(slot);
                }
            }
        }

        self.apply_pending_removals();
    }

    /// Drain the removal queue at the sweep boundary
    fn apply_pending_removals(&mut self) {
        if self.pending_removal.is_empty() {
            return;
        }
        let before = self.active.len();
        let pending = std::mem::take(&mut self.pending_removal);
        self.active.retain(|e| !pending.contains(&e.id()));
        debug!("purged {} entities", before - self.active.len());
    }
}

/// Mutable references to two distinct entries of the active list
fn pair_mut(entities: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = entities.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = entities.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
