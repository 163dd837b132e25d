//! World entities
//!
//! Every object participating in collision is one variant of the closed
//! [`Entity`] sum type. Each variant owns its transform, its composite
//! renderable parts, and whatever reaction state its kind needs. Reaction
//! policy lives in the dispatch table in `handlers`, keyed on
//! `(EntityKind, EntityKind)` pairs.

use std::sync::atomic::{AtomicU64, Ordering};

use drive_engine::prelude::*;

pub mod obstacles;
pub mod pickup;
pub mod projectiles;
pub mod vehicle;

pub use obstacles::{Cone, Ground, Wall};
pub use pickup::Pickup;
pub use projectiles::{Blade, Bomb, BombState};
pub use vehicle::Vehicle;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a registered entity
///
/// Assigned at construction; removal requests and slot relations are keyed
/// on this rather than on live references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Entity kind tag used for reaction dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The player's vehicle
    Vehicle,
    /// Arena boundary wall
    Wall,
    /// Destructible traffic cone
    Cone,
    /// Spinning blade projectile
    Blade,
    /// Gravity-affected bomb projectile
    Bomb,
    /// Collectible power-up
    Pickup,
    /// The track floor
    Ground,
}

/// Any object participating in collision
#[derive(Debug)]
pub enum Entity {
    /// The player's vehicle
    Vehicle(Vehicle),
    /// Arena boundary wall
    Wall(Wall),
    /// Destructible traffic cone
    Cone(Cone),
    /// Spinning blade projectile
    Blade(Blade),
    /// Gravity-affected bomb projectile
    Bomb(Bomb),
    /// Collectible power-up
    Pickup(Pickup),
    /// The track floor
    Ground(Ground),
}

impl Entity {
    /// This entity's stable identity
    pub fn id(&self) -> EntityId {
        match self {
            Self::Vehicle(e) => e.id,
            Self::Wall(e) => e.id,
            Self::Cone(e) => e.id,
            Self::Blade(e) => e.id,
            Self::Bomb(e) => e.id,
            Self::Pickup(e) => e.id,
            Self::Ground(e) => e.id,
        }
    }

    /// This entity's kind tag
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Vehicle(_) => EntityKind::Vehicle,
            Self::Wall(_) => EntityKind::Wall,
            Self::Cone(_) => EntityKind::Cone,
            Self::Blade(_) => EntityKind::Blade,
            Self::Bomb(_) => EntityKind::Bomb,
            Self::Pickup(_) => EntityKind::Pickup,
            Self::Ground(_) => EntityKind::Ground,
        }
    }

    /// This entity's world transform
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Vehicle(e) => &e.transform,
            Self::Wall(e) => &e.transform,
            Self::Cone(e) => &e.transform,
            Self::Blade(e) => &e.transform,
            Self::Bomb(e) => &e.transform,
            Self::Pickup(e) => &e.transform,
            Self::Ground(e) => &e.transform,
        }
    }

    /// Mutable access to the world transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        match self {
            Self::Vehicle(e) => &mut e.transform,
            Self::Wall(e) => &mut e.transform,
            Self::Cone(e) => &mut e.transform,
            Self::Blade(e) => &mut e.transform,
            Self::Bomb(e) => &mut e.transform,
            Self::Pickup(e) => &mut e.transform,
            Self::Ground(e) => &mut e.transform,
        }
    }

    /// The renderable parts this entity's bounds derive from
    pub fn parts(&self) -> &[Part] {
        match self {
            Self::Vehicle(e) => &e.parts,
            Self::Wall(e) => &e.parts,
            Self::Cone(e) => &e.parts,
            Self::Blade(e) => &e.parts,
            Self::Bomb(e) => &e.parts,
            Self::Pickup(e) => &e.parts,
            Self::Ground(e) => &e.parts,
        }
    }

    /// World-space bounds, recomputed from the current transform
    pub fn world_bounds(&self, cache: &mut BoundsCache) -> Aabb {
        world_bounds(self.parts(), self.transform(), cache)
    }
}
