//! The player's vehicle
//!
//! The vehicle is deliberately passive in the collision sweep: it never
//! initiates a test, it only appears as the candidate other entities react
//! to. Its collision-relevant state is a scalar speed, a crash flag, one
//! power-up slot, and the projectile reserve.

use drive_engine::prelude::*;
use log::debug;

use super::EntityId;
use crate::powerup::{ActivePowerUp, PowerUpKind};

/// The player's vehicle
#[derive(Debug)]
pub struct Vehicle {
    /// Stable identity
    pub id: EntityId,
    /// World transform
    pub transform: Transform,
    /// Renderable parts (chassis plus four wheels sharing one geometry)
    pub parts: Vec<Part>,
    /// Current forward speed in world units per second
    pub speed: f32,
    /// Set on wall/cone contact; a HUD or audio layer may poll this
    pub crashed: bool,
    /// Currently active power-up, if any
    pub power_up: Option<ActivePowerUp>,
    /// Projectile reserve: `true` marks an occupied slot. Projectiles carry
    /// their slot index and removal clears by index.
    slots: Vec<bool>,
}

impl Vehicle {
    /// Create a vehicle at `position` with `slot_count` projectile slots
    pub fn new(position: Vec3, slot_count: usize) -> Self {
        let chassis = Geometry::cuboid(Vec3::new(0.9, 0.4, 1.8));
        let wheel = Geometry::cuboid(Vec3::new(0.15, 0.3, 0.3));

        let mut parts = vec![Part::with_local(
            chassis,
            Transform::from_position(Vec3::new(0.0, 0.7, 0.0)),
        )];
        for (x, z) in [(-0.9, 1.2), (0.9, 1.2), (-0.9, -1.2), (0.9, -1.2)] {
            parts.push(Part::with_local(
                std::sync::Arc::clone(&wheel),
                Transform::from_position(Vec3::new(x, 0.3, z)),
            ));
        }

        Self {
            id: EntityId::next(),
            transform: Transform::from_position(position),
            parts,
            speed: 0.0,
            crashed: false,
            power_up: None,
            slots: vec![false; slot_count],
        }
    }

    /// Apply the collision speed penalty
    pub fn penalize_speed(&mut self, factor: f32) {
        self.speed *= factor;
        self.crashed = true;
    }

    /// Grant a power-up, replacing any active one
    pub fn grant_power_up(&mut self, kind: PowerUpKind, duration: f32) {
        debug!("vehicle gained power-up {kind:?} for {duration}s");
        self.power_up = Some(ActivePowerUp::new(kind, duration));
    }

    /// Claim the first free projectile slot, if any
    pub fn claim_slot(&mut self) -> Option<usize> {
        let index = self.slots.iter().position(|occupied| !occupied)?;
        self.slots[index] = true;
        Some(index)
    }

    /// Release a projectile slot by index
    ///
    /// Out-of-range indices indicate a registration bug and fail fast.
    pub fn clear_slot(&mut self, index: usize) {
        assert!(index < self.slots.len(), "slot index {index} out of range");
        self.slots[index] = false;
    }

    /// Whether the given slot is occupied
    pub fn slot_occupied(&self, index: usize) -> bool {
        self.slots.get(index).copied().unwrap_or(false)
    }

    /// Number of occupied projectile slots
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|&&occupied| occupied).count()
    }

    /// Per-frame update: power-up timer countdown
    pub fn update(&mut self, delta_time: f32) {
        if let Some(active) = &mut self.power_up {
            if !active.tick(delta_time) {
                debug!("power-up {:?} expired", active.kind);
                self.power_up = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_claim_and_clear_by_index() {
        let mut vehicle = Vehicle::new(Vec3::zeros(), 2);

        let first = vehicle.claim_slot().unwrap();
        let second = vehicle.claim_slot().unwrap();
        assert_ne!(first, second);
        assert!(vehicle.claim_slot().is_none());

        vehicle.clear_slot(first);
        assert!(!vehicle.slot_occupied(first));
        assert_eq!(vehicle.claim_slot(), Some(first));
    }

    #[test]
    fn test_power_up_expires_on_update() {
        let mut vehicle = Vehicle::new(Vec3::zeros(), 1);
        vehicle.grant_power_up(PowerUpKind::Shield, 1.0);

        vehicle.update(0.5);
        assert!(vehicle.power_up.is_some());
        vehicle.update(0.6);
        assert!(vehicle.power_up.is_none());
    }

    #[test]
    fn test_speed_penalty_halves_and_flags() {
        let mut vehicle = Vehicle::new(Vec3::zeros(), 1);
        vehicle.speed = 12.0;

        vehicle.penalize_speed(0.5);
        assert_eq!(vehicle.speed, 6.0);
        assert!(vehicle.crashed);
    }
}
