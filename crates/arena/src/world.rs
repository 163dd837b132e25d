//! Arena world setup and the simulation step
//!
//! [`ArenaWorld`] is the explicit context object the whole simulation runs
//! through: registry, bounds cache, configuration, and RNG, owned by the
//! top-level loop with an init / step-many-times / drop lifecycle. Movement
//! integration for the vehicle and blades lives here too, playing the role
//! the rendering host would in a full game.

use drive_engine::foundation::math::constants;
use drive_engine::prelude::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::entities::{Blade, Bomb, Cone, Entity, EntityId, Ground, Pickup, Vehicle, Wall};
use crate::registry::CollisionRegistry;

/// Everything one simulation needs, owned in one place
pub struct ArenaWorld {
    registry: CollisionRegistry,
    cache: BoundsCache,
    config: GameConfig,
    rng: StdRng,
}

impl ArenaWorld {
    /// Build the demo arena: floor, perimeter walls facing inward, a ring
    /// of cones, scattered pickups, and the vehicle at the center
    pub fn new(config: GameConfig) -> Self {
        let mut registry = CollisionRegistry::new();
        let arena = &config.arena;

        registry.register(Entity::Ground(Ground::new(arena.half_size)));

        let half = arena.half_size;
        let wall_y = arena.wall_height * 0.5;
        let facing_inward = [
            (Vec3::new(0.0, wall_y, -half), 0.0),
            (Vec3::new(0.0, wall_y, half), constants::PI),
            (Vec3::new(half, wall_y, 0.0), -constants::HALF_PI),
            (Vec3::new(-half, wall_y, 0.0), constants::HALF_PI),
        ];
        for (position, angle) in facing_inward {
            let rotation = Quat::from_axis_angle(&Vec3::y_axis(), angle);
            registry.register(Entity::Wall(Wall::new(
                position,
                rotation,
                arena.wall_length,
                arena.wall_height,
                arena.wall_thickness,
            )));
        }

        let cone_ring = half * 0.5;
        for i in 0..arena.cone_count {
            let angle = constants::TAU * (i as f32) / (arena.cone_count as f32);
            let position = Vec3::new(cone_ring * angle.cos(), 0.0, cone_ring * angle.sin());
            registry.register(Entity::Cone(Cone::new(
                position,
                arena.cone_half_width,
                arena.cone_height,
            )));
        }

        let pickup_ring = half * 0.25;
        for i in 0..arena.pickup_count {
            let angle = constants::TAU * (i as f32) / (arena.pickup_count as f32);
            let position = Vec3::new(pickup_ring * angle.cos(), 0.0, pickup_ring * angle.sin());
            registry.register(Entity::Pickup(Pickup::new(position)));
        }

        registry.register(Entity::Vehicle(Vehicle::new(Vec3::zeros(), 3)));

        let rng = StdRng::seed_from_u64(config.simulation.rng_seed);
        info!(
            "arena ready: {} entities, seed {}",
            registry.len(),
            config.simulation.rng_seed
        );

        Self {
            registry,
            cache: BoundsCache::new(),
            config,
            rng,
        }
    }

    /// The collision registry
    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// Mutable access to the registry (spawning, direct removal)
    pub fn registry_mut(&mut self) -> &mut CollisionRegistry {
        &mut self.registry
    }

    /// The active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The vehicle (the demo arena always registers exactly one)
    pub fn vehicle(&self) -> &Vehicle {
        self.registry.vehicle().expect("arena world has a vehicle")
    }

    /// Mutable access to the vehicle
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        self.registry
            .vehicle_mut()
            .expect("arena world has a vehicle")
    }

    /// Fire a blade from the vehicle's reserve, if a slot is free
    pub fn fire_blade(&mut self, speed: f32) -> Option<EntityId> {
        let slot = self.vehicle_mut().claim_slot()?;
        let vehicle = self.vehicle();
        let forward = vehicle.transform.forward();
        let origin = vehicle.transform.position + forward * 2.5 + Vec3::new(0.0, 0.5, 0.0);

        let mut blade = Blade::new(origin, Some(slot));
        blade.launch(forward * speed);
        Some(self.registry.register(Entity::Blade(blade)))
    }

    /// Lob a bomb ahead of the vehicle
    pub fn fire_bomb(&mut self, speed: f32) -> EntityId {
        let vehicle = self.vehicle();
        let forward = vehicle.transform.forward();
        let origin = vehicle.transform.position + forward * 2.0 + Vec3::new(0.0, 1.5, 0.0);

        let mut bomb = Bomb::new(origin, self.config.tuning.bomb_fuse);
        bomb.launch(forward * speed + Vec3::new(0.0, 3.0, 0.0));
        self.registry.register(Entity::Bomb(bomb))
    }

    /// Advance the simulation one fixed step
    ///
    /// Per-frame entity updates first (movement integration, timers,
    /// explosion animation), then one full collision sweep with removals
    /// applied at its boundary.
    pub fn step(&mut self, delta_time: f32) {
        let tuning = &self.config.tuning;
        let mut finished_bombs = Vec::new();

        for entity in self.registry.entities_mut() {
            match entity {
                Entity::Vehicle(vehicle) => {
                    let forward = vehicle.transform.forward();
                    vehicle.transform.position += forward * vehicle.speed * delta_time;
                    vehicle.update(delta_time);
                }
                Entity::Blade(blade) if blade.launched => {
                    blade.transform.position += blade.velocity * delta_time;
                }
                Entity::Bomb(bomb) => {
                    if bomb.update(delta_time, tuning) {
                        finished_bombs.push(bomb.id);
                    }
                }
                _ => {}
            }
        }

        for id in finished_bombs {
            self.registry.request_removal(id);
        }

        self.registry
            .tick(&self.config.tuning, &mut self.cache, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BombState;
    use approx::assert_relative_eq;

    fn world() -> ArenaWorld {
        ArenaWorld::new(GameConfig::default())
    }

    fn bare_world() -> ArenaWorld {
        // Empty arena except ground and vehicle, for targeted scenarios
        let mut config = GameConfig::default();
        config.arena.cone_count = 0;
        config.arena.pickup_count = 0;
        config.arena.half_size = 500.0;
        config.arena.wall_length = 1000.0;
        ArenaWorld::new(config)
    }

    #[test]
    fn test_scenario_wall_contact_slows_and_pushes_vehicle() {
        let mut world = bare_world();
        let tuning = world.config().tuning.clone();

        // Park the vehicle overlapping the north wall (facing +Z)
        let wall_z = -world.config().arena.half_size;
        {
            let vehicle = world.vehicle_mut();
            vehicle.speed = 10.0;
            vehicle.transform.position = Vec3::new(0.0, 0.0, wall_z + 0.5);
        }
        let before_z = world.vehicle().transform.position.z;

        world.step(0.0);

        let vehicle = world.vehicle();
        assert_eq!(vehicle.speed, 5.0);
        assert!(vehicle.crashed);
        // Nudged inward along the wall's facing normal (+Z) by push strength
        assert_relative_eq!(
            vehicle.transform.position.z,
            before_z + tuning.push_strength,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_scenario_blade_reflects_off_wall_with_retention() {
        let mut world = bare_world();
        let wall_z = -world.config().arena.half_size;

        let blade_id = world.fire_blade(1.0).unwrap();
        {
            let registry = world.registry_mut();
            let blade = registry.entities_mut().find_map(|e| match e {
                Entity::Blade(b) if b.id == blade_id => Some(b),
                _ => None,
            });
            let blade = blade.unwrap();
            blade.velocity = Vec3::new(0.0, 0.0, -5.0);
            blade.transform.position = Vec3::new(0.0, 1.0, wall_z + 0.2);
        }

        world.step(0.0);

        let blade = world.registry().entities().find_map(|e| match e {
            Entity::Blade(b) if b.id == blade_id => Some(b),
            _ => None,
        });
        let blade = blade.unwrap();
        assert_relative_eq!(blade.velocity, Vec3::new(0.0, 0.0, 4.0), epsilon = 1e-4);
        assert_eq!(blade.bounces, 1);
    }

    #[test]
    fn test_blade_is_removed_after_three_bounces() {
        let mut world = bare_world();
        let wall_z = -world.config().arena.half_size;

        let blade_id = world.fire_blade(1.0).unwrap();
        {
            let blade = world
                .registry_mut()
                .entities_mut()
                .find_map(|e| match e {
                    Entity::Blade(b) if b.id == blade_id => Some(b),
                    _ => None,
                })
                .unwrap();
            blade.velocity = Vec3::new(0.0, 0.0, -5.0);
            blade.transform.position = Vec3::new(0.0, 1.0, wall_z + 0.2);
        }

        // The blade is pinned against the wall (dt = 0, push strength is
        // tiny), so every sweep records one more bounce
        world.step(0.0);
        world.step(0.0);
        assert!(world.registry().contains(blade_id));

        world.step(0.0);
        assert!(!world.registry().contains(blade_id));
    }

    #[test]
    fn test_scenario_pickup_grants_power_up_and_disappears() {
        let mut world = world();
        let (pickup_id, position) = world
            .registry()
            .entities()
            .find_map(|e| match e {
                Entity::Pickup(p) => Some((p.id, p.transform.position)),
                _ => None,
            })
            .unwrap();
        world.vehicle_mut().transform.position = position;

        world.step(0.0);

        assert!(!world.registry().contains(pickup_id));
        assert!(world.vehicle().power_up.is_some());
    }

    #[test]
    fn test_bomb_detonates_on_ground_and_cleans_up() {
        let mut world = bare_world();
        let bomb_id = world.fire_bomb(5.0);

        let duration = world.config().tuning.explosion_duration;
        let mut detonated = false;
        // Long enough for the fall, the fuse worst case, and the animation
        let budget = (3.0 + duration + 2.0) / 0.05;
        for _ in 0..budget as u32 {
            world.step(0.05);
            if let Some(Entity::Bomb(bomb)) = world.registry().get(bomb_id) {
                if matches!(bomb.state, BombState::Exploding { .. }) {
                    detonated = true;
                }
            }
        }

        assert!(detonated);
        // Animation complete: the bomb removed itself from the registry
        assert!(!world.registry().contains(bomb_id));
    }

    #[test]
    fn test_cone_destroyed_by_bomb_while_bomb_detonates() {
        let mut world = bare_world();
        let cone_id = world
            .registry_mut()
            .register(Entity::Cone(Cone::new(Vec3::new(0.0, 0.0, 6.0), 0.4, 0.9)));

        let bomb_id = world.fire_bomb(0.0);
        {
            let bomb = world
                .registry_mut()
                .entities_mut()
                .find_map(|e| match e {
                    Entity::Bomb(b) if b.id == bomb_id => Some(b),
                    _ => None,
                })
                .unwrap();
            bomb.velocity = Vec3::zeros();
            bomb.transform.position = Vec3::new(0.0, 0.5, 6.0);
        }

        world.step(0.0);

        // Both table rows fired in one sweep: cone gone, bomb exploding
        assert!(!world.registry().contains(cone_id));
        let bomb = world.registry().get(bomb_id).unwrap();
        match bomb {
            Entity::Bomb(b) => assert!(b.exploded()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_demo_arena_population() {
        let world = world();
        let config = GameConfig::default();
        // ground + 4 walls + cones + pickups + vehicle
        let expected = 1 + 4 + config.arena.cone_count + config.arena.pickup_count + 1;
        assert_eq!(world.registry().len(), expected as usize);
    }
}
