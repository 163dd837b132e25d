//! Arena — arcade driving collision demo
//!
//! Headless harness: builds the demo arena, drives the vehicle and a couple
//! of projectiles through a fixed number of simulation steps, and logs what
//! the collision core did. A rendering host would call the same
//! [`world::ArenaWorld::step`] from its frame callback.

mod config;
mod entities;
mod handlers;
mod powerup;
mod registry;
mod world;

use drive_engine::config::{Config, ConfigError};
use drive_engine::foundation::logging;
use drive_engine::foundation::time::Timer;
use log::info;

use crate::config::GameConfig;
use crate::world::ArenaWorld;

fn main() -> Result<(), ConfigError> {
    logging::init();

    let config = GameConfig::load_or_default("arena.toml")?;
    let timestep = config.simulation.timestep;
    let max_steps = config.simulation.max_steps;

    let mut world = ArenaWorld::new(config);
    world.vehicle_mut().speed = 14.0;
    if let Some(blade) = world.fire_blade(12.0) {
        info!("blade {blade:?} away");
    }
    let bomb = world.fire_bomb(8.0);
    info!("bomb {bomb:?} away");

    let mut timer = Timer::new();
    for _ in 0..max_steps {
        world.step(timestep);
        timer.update();
    }

    let vehicle = world.vehicle();
    info!(
        "simulated {max_steps} steps in {:.1} ms: {} entities live, vehicle speed {:.2}, crashed: {}, power-up: {:?}",
        timer.total_time() * 1000.0,
        world.registry().len(),
        vehicle.speed,
        vehicle.crashed,
        vehicle.power_up.map(|p| p.kind),
    );

    Ok(())
}
