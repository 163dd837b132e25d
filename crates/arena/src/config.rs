//! Game configuration
//!
//! Loaded from `arena.toml` next to the binary when present, defaults
//! otherwise. All collision-response constants live in [`Tuning`] so tests
//! and the simulation share one source of truth.

use drive_engine::config::{Config, Deserialize, Serialize};

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Collision-response constants
    pub tuning: Tuning,

    /// Arena dimensions and object counts
    pub arena: ArenaConfig,

    /// Simulation loop settings
    pub simulation: SimulationConfig,
}

impl Config for GameConfig {}

/// Collision-response constants
///
/// Empirically tuned, not physically derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World-space distance a penetrating mover is nudged per collision
    pub push_strength: f32,

    /// Fraction of speed a blade keeps after bouncing off a wall
    pub bounce_retention: f32,

    /// Bounces after which a blade is removed from the world
    pub max_bounces: u32,

    /// Factor applied to vehicle speed on obstacle contact
    pub speed_penalty: f32,

    /// Downward acceleration applied to armed bombs
    pub gravity: f32,

    /// Seconds from launch to self-detonation
    pub bomb_fuse: f32,

    /// Seconds the explosion growth animation runs
    pub explosion_duration: f32,

    /// Uniform scale the explosion starts from
    pub explosion_start_scale: f32,

    /// Uniform scale the explosion grows to
    pub explosion_target_scale: f32,

    /// Seconds a collected power-up stays active
    pub power_up_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            push_strength: 0.02,
            bounce_retention: 0.8,
            max_bounces: 2,
            speed_penalty: 0.5,
            gravity: 9.8,
            bomb_fuse: 3.0,
            explosion_duration: 5.0,
            explosion_start_scale: 1.0,
            explosion_target_scale: 9.0,
            power_up_duration: 5.0,
        }
    }
}

/// Arena dimensions and object counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Half-width of the square arena floor
    pub half_size: f32,

    /// Wall length along its face
    pub wall_length: f32,

    /// Wall height
    pub wall_height: f32,

    /// Wall thickness
    pub wall_thickness: f32,

    /// Cone base half-width
    pub cone_half_width: f32,

    /// Cone height
    pub cone_height: f32,

    /// Number of cones scattered across the arena
    pub cone_count: u32,

    /// Number of pickups scattered across the arena
    pub pickup_count: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_size: 40.0,
            wall_length: 80.0,
            wall_height: 2.0,
            wall_thickness: 0.5,
            cone_half_width: 0.4,
            cone_height: 0.9,
            cone_count: 12,
            pickup_count: 4,
        }
    }
}

/// Simulation loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed timestep in seconds
    pub timestep: f32,

    /// Number of steps the headless harness runs
    pub max_steps: u32,

    /// Seed for the power-up RNG (deterministic runs)
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_steps: 600,
            rng_seed: 0xD21F7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_constants() {
        let tuning = Tuning::default();
        assert!(tuning.push_strength >= 0.01 && tuning.push_strength <= 0.05);
        assert_eq!(tuning.bounce_retention, 0.8);
        assert_eq!(tuning.max_bounces, 2);
        assert_eq!(tuning.bomb_fuse, 3.0);
        assert_eq!(tuning.explosion_duration, 5.0);
        assert_eq!(tuning.explosion_target_scale, 9.0);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let dir = std::env::temp_dir().join("arena_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("arena.toml");

        let mut config = GameConfig::default();
        config.tuning.push_strength = 0.05;
        config.save_to_file(&path).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.tuning.push_strength, 0.05);

        std::fs::remove_file(&path).ok();
    }
}
