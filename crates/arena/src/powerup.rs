//! Power-up effects granted by pickups

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Power-up flavors a pickup can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Temporary top-speed increase
    SpeedBoost,

    /// Refills the vehicle's blade reserve
    ExtraBlades,

    /// Ignores the next crash speed penalty
    Shield,
}

impl Distribution<PowerUpKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PowerUpKind {
        match rng.gen_range(0..3) {
            0 => PowerUpKind::SpeedBoost,
            1 => PowerUpKind::ExtraBlades,
            _ => PowerUpKind::Shield,
        }
    }
}

/// A power-up currently affecting the vehicle
#[derive(Debug, Clone, Copy)]
pub struct ActivePowerUp {
    /// Which effect is active
    pub kind: PowerUpKind,

    /// Seconds until the effect wears off
    pub remaining: f32,
}

impl ActivePowerUp {
    /// Create an effect with a fresh timer
    pub fn new(kind: PowerUpKind, duration: f32) -> Self {
        Self {
            kind,
            remaining: duration,
        }
    }

    /// Count the effect down; returns true while still active
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.remaining -= delta_time;
        self.remaining > 0.0
    }
}
