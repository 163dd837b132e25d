//! Projectiles: the spinning blade and the gravity-affected bomb
//!
//! Both start "held in reserve" on the vehicle (`launched == false`) and
//! only participate in world collisions once launched.

use drive_engine::foundation::math::utils::lerp;
use drive_engine::prelude::*;
use log::debug;

use super::EntityId;
use crate::config::Tuning;

/// Spinning blade projectile
///
/// Ricochets off walls with an energy-retention factor and is destroyed
/// either by striking a cone or after its bounce budget is spent.
#[derive(Debug)]
pub struct Blade {
    /// Stable identity
    pub id: EntityId,
    /// World transform
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
    /// Flight velocity; mutated by wall reflection
    pub velocity: Vec3,
    /// In flight and subject to world collisions
    pub launched: bool,
    /// Wall bounces recorded so far
    pub bounces: u32,
    /// Index into the owning vehicle's projectile slots while held
    pub slot: Option<usize>,
}

impl Blade {
    /// Create a blade held in reserve in the given vehicle slot
    pub fn new(position: Vec3, slot: Option<usize>) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(0.35, 0.05, 0.35));
        Self {
            id: EntityId::next(),
            transform: Transform::from_position(position),
            parts: vec![Part::new(geometry)],
            velocity: Vec3::zeros(),
            launched: false,
            bounces: 0,
            slot,
        }
    }

    /// Put the blade in flight with the given velocity
    pub fn launch(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.launched = true;
    }

    /// Reflect off a wall, keeping `retention` of the current speed
    ///
    /// Returns the updated bounce count.
    pub fn bounce(&mut self, wall_normal: Vec3, retention: f32) -> u32 {
        let speed = self.velocity.magnitude();
        let direction = drive_engine::physics::response::reflect(self.velocity, wall_normal);
        self.velocity = direction * speed * retention;
        self.bounces += 1;
        debug!("blade {:?} bounced ({} so far)", self.id, self.bounces);
        self.bounces
    }
}

/// Bomb lifecycle states
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BombState {
    /// Falling under gravity with the fuse counting down
    Armed {
        /// Seconds until self-detonation
        fuse: f32,
    },
    /// Growth animation running; no further reactions
    Exploding {
        /// Seconds since detonation
        elapsed: f32,
    },
    /// Animation finished, removal requested, inert
    Removed,
}

/// Gravity-affected bomb projectile
///
/// Detonates on fuse expiry or on striking a cone, wall, or the ground.
/// The explosion grows the visual scale toward a target over a fixed
/// duration while opacity fades, then the bomb requests its own removal
/// exactly once.
#[derive(Debug)]
pub struct Bomb {
    /// Stable identity
    pub id: EntityId,
    /// World transform; scale animates during the explosion
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
    /// Flight velocity; gravity pulls it down while armed
    pub velocity: Vec3,
    /// In flight and subject to world collisions
    pub launched: bool,
    /// Lifecycle state
    pub state: BombState,
    /// Visual opacity, fading during the explosion; a renderer reads this
    pub opacity: f32,
}

impl Bomb {
    /// Create a bomb held in reserve
    pub fn new(position: Vec3, fuse: f32) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(0.3, 0.3, 0.3));
        Self {
            id: EntityId::next(),
            transform: Transform::from_position(position),
            parts: vec![Part::new(geometry)],
            velocity: Vec3::zeros(),
            launched: false,
            state: BombState::Armed { fuse },
            opacity: 1.0,
        }
    }

    /// Put the bomb in flight with the given velocity
    pub fn launch(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.launched = true;
    }

    /// Whether the explosion sequence has begun
    pub fn exploded(&self) -> bool {
        !matches!(self.state, BombState::Armed { .. })
    }

    /// Begin the explosion sequence
    ///
    /// Idempotent: calling this on an already-detonated bomb is a no-op, so
    /// fuse expiry and multiple impacts in one sweep cannot double-trigger.
    pub fn explode(&mut self) {
        if let BombState::Armed { .. } = self.state {
            debug!("bomb {:?} detonating", self.id);
            self.state = BombState::Exploding { elapsed: 0.0 };
        }
    }

    /// Per-frame update: gravity, fuse countdown, explosion animation
    ///
    /// Returns `true` exactly once, on the frame the explosion animation
    /// completes, to request removal from the registry. Further updates on a
    /// removed bomb are no-ops.
    pub fn update(&mut self, delta_time: f32, tuning: &Tuning) -> bool {
        match self.state {
            BombState::Armed { fuse } => {
                if self.launched {
                    self.velocity.y -= tuning.gravity * delta_time;
                    self.transform.position += self.velocity * delta_time;
                    let fuse = fuse - delta_time;
                    self.state = BombState::Armed { fuse };
                    if fuse <= 0.0 {
                        self.explode();
                    }
                }
                false
            }
            BombState::Exploding { elapsed } => {
                let elapsed = elapsed + delta_time;
                self.state = BombState::Exploding { elapsed };

                let t = (elapsed / tuning.explosion_duration).min(1.0);
                let scale = lerp(tuning.explosion_start_scale, tuning.explosion_target_scale, t);
                self.transform.scale = Vec3::new(scale, scale, scale);
                self.opacity = 1.0 - t;

                if t >= 1.0 {
                    // One-shot transition guards the cleanup
                    self.state = BombState::Removed;
                    return true;
                }
                false
            }
            BombState::Removed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reserve_projectiles_are_inert() {
        let mut bomb = Bomb::new(Vec3::new(0.0, 5.0, 0.0), 3.0);
        let before = bomb.transform.position;

        // Not launched: no gravity, no fuse countdown
        bomb.update(1.0, &Tuning::default());
        assert_eq!(bomb.transform.position, before);
        assert!(!bomb.exploded());
    }

    #[test]
    fn test_fuse_expiry_detonates_by_third_second() {
        let tuning = Tuning::default();
        let mut bomb = Bomb::new(Vec3::new(0.0, 50.0, 0.0), tuning.bomb_fuse);
        bomb.launch(Vec3::zeros());

        bomb.update(1.0, &tuning);
        bomb.update(1.0, &tuning);
        bomb.update(1.0, &tuning);
        assert!(bomb.exploded());
    }

    #[test]
    fn test_explode_is_idempotent() {
        let tuning = Tuning::default();
        let mut bomb = Bomb::new(Vec3::zeros(), tuning.bomb_fuse);
        bomb.launch(Vec3::zeros());

        bomb.explode();
        bomb.update(1.0, &tuning);
        let scale_after_one = bomb.transform.scale;

        // Second trigger must not restart the animation
        bomb.explode();
        assert_eq!(bomb.transform.scale, scale_after_one);
        assert!(matches!(bomb.state, BombState::Exploding { .. }));
    }

    #[test]
    fn test_explosion_grows_to_target_then_requests_removal_once() {
        let tuning = Tuning::default();
        let mut bomb = Bomb::new(Vec3::zeros(), tuning.bomb_fuse);
        bomb.launch(Vec3::zeros());
        bomb.explode();

        let mut removal_requests = 0;
        for _ in 0..20 {
            if bomb.update(1.0, &tuning) {
                removal_requests += 1;
            }
        }

        assert_eq!(removal_requests, 1);
        assert_eq!(bomb.state, BombState::Removed);
        assert_relative_eq!(bomb.transform.scale.x, tuning.explosion_target_scale);
        assert_relative_eq!(bomb.opacity, 0.0);
    }

    #[test]
    fn test_gravity_pulls_launched_bomb_down() {
        let tuning = Tuning::default();
        let mut bomb = Bomb::new(Vec3::new(0.0, 10.0, 0.0), 100.0);
        bomb.launch(Vec3::new(0.0, 0.0, -2.0));

        bomb.update(0.5, &tuning);
        assert!(bomb.velocity.y < 0.0);
        assert!(bomb.transform.position.y < 10.0);
        assert!(bomb.transform.position.z < 0.0);
    }

    #[test]
    fn test_blade_bounce_keeps_retention_of_speed() {
        let mut blade = Blade::new(Vec3::zeros(), None);
        blade.launch(Vec3::new(0.0, 0.0, -5.0));

        let bounces = blade.bounce(Vec3::new(0.0, 0.0, 1.0), 0.8);
        assert_eq!(bounces, 1);
        assert_relative_eq!(blade.velocity, Vec3::new(0.0, 0.0, 4.0), epsilon = 1e-5);
    }
}
