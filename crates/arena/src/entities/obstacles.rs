//! Static obstacles: walls, cones, and the track floor
//!
//! Dimensions are fixed at construction. A wall's authored facing (+Z) is
//! treated as its outward surface normal by the response math, so arena
//! walls are rotated to face inward at construction time.

use drive_engine::prelude::*;

use super::EntityId;

/// Arena boundary wall
///
/// An axis-aligned rectangular prism. Movers are pushed out along its
/// facing normal and slowed on contact.
#[derive(Debug)]
pub struct Wall {
    /// Stable identity
    pub id: EntityId,
    /// World transform; `forward()` is the outward surface normal
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
}

impl Wall {
    /// Create a wall with the given face dimensions
    ///
    /// The wall spans `length` along its local X, `height` along Y, and
    /// `thickness` along Z (its facing axis).
    pub fn new(position: Vec3, rotation: Quat, length: f32, height: f32, thickness: f32) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(length * 0.5, height * 0.5, thickness * 0.5));
        Self {
            id: EntityId::next(),
            transform: Transform::from_position_rotation(position, rotation),
            parts: vec![Part::new(geometry)],
        }
    }
}

/// Destructible traffic cone
///
/// Slows the vehicle on contact and is destroyed by projectiles. Cones have
/// no meaningful facing, so penetration resolution uses the center-to-center
/// push variant.
#[derive(Debug)]
pub struct Cone {
    /// Stable identity
    pub id: EntityId,
    /// World transform
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
    /// Cleared when a projectile destroys the cone; the renderer detaches
    /// the visual once this is false
    pub in_world: bool,
}

impl Cone {
    /// Create a cone standing on the ground at `position`
    pub fn new(position: Vec3, half_width: f32, height: f32) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(half_width, height * 0.5, half_width));
        let lift = Transform::from_position(Vec3::new(0.0, height * 0.5, 0.0));
        Self {
            id: EntityId::next(),
            transform: Transform::from_position(position),
            parts: vec![Part::with_local(geometry, lift)],
            in_world: true,
        }
    }
}

/// The track floor
///
/// A thin slab just below y = 0. Its only collision role is detonating
/// launched bombs on impact.
#[derive(Debug)]
pub struct Ground {
    /// Stable identity
    pub id: EntityId,
    /// World transform
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
}

impl Ground {
    /// Create a square floor slab with the given half-width
    pub fn new(half_size: f32) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(half_size, 0.1, half_size));
        let sink = Transform::from_position(Vec3::new(0.0, -0.1, 0.0));
        Self {
            id: EntityId::next(),
            transform: Transform::identity(),
            parts: vec![Part::with_local(geometry, sink)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use drive_engine::foundation::math::constants;
    use drive_engine::physics::response;

    #[test]
    fn test_wall_facing_is_surface_normal() {
        // A wall on the +Z edge rotated half a turn faces back toward the
        // arena center
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), constants::PI);
        let wall = Wall::new(Vec3::new(0.0, 1.0, 40.0), rotation, 80.0, 2.0, 0.5);

        let normal = response::surface_normal(&wall.transform);
        assert_relative_eq!(normal, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_cone_bounds_sit_on_ground() {
        let mut cache = BoundsCache::new();
        let cone = Cone::new(Vec3::new(3.0, 0.0, -2.0), 0.4, 0.9);

        let bounds = world_bounds(&cone.parts, &cone.transform, &mut cache);
        assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bounds.max.y, 0.9, epsilon = 1e-5);
    }
}
