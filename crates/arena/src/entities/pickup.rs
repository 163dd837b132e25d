//! Collectible power-up pickups

use drive_engine::prelude::*;

use super::EntityId;

/// A floating pickup that grants the vehicle a random power-up on contact
#[derive(Debug)]
pub struct Pickup {
    /// Stable identity
    pub id: EntityId,
    /// World transform
    pub transform: Transform,
    /// Renderable parts
    pub parts: Vec<Part>,
    /// Set once collected; the renderer detaches the visual and the
    /// registry removal lands at the next sweep boundary
    pub collected: bool,
}

impl Pickup {
    /// Create a pickup hovering at `position`
    pub fn new(position: Vec3) -> Self {
        let geometry = Geometry::cuboid(Vec3::new(0.4, 0.4, 0.4));
        let hover = Transform::from_position(Vec3::new(0.0, 0.6, 0.0));
        Self {
            id: EntityId::next(),
            transform: Transform::from_position(position),
            parts: vec![Part::with_local(geometry, hover)],
            collected: false,
        }
    }
}
