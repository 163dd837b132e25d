//! Collision response math
//!
//! Pure vector functions used by collision reactions: heading extraction,
//! surface normals, specular reflection, and the positional nudges that keep
//! overlapping objects from sticking together.
//!
//! Normals here are an arcade approximation: a static obstacle's outward
//! surface normal is taken to be its authored facing axis rather than one of
//! the six true faces of its box. Walls and cones are rectangular prisms
//! whose front is the only face movers approach in practice, so the
//! approximation holds up.

use crate::foundation::math::{Transform, Vec3};

const EPSILON: f32 = 1e-6;

/// The direction an entity is moving or intends to move
///
/// Projectiles carry an explicit velocity; for them this is the normalized
/// velocity. Everything else falls back to the facing axis of its transform,
/// which also covers the degenerate zero-velocity case.
pub fn movement_direction(velocity: Option<Vec3>, transform: &Transform) -> Vec3 {
    velocity
        .and_then(|v| v.try_normalize(EPSILON))
        .unwrap_or_else(|| transform.forward())
}

/// A static obstacle's outward-facing surface normal in world space
pub fn surface_normal(obstacle: &Transform) -> Vec3 {
    obstacle.forward()
}

/// Specular reflection of `direction` against `normal`
///
/// The normal is flipped first if it points the same way as the incoming
/// direction (dot product > 0), so callers may pass the obstacle's authored
/// facing regardless of which side was hit. The result is normalized.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    let d = direction
        .try_normalize(EPSILON)
        .unwrap_or_else(|| Vec3::z());
    let mut n = normal.try_normalize(EPSILON).unwrap_or_else(|| Vec3::z());

    if d.dot(&n) > 0.0 {
        n = -n;
    }

    let reflected = d - 2.0 * d.dot(&n) * n;
    reflected.try_normalize(EPSILON).unwrap_or(n)
}

/// Push a mover out along a static obstacle's facing normal
///
/// `strength` is a small world-space distance tuned empirically (on the
/// order of 0.01 to 0.05), just enough to break sustained overlap after a
/// collision has been detected. Entities are scene roots, so the nudge is
/// applied directly in world space.
pub fn resolve_penetration(mover: &mut Transform, obstacle: &Transform, strength: f32) {
    let normal = surface_normal(obstacle);
    mover.position += normal * strength;
}

/// Push a mover away from a non-directional obstacle
///
/// Variant used for obstacles with no meaningful facing (cones): the push
/// direction is the horizontal (Y-zeroed) vector from the obstacle's center
/// to the mover's center. Degenerates to a no-op when the two share the same
/// horizontal position, which avoids a division by zero.
pub fn resolve_penetration_by_push(mover: &mut Transform, obstacle: &Transform, strength: f32) {
    let mut push = mover.position - obstacle.position;
    push.y = 0.0;

    if let Some(direction) = push.try_normalize(EPSILON) {
        mover.position += direction * strength;
    }
}
