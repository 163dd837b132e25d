//! Axis-aligned bounding boxes
//!
//! The collision proxy used throughout the engine: six scalars (min/max per
//! axis) in world space. Boxes are derived data, recomputed from local
//! geometry and the current world transform whenever a test is requested.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: it never intersects anything and unions as identity
    ///
    /// Used as the degenerate-geometry sentinel so malformed input degrades
    /// to "no collision" instead of propagating NaN.
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Compute the smallest box enclosing a set of points
    ///
    /// An empty point set yields [`Aabb::EMPTY`].
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |aabb, p| aabb.expanded(*p))
    }

    /// Whether this box is the empty sentinel (max below min on any axis)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow this box to include a point
    pub fn expanded(&self, point: Vec3) -> Self {
        Self {
            min: self.min.inf(&point),
            max: self.max.sup(&point),
        }
    }

    /// The smallest box enclosing both boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Check if this AABB contains a point (inclusive bounds)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Standard box-box overlap test with inclusive bounds; overlap is
    /// required on all three axes. Empty boxes intersect nothing.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Transform this box by a matrix and re-wrap the result
    ///
    /// Transforms all eight corners and takes the min/max, so the result
    /// stays axis-aligned under rotation (and grows accordingly).
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }

        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        corners.iter().fold(Self::EMPTY, |aabb, c| {
            let p = matrix.transform_point(&Point3::new(c.x, c.y, c.z));
            aabb.expanded(Vec3::new(p.x, p.y, p.z))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, Quat, Transform};
    use approx::assert_relative_eq;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb::from_center_extents(center, Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(0.75, 0.0, 0.0));
        let c = unit_box_at(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert!(a.intersects(&b));
        assert_eq!(a.intersects(&c), c.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_count_as_overlap() {
        // Inclusive bounds: boxes sharing a face intersect
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separation_on_one_axis_is_enough() {
        let a = unit_box_at(Vec3::zeros());
        let b = unit_box_at(Vec3::new(0.0, 3.0, 0.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_box_never_intersects() {
        let a = unit_box_at(Vec3::zeros());
        assert!(!Aabb::EMPTY.intersects(&a));
        assert!(!a.intersects(&Aabb::EMPTY));
        assert!(!Aabb::EMPTY.intersects(&Aabb::EMPTY));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = unit_box_at(Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(a.union(&Aabb::EMPTY), a);
        assert_eq!(Aabb::EMPTY.union(&a), a);
    }

    #[test]
    fn test_from_points_of_nothing_is_empty() {
        assert!(Aabb::from_points(&[]).is_empty());
    }

    #[test]
    fn test_transformed_grows_under_rotation() {
        // A unit box rotated 45 degrees around Y needs sqrt(2) on X and Z
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), constants::PI / 4.0);
        let transform = Transform::from_position_rotation(Vec3::zeros(), rotation);

        let rotated = unit_box_at(Vec3::zeros()).transformed(&transform.to_matrix());
        let expected = 2.0_f32.sqrt() * 0.5;
        assert_relative_eq!(rotated.max.x, expected, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.z, expected, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_transformed_empty_stays_empty() {
        let m = Transform::from_position(Vec3::new(10.0, 0.0, 0.0)).to_matrix();
        assert!(Aabb::EMPTY.transformed(&m).is_empty());
    }
}
