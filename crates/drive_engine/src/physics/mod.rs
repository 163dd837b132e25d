//! Physics module for collision detection and response
//!
//! Provides world-space axis-aligned bounding boxes computed from shared
//! local geometry, plus the reflection and penetration-resolution math an
//! arcade-style collision response needs.
//!
//! The module is intentionally brute-force friendly: bounds are recomputed
//! from the current transform every time a test is requested, and no spatial
//! partitioning is provided. That is the right trade-off for worlds of tens
//! of objects, not thousands.

pub mod bounds;
pub mod geometry;
pub mod response;

pub use bounds::Aabb;
pub use geometry::{world_bounds, BoundsCache, Geometry, GeometryId, Part};
