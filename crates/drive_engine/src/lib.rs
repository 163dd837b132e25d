//! # Drive Engine
//!
//! A compact simulation engine for arcade driving games.
//!
//! The engine deliberately has no rendering, audio, or windowing layer: it
//! supplies the pieces a driving game's simulation core needs and nothing
//! else.
//!
//! ## Features
//!
//! - **Transforms**: position/rotation/scale value type with matrix
//!   conversion and composition
//! - **Bounds**: world-space axis-aligned bounding boxes with a per-geometry
//!   local-bounds cache
//! - **Collision response**: reflection and penetration-resolution math for
//!   arcade-style reactions
//! - **Configuration**: TOML/RON backed config loading
//!
//! ## Quick Start
//!
//! ```rust
//! use drive_engine::prelude::*;
//!
//! let mut cache = BoundsCache::new();
//! let geometry = Geometry::cuboid(Vec3::new(1.0, 1.0, 1.0));
//! let part = Part::new(geometry);
//!
//! let transform = Transform::from_position(Vec3::new(0.0, 0.5, 0.0));
//! let bounds = world_bounds(std::slice::from_ref(&part), &transform, &mut cache);
//! assert!(!bounds.is_empty());
//! ```

// Core engine modules
pub mod config;
pub mod foundation;
pub mod physics;

/// Commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
    pub use crate::foundation::time::Timer;
    pub use crate::physics::bounds::Aabb;
    pub use crate::physics::geometry::{world_bounds, BoundsCache, Geometry, GeometryId, Part};
    pub use crate::physics::response;
}
