//! Shared geometry and the local-bounds cache
//!
//! Geometry (vertex data) is typically shared across many instances: every
//! wall reuses one wall mesh, every wheel one wheel mesh. Local-space bounds
//! therefore get computed once per unique geometry and cached by identity,
//! then transformed to world space per instance on demand.
//!
//! Geometry is immutable after construction, so the cache never needs
//! invalidation in steady state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::foundation::math::{Transform, Vec3};
use crate::physics::bounds::Aabb;

static NEXT_GEOMETRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a unique geometry object
///
/// Two [`Part`]s sharing one `Arc<Geometry>` share this id and therefore one
/// cached local bounds entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(u64);

/// Immutable vertex data for one renderable piece
///
/// Only positions matter for collision purposes; everything else a renderer
/// would carry (normals, UVs, indices) lives with the out-of-scope visual
/// layer.
#[derive(Debug)]
pub struct Geometry {
    id: GeometryId,
    vertices: Vec<Vec3>,
}

impl Geometry {
    /// Create a geometry from raw vertex positions
    pub fn new(vertices: Vec<Vec3>) -> Arc<Self> {
        Arc::new(Self {
            id: GeometryId(NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed)),
            vertices,
        })
    }

    /// Create an axis-aligned cuboid centered on the origin
    ///
    /// `half_extents` is the half-size per axis. Corner vertices are enough
    /// for bounds computation.
    pub fn cuboid(half_extents: Vec3) -> Arc<Self> {
        let h = half_extents;
        Self::new(vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(h.x, h.y, h.z),
        ])
    }

    /// This geometry's identity
    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// The vertex positions in local space
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}

/// One renderable piece of a composite object
///
/// Carries the shared geometry plus the piece's placement relative to the
/// owning object (a wheel offset from the chassis, a sign on a post).
#[derive(Debug, Clone)]
pub struct Part {
    /// Shared vertex data
    pub geometry: Arc<Geometry>,
    /// Placement relative to the owning object
    pub local: Transform,
}

impl Part {
    /// Create a part placed at the owner's origin
    pub fn new(geometry: Arc<Geometry>) -> Self {
        Self {
            geometry,
            local: Transform::identity(),
        }
    }

    /// Create a part with an offset from the owner's origin
    pub fn with_local(geometry: Arc<Geometry>, local: Transform) -> Self {
        Self { geometry, local }
    }
}

/// Cache of local-space bounds keyed by geometry identity
///
/// Local bounds are computed once per unique geometry and reused across all
/// instances sharing that geometry. Transform changes never touch the cache.
#[derive(Debug, Default)]
pub struct BoundsCache {
    local: HashMap<GeometryId, Aabb>,
}

impl BoundsCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached local-space bounds for a geometry, computing on first request
    ///
    /// A geometry with no vertices yields [`Aabb::EMPTY`].
    pub fn local_bounds(&mut self, geometry: &Arc<Geometry>) -> Aabb {
        *self
            .local
            .entry(geometry.id())
            .or_insert_with(|| Aabb::from_points(geometry.vertices()))
    }

    /// Number of unique geometries with cached bounds
    pub fn len(&self) -> usize {
        self.local.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }
}

/// World-space bounds of a composite object
///
/// Transforms each part's cached local bounds by `world * part.local` and
/// unions the results. An object with zero parts yields [`Aabb::EMPTY`] and
/// so never intersects anything.
pub fn world_bounds(parts: &[Part], world: &Transform, cache: &mut BoundsCache) -> Aabb {
    parts.iter().fold(Aabb::EMPTY, |acc, part| {
        let local = cache.local_bounds(&part.geometry);
        let matrix = world.combine(&part.local).to_matrix();
        acc.union(&local.transformed(&matrix))
    })
}
