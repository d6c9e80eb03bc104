//! Spatial-index object contract
//!
//! Anything stored in the spatial index must produce a world-space AABB
//! and may report the length a ray travels through it. The two concrete
//! kinds are a closed variant so index traversal stays exhaustive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{FluxVolume, OccluderBox};
use crate::geometry::{Aabb, Ray};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity handle for scene objects
///
/// Used by occlusion queries to skip the volume issuing the query
/// (self-exclusion) regardless of where the tree duplicated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Contract for objects storable in the spatial index
pub trait BoundingVolume {
    /// Identity of this object
    fn id(&self) -> ObjectId;

    /// World-space AABB, recomputed from the current transform
    fn bounding_box(&self) -> Aabb;

    /// Length of the ray's path through this object, if any
    ///
    /// Objects that only block (rather than attenuate) leave the default.
    fn ray_path_length(&self, _ray: &Ray) -> Option<f64> {
        None
    }
}

/// Object reference stored in the spatial index
///
/// Flux volumes contribute partial path length to occlusion queries;
/// occluder boxes are binary blockers.
#[derive(Debug, Clone)]
pub enum SceneObject {
    /// A sampled flux volume (translucent, accumulates path length)
    Volume(Arc<FluxVolume>),
    /// An opaque occluder (any ray touching it is fully blocked)
    Occluder(Arc<OccluderBox>),
}

impl SceneObject {
    /// Identity of the wrapped object
    #[must_use]
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Volume(volume) => volume.id(),
            Self::Occluder(occluder) => occluder.id(),
        }
    }

    /// World-space AABB of the wrapped object
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Self::Volume(volume) => volume.bounding_box(),
            Self::Occluder(occluder) => occluder.bounding_box(),
        }
    }
}
