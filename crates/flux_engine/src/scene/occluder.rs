//! Occluder box
//!
//! Opaque scene geometry. Participates in occlusion queries purely via
//! its world-space AABB: any ray touching it is fully blocked, with no
//! partial path-length contribution.

use std::sync::RwLock;

use super::{BoundingVolume, ObjectId};
use crate::foundation::math::Transform;
use crate::foundation::sync::{read, write};
use crate::geometry::Aabb;

/// An opaque obstacle blocking light along any ray it intersects
#[derive(Debug)]
pub struct OccluderBox {
    id: ObjectId,
    transform: RwLock<Transform>,
}

impl OccluderBox {
    /// Create an occluder box at the given transform (local unit cube)
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            id: ObjectId::next(),
            transform: RwLock::new(transform),
        }
    }

    /// Current transform (snapshot)
    #[must_use]
    pub fn transform(&self) -> Transform {
        read(&self.transform).clone()
    }

    /// Replace the transform (scene-layer side)
    pub fn set_transform(&self, transform: Transform) {
        *write(&self.transform) = transform;
    }
}

impl BoundingVolume for OccluderBox {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::unit().transformed(&self.transform().matrix())
    }
}
