//! Flux volume
//!
//! An oriented box (local unit cube) carrying a fixed template of
//! surface sample points. The engine estimates incoming light at every
//! sample and writes the averaged result back as the volume's flux value.

use std::sync::RwLock;

use super::{BoundingVolume, ObjectId};
use crate::foundation::math::{Mat3, Point3, Transform, Vec3};
use crate::foundation::sync::{read, write};
use crate::geometry::{Aabb, Ray};

/// Sample-point template over the local unit cube, as (point, outward normal)
/// pairs. The bottom face is skipped: volumes sit on the ground and receive
/// no light from below. Top vertices and edges carry one entry per adjacent
/// face so grazing light still registers on at least one normal.
const SAMPLING_TEMPLATE: [([f64; 3], [f64; 3]); 33] = [
    // Face centers (excluding the bottom face)
    ([0.5, 1.0, 0.5], [0.0, 1.0, 0.0]),
    ([0.5, 0.5, 1.0], [0.0, 0.0, 1.0]),
    ([0.5, 0.5, 0.0], [0.0, 0.0, -1.0]),
    ([1.0, 0.5, 0.5], [1.0, 0.0, 0.0]),
    ([0.0, 0.5, 0.5], [-1.0, 0.0, 0.0]),
    // Top vertices, one entry per adjacent face
    ([0.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    ([1.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ([1.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 1.0], [-1.0, 0.0, 0.0]),
    ([0.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    ([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
    ([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
    ([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
    // Top edge centers
    ([0.5, 1.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.5, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.5, 1.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.5, 1.0, 1.0], [0.0, 0.0, 1.0]),
    ([0.0, 1.0, 0.5], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.5], [-1.0, 0.0, 0.0]),
    ([1.0, 1.0, 0.5], [0.0, 1.0, 0.0]),
    ([1.0, 1.0, 0.5], [1.0, 0.0, 0.0]),
    // Vertical edge centers
    ([0.0, 0.5, 0.0], [-1.0, 0.0, 0.0]),
    ([0.0, 0.5, 0.0], [0.0, 0.0, -1.0]),
    ([1.0, 0.5, 0.0], [1.0, 0.0, 0.0]),
    ([1.0, 0.5, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, 0.5, 1.0], [-1.0, 0.0, 0.0]),
    ([0.0, 0.5, 1.0], [0.0, 0.0, 1.0]),
    ([1.0, 0.5, 1.0], [1.0, 0.0, 0.0]),
    ([1.0, 0.5, 1.0], [0.0, 0.0, 1.0]),
];

/// World-space surface sample of a flux volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Sample position
    pub point: Point3,
    /// Outward surface normal (unit length)
    pub normal: Vec3,
}

/// A sampled 3-D region whose received-light scalar is being estimated
///
/// The transform is owned and mutated by the scene layer; the engine
/// reads it at pass time. The flux value is written only by the engine.
#[derive(Debug)]
pub struct FluxVolume {
    id: ObjectId,
    transform: RwLock<Transform>,
    flux_value: RwLock<f64>,
}

impl FluxVolume {
    /// Create a flux volume at the given transform with flux 0
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            id: ObjectId::next(),
            transform: RwLock::new(transform),
            flux_value: RwLock::new(0.0),
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

    /// Last computed flux value, refreshed once per completed pass
    #[must_use]
    pub fn flux_value(&self) -> f64 {
        *read(&self.flux_value)
    }

    pub(crate) fn store_flux(&self, value: f64) {
        *write(&self.flux_value) = value;
    }

    /// World-space sample points for the current transform
    ///
    /// Recomputed on every call; the transform may have changed since the
    /// last pass. Points go through the world matrix, normals through the
    /// inverse-transpose (normal matrix) and are re-normalized. A
    /// non-invertible world matrix yields no samples, which zeroes this
    /// volume's flux for the pass instead of aborting it.
    #[must_use]
    pub fn sampling_points(&self) -> Vec<SamplePoint> {
        let world = self.transform().matrix();
        let linear: Mat3 = world.fixed_view::<3, 3>(0, 0).clone_owned();
        let Some(normal_matrix) = linear.try_inverse().map(|inv| inv.transpose()) else {
            return Vec::new();
        };

        SAMPLING_TEMPLATE
            .iter()
            .map(|(point, normal)| SamplePoint {
                point: world.transform_point(&Point3::new(point[0], point[1], point[2])),
                normal: (normal_matrix * Vec3::new(normal[0], normal[1], normal[2])).normalize(),
            })
            .collect()
    }
}

impl BoundingVolume for FluxVolume {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::unit().transformed(&self.transform().matrix())
    }

    /// Length of the ray's path through this volume
    ///
    /// The ray is carried into local space via the inverse world matrix,
    /// slab-tested against the unit cube, and the entry/exit points are
    /// mapped back to world space so the returned distance is a true
    /// world-space length even under non-uniform scale.
    fn ray_path_length(&self, ray: &Ray) -> Option<f64> {
        let world = self.transform().matrix();
        let inverse = world.try_inverse()?;
        let local = ray.transformed(&inverse);

        let (t_enter, t_exit) = Aabb::unit().ray_entry_exit(&local)?;

        let enter = world.transform_point(&local.at(t_enter));
        let exit = world.transform_point(&local.at(t_exit));
        Some((exit - enter).norm())
    }
}
