//! Axis-aligned bounding box

use super::Ray;
use crate::foundation::math::{Mat4, Point3, Vec3};

/// Axis-Aligned Bounding Box for spatial queries
///
/// Invariant: `min` is component-wise `<= max`. Degenerate (zero-extent)
/// boxes are allowed for flat geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    #[must_use]
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// The local unit cube `[0,1]³` (the canonical space of box objects)
    #[must_use]
    pub fn unit() -> Self {
        Self {
            min: Vec3::zeros(),
            max: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Smallest AABB enclosing a set of points
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut min = Vec3::repeat(f64::INFINITY);
        let mut max = Vec3::repeat(f64::NEG_INFINITY);
        for point in points {
            min = min.inf(&point.coords);
            max = max.sup(&point.coords);
        }
        Self { min, max }
    }

    /// Get the center of the AABB
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    #[must_use]
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners of the box
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }

    /// World-space AABB of this box pushed through a matrix
    ///
    /// Transforms all eight corners and re-folds them, so rotated boxes
    /// yield their enclosing axis-aligned bounds.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::from_points(self.corners().map(|c| matrix.transform_point(&c)))
    }

    /// Check if this AABB contains a point
    #[must_use]
    pub fn contains_point(&self, point: Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Touching faces count as intersecting; objects exactly on a split
    /// boundary must land in all adjacent octree children.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns false when any axis interval is empty or the overlap lies
    /// entirely behind the ray origin.
    #[must_use]
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.ray_entry_exit(ray).is_some()
    }

    /// Entry/exit parametric distances of a ray through this AABB
    ///
    /// Same three-pair slab test, returning `(t_enter, t_exit)` with
    /// `t_enter = max(0, tmin)` so origins inside the box enter at 0.
    /// `None` when the intervals do not overlap or `t_exit < 0`.
    ///
    /// Axes with a zero direction component are handled separately:
    /// dividing by zero there turns an origin exactly on the slab plane
    /// into `0 * INF = NaN`, which the min/max chain would resolve to a
    /// miss. Consistent with [`Aabb::intersects`], a ray grazing a face
    /// counts as a hit.
    #[must_use]
    pub fn ray_entry_exit(&self, ray: &Ray) -> Option<(f64, f64)> {
        let mut tmin = f64::NEG_INFINITY;
        let mut tmax = f64::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir == 0.0 {
                // Parallel to this slab pair: inside (faces included) or a miss
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t0 = (self.min[axis] - origin) * inv;
            let t1 = (self.max[axis] - origin) * inv;
            tmin = tmin.max(t0.min(t1));
            tmax = tmax.min(t0.max(t1));
        }

        if tmax >= tmin && tmax >= 0.0 {
            Some((tmin.max(0.0), tmax))
        } else {
            None
        }
    }
}
