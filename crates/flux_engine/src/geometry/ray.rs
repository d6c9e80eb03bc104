//! Parametric ray

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Ray defined by an origin and a direction
///
/// The direction is not required to be normalized; parametric distances
/// returned by the slab tests are consistent with whatever length the
/// direction has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Point3,
    /// Ray direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    #[must_use]
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point along the ray at parametric distance `t`
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Map this ray through a matrix (point-transforms the origin,
    /// vector-transforms the direction)
    ///
    /// Used to carry world-space rays into an object's local space via
    /// its inverse world matrix.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point(&self.origin),
            direction: matrix.transform_vector(&self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(ray.at(0.5), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_ray_transformed_by_translation() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 1.0, 0.0));
        let matrix = Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0));
        let moved = ray.transformed(&matrix);
        assert_relative_eq!(moved.origin, Point3::new(3.0, 0.0, 0.0));
        // Translation must not affect the direction
        assert_relative_eq!(moved.direction, Vec3::new(0.0, 1.0, 0.0));
    }
}
