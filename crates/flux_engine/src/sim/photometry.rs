//! Photometric model
//!
//! Single-bounce diffuse contribution of one light at one sample point,
//! with distance decay, spot cone cutoff, and octree occlusion. A
//! heuristic, not radiometry: cheap enough to evaluate for every sample
//! of every volume on every pass.

use crate::geometry::Ray;
use crate::scene::{luminance, LightDescriptor, LightKind, ObjectId, SamplePoint};
use crate::spatial::Octree;

/// Diffuse contribution of `light` at `sample`
///
/// `ignore` is the volume issuing the query, excluded from its own
/// occlusion. Returns 0 for hard-occluded, out-of-range, or
/// outside-cone samples, and for degenerate geometry (sample exactly at
/// the light position).
pub(crate) fn diffuse_contribution(
    light: &LightDescriptor,
    sample: &SamplePoint,
    ignore: ObjectId,
    octree: &Octree,
    attenuation_coefficient: f64,
) -> f64 {
    let intensity = light.intensity.max(0.0);
    let mut attenuation = 1.0;

    let light_dir = if light.kind == LightKind::Directional {
        light.light_direction().normalize()
    } else {
        let to_light = light.position - sample.point.coords;
        let distance = to_light.norm();
        if distance == 0.0 {
            return 0.0;
        }

        if light.max_distance > 0.0 && distance > light.max_distance {
            return 0.0;
        }

        if light.max_distance > 0.0 && light.decay > 0.0 {
            attenuation = (1.0 - distance / light.max_distance)
                .clamp(0.0, 1.0)
                .powf(light.decay);
        }

        let dir = to_light / distance;

        if light.kind == LightKind::Spot {
            let cone = light.cone_half_angle.clamp(0.0, std::f64::consts::FRAC_PI_2);
            let spot_axis = light.spot_axis().normalize();
            // Direction from the light toward the sample, against the cone axis
            if (-dir).dot(&spot_axis) < cone.cos() {
                return 0.0;
            }
        }

        dir
    };

    let ray = Ray::new(sample.point, light_dir);
    let occlusion = octree.cast_ray(&ray, ignore);
    if occlusion.hard_occluded {
        return 0.0;
    }
    if occlusion.total_length > 0.0 {
        attenuation *= (-attenuation_coefficient * occlusion.total_length).exp();
    }

    let diffuse = sample.normal.dot(&light_dir).max(0.0);
    luminance(light.color) * intensity * diffuse * attenuation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Quat, Transform, Vec3};
    use crate::scene::{Light, OccluderBox, SceneObject};
    use crate::spatial::OctreeConfig;
    use crate::geometry::Aabb;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn empty_octree() -> Octree {
        Octree::new(
            Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(1000.0)),
            OctreeConfig::default(),
        )
    }

    fn up_sample_at_origin() -> SamplePoint {
        SamplePoint {
            point: Point3::origin(),
            normal: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn test_point_light_worked_example() {
        // Point light at (0,5,0), intensity 1000, max distance 10, decay 2,
        // white color; sample at the origin facing up:
        // distance 5, attenuation (1 - 5/10)^2 = 0.25, diffuse 1 -> 250
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1000.0, 10.0, 2.0);
        let contribution = diffuse_contribution(
            &light.descriptor(),
            &up_sample_at_origin(),
            ObjectId::next(),
            &empty_octree(),
            0.2,
        );
        assert_relative_eq!(contribution, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_occluded_sample_contributes_zero() {
        // Same setup, but an occluder AABB sits between sample and light
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1000.0, 10.0, 2.0);
        let mut octree = empty_octree();
        octree.insert(SceneObject::Occluder(Arc::new(OccluderBox::new(
            Transform::from_position(Vec3::new(-0.5, 2.0, -0.5)),
        ))));

        let contribution = diffuse_contribution(
            &light.descriptor(),
            &up_sample_at_origin(),
            ObjectId::next(),
            &octree,
            0.2,
        );
        assert_relative_eq!(contribution, 0.0);
    }

    #[test]
    fn test_directional_attenuation_is_distance_invariant() {
        let light = Light::directional(Quat::identity(), Vec3::new(1.0, 1.0, 1.0), 2.0);
        let descriptor = light.descriptor();
        let octree = empty_octree();

        let near = up_sample_at_origin();
        let far = SamplePoint {
            point: Point3::new(500.0, -800.0, 120.0),
            normal: Vec3::new(0.0, 1.0, 0.0),
        };
        let probe = ObjectId::next();
        let a = diffuse_contribution(&descriptor, &near, probe, &octree, 0.2);
        let b = diffuse_contribution(&descriptor, &far, probe, &octree, 0.2);
        assert_relative_eq!(a, b);
        assert_relative_eq!(a, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_cutoff_is_exact() {
        let color = Vec3::new(1.0, 1.0, 1.0);
        let octree = empty_octree();
        let probe = ObjectId::next();
        let sample = up_sample_at_origin();

        // decay 0 keeps attenuation at 1 so only the cutoff matters
        let out_of_range = Light::point(Vec3::new(0.0, 10.0001, 0.0), color, 100.0, 10.0, 0.0);
        assert_relative_eq!(
            diffuse_contribution(&out_of_range.descriptor(), &sample, probe, &octree, 0.2),
            0.0
        );

        let in_range = Light::point(Vec3::new(0.0, 9.9999, 0.0), color, 100.0, 10.0, 0.0);
        assert_relative_eq!(
            diffuse_contribution(&in_range.descriptor(), &sample, probe, &octree, 0.2),
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_spot_cone_cutoff() {
        // Spot at the origin pointing down (-Y), half-angle 30 degrees
        let light = Light::spot(
            Vec3::zeros(),
            Quat::identity(),
            Vec3::new(1.0, 1.0, 1.0),
            100.0,
            0.0,
            0.0,
            30f64.to_radians(),
        );
        let descriptor = light.descriptor();
        let octree = empty_octree();
        let probe = ObjectId::next();

        let sample_off_axis = |degrees: f64| {
            let angle = degrees.to_radians();
            SamplePoint {
                point: Point3::new(5.0 * angle.sin(), -5.0 * angle.cos(), 0.0),
                normal: Vec3::new(0.0, 1.0, 0.0),
            }
        };

        let inside = diffuse_contribution(&descriptor, &sample_off_axis(29.0), probe, &octree, 0.2);
        assert!(inside > 0.0);

        let outside = diffuse_contribution(&descriptor, &sample_off_axis(31.0), probe, &octree, 0.2);
        assert_relative_eq!(outside, 0.0);
    }

    #[test]
    fn test_pass_through_volume_attenuates_beer_lambert() {
        use crate::scene::FluxVolume;
        let light = Light::point(Vec3::new(0.5, 10.0, 0.5), Vec3::new(1.0, 1.0, 1.0), 100.0, 0.0, 0.0);
        let mut octree = empty_octree();
        // A unit volume between sample and light: path length 1
        octree.insert(SceneObject::Volume(Arc::new(FluxVolume::new(
            Transform::from_position(Vec3::new(0.0, 4.0, 0.0)),
        ))));

        let sample = SamplePoint {
            point: Point3::new(0.5, 0.0, 0.5),
            normal: Vec3::new(0.0, 1.0, 0.0),
        };
        let contribution =
            diffuse_contribution(&light.descriptor(), &sample, ObjectId::next(), &octree, 0.2);
        assert_relative_eq!(contribution, 100.0 * (-0.2f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_negative_intensity_clamps_to_zero() {
        let light = Light::point(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 1.0, 1.0), -10.0, 0.0, 0.0);
        let contribution = diffuse_contribution(
            &light.descriptor(),
            &up_sample_at_origin(),
            ObjectId::next(),
            &empty_octree(),
            0.2,
        );
        assert_relative_eq!(contribution, 0.0);
    }
}
