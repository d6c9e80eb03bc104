//! Light descriptors
//!
//! Directional, point, and spot lights with the photometric parameters
//! the flux model consumes. Parameters live behind a lock so the scene
//! layer can retune a light (intensity, cone, decay) between passes
//! while the engine reads a consistent snapshot.

use std::sync::RwLock;

use super::ObjectId;
use crate::foundation::math::{Quat, Vec3};
use crate::foundation::sync::{read, write};

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
    /// Spot light (like a pendant lamp)
    Spot,
}

/// Photometric parameters of a light
#[derive(Debug, Clone, PartialEq)]
pub struct LightDescriptor {
    /// Light type
    pub kind: LightKind,
    /// Light color, RGB in `[0,1]`
    pub color: Vec3,
    /// Light intensity (negative values are treated as 0)
    pub intensity: f64,
    /// World position (ignored by directional lights)
    pub position: Vec3,
    /// Orientation; the light's directions derive from it
    pub rotation: Quat,
    /// Cutoff distance for point/spot lights, 0 = unbounded
    pub max_distance: f64,
    /// Exponent controlling distance falloff sharpness
    pub decay: f64,
    /// Half-angle of the spot cone, radians (spot only)
    pub cone_half_angle: f64,
}

impl LightDescriptor {
    /// Direction light travels *from*, i.e. the vector from a lit point
    /// toward the light: the local +Y axis rotated by the orientation.
    /// Only meaningful for directional lights.
    #[must_use]
    pub fn light_direction(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Spot cone axis: the local -Y axis rotated by the orientation
    #[must_use]
    pub fn spot_axis(&self) -> Vec3 {
        self.rotation * -Vec3::y()
    }
}

/// Perceptual brightness of an RGB color (Rec. 601 weights)
#[must_use]
pub fn luminance(color: Vec3) -> f64 {
    color.x * 0.299 + color.y * 0.587 + color.z * 0.114
}

/// Light source shared between the scene layer and the engine
#[derive(Debug)]
pub struct Light {
    id: ObjectId,
    descriptor: RwLock<LightDescriptor>,
}

impl Light {
    /// Create a directional light
    ///
    /// Directional lights ignore `max_distance`, `decay`, and the cone;
    /// their attenuation is always 1.
    #[must_use]
    pub fn directional(rotation: Quat, color: Vec3, intensity: f64) -> Self {
        Self::from_descriptor(LightDescriptor {
            kind: LightKind::Directional,
            color,
            intensity,
            position: Vec3::zeros(),
            rotation,
            max_distance: 0.0,
            decay: 0.0,
            cone_half_angle: 0.0,
        })
    }

    /// Create a point light
    #[must_use]
    pub fn point(position: Vec3, color: Vec3, intensity: f64, max_distance: f64, decay: f64) -> Self {
        Self::from_descriptor(LightDescriptor {
            kind: LightKind::Point,
            color,
            intensity,
            position,
            rotation: Quat::identity(),
            max_distance,
            decay,
            cone_half_angle: 0.0,
        })
    }

    /// Create a spot light
    #[must_use]
    pub fn spot(
        position: Vec3,
        rotation: Quat,
        color: Vec3,
        intensity: f64,
        max_distance: f64,
        decay: f64,
        cone_half_angle: f64,
    ) -> Self {
        Self::from_descriptor(LightDescriptor {
            kind: LightKind::Spot,
            color,
            intensity,
            position,
            rotation,
            max_distance,
            decay,
            cone_half_angle,
        })
    }

    /// Pendant lamp preset: a downward white spot with a narrow cone
    #[must_use]
    pub fn pendant(position: Vec3, intensity: f64) -> Self {
        Self::spot(
            position,
            Quat::identity(),
            Vec3::new(1.0, 1.0, 1.0),
            intensity,
            20.0,
            1.5,
            std::f64::consts::FRAC_PI_8,
        )
    }

    /// Create a light from a full descriptor
    #[must_use]
    pub fn from_descriptor(descriptor: LightDescriptor) -> Self {
        Self {
            id: ObjectId::next(),
            descriptor: RwLock::new(descriptor),
        }
    }

    /// Identity of this light
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Snapshot of the current parameters
    #[must_use]
    pub fn descriptor(&self) -> LightDescriptor {
        read(&self.descriptor).clone()
    }

    /// Mutate the parameters in place (scene-layer side)
    pub fn update(&self, f: impl FnOnce(&mut LightDescriptor)) {
        f(&mut write(&self.descriptor));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_luminance_weights() {
        assert_relative_eq!(luminance(Vec3::new(1.0, 1.0, 1.0)), 1.0);
        assert_relative_eq!(luminance(Vec3::new(1.0, 0.0, 0.0)), 0.299);
        assert_relative_eq!(luminance(Vec3::zeros()), 0.0);
    }

    #[test]
    fn test_identity_rotation_directions() {
        let light = Light::pendant(Vec3::new(0.0, 5.0, 0.0), 50.0);
        let descriptor = light.descriptor();
        assert_relative_eq!(descriptor.light_direction(), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(descriptor.spot_axis(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_rotated_light_direction() {
        let rotation = Quat::from_axis_angle(&nalgebra::Vector3::x_axis(), std::f64::consts::FRAC_PI_2);
        let light = Light::directional(rotation, Vec3::new(1.0, 1.0, 1.0), 1.0);
        // +Y rotated 90 degrees about X points along +Z
        assert_relative_eq!(
            light.descriptor().light_direction(),
            Vec3::new(0.0, 0.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_update_changes_parameters() {
        let light = Light::point(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 10.0, 0.0, 0.0);
        light.update(|d| d.intensity = 25.0);
        assert_relative_eq!(light.descriptor().intensity, 25.0);
    }
}
