//! # Flux Engine
//!
//! A direct-illumination flux estimation engine. Sampled scene volumes
//! ("flux volumes") receive a scalar estimate of how much light reaches
//! them, accounting for distance falloff, spot cones, and occlusion by
//! other scene geometry.
//!
//! ## Features
//!
//! - **Octree occlusion queries**: rays are resolved against a
//!   duplicating, depth-bounded octree that is rebuilt every pass
//! - **Single-bounce photometric model**: luminance-weighted diffuse
//!   contributions with distance decay and Beer-Lambert style
//!   pass-through attenuation
//! - **Non-blocking recomputation**: passes are non-reentrant and
//!   coalesce superseding requests into exactly one trailing re-run
//! - **Shared scene objects**: volumes, occluders, and lights stay
//!   owned by the scene layer; the engine only holds handles
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use flux_engine::prelude::*;
//!
//! let simulation = Simulation::default();
//!
//! let plant = Arc::new(FluxVolume::new(Transform::identity()));
//! let sun = Arc::new(Light::directional(
//!     Quat::identity(),
//!     Vec3::new(1.0, 1.0, 1.0),
//!     1.5,
//! ));
//!
//! simulation.register_flux_volume(plant.clone());
//! simulation.register_light(sun);
//! simulation.calculate(1);
//!
//! assert!(plant.flux_value() > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod geometry;
pub mod scene;
pub mod sim;
pub mod spatial;

mod flux;

pub use flux::FluxBand;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Mat3, Mat4, Point3, Quat, Transform, Vec3},
        geometry::{Aabb, Ray},
        scene::{
            BoundingVolume, FluxVolume, Light, LightDescriptor, LightKind, ObjectId, OccluderBox,
            SamplePoint, SceneObject,
        },
        sim::{Simulation, SimulationConfig},
        spatial::{Octree, OctreeConfig, RayOcclusion},
        FluxBand,
    };
}
