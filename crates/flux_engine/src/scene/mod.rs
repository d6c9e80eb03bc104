//! Scene objects tracked by the simulation
//!
//! Flux volumes, occluder boxes, and lights are owned by the scene layer
//! and shared with the engine through `Arc` handles. The engine reads
//! their transforms at pass time and writes flux values back; it never
//! owns their lifetime.

mod light;
mod object;
mod occluder;
mod volume;

pub use light::{Light, LightDescriptor, LightKind, luminance};
pub use object::{BoundingVolume, ObjectId, SceneObject};
pub use occluder::OccluderBox;
pub use volume::{FluxVolume, SamplePoint};
