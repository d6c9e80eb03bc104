//! Geometry primitives
//!
//! Axis-aligned bounding boxes, parametric rays, and the slab-method
//! ray/box intersection tests the spatial index and the flux volumes
//! are built on.

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;
