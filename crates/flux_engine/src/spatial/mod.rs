//! Spatial partitioning data structures
//!
//! Provides the depth-bounded, object-duplicating octree the engine
//! rebuilds every pass and queries for ray occlusion.

mod octree;

pub use octree::{Octree, OctreeConfig, RayOcclusion};
