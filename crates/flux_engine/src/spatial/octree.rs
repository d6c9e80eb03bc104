//! Octree spatial partitioning structure
//!
//! Divides 3D space into hierarchical regions for fast occlusion
//! queries. Each node subdivides into 8 octants when its object count
//! exceeds a threshold. Objects are inserted into *every* child their
//! AABB intersects: an object straddling a split plane must be
//! queryable from either half, so duplication is intentional.
//!
//! The tree is an arena of nodes with index-based child references and
//! is rebuilt from scratch every simulation pass; there is no removal
//! and no incremental update.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::geometry::{Aabb, Ray};
use crate::scene::{BoundingVolume, ObjectId, SceneObject};

/// Configuration for octree behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum objects per leaf before subdivision
    pub max_objects_per_leaf: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_objects_per_leaf: 8,
            max_depth: 5,
        }
    }
}

/// Result of an occlusion ray cast through the tree
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayOcclusion {
    /// Summed path length through translucent flux volumes along the ray
    pub total_length: f64,
    /// True when an opaque occluder intersects the ray
    pub hard_occluded: bool,
}

/// Single node in the octree arena
///
/// A node either holds objects directly (leaf) or has children
/// (internal); the transition is one-directional per rebuild.
#[derive(Debug)]
struct Node {
    bounds: Aabb,
    depth: u32,
    objects: Vec<SceneObject>,
    children: Option<[usize; 8]>,
}

impl Node {
    fn leaf(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            objects: Vec::new(),
            children: None,
        }
    }
}

const ROOT: usize = 0;

/// Octree over scene objects, rebuilt per pass
#[derive(Debug)]
pub struct Octree {
    nodes: Vec<Node>,
    config: OctreeConfig,
}

impl Octree {
    /// Create an empty tree covering `bounds`
    #[must_use]
    pub fn new(bounds: Aabb, config: OctreeConfig) -> Self {
        Self {
            nodes: vec![Node::leaf(bounds, 0)],
            config,
        }
    }

    /// Insert an object, duplicating it into every child its AABB touches
    pub fn insert(&mut self, object: SceneObject) {
        let aabb = object.bounding_box();
        self.insert_at(ROOT, object, &aabb);
    }

    fn insert_at(&mut self, index: usize, object: SceneObject, aabb: &Aabb) {
        if let Some(children) = self.nodes[index].children {
            for child in children {
                if self.nodes[child].bounds.intersects(aabb) {
                    self.insert_at(child, object.clone(), aabb);
                }
            }
            return;
        }

        self.nodes[index].objects.push(object);

        let node = &self.nodes[index];
        if node.objects.len() > self.config.max_objects_per_leaf && node.depth < self.config.max_depth
        {
            self.split(index);
        }
    }

    /// Subdivide a leaf into 8 equal octants and redistribute its objects
    fn split(&mut self, index: usize) {
        let bounds = self.nodes[index].bounds;
        let depth = self.nodes[index].depth;
        let center = bounds.center();

        let mut children = [0usize; 8];
        for (octant, child) in children.iter_mut().enumerate() {
            let (min_x, max_x) = if octant & 1 == 0 {
                (bounds.min.x, center.x)
            } else {
                (center.x, bounds.max.x)
            };
            let (min_y, max_y) = if octant & 2 == 0 {
                (bounds.min.y, center.y)
            } else {
                (center.y, bounds.max.y)
            };
            let (min_z, max_z) = if octant & 4 == 0 {
                (bounds.min.z, center.z)
            } else {
                (center.z, bounds.max.z)
            };

            *child = self.nodes.len();
            self.nodes.push(Node::leaf(
                Aabb::new(
                    Vec3::new(min_x, min_y, min_z),
                    Vec3::new(max_x, max_y, max_z),
                ),
                depth + 1,
            ));
        }

        let held = std::mem::take(&mut self.nodes[index].objects);
        self.nodes[index].children = Some(children);

        for object in held {
            let aabb = object.bounding_box();
            self.insert_at(index, object, &aabb);
        }
    }

    /// Cast an occlusion ray through the tree
    ///
    /// Accumulates flux-volume path lengths and reports hard occlusion,
    /// short-circuiting at the first opaque hit. Subtrees whose bounds
    /// the ray misses are pruned without visiting. The object with id
    /// `ignore` (the volume issuing the query) is always skipped.
    #[must_use]
    pub fn cast_ray(&self, ray: &Ray, ignore: ObjectId) -> RayOcclusion {
        self.cast_from(ROOT, ray, ignore)
    }

    fn cast_from(&self, index: usize, ray: &Ray, ignore: ObjectId) -> RayOcclusion {
        let node = &self.nodes[index];
        if !node.bounds.intersects_ray(ray) {
            return RayOcclusion::default();
        }

        let mut total_length = 0.0;

        for object in &node.objects {
            if object.id() == ignore {
                continue;
            }
            match object {
                SceneObject::Volume(volume) => {
                    if let Some(length) = volume.ray_path_length(ray) {
                        if length > 0.0 {
                            total_length += length;
                        }
                    }
                }
                SceneObject::Occluder(occluder) => {
                    // A hard block makes any remaining length irrelevant
                    if occluder.bounding_box().intersects_ray(ray) {
                        return RayOcclusion {
                            total_length,
                            hard_occluded: true,
                        };
                    }
                }
            }
        }

        if let Some(children) = node.children {
            for child in children {
                let result = self.cast_from(child, ray, ignore);
                if result.hard_occluded {
                    return RayOcclusion {
                        total_length,
                        hard_occluded: true,
                    };
                }
                total_length += result.total_length;
            }
        }

        RayOcclusion {
            total_length,
            hard_occluded: false,
        }
    }

    /// Total nodes in the arena (1 until the first split, then +8 per split)
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Object references held across all nodes (duplicates counted)
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.nodes.iter().map(|node| node.objects.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Transform, Vec3};
    use crate::scene::{FluxVolume, OccluderBox};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn world_bounds() -> Aabb {
        Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(16.0))
    }

    fn occluder_at(position: Vec3) -> SceneObject {
        SceneObject::Occluder(Arc::new(OccluderBox::new(Transform::from_position(position))))
    }

    fn volume_at(position: Vec3) -> Arc<FluxVolume> {
        Arc::new(FluxVolume::new(Transform::from_position(position)))
    }

    #[test]
    fn test_nine_objects_trigger_exactly_one_split() {
        let config = OctreeConfig {
            max_objects_per_leaf: 8,
            max_depth: 1,
        };
        let mut octree = Octree::new(world_bounds(), config);

        let positions: Vec<Vec3> = (0..9).map(|i| Vec3::new(-14.0 + 3.0 * f64::from(i), 2.0, 2.0)).collect();
        for position in &positions {
            octree.insert(occluder_at(*position));
        }

        // One split: the root plus its 8 children
        assert_eq!(octree.node_count(), 9);

        // Every object remains reachable through the correct children
        let probe = ObjectId::next();
        for position in &positions {
            let ray = Ray::new(
                Point3::new(position.x + 0.5, -20.0, position.z + 0.5),
                Vec3::new(0.0, 1.0, 0.0),
            );
            assert!(octree.cast_ray(&ray, probe).hard_occluded);
        }
    }

    #[test]
    fn test_boundary_object_lands_in_all_adjacent_children() {
        let config = OctreeConfig {
            max_objects_per_leaf: 1,
            max_depth: 1,
        };
        let mut octree = Octree::new(world_bounds(), config);

        // Straddles the X split plane at x = 0
        octree.insert(occluder_at(Vec3::new(-0.5, 2.0, 2.0)));
        octree.insert(occluder_at(Vec3::new(10.0, 2.0, 2.0)));
        assert_eq!(octree.node_count(), 9);

        let probe = ObjectId::next();
        // Visible from the -X half
        let left = Ray::new(Point3::new(-0.25, -20.0, 2.5), Vec3::new(0.0, 1.0, 0.0));
        assert!(octree.cast_ray(&left, probe).hard_occluded);
        // And from the +X half
        let right = Ray::new(Point3::new(0.25, -20.0, 2.5), Vec3::new(0.0, 1.0, 0.0));
        assert!(octree.cast_ray(&right, probe).hard_occluded);
    }

    #[test]
    fn test_ray_outside_bounds_is_pruned() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        octree.insert(occluder_at(Vec3::new(0.0, 0.0, 0.0)));

        let ray = Ray::new(Point3::new(0.0, 30.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let result = octree.cast_ray(&ray, ObjectId::next());
        assert!(!result.hard_occluded);
        assert_relative_eq!(result.total_length, 0.0);
    }

    #[test]
    fn test_volume_contributes_path_length() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        let volume = volume_at(Vec3::new(0.0, 2.0, 0.0));
        octree.insert(SceneObject::Volume(volume));

        let ray = Ray::new(Point3::new(0.5, 0.0, 0.5), Vec3::new(0.0, 1.0, 0.0));
        let result = octree.cast_ray(&ray, ObjectId::next());
        assert!(!result.hard_occluded);
        assert_relative_eq!(result.total_length, 1.0);
    }

    #[test]
    fn test_self_exclusion_skips_issuing_volume() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        let volume = volume_at(Vec3::new(0.0, 2.0, 0.0));
        let id = volume.id();
        octree.insert(SceneObject::Volume(volume));

        let ray = Ray::new(Point3::new(0.5, 0.0, 0.5), Vec3::new(0.0, 1.0, 0.0));
        let result = octree.cast_ray(&ray, id);
        assert!(!result.hard_occluded);
        assert_relative_eq!(result.total_length, 0.0);
    }

    #[test]
    fn test_occluder_short_circuits_but_never_false_negative() {
        let mut octree = Octree::new(world_bounds(), OctreeConfig::default());
        octree.insert(SceneObject::Volume(volume_at(Vec3::new(-0.5, 2.0, -0.5))));
        octree.insert(occluder_at(Vec3::new(0.2, 5.0, 0.2)));

        let ray = Ray::new(Point3::new(0.4, 0.0, 0.4), Vec3::new(0.0, 1.0, 0.0));
        assert!(octree.cast_ray(&ray, ObjectId::next()).hard_occluded);

        // A ray dodging the occluder still sees only the volume
        let miss = Ray::new(Point3::new(-0.3, 0.0, -0.3), Vec3::new(0.0, 1.0, 0.0));
        let result = octree.cast_ray(&miss, ObjectId::next());
        assert!(!result.hard_occluded);
        assert_relative_eq!(result.total_length, 1.0);
    }

    #[test]
    fn test_deep_tree_still_finds_occluders() {
        let config = OctreeConfig {
            max_objects_per_leaf: 2,
            max_depth: 5,
        };
        let mut octree = Octree::new(world_bounds(), config);
        for i in 0..12 {
            octree.insert(occluder_at(Vec3::new(
                -12.0 + 2.0 * f64::from(i),
                -12.0 + 2.0 * f64::from(i),
                0.0,
            )));
        }
        assert!(octree.node_count() > 9);

        for i in 0..12 {
            let x = -12.0 + 2.0 * f64::from(i) + 0.5;
            let y = -12.0 + 2.0 * f64::from(i) + 0.5;
            let ray = Ray::new(Point3::new(x, y, -20.0), Vec3::new(0.0, 0.0, 1.0));
            assert!(octree.cast_ray(&ray, ObjectId::next()).hard_occluded);
        }
    }
}
