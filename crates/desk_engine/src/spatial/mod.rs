//! Spatial partitioning data structures
//!
//! Provides the octree index used for region queries over the scene's
//! objects, plus the bounding box type shared with the culling stage.

mod aabb;
mod octree;

pub use aabb::AABB;
pub use octree::{ObjectId, Octree, OctreeNode, SceneObject};
