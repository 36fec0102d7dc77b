//! Scene management system
//!
//! Ties the spatial index to the transform hierarchy for the desk scene.
//!
//! ## Architecture
//!
//! ```text
//! Desk layout (objects, groups)
//!      ↓
//! Scene Manager ── Octree (culling)
//!      │        └─ Scene Graph (world transforms)
//!      ↓
//! Draw Target
//! ```

mod desk_layout;
mod scene_graph;
mod scene_manager;
mod scene_node;
mod scene_renderer;

pub use desk_layout::{desk_objects, hierarchy_nodes, DeskObject, HierarchyNodeSpec, MeshKind};
pub use scene_graph::{HierarchyError, SceneGraph};
pub use scene_manager::SceneManager;
pub use scene_node::{NodeId, SceneNode};
pub use scene_renderer::{DrawCall, DrawTarget, RecordingTarget};
