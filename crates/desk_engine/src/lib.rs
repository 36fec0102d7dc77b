//! # Desk Engine
//!
//! Spatial indexing and transform hierarchy for a small desk scene.
//!
//! ## Features
//!
//! - **Octree**: depth-bounded spatial index for region queries
//! - **Scene Graph**: named transform hierarchy with cached world matrices
//! - **Scene Manager**: per-frame culling and draw submission
//! - **Profiling**: frame, counter and section timing reports
//! - **Configuration**: TOML/RON files with serde defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use desk_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = SceneManager::new(ApplicationConfig::default())?;
//!     scene.build_hierarchy()?;
//!
//!     let mut target = RecordingTarget::new();
//!     scene.render_frame(&mut target);
//!     scene.profiler().log_report();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

pub mod profiling;
pub mod scene;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{EulerTransform, Mat4, Vec3},
            time::Stopwatch,
        },
        core::config::{ApplicationConfig, Config, ConfigError, CullingConfig, EngineConfig, SpatialConfig},
        profiling::{PerformanceProfiler, ProfileReport, ProfilerError},
        scene::{
            DrawCall, DrawTarget, HierarchyError, MeshKind, NodeId, RecordingTarget, SceneGraph,
            SceneManager, SceneNode,
        },
        spatial::{ObjectId, Octree, SceneObject, AABB},
    };
}
