//! # Core Engine Module
//!
//! Shared configuration used by every subsystem of the desk scene.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the engine, index and culling
//! - **Foundation**: Low-level utilities (math, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    SpatialConfig,
    CullingConfig,
    Config,
    ConfigError,
};
