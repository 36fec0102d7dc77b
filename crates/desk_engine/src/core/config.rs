//! # Unified Configuration System
//!
//! All configuration structures for the desk scene live here:
//!
//! - **Engine Config**: logging, profiling and frame loop settings
//! - **Spatial Config**: extent and depth of the octree root cube
//! - **Culling Config**: the culling region and per-frame index policy
//! - **Application Config**: the top-level aggregate loaded from disk
//!
//! Every section has serde defaults, so a config file only needs the keys it
//! wants to override.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};
use crate::spatial::AABB;

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Logging, profiling and frame loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter (overridable through `RUST_LOG`)
    pub log_level: String,
    /// Whether the profiler collects timings
    pub enable_profiling: bool,
    /// Append profiler reports to this file when set
    pub profile_report_path: Option<String>,
    /// Log a profiler report every N frames (0 = only at shutdown)
    pub report_interval_frames: u32,
    /// Number of frames the headless loop renders
    pub frame_count: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_profiling: true,
            profile_report_path: None,
            report_interval_frames: 60,
            frame_count: 120,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable profiling
    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.enable_profiling = enabled;
        self
    }

    /// Append profiler reports to a file
    pub fn with_profile_report_path(mut self, path: impl Into<String>) -> Self {
        self.profile_report_path = Some(path.into());
        self
    }

    /// Set the number of frames to render
    pub fn with_frame_count(mut self, frames: u32) -> Self {
        self.frame_count = frames;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Spatial Configuration
///
/// The octree root cube. It is fixed for the lifetime of the index, so it
/// should cover the whole workspace of the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Center of the root cube
    pub center: Vec3,
    /// Half the edge length of the root cube
    pub half_size: f32,
    /// Depth at which nodes become leaves (root = 0)
    pub max_depth: u32,
}

impl SpatialConfig {
    /// Deepest tree accepted by validation
    pub const MAX_SUPPORTED_DEPTH: u32 = 16;

    /// Create a spatial configuration
    pub fn new(center: Vec3, half_size: f32, max_depth: u32) -> Self {
        Self {
            center,
            half_size,
            max_depth,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !utils::is_finite(&self.center) {
            return Err(ConfigError::Invalid(format!("octree center is not finite: {:?}", self.center)));
        }
        if !(self.half_size.is_finite() && self.half_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "octree half_size must be positive, got {}",
                self.half_size
            )));
        }
        if self.max_depth > Self::MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "octree max_depth {} exceeds {}",
                self.max_depth,
                Self::MAX_SUPPORTED_DEPTH
            )));
        }
        Ok(())
    }

    /// Bounds of the root cube
    pub fn root_bounds(&self) -> AABB {
        AABB::from_center_extents(self.center, Vec3::repeat(self.half_size))
    }
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 10.0, 5)
    }
}

/// # Culling Configuration
///
/// The camera volume is approximated by a static box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Minimum corner of the culling region
    pub region_min: Vec3,
    /// Maximum corner of the culling region
    pub region_max: Vec3,
    /// Clear the index before re-registering objects each frame
    pub clear_index_each_frame: bool,
    /// Camera position used for level-of-detail selection
    pub camera_position: Vec3,
    /// Spheres farther than this from the camera use the low-detail mesh
    pub low_detail_distance: f32,
}

impl CullingConfig {
    /// Set the culling region
    pub fn with_region(mut self, min: Vec3, max: Vec3) -> Self {
        self.region_min = min;
        self.region_max = max;
        self
    }

    /// Keep (or stop keeping) duplicates across frames
    pub fn with_clear_each_frame(mut self, enabled: bool) -> Self {
        self.clear_index_each_frame = enabled;
        self
    }

    /// The culling region as a box
    pub fn region(&self) -> AABB {
        AABB::new(self.region_min, self.region_max)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.region_min, self.region_max);
        if !(utils::is_finite(&min) && utils::is_finite(&max)) {
            return Err(ConfigError::Invalid("culling region is not finite".to_string()));
        }
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(ConfigError::Invalid(format!(
                "culling region min {:?} exceeds max {:?}",
                min, max
            )));
        }
        if self.low_detail_distance.is_nan() || self.low_detail_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "low_detail_distance must be non-negative, got {}",
                self.low_detail_distance
            )));
        }
        Ok(())
    }
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            region_min: Vec3::new(-8.0, -2.0, -8.0),
            region_max: Vec3::new(8.0, 8.0, 8.0),
            clear_index_each_frame: true,
            camera_position: Vec3::zeros(),
            low_detail_distance: 6.0,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Octree configuration
    pub spatial: SpatialConfig,
    /// Culling configuration
    pub culling: CullingConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spatial.validate()?;
        self.culling.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_desk_workspace() {
        let config = ApplicationConfig::default();
        assert_eq!(config.spatial.center, Vec3::zeros());
        assert_eq!(config.spatial.half_size, 10.0);
        assert_eq!(config.spatial.max_depth, 5);
        assert_eq!(config.culling.region_min, Vec3::new(-8.0, -2.0, -8.0));
        assert_eq!(config.culling.region_max, Vec3::new(8.0, 8.0, 8.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [spatial]
            half_size = 25.0

            [engine]
            log_level = "debug"
        "#;
        let config: ApplicationConfig = toml::from_str(text).unwrap();
        assert_eq!(config.spatial.half_size, 25.0);
        assert_eq!(config.spatial.max_depth, 5);
        assert_eq!(config.engine.log_level, "debug");
        assert_eq!(config.culling, CullingConfig::default());
    }

    #[test]
    fn test_vectors_parse_from_arrays() {
        let text = r#"
            [culling]
            region_min = [-1.0, -1.0, -1.0]
            region_max = [1.0, 2.0, 3.0]
        "#;
        let config: ApplicationConfig = toml::from_str(text).unwrap();
        assert_eq!(config.culling.region_max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_frame_count(3).with_profile_report_path("perf.txt"),
            ..Default::default()
        };
        let text = ron::to_string(&config).unwrap();
        let back: ApplicationConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = std::env::temp_dir().join(format!("desk_engine_config_{}.toml", std::process::id()));
        let config = ApplicationConfig {
            spatial: SpatialConfig::new(Vec3::new(1.0, 0.0, 0.0), 4.0, 3),
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();
        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_bad_spatial_values() {
        assert!(SpatialConfig::new(Vec3::zeros(), 0.0, 5).validate().is_err());
        assert!(SpatialConfig::new(Vec3::zeros(), -3.0, 5).validate().is_err());
        assert!(SpatialConfig::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, 5).validate().is_err());
        assert!(SpatialConfig::new(Vec3::zeros(), 1.0, 99).validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_region() {
        let culling = CullingConfig::default().with_region(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros());
        assert!(matches!(culling.validate(), Err(ConfigError::Invalid(_))));
    }
}
