//! Desk scene demo application
//!
//! Builds the desk scene, runs a fixed number of headless frames through the
//! culling and hierarchy pipeline, and reports frame statistics.
//!
//! ```text
//! desk_scene [config.toml | config.ron]
//! ```

use desk_engine::foundation::logging;
use desk_engine::prelude::*;

/// Application errors
#[derive(thiserror::Error, Debug)]
pub enum DeskAppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scene hierarchy could not be built
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// A profiler report could not be written
    #[error("Profiler error: {0}")]
    Profiler(#[from] ProfilerError),
}

/// Draw target that logs every draw call instead of issuing GPU work
#[derive(Default)]
struct LoggingTarget {
    frame: u64,
    draws: usize,
}

impl DrawTarget for LoggingTarget {
    fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
        self.draws = 0;
    }

    fn draw(&mut self, call: DrawCall) {
        self.draws += 1;
        log::trace!(
            "frame {} draw object {} ({:?}{}) at {:?}",
            self.frame,
            call.object_id,
            call.mesh,
            if call.low_detail { ", low detail" } else { "" },
            desk_engine::foundation::math::utils::transform_origin(&call.model)
        );
    }

    fn end_frame(&mut self) {
        log::debug!("frame {} submitted {} draws", self.frame, self.draws);
    }
}

fn load_config() -> Result<ApplicationConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(path),
        None => Ok(ApplicationConfig::default()),
    }
}

fn report(scene: &SceneManager, report_path: Option<&str>) -> Result<(), DeskAppError> {
    scene.profiler().log_report();
    if let Some(path) = report_path {
        scene.profiler().write_report(path)?;
    }
    Ok(())
}

fn run(config: ApplicationConfig) -> Result<(), DeskAppError> {
    let engine = config.engine.clone();
    let mut scene = SceneManager::new(config)?;
    scene.build_hierarchy()?;

    let mut target = LoggingTarget::default();
    let interval = u64::from(engine.report_interval_frames);

    log::info!("Rendering {} frames", engine.frame_count);
    for _ in 0..engine.frame_count {
        scene.render_frame(&mut target);

        if interval > 0 && scene.frame() % interval == 0 {
            report(&scene, engine.profile_report_path.as_deref())?;
        }
    }

    if interval == 0 || scene.frame() % interval != 0 {
        report(&scene, engine.profile_report_path.as_deref())?;
    }
    Ok(())
}

fn main() -> Result<(), DeskAppError> {
    let config = load_config()?;
    logging::init_with_filter(&config.engine.log_level);

    log::info!("Starting desk scene");
    if let Err(e) = run(config) {
        log::error!("Desk scene failed: {}", e);
        return Err(e);
    }
    log::info!("Desk scene finished");
    Ok(())
}
