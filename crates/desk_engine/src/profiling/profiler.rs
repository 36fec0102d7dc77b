//! Performance profiler

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::time::{as_millis_f64, Stopwatch};

/// Profiler errors
#[derive(thiserror::Error, Debug)]
pub enum ProfilerError {
    /// Writing a report failed
    #[error("Failed to write profile report: {0}")]
    Io(#[from] std::io::Error),
}

/// Averaged timing of one named section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    /// Section name
    pub name: String,
    /// Average duration per call in milliseconds
    pub average_ms: f64,
    /// Completed calls
    pub calls: u32,
}

/// Snapshot of the profiler state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Frames completed since the last reset
    pub frame: u64,
    /// Instantaneous frames per second of the last frame
    pub fps: f64,
    /// Duration of the last frame in milliseconds
    pub frame_time_ms: f64,
    /// Objects registered with the index
    pub total_objects: usize,
    /// Objects that passed culling
    pub visible_objects: usize,
    /// Draw calls issued in the current frame
    pub draw_calls: u32,
    /// Mean frame time since the last reset, if any frame completed
    pub average_frame_time_ms: Option<f64>,
    /// Frames per second derived from the mean frame time
    pub average_fps: Option<f64>,
    /// Sections with at least one completed call, sorted by name
    pub sections: Vec<SectionReport>,
}

impl ProfileReport {
    /// Objects rejected by culling
    pub fn culled_objects(&self) -> usize {
        self.total_objects.saturating_sub(self.visible_objects)
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Performance Report ===")?;
        writeln!(f, "Frame: {}", self.frame)?;
        writeln!(f, "FPS: {:.2}", self.fps)?;
        writeln!(f, "Frame Time: {:.2} ms", self.frame_time_ms)?;
        writeln!(f, "Total Objects: {}", self.total_objects)?;
        writeln!(f, "Visible Objects: {} (culled: {})", self.visible_objects, self.culled_objects())?;
        writeln!(f, "Draw Calls: {}", self.draw_calls)?;
        if let (Some(avg_time), Some(avg_fps)) = (self.average_frame_time_ms, self.average_fps) {
            writeln!(f, "Average Frame Time: {:.2} ms", avg_time)?;
            writeln!(f, "Average FPS: {:.2}", avg_fps)?;
        }
        if !self.sections.is_empty() {
            writeln!(f, "Section Timings:")?;
            for section in &self.sections {
                writeln!(
                    f,
                    "  {}: {:.3} ms (avg over {} calls)",
                    section.name, section.average_ms, section.calls
                )?;
            }
        }
        Ok(())
    }
}

/// Collects frame timing, scene counters and named section timings
#[derive(Debug, Clone)]
pub struct PerformanceProfiler {
    enabled: bool,
    frame_timer: Stopwatch,
    frame_time_ms: f64,
    fps: f64,
    object_count: usize,
    visible_objects: usize,
    draw_calls: u32,
    sections: BTreeMap<String, Stopwatch>,
}

impl Default for PerformanceProfiler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PerformanceProfiler {
    /// Create a profiler; a disabled profiler ignores timing calls but
    /// still records counters
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            frame_timer: Stopwatch::new(),
            frame_time_ms: 0.0,
            fps: 0.0,
            object_count: 0,
            visible_objects: 0,
            draw_calls: 0,
            sections: BTreeMap::new(),
        }
    }

    /// Check if timing is collected
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start timing a frame and zero the per-frame draw call counter
    pub fn start_frame(&mut self) {
        self.draw_calls = 0;
        if self.enabled {
            self.frame_timer.start();
        }
    }

    /// Finish the current frame
    pub fn end_frame(&mut self) {
        let Some(lap) = self.frame_timer.stop() else {
            return;
        };
        self.frame_time_ms = as_millis_f64(lap);
        if self.frame_time_ms > 0.0 {
            self.fps = 1000.0 / self.frame_time_ms;
        }
    }

    /// Record how many objects the scene holds
    pub fn record_object_count(&mut self, count: usize) {
        self.object_count = count;
    }

    /// Record how many objects passed culling
    pub fn record_visible_objects(&mut self, count: usize) {
        self.visible_objects = count;
    }

    /// Count one draw call in the current frame
    pub fn record_draw_call(&mut self) {
        self.draw_calls += 1;
    }

    /// Begin timing a named section
    pub fn start_section(&mut self, name: &str) {
        if !self.enabled {
            return;
        }
        match self.sections.get_mut(name) {
            Some(timer) => timer.start(),
            None => {
                self.sections.insert(name.to_string(), Stopwatch::start_new());
            }
        }
    }

    /// End timing a named section; unknown or idle sections are ignored
    pub fn end_section(&mut self, name: &str) {
        if let Some(timer) = self.sections.get_mut(name) {
            if timer.stop().is_none() {
                log::trace!("Section '{}' ended without being started", name);
            }
        }
    }

    /// Duration of the last completed frame in milliseconds
    pub fn frame_time_ms(&self) -> f64 {
        self.frame_time_ms
    }

    /// Frames per second of the last completed frame
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Frames completed since the last reset
    pub fn frame_count(&self) -> u64 {
        u64::from(self.frame_timer.laps())
    }

    /// Draw calls issued in the current frame
    pub fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    /// Objects recorded for the current frame
    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Visible objects recorded for the current frame
    pub fn visible_objects(&self) -> usize {
        self.visible_objects
    }

    /// Mean frame time since the last reset
    pub fn average_frame_time_ms(&self) -> Option<f64> {
        let frames = self.frame_timer.laps();
        (frames > 0).then(|| as_millis_f64(self.frame_timer.elapsed()) / f64::from(frames))
    }

    /// Build a report of the current state
    pub fn report(&self) -> ProfileReport {
        let average_frame_time_ms = self.average_frame_time_ms();
        let average_fps = average_frame_time_ms.filter(|&ms| ms > 0.0).map(|ms| 1000.0 / ms);

        let sections = self
            .sections
            .iter()
            .filter(|(_, timer)| timer.laps() > 0)
            .map(|(name, timer)| SectionReport {
                name: name.clone(),
                average_ms: timer.elapsed_millis() / f64::from(timer.laps()),
                calls: timer.laps(),
            })
            .collect();

        ProfileReport {
            frame: self.frame_count(),
            fps: self.fps,
            frame_time_ms: self.frame_time_ms,
            total_objects: self.object_count,
            visible_objects: self.visible_objects,
            draw_calls: self.draw_calls,
            average_frame_time_ms,
            average_fps,
            sections,
        }
    }

    /// Log the current report at info level
    pub fn log_report(&self) {
        for line in self.report().to_string().lines() {
            log::info!("{}", line);
        }
    }

    /// Append the current report to a text file, creating it if needed
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<(), ProfilerError> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        writeln!(file, "{}", self.report())?;
        Ok(())
    }

    /// Clear accumulated frame and section timings
    ///
    /// The last frame's values and the counters are kept until they are
    /// next recorded.
    pub fn reset(&mut self) {
        self.frame_timer.reset();
        self.sections.clear();
    }
}
