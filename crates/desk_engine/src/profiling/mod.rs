//! Frame and section timing
//!
//! The profiler is owned by whoever drives the frame loop. There is no
//! global instance.

mod profiler;

pub use profiler::{PerformanceProfiler, ProfileReport, ProfilerError, SectionReport};
