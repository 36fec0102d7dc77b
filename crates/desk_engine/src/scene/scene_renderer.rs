//! Draw submission
//!
//! The scene manager decides what to draw and with which model matrix. The
//! backend behind a [`DrawTarget`] decides how.

use crate::foundation::math::Mat4;
use crate::spatial::ObjectId;
use super::desk_layout::MeshKind;

/// A single mesh draw for one visible object
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Object being drawn
    pub object_id: ObjectId,
    /// Mesh primitive
    pub mesh: MeshKind,
    /// Model-to-world matrix
    pub model: Mat4,
    /// Use the reduced-detail variant of the mesh
    pub low_detail: bool,
}

/// Receiver of draw calls for a frame
pub trait DrawTarget {
    /// Called once before the first draw of a frame
    fn begin_frame(&mut self, _frame: u64) {}

    /// Submit a draw
    fn draw(&mut self, call: DrawCall);

    /// Called once after the last draw of a frame
    fn end_frame(&mut self) {}
}

/// Draw target that keeps the calls of the last frame
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    frame: u64,
    calls: Vec<DrawCall>,
    frames_completed: u64,
}

impl RecordingTarget {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the current (or last completed) frame
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Index of the current frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of frames that reached `end_frame`
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    /// Look up the draw for an object in the current frame
    pub fn call_for(&self, object_id: ObjectId) -> Option<&DrawCall> {
        self.calls.iter().find(|c| c.object_id == object_id)
    }
}

impl DrawTarget for RecordingTarget {
    fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
        self.calls.clear();
    }

    fn draw(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    fn end_frame(&mut self) {
        self.frames_completed += 1;
    }
}
