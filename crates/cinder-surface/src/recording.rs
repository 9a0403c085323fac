//! Recording surface for headless simulation runs
//!
//! Captures every draw call instead of rasterizing, so tests and tools can
//! assert on exactly what the simulation asked the backend to do.

use crate::{BlendMode, RadialGradient, Rect, Surface};

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetBlendMode(BlendMode),
    ClearRegion(Rect),
    FillRadialGradient { rect: Rect, gradient: RadialGradient },
}

/// A `Surface` that records draw calls instead of drawing
pub struct RecordingSurface {
    width: f32,
    height: f32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// All calls recorded since construction or the last `reset`
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of gradient fills recorded (one per particle drawn)
    pub fn fill_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRadialGradient { .. }))
            .count()
    }

    /// Drop the recorded call list, keeping the extent
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(DrawCall::SetBlendMode(mode));
    }

    fn clear_region(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClearRegion(rect));
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: RadialGradient) {
        self.calls.push(DrawCall::FillRadialGradient { rect, gradient });
    }
}
