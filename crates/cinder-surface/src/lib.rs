//! Cinder Surface - the drawing capability the simulation renders through
//!
//! The simulation core never talks to a concrete 2D backend. It is handed a
//! `Surface` — a narrow capability offering an extent query, region clears,
//! and radial-gradient rectangle fills — so it can drive a canvas-style
//! renderer in production and a draw-call recorder in tests.

mod recording;

pub use recording::{DrawCall, RecordingSurface};

use cinder_core::Rgba;

/// Blend mode for particle rendering
///
/// Additive blending makes overlapping glows brighten rather than occlude
/// each other; it is set once when the surface is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Additive,
}

/// An axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A two-stop radial gradient brush
///
/// Both stops share the center. Color ramps from `inner` at `inner_radius`
/// to `outer` at `outer_radius`; inside the inner radius the fill is solid
/// `inner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center_x: f32,
    pub center_y: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

/// The drawing capability consumed by the simulation core
///
/// Implementations wrap a real 2D drawing API (an HTML canvas context, a
/// software rasterizer) or record calls for headless testing. All calls are
/// synchronous; the core issues them from a single thread and stores no
/// surface-derived state between frames.
pub trait Surface {
    /// Surface width in pixels
    fn width(&self) -> f32;

    /// Surface height in pixels
    fn height(&self) -> f32;

    /// Select how subsequent fills composite with existing pixels.
    /// Called once at acquisition time, before any drawing.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Erase the given rectangle to transparent/background
    fn clear_region(&mut self, rect: Rect);

    /// Fill `rect` with a radial gradient brush
    fn fill_radial_gradient(&mut self, rect: Rect, gradient: RadialGradient);
}
