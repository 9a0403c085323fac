//! Dirty-region bounding box used to limit per-frame clearing

use cinder_surface::Rect;

/// Bounding box of particle positions observed since the last clear
///
/// Starts inverted (min at the surface extent, max at zero) so the first
/// `include` snaps it to a point; `clear_rect` inflates by a margin and
/// clamps to the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirtyRegion {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl DirtyRegion {
    /// An inverted (empty) region for a surface of the given extent
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            x_min: width,
            x_max: 0.0,
            y_min: height,
            y_max: 0.0,
        }
    }

    /// True while no point has been included since the last reset
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Grow the region to cover the given point
    pub fn include(&mut self, x: f32, y: f32) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// The rectangle to erase: the tracked box inflated by `margin` on every
    /// side, clamped to `[0, width] × [0, height]`
    pub fn clear_rect(&self, margin: f32, width: f32, height: f32) -> Rect {
        let x0 = (self.x_min - margin).max(0.0);
        let y0 = (self.y_min - margin).max(0.0);
        let x1 = (self.x_max + margin).min(width);
        let y1 = (self.y_max + margin).min(height);
        Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}
