//! Particle state and its radial-gradient draw routine

use cinder_core::{Color, Rgba};
use cinder_surface::{RadialGradient, Rect, Surface};

/// Smallest rendered diameter, so tiny masses still produce a visible blob
pub const MIN_RENDER_SIZE: f32 = 2.0;

/// Outer gradient stop: fixed dark-red tone, fully transparent
pub const OUTER_FADE: Rgba = Rgba::new(50, 0, 30, 0.0);

/// One simulated glowing element
///
/// Shape is fixed at spawn (`mass`, `burn_rate`, `sharpness`, `color`);
/// position, velocity, and `alpha` evolve each frame. `mass` doubles as
/// the rendered diameter.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub mass: f32,
    /// Current opacity in [0, 1]; decays multiplicatively, never increases
    pub alpha: f32,
    /// Per-nominal-frame alpha decay factor, in (0, 1]
    pub burn_rate: f32,
    /// Gradient core fraction: 0 = soft full glow, 1 = near-solid disc
    pub sharpness: f32,
    pub color: Color,
}

impl Particle {
    /// Rendered diameter in pixels
    pub fn size(&self) -> f32 {
        self.mass.max(MIN_RENDER_SIZE)
    }

    /// Current color with opacity applied; pure function of state
    pub fn color_with_alpha(&self) -> Rgba {
        self.color.with_alpha(self.alpha)
    }

    /// Draw this particle as one gradient-filled rect. Does not mutate state.
    ///
    /// The gradient is centered on the bounding box; the inner stop sits at
    /// `sharpness` of the radius in the particle's current color, the outer
    /// stop fades to transparent dark red at the full radius.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let size = self.size();
        let half = size / 2.0;
        let x = self.x.trunc();
        let y = self.y.trunc();

        let gradient = RadialGradient {
            center_x: x + half,
            center_y: y + half,
            inner_radius: half * self.sharpness,
            outer_radius: half,
            inner: self.color_with_alpha(),
            outer: OUTER_FADE,
        };
        surface.fill_radial_gradient(Rect::new(x, y, size, size), gradient);
    }
}
