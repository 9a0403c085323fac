//! Particle system: spawn, per-frame advance, retirement, dirty tracking

use crate::clock::FrameClock;
use crate::config::SystemConfig;
use crate::dirty::DirtyRegion;
use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::Result;
use cinder_surface::{BlendMode, Surface};

/// Particles at or below this opacity are retired
pub const ALPHA_CUTOFF: f32 = 0.1;

/// Owns the live particle set and drives the update + render + cull pipeline
///
/// Velocities are in surface units per second; each advance scales physics
/// by the wall-clock time since the previous advance, expressed as a frame
/// multiplier against the configured nominal frame rate, so calling twice
/// as often over the same span produces the same net motion.
pub struct ParticleSystem {
    config: SystemConfig,
    particles: Vec<Particle>,
    rng: ParticleRng,
    clock: FrameClock,
    dirty: DirtyRegion,
}

impl ParticleSystem {
    /// Create a system from a validated configuration
    pub fn new(config: SystemConfig) -> Result<Self> {
        Self::with_seed(config, 0x9E37_79B9)
    }

    /// Create a system with an explicit RNG seed for reproducible effects
    pub fn with_seed(config: SystemConfig, seed: u32) -> Result<Self> {
        config.validate()?;
        let clock = FrameClock::new(config.frame_rate as f64);
        Ok(Self {
            particles: Vec::new(),
            rng: ParticleRng::new(seed),
            clock,
            // No surface bound yet; an unbounded inverted box stays empty
            // until the first step resets it from the real extent
            dirty: DirtyRegion::empty(f32::INFINITY, f32::INFINITY),
            config,
        })
    }

    /// Bind the drawing surface: select additive blending so overlapping
    /// glows brighten, and seed the dirty region from the surface extent.
    /// Call once before the first `advance_frame`.
    pub fn initialize(&mut self, surface: &mut dyn Surface) {
        surface.set_blend_mode(BlendMode::Additive);
        self.dirty = DirtyRegion::empty(surface.width(), surface.height());
        println!(
            "[particles] system ready ({}x{} surface)",
            surface.width(),
            surface.height()
        );
    }

    /// Append `count` particles at the emitter origin with randomized
    /// velocity, mass, and opacity. `spawn(0)` is a no-op.
    pub fn spawn(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle {
                x: self.config.origin.x,
                y: self.config.origin.y,
                velocity_x: self
                    .rng
                    .range(self.config.velocity_x_min, self.config.velocity_x_max),
                velocity_y: self
                    .rng
                    .range(self.config.velocity_y_min, self.config.velocity_y_max),
                mass: self.rng.range(self.config.mass_min, self.config.mass_max),
                alpha: self.rng.next_f32(),
                burn_rate: self.config.burn_rate,
                sharpness: self.config.sharpness,
                color: self.config.color,
            };
            self.particles.push(particle);
        }
    }

    /// Advance by the measured wall-clock time since the previous call and
    /// render one frame
    pub fn advance_frame(&mut self, surface: &mut dyn Surface) {
        let elapsed = self.clock.tick();
        self.step(surface, elapsed);
    }

    /// Advance by an explicit elapsed time in seconds
    ///
    /// `advance_frame` delegates here with the clock's measured delta;
    /// drivers with their own timing (and tests) call this directly.
    /// A non-positive elapsed time is treated as one nominal frame.
    pub fn step(&mut self, surface: &mut dyn Surface, elapsed_secs: f64) {
        let interval = self.clock.nominal_interval();
        // Frame multiplier: elapsed time in units of the nominal interval
        let m = if elapsed_secs > 0.0 {
            (elapsed_secs / interval) as f32
        } else {
            1.0
        };
        // Elapsed seconds after the zero-delta override, for integration
        let dt = m * interval as f32;

        let width = surface.width();
        let height = surface.height();

        if self.config.dirty_regions {
            if !self.dirty.is_empty() {
                // Twice the largest mass guarantees the widest glow is erased
                let margin = self.config.mass_max * 2.0;
                surface.clear_region(self.dirty.clear_rect(margin, width, height));
            }
            self.dirty = DirtyRegion::empty(width, height);
        }

        let gravity = self.config.gravity;
        let friction_decay = (1.0 - self.config.friction).powf(m);
        let track_dirty = self.config.dirty_regions;

        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];

            // Displacement uses this tick's pre-update velocity; friction
            // and gravity shape the next tick's motion
            p.x += p.velocity_x * p.mass * dt;
            p.y += p.velocity_y * p.mass * dt;
            p.velocity_x *= friction_decay;
            p.velocity_y *= friction_decay;
            p.velocity_y += gravity * m;
            p.alpha *= p.burn_rate.powf(m);

            p.draw(surface);

            let (x, y, alpha) = (p.x, p.y, p.alpha);
            // Edge-exact positions stay live; only strictly outside retires
            let out_of_bounds = x < 0.0 || x > width || y < 0.0 || y > height;

            if alpha <= ALPHA_CUTOFF || out_of_bounds {
                self.particles.swap_remove(i);
                // Don't advance i — the swapped-in particle hasn't had its
                // turn this frame
            } else {
                if track_dirty {
                    self.dirty.include(x, y);
                }
                i += 1;
            }
        }
    }

    /// Number of live particles
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Read access to the live particle set
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Drop every live particle (e.g. on a scene transition)
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_core::{Color, Vec2};
    use cinder_surface::{DrawCall, RecordingSurface};

    /// 16.7ms, one nominal frame at 60 FPS give or take
    const FRAME: f64 = 0.0167;

    fn quiet_config() -> SystemConfig {
        SystemConfig {
            gravity: 0.5,
            friction: 0.02,
            mass_min: 30.0,
            mass_max: 60.0,
            burn_rate: 0.95,
            sharpness: 0.4,
            velocity_x_min: 0.0,
            velocity_x_max: 0.0,
            velocity_y_min: 0.0,
            velocity_y_max: 0.0,
            frame_rate: 60.0,
            color: Color::new(255, 80, 30),
            origin: Vec2::new(100.0, 100.0),
            dirty_regions: false,
        }
    }

    fn system(config: SystemConfig) -> ParticleSystem {
        ParticleSystem::with_seed(config, 42).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SystemConfig {
            mass_min: 60.0,
            mass_max: 30.0,
            ..quiet_config()
        };
        assert!(ParticleSystem::new(config).is_err());
    }

    #[test]
    fn spawn_count_and_origin() {
        let mut sys = system(quiet_config());
        sys.spawn(3);
        assert_eq!(sys.live_count(), 3);
        for p in sys.particles() {
            assert_eq!(p.x, 100.0);
            assert_eq!(p.y, 100.0);
            assert!(p.mass >= 30.0 && p.mass < 60.0);
            assert_eq!(p.burn_rate, 0.95);
            assert_eq!(p.color, Color::new(255, 80, 30));
        }

        sys.spawn(0);
        assert_eq!(sys.live_count(), 3);
    }

    #[test]
    fn initialize_sets_additive_blending() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let mut sys = system(quiet_config());
        sys.initialize(&mut surface);
        assert_eq!(
            surface.calls()[0],
            DrawCall::SetBlendMode(BlendMode::Additive)
        );
    }

    #[test]
    fn gravity_accelerates_and_alpha_decays() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let mut sys = system(quiet_config());
        sys.initialize(&mut surface);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;

        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 1);
        let vy1 = sys.particles[0].velocity_y;
        let alpha1 = sys.particles[0].alpha;
        assert!(vy1 > 0.0);
        assert!(alpha1 < 0.9);

        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 1);
        let vy2 = sys.particles[0].velocity_y;
        let alpha2 = sys.particles[0].alpha;
        assert!(vy2 > vy1);
        assert!(alpha2 < alpha1);
    }

    #[test]
    fn alpha_is_monotonically_non_increasing() {
        let mut surface = RecordingSurface::new(2000.0, 2000.0);
        let config = SystemConfig {
            gravity: 0.0,
            origin: Vec2::new(1000.0, 1000.0),
            burn_rate: 0.97,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = 1.0;

        let mut prev = 1.0;
        for _ in 0..50 {
            sys.step(&mut surface, FRAME);
            if sys.live_count() == 0 {
                break;
            }
            let alpha = sys.particles[0].alpha;
            assert!(alpha <= prev);
            prev = alpha;
        }
    }

    #[test]
    fn split_interval_matches_single_step_without_forces() {
        // With gravity and friction zero, displacement is linear in elapsed
        // time and alpha decay is exponential, so splitting an interval must
        // reproduce the single-step result
        let config = SystemConfig {
            gravity: 0.0,
            friction: 0.0,
            velocity_x_min: 2.0,
            velocity_x_max: 2.0,
            velocity_y_min: -1.0,
            velocity_y_max: -1.0,
            origin: Vec2::new(500.0, 500.0),
            ..quiet_config()
        };
        let mut surface = RecordingSurface::new(1000.0, 1000.0);

        let mut whole = system(config.clone());
        whole.spawn(1);
        whole.particles[0].alpha = 0.9;
        whole.step(&mut surface, 2.0 * FRAME);

        let mut halves = system(config);
        halves.spawn(1);
        halves.particles[0].alpha = 0.9;
        halves.step(&mut surface, FRAME);
        halves.step(&mut surface, FRAME);

        let a = &whole.particles[0];
        let b = &halves.particles[0];
        assert!((a.x - b.x).abs() < 1e-3);
        assert!((a.y - b.y).abs() < 1e-3);
        assert!((a.alpha - b.alpha).abs() < 1e-4);
    }

    #[test]
    fn split_interval_matches_friction_decay() {
        // (1-f)^(m1+m2) == (1-f)^m1 * (1-f)^m2 up to rounding
        let config = SystemConfig {
            gravity: 0.0,
            friction: 0.05,
            velocity_x_min: 3.0,
            velocity_x_max: 3.0,
            origin: Vec2::new(500.0, 500.0),
            ..quiet_config()
        };
        let mut surface = RecordingSurface::new(1000.0, 1000.0);

        let mut whole = system(config.clone());
        whole.spawn(1);
        whole.particles[0].alpha = 0.9;
        whole.step(&mut surface, 2.0 * FRAME);

        let mut halves = system(config);
        halves.spawn(1);
        halves.particles[0].alpha = 0.9;
        halves.step(&mut surface, FRAME);
        halves.step(&mut surface, FRAME);

        let a = &whole.particles[0];
        let b = &halves.particles[0];
        assert!((a.velocity_x - b.velocity_x).abs() < 1e-4);
        assert!((a.alpha - b.alpha).abs() < 1e-4);
    }

    #[test]
    fn faded_particle_is_drawn_once_more_then_retired() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let config = SystemConfig {
            gravity: 0.0,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = 0.05;

        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 0);
        assert_eq!(surface.fill_count(), 1);

        // Gone for good: nothing further is drawn
        sys.step(&mut surface, FRAME);
        assert_eq!(surface.fill_count(), 1);
    }

    #[test]
    fn alpha_exactly_at_cutoff_is_retired() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let config = SystemConfig {
            gravity: 0.0,
            burn_rate: 1.0,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = ALPHA_CUTOFF;

        // burn_rate 1.0 leaves alpha at exactly the cutoff after decay;
        // the boundary itself counts as faded
        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 0);
    }

    #[test]
    fn step_before_initialize_issues_no_clear() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let config = SystemConfig {
            dirty_regions: true,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;

        // Nothing has been drawn yet, so the first frame has nothing to erase
        sys.step(&mut surface, FRAME);
        assert!(!surface
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::ClearRegion(_))));
    }

    #[test]
    fn out_of_bounds_particle_is_retired_regardless_of_alpha() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let config = SystemConfig {
            gravity: 0.0,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;
        sys.particles[0].x = 201.0;

        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 0);
    }

    #[test]
    fn edge_exact_position_stays_live() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let config = SystemConfig {
            gravity: 0.0,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;
        sys.particles[0].x = 200.0;

        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 1);
    }

    #[test]
    fn retirement_does_not_skip_the_swapped_in_particle() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let config = SystemConfig {
            gravity: 0.0,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.spawn(4);
        for p in &mut sys.particles {
            p.alpha = 0.05;
        }

        // Every particle fades below the cutoff this frame; each must still
        // be drawn exactly once and then removed
        sys.step(&mut surface, FRAME);
        assert_eq!(sys.live_count(), 0);
        assert_eq!(surface.fill_count(), 4);
    }

    #[test]
    fn dirty_region_clears_previous_frame_with_margin() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let config = SystemConfig {
            gravity: 0.0,
            burn_rate: 1.0,
            origin: Vec2::new(200.0, 200.0),
            dirty_regions: true,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.initialize(&mut surface);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;

        // First frame: nothing accumulated yet, so no clear is issued
        surface.reset();
        sys.step(&mut surface, FRAME);
        assert_eq!(surface.calls().len(), 1);
        assert!(matches!(
            surface.calls()[0],
            DrawCall::FillRadialGradient { .. }
        ));

        // Second frame: the clear covers the particle's last position
        // inflated by 2x max mass
        surface.reset();
        sys.step(&mut surface, FRAME);
        let DrawCall::ClearRegion(rect) = &surface.calls()[0] else {
            panic!("expected a clear first, got {:?}", surface.calls()[0]);
        };
        let margin = 2.0 * 60.0;
        assert_eq!(rect.x, 200.0 - margin);
        assert_eq!(rect.y, 200.0 - margin);
        assert_eq!(rect.width, 2.0 * margin);
        assert_eq!(rect.height, 2.0 * margin);
    }

    #[test]
    fn dirty_tracking_disabled_issues_no_clears() {
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let config = SystemConfig {
            gravity: 0.0,
            burn_rate: 1.0,
            origin: Vec2::new(200.0, 200.0),
            dirty_regions: false,
            ..quiet_config()
        };
        let mut sys = system(config);
        sys.initialize(&mut surface);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;

        sys.step(&mut surface, FRAME);
        sys.step(&mut surface, FRAME);
        assert!(!surface
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::ClearRegion(_))));
    }

    #[test]
    fn advance_frame_first_call_acts_as_one_nominal_frame() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let mut sys = system(quiet_config());
        sys.initialize(&mut surface);
        sys.spawn(1);
        sys.particles[0].alpha = 0.9;

        sys.advance_frame(&mut surface);
        // m == 1 on the first call: exactly one burn_rate application
        let expected = 0.9 * 0.95;
        assert!((sys.particles[0].alpha - expected).abs() < 1e-4);
        assert!((sys.particles[0].velocity_y - 0.5).abs() < 1e-4);
    }

    #[test]
    fn clear_drops_all_particles() {
        let mut sys = system(quiet_config());
        sys.spawn(5);
        sys.clear();
        assert_eq!(sys.live_count(), 0);
    }
}
