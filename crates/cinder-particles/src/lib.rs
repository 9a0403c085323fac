//! Cinder Particles - 2D glow-particle simulation
//!
//! Spawns particles with randomized kinematics at a fixed emitter origin and
//! advances them each frame with:
//! - wall-clock frame-rate correction (time-based, not call-rate-based)
//! - exponential friction and alpha decay, unconditional gravity
//! - one radial-gradient blob draw per particle through an injected `Surface`
//! - retirement on fade-out or leaving the surface, swap-remove compaction
//! - optional dirty-region clearing to limit redraw cost

pub mod clock;
pub mod config;
pub mod dirty;
pub mod particle;
pub mod rand;
pub mod system;

pub use clock::FrameClock;
pub use config::SystemConfig;
pub use dirty::DirtyRegion;
pub use particle::{Particle, MIN_RENDER_SIZE, OUTER_FADE};
pub use rand::ParticleRng;
pub use system::{ParticleSystem, ALPHA_CUTOFF};
