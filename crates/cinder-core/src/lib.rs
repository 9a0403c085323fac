//! Cinder Core - Foundational types for the cinder particle engine
//!
//! This crate provides the core types that the other cinder crates depend on:
//! - `Vec2` - Surface-coordinate vector
//! - `Color`, `Rgba` - 8-bit channel colors, with and without opacity
//! - Error types and Result alias

mod error;
mod types;

pub use error::{CinderError, Result};
pub use types::{Color, Rgba, Vec2};
