//! System configuration (optionally parsed from TOML) with validation

use cinder_core::{CinderError, Color, Result, Vec2};

/// Configuration for a `ParticleSystem`
///
/// All values are plain numerics supplied at construction. Velocity ranges
/// are in surface units per second; `gravity` and `friction` are unitless
/// per-nominal-frame coefficients; `burn_rate` is the per-nominal-frame
/// alpha decay factor.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Downward acceleration applied to velocity_y each nominal frame
    pub gravity: f32,
    /// Exponential velocity decay rate in [0, 1]
    pub friction: f32,
    pub mass_min: f32,
    pub mass_max: f32,
    /// Per-nominal-frame multiplicative alpha decay, in (0, 1]
    pub burn_rate: f32,
    /// Radial-gradient core fraction, in [0, 1]
    pub sharpness: f32,
    pub velocity_x_min: f32,
    pub velocity_x_max: f32,
    pub velocity_y_min: f32,
    pub velocity_y_max: f32,
    /// Nominal frame rate the coefficients are expressed against
    pub frame_rate: f32,
    /// Color given to every spawned particle
    pub color: Color,
    /// Emitter position; every spawn starts exactly here
    pub origin: Vec2,
    /// When true, only the tracked dirty region is cleared each frame
    pub dirty_regions: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.02,
            mass_min: 30.0,
            mass_max: 60.0,
            burn_rate: 0.95,
            sharpness: 0.4,
            velocity_x_min: -4.0,
            velocity_x_max: 4.0,
            velocity_y_min: -12.0,
            velocity_y_max: -6.0,
            frame_rate: 60.0,
            color: Color::new(255, 80, 30),
            origin: Vec2::ZERO,
            dirty_regions: true,
        }
    }
}

impl SystemConfig {
    /// Parse a SystemConfig from a TOML table; absent keys keep defaults
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("gravity") {
            config.gravity = toml_f32(v, config.gravity);
        }
        if let Some(v) = table.get("friction") {
            config.friction = toml_f32(v, config.friction);
        }
        if let Some(v) = table.get("mass_min") {
            config.mass_min = toml_f32(v, config.mass_min);
        }
        if let Some(v) = table.get("mass_max") {
            config.mass_max = toml_f32(v, config.mass_max);
        }
        if let Some(v) = table.get("burn_rate") {
            config.burn_rate = toml_f32(v, config.burn_rate);
        }
        if let Some(v) = table.get("sharpness") {
            config.sharpness = toml_f32(v, config.sharpness);
        }
        if let Some(v) = table.get("velocity_x_min") {
            config.velocity_x_min = toml_f32(v, config.velocity_x_min);
        }
        if let Some(v) = table.get("velocity_x_max") {
            config.velocity_x_max = toml_f32(v, config.velocity_x_max);
        }
        if let Some(v) = table.get("velocity_y_min") {
            config.velocity_y_min = toml_f32(v, config.velocity_y_min);
        }
        if let Some(v) = table.get("velocity_y_max") {
            config.velocity_y_max = toml_f32(v, config.velocity_y_max);
        }
        if let Some(v) = table.get("frame_rate") {
            config.frame_rate = toml_f32(v, config.frame_rate);
        }
        if let Some(v) = table.get("color") {
            config.color = toml_color(v, config.color);
        }
        if let Some(v) = table.get("origin") {
            config.origin = toml_vec2(v, config.origin);
        }
        if let Some(v) = table.get("dirty_regions") {
            config.dirty_regions = v.as_bool().unwrap_or(config.dirty_regions);
        }

        config
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text)?;
        let config = Self::from_toml(&table);
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would poison the simulation with
    /// NaN/Infinity or inverted random ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(CinderError::ConfigError(format!(
                "frame_rate must be a positive number, got {}",
                self.frame_rate
            )));
        }
        if self.mass_min <= 0.0 {
            return Err(CinderError::ConfigError(format!(
                "mass_min must be positive, got {}",
                self.mass_min
            )));
        }
        if self.mass_min > self.mass_max {
            return Err(CinderError::InvalidRange {
                field: "mass".into(),
                min: self.mass_min as f64,
                max: self.mass_max as f64,
            });
        }
        if self.velocity_x_min > self.velocity_x_max {
            return Err(CinderError::InvalidRange {
                field: "velocity_x".into(),
                min: self.velocity_x_min as f64,
                max: self.velocity_x_max as f64,
            });
        }
        if self.velocity_y_min > self.velocity_y_max {
            return Err(CinderError::InvalidRange {
                field: "velocity_y".into(),
                min: self.velocity_y_min as f64,
                max: self.velocity_y_max as f64,
            });
        }
        if !(self.burn_rate > 0.0 && self.burn_rate <= 1.0) {
            return Err(CinderError::ValueOutOfRange {
                field: "burn_rate".into(),
                min: 0.0,
                max: 1.0,
                value: self.burn_rate as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.sharpness) {
            return Err(CinderError::ValueOutOfRange {
                field: "sharpness".into(),
                min: 0.0,
                max: 1.0,
                value: self.sharpness as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(CinderError::ValueOutOfRange {
                field: "friction".into(),
                min: 0.0,
                max: 1.0,
                value: self.friction as f64,
            });
        }
        Ok(())
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: Vec2) -> Vec2 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return Vec2::new(toml_f32(&arr[0], default.x), toml_f32(&arr[1], default.y));
        }
    }
    default
}

fn toml_color(v: &toml::Value, default: Color) -> Color {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            let channel = |v: &toml::Value, d: u8| {
                v.as_integer().map(|i| i.clamp(0, 255) as u8).unwrap_or(d)
            };
            return Color::new(
                channel(&arr[0], default.r),
                channel(&arr[1], default.g),
                channel(&arr[2], default.b),
            );
        }
    }
    default
}
