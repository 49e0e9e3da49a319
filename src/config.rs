//! Simulation configuration
//!
//! Every tunable the reference build hard-codes lives here so a run can be
//! driven from a JSON file. Missing fields fall back to the reference values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{PIPE_WIDTH, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidGapRange { min: u32, max: u32 },
    InvalidGapHeight(f32),
    InvalidTickRate(u32),
    InvalidBounds { ceiling: f32, floor: f32 },
    InvalidPipeCount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::InvalidGapRange { min, max } => {
                write!(f, "gap range is empty: [{min}, {max}]")
            }
            Self::InvalidGapHeight(h) => write!(f, "gap height must be positive, got {h}"),
            Self::InvalidTickRate(rate) => write!(f, "tick rate must be positive, got {rate}"),
            Self::InvalidBounds { ceiling, floor } => {
                write!(f, "ceiling {ceiling} must be above floor {floor}")
            }
            Self::InvalidPipeCount => write!(f, "at least one pipe is required"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Simulation tunables (units are pixels and ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Player gravity (added to velocity each tick)
    pub gravity: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal pipe speed
    pub obstacle_speed: f32,
    /// Inclusive range for the top pipe height
    pub gap_range: [u32; 2],
    /// Vertical opening between top and bottom pipe
    pub gap_height: f32,
    /// Player y below this is out of bounds
    pub ceiling: f32,
    /// Player y above this is out of bounds
    pub floor: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,

    /// Gravity applied to effect particles
    pub particle_gravity: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// x of the first pipe of a run
    pub first_spawn_x: f32,
    /// x where recycled pipes reappear
    pub respawn_x: f32,
    /// Pipes alive at once
    pub pipe_count: usize,
    /// Distance between consecutive pipes
    pub pipe_spacing: f32,
    /// Decorative scroll speeds
    pub background_scroll: f32,
    pub ground_scroll: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 0.75,
            jump_impulse: -10.0,
            obstacle_speed: 2.4,
            gap_range: [50, 200],
            gap_height: 180.0,
            ceiling: -32.0,
            floor: 520.0,
            tick_rate: 60,

            particle_gravity: 0.1,
            world_width: WINDOW_WIDTH,
            world_height: WINDOW_HEIGHT,
            first_spawn_x: 600.0,
            respawn_x: WINDOW_WIDTH,
            pipe_count: 1,
            // A new pipe appears at the right edge just as the old one leaves
            pipe_spacing: WINDOW_WIDTH + PIPE_WIDTH,
            background_scroll: 1.0,
            ground_scroll: 2.0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min, max] = self.gap_range;
        if min > max {
            return Err(ConfigError::InvalidGapRange { min, max });
        }
        if self.gap_height <= 0.0 {
            return Err(ConfigError::InvalidGapHeight(self.gap_height));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        if self.ceiling >= self.floor {
            return Err(ConfigError::InvalidBounds {
                ceiling: self.ceiling,
                floor: self.floor,
            });
        }
        if self.pipe_count == 0 {
            return Err(ConfigError::InvalidPipeCount);
        }
        Ok(())
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
