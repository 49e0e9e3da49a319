//! Flap - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `frame_loop`: Fixed-rate scheduler driving update-then-render
//! - `platform`: Input event mapping and frame timing
//! - `renderer`: Render snapshot handed to the drawing collaborator
//! - `audio`: Fire-and-forget sound cues
//! - `config`: Data-driven simulation constants

pub mod audio;
pub mod autopilot;
pub mod config;
pub mod frame_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use frame_loop::{FrameLoop, FrameStatus};
pub use settings::Settings;

/// Reference build constants
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player sprite size (collision box)
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Player spawn point (x stays fixed for the whole run)
    pub const PLAYER_SPAWN_X: f32 = 168.0;
    pub const PLAYER_SPAWN_Y: f32 = 300.0;

    /// Idle bob animation
    pub const IDLE_PHASE_STEP: f32 = 0.1;
    pub const IDLE_BOB_AMPLITUDE: f32 = 3.0;

    /// Visual tilt limit in degrees
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    /// Degrees of tilt per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 3.0;

    /// Pipe sprite width
    pub const PIPE_WIDTH: f32 = 52.0;
    /// Ticks a scored pipe keeps its glow
    pub const HIGHLIGHT_TICKS: u32 = 30;

    /// Particles per burst
    pub const JUMP_PARTICLES: usize = 8;
    pub const EXPLOSION_PARTICLES: usize = 15;

    /// Burst colors
    pub const JUMP_COLOR: [u8; 3] = [255, 255, 255];
    pub const SCORE_COLOR: [u8; 3] = [255, 255, 0];
    pub const COLLISION_COLOR: [u8; 3] = [255, 100, 100];

    /// Maximum simulation substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
