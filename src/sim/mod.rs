//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Pipes kept in x order
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod particles;
pub mod pipes;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Rect, WorldBounds, check as check_collision};
pub use particles::{BurstSpec, Particle, ParticleSystem};
pub use pipes::{Pipe, PipeManager, ScoredPipe};
pub use player::{Player, rotation_for_velocity};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Action, TickInput, apply_action, tick};
