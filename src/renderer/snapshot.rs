//! Per-frame data handed to the renderer
//!
//! A snapshot is a plain copy of everything visible; renderers never see the
//! live [`GameState`].

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Which screen to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Title, start prompt, best score
    Menu,
    /// World plus score HUD
    Playing,
    /// World with pause overlay
    Paused,
    /// World with final score overlay
    GameOver,
}

impl From<GamePhase> for Screen {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Menu => Self::Menu,
            GamePhase::Playing => Self::Playing,
            GamePhase::Paused => Self::Paused,
            GamePhase::GameOver => Self::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPose {
    pub x: f32,
    /// Includes the idle bob
    pub y: f32,
    /// Degrees, positive tilts nose down
    pub rotation: f32,
    pub has_started: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f32,
    /// Bottom of the top pipe
    pub top_height: f32,
    /// Top of the bottom pipe
    pub gap_bottom: f32,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 3],
    pub alpha: u8,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub screen: Screen,
    pub score: u32,
    pub high_score: u32,
    /// The menu only shows a best score once one exists
    pub show_high_score: bool,
    pub player: PlayerPose,
    pub pipes: Vec<PipeView>,
    pub particles: Vec<ParticleView>,
    pub background_x: f32,
    pub ground_x: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let screen = Screen::from(state.phase);
        Self {
            tick: state.time_ticks,
            screen,
            score: state.score,
            high_score: state.high_score,
            show_high_score: screen != Screen::Menu || state.high_score > 0,
            player: PlayerPose {
                x: state.player.pos.x,
                y: state.player.pos.y,
                rotation: if state.has_started {
                    state.player.rotation
                } else {
                    0.0
                },
                has_started: state.has_started,
            },
            pipes: state
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    top_height: p.height,
                    gap_bottom: p.gap_bottom(),
                    highlight: p.highlight,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    color: p.color,
                    alpha: p.alpha(),
                    size: p.render_size(),
                })
                .collect(),
            background_x: state.background_x,
            ground_x: state.ground_x,
        }
    }
}
