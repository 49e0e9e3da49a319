//! Demo controller
//!
//! Plays the game through the same input events a person would press, so a
//! headless session exercises the whole frame loop.

use crate::consts::PLAYER_HEIGHT;
use crate::platform::InputEvent;
use crate::sim::{GamePhase, GameState};

/// Default distance below the gap centre that triggers a flap
const FLAP_MARGIN: f32 = 25.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Flap once the player's centre sinks this far below the target
    pub margin: f32,
    /// Press start again after a crash
    pub restart: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            margin: FLAP_MARGIN,
            restart: true,
        }
    }
}

impl Autopilot {
    /// Input to send for the upcoming tick, if any
    pub fn decide(&self, state: &GameState) -> Option<InputEvent> {
        match state.phase {
            GamePhase::Menu => Some(InputEvent::Space),
            GamePhase::GameOver if self.restart => Some(InputEvent::Space),
            GamePhase::Playing => {
                // First flap gets the world moving
                if !state.has_started {
                    return Some(InputEvent::Space);
                }
                let center_y = state.player.pos.y + PLAYER_HEIGHT / 2.0;
                let falling = state.player.velocity >= 0.0;
                (falling && center_y > self.target_y(state) + self.margin)
                    .then_some(InputEvent::Space)
            }
            _ => None,
        }
    }

    /// Height to hold: middle of the next gap, or mid-air with no pipe ahead
    fn target_y(&self, state: &GameState) -> f32 {
        state
            .pipes
            .next_ahead(state.player.pos.x)
            .map(|pipe| pipe.gap_center().y)
            .unwrap_or((state.config.ceiling + state.config.floor) / 2.0)
    }
}
