//! Raw input events and their mapping to game actions

use crate::sim::{Action, GamePhase};

/// Input events the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / process should exit
    Quit,
    Escape,
    Space,
    P,
    /// Any other key; ignored
    Other,
}

impl InputEvent {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_key_name(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            " " | "Space" | "Spacebar" => Self::Space,
            "p" | "P" => Self::P,
            _ => Self::Other,
        }
    }
}

/// Resolve an input event against the current phase
///
/// Space starts a run from the menu or game-over screen and flaps otherwise.
/// Quit never reaches the state machine.
pub fn action_for(event: InputEvent, phase: GamePhase) -> Option<Action> {
    match event {
        InputEvent::Escape => Some(Action::Menu),
        InputEvent::Space => match phase {
            GamePhase::Menu | GamePhase::GameOver => Some(Action::Start),
            GamePhase::Playing => Some(Action::Jump),
            GamePhase::Paused => None,
        },
        InputEvent::P => Some(Action::Pause),
        InputEvent::Quit | InputEvent::Other => None,
    }
}
