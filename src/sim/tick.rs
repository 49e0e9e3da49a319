//! Fixed timestep simulation tick
//!
//! Mode transitions and the per-tick update that runs while playing.

use super::collision::{self, WorldBounds};
use super::particles::BurstSpec;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{COLLISION_COLOR, JUMP_COLOR, SCORE_COLOR};

/// A player intent, already resolved against the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Begin a new run (menu or game over)
    Start,
    /// Flap
    Jump,
    /// Toggle pause
    Pause,
    /// Back to the title screen
    Menu,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Applied in order before the simulation step
    pub actions: Vec<Action>,
}

impl TickInput {
    pub fn with(action: Action) -> Self {
        Self {
            actions: vec![action],
        }
    }
}

/// Apply one action to the state machine. Returns false when the action is
/// not legal in the current phase (a no-op).
pub fn apply_action(state: &mut GameState, action: Action) -> bool {
    match (state.phase, action) {
        (GamePhase::Menu | GamePhase::GameOver, Action::Start) => {
            state.reset_run();
            state.set_phase(GamePhase::Playing);
        }
        (GamePhase::Playing, Action::Jump) => {
            state.has_started = true;
            state.player.jump(state.config.jump_impulse);
            let origin = state.player.lower_center();
            state
                .particles
                .spawn_burst(origin, JUMP_COLOR, &BurstSpec::jump(), &mut state.rng);
            state.events.push(GameEvent::Jumped);
        }
        (GamePhase::Playing, Action::Pause) => state.set_phase(GamePhase::Paused),
        (GamePhase::Paused, Action::Pause) => state.set_phase(GamePhase::Playing),
        (GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver, Action::Menu) => {
            state.set_phase(GamePhase::Menu)
        }
        _ => return false,
    }
    true
}

/// Advance the game state by one fixed timestep
///
/// Raised [`GameEvent`]s accumulate in `state.events` until drained.
pub fn tick(state: &mut GameState, input: &TickInput) {
    for &action in &input.actions {
        apply_action(state, action);
    }

    if state.phase == GamePhase::Playing {
        if state.has_started {
            step_run(state);
        } else {
            // Idle bob only; the world waits for the first flap
            state.player.update(false, &state.config);
        }
        state.scroll_background();
    }

    // Effects keep animating on every screen
    state.particles.advance_all(state.config.particle_gravity);

    state.time_ticks += 1;
}

/// Physics, pipes, scoring and collision for one tick of an active run
fn step_run(state: &mut GameState) {
    state.player.update(true, &state.config);

    state.pipes.advance_all();
    state.pipes.recycle_if_needed(&state.config, &mut state.rng);

    for passed in state.pipes.score_pass(state.player.pos.x) {
        state.score += 1;
        log::debug!("Scored at x={:.1}, score {}", passed.x, state.score);
        state.particles.spawn_burst(
            passed.gap_center,
            SCORE_COLOR,
            &BurstSpec::explosion(),
            &mut state.rng,
        );
        state.events.push(GameEvent::Scored { score: state.score });
    }

    let bounds = WorldBounds::from_config(&state.config);
    if collision::check(&state.player.rect(), state.pipes.iter(), &bounds) {
        crash(state);
    }
}

/// End the run
fn crash(state: &mut GameState) {
    state.high_score = state.high_score.max(state.score);
    let origin = state.player.center();
    state
        .particles
        .spawn_burst(origin, COLLISION_COLOR, &BurstSpec::explosion(), &mut state.rng);
    state.events.push(GameEvent::Collided {
        score: state.score,
        high_score: state.high_score,
    });
    log::info!(
        "Crashed with score {} (best {})",
        state.score,
        state.high_score
    );
    state.set_phase(GamePhase::GameOver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::PIPE_WIDTH;

    fn new_state() -> GameState {
        GameState::new(SimConfig::default(), 12345).unwrap()
    }

    fn playing_state() -> GameState {
        let mut state = new_state();
        tick(&mut state, &TickInput::with(Action::Start));
        state
    }

    #[test]
    fn test_menu_start_to_playing() {
        let mut state = new_state();
        assert_eq!(state.phase, GamePhase::Menu);

        // Tick without input - should stay in Menu
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::with(Action::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(!state.has_started);
    }

    #[test]
    fn test_illegal_actions_are_noops() {
        let mut state = new_state();
        assert!(!apply_action(&mut state, Action::Jump));
        assert!(!apply_action(&mut state, Action::Pause));
        assert!(!apply_action(&mut state, Action::Menu));
        assert_eq!(state.phase, GamePhase::Menu);

        let mut state = playing_state();
        assert!(!apply_action(&mut state, Action::Start));
        assert_eq!(state.phase, GamePhase::Playing);

        state.set_phase(GamePhase::Paused);
        assert!(!apply_action(&mut state, Action::Jump));
        assert!(!apply_action(&mut state, Action::Start));
        assert_eq!(state.phase, GamePhase::Paused);

        state.set_phase(GamePhase::GameOver);
        assert!(!apply_action(&mut state, Action::Pause));
        assert!(!apply_action(&mut state, Action::Jump));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_jump_starts_physics() {
        let mut state = playing_state();
        assert!(apply_action(&mut state, Action::Jump));
        assert!(state.has_started);
        assert_eq!(state.player.velocity, -10.0);
        assert_eq!(state.particles.len(), 8);
        assert!(state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_pipes_frozen_until_first_flap() {
        let mut state = playing_state();
        let x0 = state.pipes.lead().unwrap().x;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.pipes.lead().unwrap().x, x0);
        assert_eq!(state.player.velocity, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_idle_run_survives_without_input() {
        let mut state = playing_state();
        let x0 = state.pipes.lead().unwrap().x;
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.velocity, 0.0);
        assert_eq!(state.pipes.lead().unwrap().x, x0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_single_flap_falls_out_within_100_ticks() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::with(Action::Jump));
        let mut crashed_at = None;
        for i in 0..100 {
            tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                crashed_at = Some(i);
                break;
            }
        }
        assert!(crashed_at.is_some());
        assert!(state.player.pos.y > state.config.floor);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::with(Action::Jump));
        let y = state.player.pos.y;
        let x = state.pipes.lead().unwrap().x;

        tick(&mut state, &TickInput::with(Action::Pause));
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.pos.y, y);
        assert_eq!(state.pipes.lead().unwrap().x, x);

        // Particles keep moving while paused
        let before: Vec<_> = state.particles.iter().map(|p| p.lifetime).collect();
        tick(&mut state, &TickInput::default());
        let after: Vec<_> = state.particles.iter().map(|p| p.lifetime).collect();
        assert_ne!(before, after);

        tick(&mut state, &TickInput::with(Action::Pause));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_from_any_run_phase() {
        for phase in [GamePhase::Playing, GamePhase::Paused, GamePhase::GameOver] {
            let mut state = playing_state();
            state.set_phase(phase);
            tick(&mut state, &TickInput::with(Action::Menu));
            assert_eq!(state.phase, GamePhase::Menu);
        }
    }

    #[test]
    fn test_score_on_pass() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::with(Action::Jump));
        state.player.pos.y = 200.0;
        state.player.velocity = 0.0;

        // Right edge one pixel short of the player after this tick's scroll
        let pipe = state.pipes.lead_mut().unwrap();
        pipe.x = 168.0 - PIPE_WIDTH - 1.0 + pipe.speed;
        pipe.height = 100.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert!(state.pipes.lead().unwrap().highlight);
        assert!(state.events.contains(&GameEvent::Scored { score: 1 }));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_floor_crash_sets_high_score() {
        let mut state = playing_state();
        state.high_score = 3;
        tick(&mut state, &TickInput::with(Action::Jump));
        state.score = 5;
        state.player.pos.y = 530.0;
        state.player.velocity = 0.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5);
        assert!(state.events.contains(&GameEvent::Collided {
            score: 5,
            high_score: 5
        }));

        // Lower score does not lower the best
        tick(&mut state, &TickInput::with(Action::Start));
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 5);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();

        let mut inputs = vec![TickInput::with(Action::Start), TickInput::with(Action::Jump)];
        for i in 0..300 {
            if i % 25 == 0 {
                inputs.push(TickInput::with(Action::Jump));
            } else {
                inputs.push(TickInput::default());
            }
        }

        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.particles.len(), state2.particles.len());
        let h1: Vec<f32> = state1.pipes.iter().map(|p| p.height).collect();
        let h2: Vec<f32> = state2.pipes.iter().map(|p| p.height).collect();
        assert_eq!(h1, h2);
    }
}
