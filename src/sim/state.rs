//! Game state and core session types
//!
//! Everything a run mutates lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use super::pipes::PipeManager;
use super::player::Player;
use crate::config::{ConfigError, SimConfig};
use crate::consts::{PLAYER_SPAWN_X, PLAYER_SPAWN_Y};

/// Current screen / mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active run (idle bob until the first flap)
    Playing,
    /// Run frozen, overlay shown
    Paused,
    /// Run ended by a crash
    GameOver,
}

/// Something noteworthy that happened during a tick
///
/// Drained by the frame loop and turned into audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Scored { score: u32 },
    Collided { score: u32, high_score: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of gap offsets and particle jitter
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// False until the first flap of a run; gates physics vs idle bob
    pub has_started: bool,
    pub score: u32,
    /// Best score this process has seen
    pub high_score: u32,
    pub player: Player,
    pub pipes: PipeManager,
    /// Visual only
    pub particles: ParticleSystem,
    /// Decorative scroll offsets (always in (-width, 0])
    pub background_x: f32,
    pub ground_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in the menu with a seeded RNG
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a session around a caller-supplied generator
    ///
    /// The config is validated first; the simulation itself never fails.
    pub fn with_rng(config: SimConfig, seed: u64, mut rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        let pipes = PipeManager::new(&config, &mut rng);
        Ok(Self {
            config,
            seed,
            rng,
            phase: GamePhase::Menu,
            has_started: false,
            score: 0,
            high_score: 0,
            player: Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)),
            pipes,
            particles: ParticleSystem::new(),
            background_x: 0.0,
            ground_x: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// Start a fresh run: zero score, idle player, new pipes, no particles.
    /// High score and RNG stream carry over.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.has_started = false;
        self.particles.clear();
        self.player = Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        self.pipes = PipeManager::new(&self.config, &mut self.rng);
        log::info!("New run (high score {})", self.high_score);
    }

    /// Switch phase and record the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
        log::info!("Phase {:?} -> {:?}", from, to);
    }

    /// Advance decorative layers, wrapping at the background width
    pub fn scroll_background(&mut self) {
        let width = self.config.world_width;
        self.background_x -= self.config.background_scroll;
        self.ground_x -= self.config.ground_scroll;
        if self.background_x <= -width {
            self.background_x = 0.0;
        }
        if self.ground_x <= -width {
            self.ground_x = 0.0;
        }
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
