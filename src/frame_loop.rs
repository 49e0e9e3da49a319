//! Frame loop / scheduler
//!
//! Owns the session and drives input → simulation → audio → render at a fixed
//! tick rate. Platform glue (browser rAF, native runner) only feeds it elapsed
//! time and raw input events.

use crate::audio::{AudioSink, SoundEffect};
use crate::config::{ConfigError, SimConfig};
use crate::platform::{FrameClock, InputEvent, action_for};
use crate::renderer::{RenderSnapshot, Renderer};
use crate::settings::Settings;
use crate::sim::{Action, GamePhase, GameState, TickInput, apply_action, tick};

/// Whether the host should keep running frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Quit,
}

pub struct FrameLoop<A: AudioSink, R: Renderer> {
    state: GameState,
    clock: FrameClock,
    settings: Settings,
    /// Input received since the last tick
    pending: Vec<InputEvent>,
    audio: A,
    renderer: R,
}

impl<A: AudioSink, R: Renderer> FrameLoop<A, R> {
    /// Build a loop around a fresh session; fails on an invalid config
    pub fn new(
        config: SimConfig,
        seed: u64,
        settings: Settings,
        audio: A,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        let clock = FrameClock::new(config.tick_rate);
        let mut frame_loop = Self {
            state: GameState::new(config, seed)?,
            clock,
            settings: Settings::default(),
            pending: Vec::new(),
            audio,
            renderer,
        };
        frame_loop.set_settings(settings);
        log::info!(
            "Frame loop ready (seed {}, {:.4}s per tick)",
            seed,
            frame_loop.state.config.tick_dt()
        );
        Ok(frame_loop)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Tear down the loop, keeping the renderer (to flush its output)
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.particles.set_cap(settings.particle_cap());
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Queue input for the next tick
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Run one display frame
    ///
    /// Runs as many ticks as `elapsed` seconds allow, delivering queued input
    /// to the first of them, then renders once.
    pub fn frame(&mut self, elapsed: f32, events: &[InputEvent]) -> FrameStatus {
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested");
            return FrameStatus::Quit;
        }
        self.pending.extend_from_slice(events);

        let ticks = self.clock.advance(elapsed);
        for _ in 0..ticks {
            self.run_tick();
        }

        self.render();
        FrameStatus::Running
    }

    /// Run exactly one tick with the given input and render it
    pub fn step(&mut self, events: &[InputEvent]) -> FrameStatus {
        if events.contains(&InputEvent::Quit) {
            return FrameStatus::Quit;
        }
        self.pending.extend_from_slice(events);
        self.run_tick();
        self.render();
        FrameStatus::Running
    }

    /// Pause an active run when the window loses focus
    pub fn on_focus_lost(&mut self) {
        // Time spent hidden must not turn into catch-up ticks
        self.clock.reset();
        if self.settings.pause_on_blur && self.state.phase == GamePhase::Playing {
            apply_action(&mut self.state, Action::Pause);
            self.dispatch_events();
            log::info!("Auto-paused (focus lost)");
        }
    }

    fn run_tick(&mut self) {
        // Each event is resolved against the phase left by the previous one
        for event in std::mem::take(&mut self.pending) {
            if let Some(action) = action_for(event, self.state.phase) {
                apply_action(&mut self.state, action);
            }
        }
        tick(&mut self.state, &TickInput::default());
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
        }
    }

    fn render(&mut self) {
        let snapshot = RenderSnapshot::capture(&self.state);
        self.renderer.render(&snapshot);
    }
}
