//! Sound cues
//!
//! The simulation raises events; the frame loop turns them into cues and hands
//! them to an [`AudioSink`]. Sinks are fire-and-forget: a sink that cannot play
//! anything must stay silent rather than fail.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player flaps
    Jump,
    /// Pipe passed
    Score,
    /// Run ended
    Collision,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(Self::Jump),
            GameEvent::Scored { .. } => Some(Self::Score),
            GameEvent::Collided { .. } => Some(Self::Collision),
            GameEvent::PhaseChanged { .. } => None,
        }
    }

    /// Per-cue mix level
    pub fn base_volume(&self) -> f32 {
        match self {
            Self::Jump => 0.5,
            Self::Score => 0.6,
            Self::Collision => 0.7,
        }
    }
}

/// Anything that can play cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Pick up volume changes
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    volume: f32,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("cue {:?} at volume {:.2}", effect, effect.base_volume() * self.volume);
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_sfx_volume();
    }
}

/// Keeps every cue it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Procedural Web Audio cues - no sound files needed
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Flap - short rising whoosh
        fn play_woosh(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(520.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Pipe passed - two-note chime
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.5, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Crash - low slap
        fn play_slap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume * effect.base_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_woosh(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::Collision => self.play_slap(ctx, vol),
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_events_map_to_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 1 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collided {
                score: 1,
                high_score: 1
            }),
            Some(SoundEffect::Collision)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Playing
            }),
            None
        );
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingAudio::default();
        sink.play(SoundEffect::Jump);
        sink.play(SoundEffect::Collision);
        assert_eq!(sink.played, vec![SoundEffect::Jump, SoundEffect::Collision]);
    }
}
