//! Flap entry point
//!
//! The browser build wires the frame loop to the page; the native build runs a
//! headless session played by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flap::audio::WebAudio;
    use flap::platform::InputEvent;
    use flap::renderer::dom::DomHudRenderer;
    use flap::{FrameLoop, Settings, SimConfig};

    /// Browser session
    struct Game {
        frame_loop: FrameLoop<WebAudio, DomHudRenderer>,
        /// rAF timestamp of the previous frame (ms)
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Flap starting...");

        let Some(window) = web_sys::window() else {
            web_sys::console::error_1(&"No window - cannot start".into());
            return;
        };
        if let Some(loading) = window
            .document()
            .and_then(|d| d.get_element_by_id("loading"))
        {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let frame_loop = match FrameLoop::new(
            SimConfig::default(),
            seed,
            Settings::load(),
            WebAudio::new(),
            DomHudRenderer::new(),
        ) {
            Ok(frame_loop) => frame_loop,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game {
            frame_loop,
            last_time: 0.0,
        }));

        setup_keyboard(&window, game.clone());
        setup_auto_pause(&window, game.clone());

        request_animation_frame(game);
        log::info!("Flap running!");
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key == "m" || key == "M" {
                toggle_mute(&game);
                return;
            }
            let input = InputEvent::from_key_name(&key);
            if input == InputEvent::Other {
                return;
            }
            // Space would scroll the page
            event.prevent_default();
            game.borrow_mut().frame_loop.push_event(input);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn toggle_mute(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let mut settings = g.frame_loop.settings().clone();
        settings.muted = !settings.muted;
        settings.save();
        log::info!("Muted: {}", settings.muted);
        g.frame_loop.set_settings(settings);
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        if let Some(document) = window.document() {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().frame_loop.on_focus_lost();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().frame_loop.on_focus_lost();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            // The page has no quit key; the loop runs until the tab closes
            g.frame_loop.frame(dt, &[]);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;

    use flap::audio::LogAudio;
    use flap::autopilot::Autopilot;
    use flap::renderer::{JsonLinesRenderer, NullRenderer, Renderer};
    use flap::{FrameLoop, FrameStatus, Settings, SimConfig};

    #[derive(Parser, Debug)]
    #[command(name = "flap")]
    #[command(about = "Run a headless flap session played by the autopilot")]
    pub struct Cli {
        /// JSON file overriding simulation tunables
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON file with player settings
        #[arg(long)]
        settings: Option<PathBuf>,
        /// RNG seed for the session
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Simulation ticks to run
        #[arg(long, default_value_t = 3_600)]
        ticks: u64,
        /// Write one JSON render snapshot per tick to this file
        #[arg(long)]
        snapshots: Option<PathBuf>,
        /// Stop at the first crash instead of starting a new run
        #[arg(long)]
        single_run: bool,
    }

    fn load_config(path: Option<&Path>) -> Result<SimConfig> {
        let Some(path) = path else {
            return Ok(SimConfig::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = SimConfig::from_json(&json)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn load_settings(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::load());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("invalid settings {}", path.display()))
    }

    /// Feed autopilot input one tick at a time
    fn drive<R: Renderer>(game: &mut FrameLoop<LogAudio, R>, ticks: u64, pilot: &Autopilot) {
        let mut crashes = 0u32;
        let mut last_phase = game.state().phase;
        for _ in 0..ticks {
            let events: Vec<_> = pilot.decide(game.state()).into_iter().collect();
            if game.step(&events) == FrameStatus::Quit {
                break;
            }
            let phase = game.state().phase;
            if phase != last_phase && phase == flap::sim::GamePhase::GameOver {
                crashes += 1;
                if !pilot.restart {
                    break;
                }
            }
            last_phase = phase;
        }
        log::info!(
            "Finished after {} ticks with {} crash(es): score {}, best {}",
            game.state().time_ticks,
            crashes,
            game.state().score,
            game.state().high_score
        );
    }

    pub fn run(cli: Cli) -> Result<()> {
        let config = load_config(cli.config.as_deref())?;
        let settings = load_settings(cli.settings.as_deref())?;
        let pilot = Autopilot {
            restart: !cli.single_run,
            ..Default::default()
        };

        match &cli.snapshots {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let renderer = JsonLinesRenderer::new(BufWriter::new(file));
                let mut game =
                    FrameLoop::new(config, cli.seed, settings, LogAudio::default(), renderer)?;
                drive(&mut game, cli.ticks, &pilot);

                let frames = game.renderer().frames();
                let mut out = game.into_renderer().into_inner();
                out.flush().context("failed to flush snapshots")?;
                log::info!("Wrote {} snapshots to {}", frames, path.display());
            }
            None => {
                let mut game =
                    FrameLoop::new(config, cli.seed, settings, LogAudio::default(), NullRenderer)?;
                drive(&mut game, cli.ticks, &pilot);
            }
        }
        Ok(())
    }

    pub fn main() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Flap (native) starting...");
        run(Cli::parse())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}
