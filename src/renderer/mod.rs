//! Rendering collaborator interface
//!
//! The core only produces a [`RenderSnapshot`] once per frame. Drawing pixels
//! is up to the renderer behind the [`Renderer`] trait.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod snapshot;

use std::io::Write;

pub use snapshot::{ParticleView, PipeView, PlayerPose, RenderSnapshot, Screen};

/// Anything that can present a frame
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot);
}

/// Draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _snapshot: &RenderSnapshot) {}
}

/// Writes each snapshot as one JSON line (replays, debugging, external viewers)
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    frames: u64,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            failed: false,
        }
    }

    /// Frames written successfully
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        if self.failed {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        match result {
            Ok(()) => self.frames += 1,
            Err(e) => {
                // Stop writing but keep the game running
                log::warn!("Snapshot output failed, disabling: {}", e);
                self.failed = true;
            }
        }
    }
}
