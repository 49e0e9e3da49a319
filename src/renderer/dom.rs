//! DOM HUD renderer for the browser build
//!
//! Updates score text and toggles the overlay elements of the host page. The
//! page draws the world itself from the snapshot JSON exposed on `window`.

use web_sys::Document;

use super::{RenderSnapshot, Renderer, Screen};

pub struct DomHudRenderer {
    document: Option<Document>,
    last_screen: Option<Screen>,
    last_score: Option<(u32, u32)>,
}

impl Default for DomHudRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DomHudRenderer {
    pub fn new() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            log::warn!("No document - HUD disabled");
        }
        Self {
            document,
            last_screen: None,
            last_score: None,
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

impl Renderer for DomHudRenderer {
    fn render(&mut self, snapshot: &RenderSnapshot) {
        let Some(document) = &self.document else {
            return;
        };

        let scores = (snapshot.score, snapshot.high_score);
        if self.last_score != Some(scores) {
            Self::set_text(document, "#hud-score .hud-value", &snapshot.score.to_string());
            Self::set_text(document, "#final-score", &snapshot.score.to_string());
            Self::set_text(document, "#best-score", &snapshot.high_score.to_string());
            self.last_score = Some(scores);
        }

        if self.last_screen != Some(snapshot.screen) {
            Self::set_visible(document, "menu-screen", snapshot.screen == Screen::Menu);
            Self::set_visible(document, "hud", snapshot.screen != Screen::Menu);
            Self::set_visible(document, "pause-overlay", snapshot.screen == Screen::Paused);
            Self::set_visible(document, "gameover-overlay", snapshot.screen == Screen::GameOver);
            self.last_screen = Some(snapshot.screen);
        }
        Self::set_visible(document, "menu-best", snapshot.show_high_score);

        // Hand the full frame to the page's canvas drawing code
        if let Ok(json) = serde_json::to_string(snapshot) {
            if let Some(el) = document.get_element_by_id("frame-data") {
                let _ = el.set_attribute("data-frame", &json);
            }
        }
    }
}
