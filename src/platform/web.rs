//! Browser host bindings
//!
//! The page owns rendering, audio and routing. It calls `tick(now)` from its
//! animation frame loop, forwards clicks to `whack`, reads `snapshot()` as
//! JSON, and receives the terminal score through the registered callback.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::row_col_to_cell;
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, GameSession};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    game: GameSession,
    settings: Settings,
    /// Events since the last `drain_events` call
    pending: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(super::fresh_seed);
        log::info!("Whack a Robo ready (seed {})", seed);
        WebGame {
            game: GameSession::new(settings.game_config(), seed),
            settings,
            pending: Vec::new(),
        }
    }

    /// Register `fn(score, timeRemaining)`; called once per finished session
    #[wasm_bindgen(js_name = setScoreCallback)]
    pub fn set_score_callback(&mut self, callback: js_sys::Function) {
        self.game.set_score_handler(move |report| {
            let mut scores = HighScores::load();
            if scores.record(&report, js_sys::Date::now()).is_some() {
                scores.save();
            }

            let this = JsValue::NULL;
            if let Err(e) = callback.call2(
                &this,
                &JsValue::from(report.score),
                &JsValue::from(report.time_remaining),
            ) {
                log::warn!("Score callback failed: {:?}", e);
            }
        });
    }

    pub fn start(&mut self, nightmare: Option<bool>) {
        let difficulty = nightmare.map(|n| if n { Difficulty::Nightmare } else { Difficulty::Normal });
        if let Some(difficulty) = difficulty {
            self.settings.difficulty = difficulty;
            self.settings.save();
        }
        let events = self.game.start(difficulty);
        self.pending.extend(events);
    }

    pub fn pause(&mut self) {
        let events = self.game.pause();
        self.pending.extend(events);
    }

    pub fn resume(&mut self) {
        let events = self.game.resume();
        self.pending.extend(events);
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        let events = self.game.toggle_pause();
        self.pending.extend(events);
    }

    pub fn exit(&mut self) {
        let events = self.game.exit();
        self.pending.extend(events);
    }

    pub fn whack(&mut self, cell: u8) {
        let events = self.game.whack(cell);
        self.pending.extend(events);
    }

    /// Strike by board coordinates; off-board coordinates are ignored
    #[wasm_bindgen(js_name = whackAt)]
    pub fn whack_at(&mut self, row: u8, col: u8) {
        if let Some(cell) = row_col_to_cell(row, col) {
            self.whack(cell);
        }
    }

    #[wasm_bindgen(js_name = dismissTutorial)]
    pub fn dismiss_tutorial(&mut self) {
        let events = self.game.dismiss_tutorial();
        self.pending.extend(events);
    }

    /// Feed `performance.now()` from the frame loop
    pub fn tick(&mut self, now_ms: f64) {
        let events = self.game.tick(now_ms.max(0.0) as u64);
        self.pending.extend(events);
    }

    /// Current session as a JSON string
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events since the last call as a JSON array; sound cues are inlined
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        let sound = self.settings.sound_enabled;
        let events: Vec<_> = self
            .pending
            .drain(..)
            .map(|event| {
                let cue = if sound { event.sound_cue().map(|c| c.as_str()) } else { None };
                serde_json::json!({ "event": event, "sound": cue })
            })
            .collect();
        serde_json::to_string(&events).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = highScores)]
    pub fn high_scores(&self) -> String {
        serde_json::to_string(&HighScores::load()).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
