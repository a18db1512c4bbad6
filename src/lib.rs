//! Whack a Robo - real-time arcade mini-game engine
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (spawning, scoring, levels, timers)
//! - `settings`: Player preferences and difficulty selection
//! - `highscores`: Local leaderboard fed by completed sessions
//! - `platform`: Browser host bindings

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};
pub use sim::{GameConfig, GameEvent, GamePhase, GameSession, ScoreReport, Session, TargetKind};

/// Game configuration constants
pub mod consts {
    /// Number of holes on the 3x3 board
    pub const BOARD_CELLS: u8 = 9;

    /// Countdown tick period (one second of game time)
    pub const COUNTDOWN_TICK_MS: u64 = 1000;
    /// Seconds on the clock at the start of every level
    pub const LEVEL_START_TIME_SECS: u32 = 30;
    /// Upper bound for the clock (bonus time cannot push past this)
    pub const MAX_TIME_SECS: u32 = 99;
    /// How long the "level complete" banner freezes play before the tutorial
    pub const LEVEL_COMPLETE_DISPLAY_MS: u64 = 3000;

    /// Clock value below which the data-leak window is active
    pub const DATA_LEAK_THRESHOLD_SECS: u32 = 10;
    /// Combo needed to enter rampage (x2 score)
    pub const RAMPAGE_COMBO: u32 = 5;

    /// Cumulative score required to clear levels 1, 2 and 3
    pub const LEVEL_THRESHOLDS: [u32; 3] = [30, 70, 120];
    /// Highest level in a session
    pub const FINAL_LEVEL: u8 = 3;

    /// Nightmare mode spawn interval multiplier (0.8 = 1.25x faster)
    pub const NIGHTMARE_SPEED_MULTIPLIER: f32 = 0.8;
}

/// Row/column of a board cell (row-major, 0-based)
#[inline]
pub fn cell_to_row_col(cell: u8) -> (u8, u8) {
    (cell / 3, cell % 3)
}

/// Board cell index from row/column, `None` if off the board
#[inline]
pub fn row_col_to_cell(row: u8, col: u8) -> Option<u8> {
    (row < 3 && col < 3).then_some(row * 3 + col)
}
