//! Level progression and tutorial gating
//!
//! Thresholds are cumulative session score, not per-level score.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, Session};
use crate::consts::*;

/// Display data for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Key of the tutorial shown before this level, if any
    pub tutorial_key: Option<&'static str>,
}

const LEVEL_INFO: [LevelInfo; 3] = [
    LevelInfo {
        name: "DATA BREACH",
        description: "Eliminate basic threats",
        tutorial_key: None,
    },
    LevelInfo {
        name: "PHISHING ATTACK",
        description: "Beware of imposters!",
        tutorial_key: Some("tutorial.level2.phishing"),
    },
    LevelInfo {
        name: "JACKPOT RAID",
        description: "Defeat the mega threat!",
        tutorial_key: Some("tutorial.level3.jackpot"),
    },
];

/// Display data for `level`, clamped into 1..=3
pub fn level_info(level: u8) -> &'static LevelInfo {
    let index = usize::from(level.clamp(1, FINAL_LEVEL)) - 1;
    &LEVEL_INFO[index]
}

/// Level thresholds and per-level timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Cumulative score to clear each level
    pub thresholds: [u32; 3],
    /// Clock value at the start of every level
    pub start_time_secs: u32,
    /// Clock cap for bonus time
    pub max_time_secs: u32,
    /// Banner duration between a cleared level and its tutorial
    pub complete_display_ms: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            thresholds: LEVEL_THRESHOLDS,
            start_time_secs: LEVEL_START_TIME_SECS,
            max_time_secs: MAX_TIME_SECS,
            complete_display_ms: LEVEL_COMPLETE_DISPLAY_MS,
        }
    }
}

impl LevelConfig {
    /// Cumulative score that clears `level`
    pub fn threshold(&self, level: u8) -> u32 {
        let index = usize::from(level.clamp(1, FINAL_LEVEL)) - 1;
        self.thresholds[index]
    }

    /// Points still needed to clear the current level
    pub fn remaining_for(&self, session: &Session) -> u32 {
        self.threshold(session.level).saturating_sub(session.score)
    }
}

/// A phase change forced by the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelTransition {
    /// A non-final level was cleared
    LevelComplete { level: u8 },
    /// The final level was cleared
    Victory,
}

/// Check the score against the current level's threshold.
///
/// Only a `Playing` session can transition, so a level that is already on its
/// way out (banner or tutorial showing) never fires twice.
pub fn after_score_change(session: &Session, config: &LevelConfig) -> Option<LevelTransition> {
    if session.phase != GamePhase::Playing {
        return None;
    }
    if session.score < config.threshold(session.level) {
        return None;
    }
    if session.level >= FINAL_LEVEL {
        Some(LevelTransition::Victory)
    } else {
        Some(LevelTransition::LevelComplete {
            level: session.level,
        })
    }
}

/// Move a session out of the tutorial gate into the next level.
/// Returns the new level, or `None` if the session was not gated.
pub fn enter_next_level(session: &mut Session, config: &LevelConfig) -> Option<u8> {
    if session.phase != GamePhase::TutorialGate {
        return None;
    }
    session.level = (session.level + 1).min(FINAL_LEVEL);
    session.time_left = config.start_time_secs;
    session.clear_target();
    session.phase = GamePhase::Playing;
    Some(session.level)
}
