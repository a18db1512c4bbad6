//! Session state and core simulation types
//!
//! Everything a host needs to render a frame lives in `Session`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running
    #[default]
    Idle,
    /// Active gameplay, both timers running
    Playing,
    /// Session is paused
    Paused,
    /// Level threshold reached, banner on screen
    LevelComplete,
    /// Waiting for the player to dismiss the next level's tutorial
    TutorialGate,
    /// Clock ran out
    GameOver,
    /// Final threshold reached
    Victory,
}

impl GamePhase {
    /// True for phases the host treats as "a game is on screen"
    pub fn is_playing(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::Paused | GamePhase::LevelComplete | GamePhase::TutorialGate
        )
    }

    pub fn is_paused(self) -> bool {
        self == GamePhase::Paused
    }

    /// Session ended with a submitted score
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Target types that can pop out of a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetKind {
    /// Plain robot
    #[default]
    Normal,
    /// Shield - striking it is a mistake
    Decoy,
    /// Ransomware - worth points and extra time
    Bonus,
    /// Phishing robot that looks like a normal one
    Impostor,
    /// Jackpot (level 3 only)
    Boss,
}

impl TargetKind {
    pub const ALL: [TargetKind; 5] = [
        TargetKind::Normal,
        TargetKind::Decoy,
        TargetKind::Bonus,
        TargetKind::Impostor,
        TargetKind::Boss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Normal => "normal",
            TargetKind::Decoy => "decoy",
            TargetKind::Bonus => "bonus",
            TargetKind::Impostor => "impostor",
            TargetKind::Boss => "boss",
        }
    }

    /// Striking this target costs points
    pub fn is_penalized_hit(&self) -> bool {
        matches!(self, TargetKind::Decoy | TargetKind::Impostor)
    }
}

/// Difficulty mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    /// 1.25x faster spawns
    Nightmare,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Nightmare => "Nightmare",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(Difficulty::Normal),
            "nightmare" | "hard" => Some(Difficulty::Nightmare),
            _ => None,
        }
    }

    /// Spawn interval multiplier (< 1 is faster)
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Nightmare => NIGHTMARE_SPEED_MULTIPLIER,
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// The single mutable entity of a play session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Cumulative score across all levels
    pub score: u32,
    /// Seconds remaining on the clock
    pub time_left: u32,
    /// Current level (1..=3)
    pub level: u8,
    /// Consecutive clean hits
    pub combo: u32,
    /// Hole currently showing a target
    pub active_cell: Option<u8>,
    /// Kind of the current (or last) target
    pub active_kind: TargetKind,
    /// Current phase
    pub phase: GamePhase,
    /// Active target has not been struck yet
    pub pending_resolution: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            time_left: LEVEL_START_TIME_SECS,
            level: 1,
            combo: 0,
            active_cell: None,
            active_kind: TargetKind::Normal,
            phase: GamePhase::Idle,
            pending_resolution: false,
        }
    }
}

impl Session {
    /// Fresh session for a new run
    pub fn new(start_time_secs: u32) -> Self {
        Self {
            time_left: start_time_secs,
            phase: GamePhase::Playing,
            ..Self::default()
        }
    }

    /// Final seconds of the clock: bonus spawns and x2 score
    #[inline]
    pub fn is_data_leak(&self) -> bool {
        self.time_left < DATA_LEAK_THRESHOLD_SECS
    }

    /// Combo high enough for x2 score
    #[inline]
    pub fn is_rampage(&self) -> bool {
        self.combo >= RAMPAGE_COMBO
    }

    /// Remove whatever target is on the board without resolving it
    pub fn clear_target(&mut self) {
        self.active_cell = None;
        self.pending_resolution = false;
    }
}
