//! Side effects emitted by the session controller
//!
//! Every command and every `advance` call appends what happened to an event
//! list. Hosts drive rendering, audio and score submission from these.

use serde::{Deserialize, Serialize};

use super::scoring::Resolution;
use super::state::{Difficulty, TargetKind};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Clock ran out
    TimeUp,
    /// Final level cleared
    Victory,
}

/// Terminal score handed to the host exactly once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    /// Seconds left on the clock (always 0 for `TimeUp`)
    pub time_remaining: u32,
    pub level: u8,
    pub outcome: SessionOutcome,
}

/// Sound effects an audio collaborator may play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Start,
    Hit,
    Golden,
    Error,
    Break,
    Rampage,
    GameOver,
}

impl SoundCue {
    /// Asset name used by the web front end
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Start => "start",
            SoundCue::Hit => "hit",
            SoundCue::Golden => "golden",
            SoundCue::Error => "error",
            SoundCue::Break => "break",
            SoundCue::Rampage => "rampage",
            SoundCue::GameOver => "gameover",
        }
    }
}

/// Something observable happened to the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A fresh session began
    Started { difficulty: Difficulty },
    /// "Is playing" flag flipped
    PlayingChanged(bool),
    /// "Is paused" flag flipped
    PausedChanged(bool),
    /// One second came off the clock
    ClockTick { time_left: u32 },
    /// A target popped up
    TargetSpawned {
        cell: u8,
        kind: TargetKind,
        next_interval_ms: u64,
    },
    /// The player struck the active target
    TargetHit {
        cell: u8,
        kind: TargetKind,
        resolution: Resolution,
    },
    /// A target left the board unstruck
    TargetMissed {
        cell: u8,
        kind: TargetKind,
        resolution: Resolution,
    },
    /// Combo reached the rampage threshold
    RampageStarted,
    /// Level threshold reached; banner on screen
    LevelComplete { level: u8, score: u32 },
    /// Tutorial for `level` is waiting to be dismissed
    TutorialShown {
        level: u8,
        tutorial_key: Option<&'static str>,
    },
    /// Play resumed on a new level
    LevelStarted { level: u8 },
    /// Clock ran out
    GameOver { score: u32 },
    /// Final threshold reached
    Victory { score: u32, time_left: u32 },
    /// Terminal score was submitted
    ScoreSubmitted(ScoreReport),
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Started { .. } => Some(SoundCue::Start),
            GameEvent::TargetHit { kind, .. } => Some(match kind {
                TargetKind::Normal => SoundCue::Hit,
                TargetKind::Bonus | TargetKind::Boss => SoundCue::Golden,
                TargetKind::Decoy | TargetKind::Impostor => SoundCue::Error,
            }),
            GameEvent::TargetMissed { kind, .. } => match kind {
                TargetKind::Boss => Some(SoundCue::Error),
                TargetKind::Decoy => None,
                _ => Some(SoundCue::Break),
            },
            GameEvent::RampageStarted => Some(SoundCue::Rampage),
            GameEvent::LevelComplete { .. } | GameEvent::Victory { .. } => Some(SoundCue::Golden),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}
