//! Target spawning
//!
//! Each spawn tick runs in two halves so the controller can check level
//! thresholds in between:
//! 1. `resolve_miss` - the previous target, if still unstruck, counts as a miss
//! 2. `draw` - pick a cell and a kind, then schedule the next tick

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Timer;
use super::scoring::{self, Outcome, Resolution};
use super::spawn_table::SpawnTable;
use super::state::{RngState, Session, TargetKind};
use crate::consts::BOARD_CELLS;

/// Interval curve for one level/kind pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTiming {
    pub base_ms: u64,
    pub decay_ms: u64,
    pub floor_ms: u64,
}

impl SpawnTiming {
    const LEVEL_1: SpawnTiming = SpawnTiming { base_ms: 1200, decay_ms: 8, floor_ms: 700 };
    const LEVEL_2: SpawnTiming = SpawnTiming { base_ms: 1100, decay_ms: 7, floor_ms: 650 };
    const LEVEL_3: SpawnTiming = SpawnTiming { base_ms: 950, decay_ms: 5, floor_ms: 550 };
    // Jackpots linger a little longer
    const LEVEL_3_BOSS: SpawnTiming = SpawnTiming { base_ms: 1100, decay_ms: 5, floor_ms: 700 };

    pub fn for_target(level: u8, kind: TargetKind) -> SpawnTiming {
        match level {
            0 | 1 => Self::LEVEL_1,
            2 => Self::LEVEL_2,
            _ if kind == TargetKind::Boss => Self::LEVEL_3_BOSS,
            _ => Self::LEVEL_3,
        }
    }

    /// `max(floor, base - score * decay)`
    pub fn interval_ms(&self, score: u32) -> u64 {
        self.base_ms
            .saturating_sub(u64::from(score).saturating_mul(self.decay_ms))
            .max(self.floor_ms)
    }
}

/// A target that left the board unstruck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedTarget {
    pub cell: u8,
    pub kind: TargetKind,
    pub resolution: Resolution,
}

/// A freshly drawn target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTarget {
    pub cell: u8,
    pub kind: TargetKind,
    pub next_interval_ms: u64,
}

/// Spawn scheduler with an injected, seeded RNG
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rng: Pcg32,
    speed_multiplier: f32,
    timer: Timer,
}

impl SpawnScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngState::new(seed).to_rng(),
            speed_multiplier: 1.0,
            timer: Timer::default(),
        }
    }

    /// Interval multiplier for the current run (< 1 speeds play up)
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Next interval for a target of `kind` at the session's level and score
    pub fn next_interval_ms(&self, level: u8, kind: TargetKind, score: u32) -> u64 {
        let raw = SpawnTiming::for_target(level, kind).interval_ms(score);
        ((raw as f32 * self.speed_multiplier).round() as u64).max(1)
    }

    /// Arm the timer for the first spawn of a level
    pub fn restart(&mut self, session: &Session) {
        let interval = self.next_interval_ms(session.level, session.active_kind, session.score);
        self.timer.reset(interval);
    }

    #[inline]
    pub fn until_spawn(&self) -> u64 {
        self.timer.remaining()
    }

    #[inline]
    pub fn is_due(&self) -> bool {
        self.timer.is_due()
    }

    #[inline]
    pub fn elapse(&mut self, ms: u64) {
        self.timer.elapse(ms);
    }

    /// Count the current target as a miss if it is still on the board unstruck
    pub fn resolve_miss(&mut self, session: &mut Session, time_cap: u32) -> Option<MissedTarget> {
        let cell = session.active_cell?;
        if !session.pending_resolution {
            return None;
        }
        let kind = session.active_kind;
        let resolution = scoring::resolve(kind, Outcome::Miss, session.combo, session.is_data_leak());
        scoring::apply(session, &resolution, time_cap);
        session.clear_target();
        Some(MissedTarget {
            cell,
            kind,
            resolution,
        })
    }

    /// Put a new target on the board and schedule the next tick
    pub fn draw(&mut self, session: &mut Session) -> SpawnedTarget {
        let cell = self.rng.random_range(0..BOARD_CELLS);
        let table = SpawnTable::for_level(session.level, session.is_data_leak());
        let kind = table.sample(self.rng.random::<f64>());

        session.active_cell = Some(cell);
        session.active_kind = kind;
        session.pending_resolution = true;

        let next_interval_ms = self.next_interval_ms(session.level, kind, session.score);
        self.timer.reset(next_interval_ms);

        SpawnedTarget {
            cell,
            kind,
            next_interval_ms,
        }
    }
}
