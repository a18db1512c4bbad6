//! Idle/demo player
//!
//! Drives a `GameSession` the way a person would: reacts to spawns after a
//! short delay, usually leaves decoys and impostors alone, and dismisses
//! tutorials. Skill 1.0 never makes a wrong call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::state::{GamePhase, TargetKind};
use super::tick::GameSession;

/// Fastest possible reaction
const MIN_REACTION_MS: u64 = 150;
/// Extra reaction time at skill 0
const SLOW_REACTION_MS: f32 = 600.0;
/// Random jitter added on top
const REACTION_JITTER_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlannedStrike {
    cell: u8,
    delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    skill: f32,
    planned: Option<PlannedStrike>,
}

impl AutoPlayer {
    pub fn new(skill: f32, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            skill: skill.clamp(0.0, 1.0),
            planned: None,
        }
    }

    /// Advance the game by `dt_ms` and react to what happened
    pub fn step(&mut self, game: &mut GameSession, dt_ms: u64) -> Vec<GameEvent> {
        let mut events = game.advance(dt_ms);

        if let Some(strike) = self.planned.as_mut() {
            strike.delay_ms = strike.delay_ms.saturating_sub(dt_ms);
        }

        for event in &events {
            if let GameEvent::TargetSpawned { cell, kind, .. } = event {
                self.planned = self.decide(*cell, *kind);
            }
        }

        if let Some(strike) = self.planned.filter(|s| s.delay_ms == 0) {
            self.planned = None;
            events.extend(game.whack(strike.cell));
        }

        if game.phase() == GamePhase::TutorialGate {
            self.planned = None;
            events.extend(game.dismiss_tutorial());
        }

        events
    }

    fn decide(&mut self, cell: u8, kind: TargetKind) -> Option<PlannedStrike> {
        let wants_hit = match kind {
            TargetKind::Normal | TargetKind::Bonus | TargetKind::Boss => self.rng.random::<f32>() < self.skill,
            // Mistaking a trap for a robot
            TargetKind::Decoy | TargetKind::Impostor => self.rng.random::<f32>() >= self.skill,
        };
        if !wants_hit {
            return None;
        }

        let slowness = ((1.0 - self.skill) * SLOW_REACTION_MS) as u64;
        let jitter = self.rng.random_range(0..REACTION_JITTER_MS);
        Some(PlannedStrike {
            cell,
            delay_ms: MIN_REACTION_MS + slowness + jitter,
        })
    }
}
