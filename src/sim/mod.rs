//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only (no wall clock)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autoplay;
pub mod clock;
pub mod events;
pub mod level;
pub mod scheduler;
pub mod scoring;
pub mod spawn_table;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use clock::{GameClock, Timer};
pub use events::{GameEvent, ScoreReport, SessionOutcome, SoundCue};
pub use level::{LevelConfig, LevelInfo, LevelTransition, level_info};
pub use scheduler::{MissedTarget, SpawnScheduler, SpawnTiming, SpawnedTarget};
pub use scoring::{Outcome, Resolution};
pub use spawn_table::SpawnTable;
pub use state::{Difficulty, GamePhase, RngState, Session, TargetKind};
pub use tick::{GameConfig, GameSession, ScoreHandler, Snapshot};
