//! Session controller
//!
//! `GameSession` owns the session, the countdown clock, the spawn scheduler
//! and the score handler. Commands and `advance` return the events they caused.
//!
//! Virtual time only moves through `advance(dt_ms)` (or `tick(now_ms)`, which
//! derives `dt` from the previous call). Inside one `advance`, deadlines fire in
//! time order; a countdown tick and a spawn tick due at the same instant fire
//! countdown first, so an expiring clock ends the session before the spawn runs.

use serde::Serialize;

use super::clock::{GameClock, Timer};
use super::events::{GameEvent, ScoreReport, SessionOutcome};
use super::level::{self, LevelConfig, LevelTransition};
use super::scheduler::SpawnScheduler;
use super::scoring::{self, Outcome};
use super::state::{Difficulty, GamePhase, Session, TargetKind};
use crate::consts::{COUNTDOWN_TICK_MS, RAMPAGE_COMBO};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameConfig {
    pub levels: LevelConfig,
    pub difficulty: Difficulty,
    /// Countdown period; one second of game time by default
    pub countdown_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: LevelConfig::default(),
            difficulty: Difficulty::Normal,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
        }
    }
}

/// Callback receiving the terminal score
pub type ScoreHandler = Box<dyn FnMut(ScoreReport)>;

/// Renderable view of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub time_left: u32,
    pub level: u8,
    pub level_name: &'static str,
    pub combo: u32,
    pub active_cell: Option<u8>,
    pub active_kind: TargetKind,
    pub phase: GamePhase,
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_rampage: bool,
    pub is_data_leak: bool,
    /// Multiplier the next clean hit would get
    pub multiplier: i32,
    /// Points still needed to clear the current level
    pub points_to_next: u32,
}

/// Top-level orchestrator of a play session
pub struct GameSession {
    session: Session,
    config: GameConfig,
    clock: GameClock,
    scheduler: SpawnScheduler,
    /// Level-complete banner
    transition: Timer,
    last_now_ms: Option<u64>,
    submitted: bool,
    on_score_submit: Option<ScoreHandler>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("session", &self.session)
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("scheduler", &self.scheduler)
            .field("transition", &self.transition)
            .field("submitted", &self.submitted)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let countdown_tick_ms = config.countdown_tick_ms.max(1);
        Self {
            session: Session::default(),
            config: GameConfig {
                countdown_tick_ms,
                ..config
            },
            clock: GameClock::new(countdown_tick_ms),
            scheduler: SpawnScheduler::new(seed),
            transition: Timer::default(),
            last_now_ms: None,
            submitted: false,
            on_score_submit: None,
        }
    }

    /// Register the terminal score callback (called at most once per session)
    pub fn set_score_handler(&mut self, handler: impl FnMut(ScoreReport) + 'static) {
        self.on_score_submit = Some(Box::new(handler));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.session;
        Snapshot {
            score: s.score,
            time_left: s.time_left,
            level: s.level,
            level_name: level::level_info(s.level).name,
            combo: s.combo,
            active_cell: s.active_cell,
            active_kind: s.active_kind,
            phase: s.phase,
            is_playing: s.phase.is_playing(),
            is_paused: s.phase.is_paused(),
            is_rampage: s.is_rampage(),
            is_data_leak: s.is_data_leak(),
            multiplier: scoring::multiplier(s.combo, s.is_data_leak()),
            points_to_next: self.config.levels.remaining_for(s),
        }
    }

    /// Begin a fresh session, cancelling anything in flight
    pub fn start(&mut self, difficulty: Option<Difficulty>) -> Vec<GameEvent> {
        let was_playing = self.session.phase.is_playing();
        let was_paused = self.session.phase.is_paused();

        // Cancel outstanding timers before touching the session
        self.clock = GameClock::new(self.config.countdown_tick_ms);
        self.transition = Timer::default();

        if let Some(difficulty) = difficulty {
            self.config.difficulty = difficulty;
        }
        self.session = Session::new(self.config.levels.start_time_secs);
        self.submitted = false;
        self.scheduler
            .set_speed_multiplier(self.config.difficulty.speed_multiplier());
        self.scheduler.restart(&self.session);

        log::info!(
            "Session started ({}, first spawn in {}ms)",
            self.config.difficulty.as_str(),
            self.scheduler.until_spawn()
        );

        let mut events = vec![GameEvent::Started {
            difficulty: self.config.difficulty,
        }];
        if !was_playing {
            events.push(GameEvent::PlayingChanged(true));
        }
        if was_paused {
            events.push(GameEvent::PausedChanged(false));
        }
        events
    }

    pub fn pause(&mut self) -> Vec<GameEvent> {
        if self.session.phase != GamePhase::Playing {
            return Vec::new();
        }
        self.session.phase = GamePhase::Paused;
        log::debug!("Paused");
        vec![GameEvent::PausedChanged(true)]
    }

    pub fn resume(&mut self) -> Vec<GameEvent> {
        if self.session.phase != GamePhase::Paused {
            return Vec::new();
        }
        self.session.phase = GamePhase::Playing;
        log::debug!("Resumed");
        vec![GameEvent::PausedChanged(false)]
    }

    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        match self.session.phase {
            GamePhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Leave the game without submitting a score
    pub fn exit(&mut self) -> Vec<GameEvent> {
        let phase = self.session.phase;
        if phase == GamePhase::Idle {
            return Vec::new();
        }

        self.clock = GameClock::new(self.config.countdown_tick_ms);
        self.transition = Timer::default();
        self.session = Session::default();
        log::info!("Session exited from {:?}", phase);

        let mut events = Vec::new();
        if phase.is_paused() {
            events.push(GameEvent::PausedChanged(false));
        }
        if phase.is_playing() {
            events.push(GameEvent::PlayingChanged(false));
        }
        events
    }

    /// Strike a cell. Anything but the active, unstruck target while playing is ignored.
    pub fn whack(&mut self, cell: u8) -> Vec<GameEvent> {
        let s = &mut self.session;
        if s.phase != GamePhase::Playing || s.active_cell != Some(cell) || !s.pending_resolution {
            return Vec::new();
        }

        let kind = s.active_kind;
        let combo_before = s.combo;
        let resolution = scoring::resolve(kind, Outcome::Hit, combo_before, s.is_data_leak());
        scoring::apply(s, &resolution, self.config.levels.max_time_secs);
        s.clear_target();
        log::debug!(
            "Hit {} at {} ({:+}) -> score {}, combo {}",
            kind.as_str(),
            cell,
            resolution.score_delta,
            s.score,
            s.combo
        );

        let mut events = vec![GameEvent::TargetHit {
            cell,
            kind,
            resolution,
        }];
        if combo_before < RAMPAGE_COMBO && s.combo >= RAMPAGE_COMBO {
            events.push(GameEvent::RampageStarted);
        }
        self.check_level(&mut events);
        events
    }

    /// Close the tutorial and start the next level
    pub fn dismiss_tutorial(&mut self) -> Vec<GameEvent> {
        let Some(level) = level::enter_next_level(&mut self.session, &self.config.levels) else {
            return Vec::new();
        };
        self.clock.restart();
        self.scheduler.restart(&self.session);
        log::info!("Level {} started ({})", level, level::level_info(level).name);

        let mut events = vec![GameEvent::LevelStarted { level }];
        // Score carried over may already clear the new level
        self.check_level(&mut events);
        events
    }

    /// Advance to host time `now_ms`. The first call only sets the baseline.
    pub fn tick(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let dt = self
            .last_now_ms
            .map(|prev| now_ms.saturating_sub(prev))
            .unwrap_or(0);
        self.last_now_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Advance virtual time by `dt_ms`, firing every deadline that falls inside it
    pub fn advance(&mut self, dt_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut remaining = dt_ms;

        loop {
            match self.session.phase {
                GamePhase::Playing => {
                    let step = self.clock.until_tick().min(self.scheduler.until_spawn());
                    if remaining < step {
                        self.clock.elapse(remaining);
                        self.scheduler.elapse(remaining);
                        break;
                    }
                    remaining -= step;
                    self.clock.elapse(step);
                    self.scheduler.elapse(step);
                    self.fire_due(&mut events);
                }
                GamePhase::LevelComplete => {
                    let left = self.transition.remaining();
                    if remaining < left {
                        self.transition.elapse(remaining);
                        break;
                    }
                    remaining -= left;
                    self.transition.elapse(left);
                    self.open_tutorial_gate(&mut events);
                }
                // Paused, gated, idle and finished sessions do not move
                _ => break,
            }
        }

        events
    }

    fn fire_due(&mut self, events: &mut Vec<GameEvent>) {
        if self.clock.until_tick() == 0 {
            let expired = self.clock.fire(&mut self.session);
            events.push(GameEvent::ClockTick {
                time_left: self.session.time_left,
            });
            if expired {
                self.game_over(events);
                return;
            }
        }

        if self.session.phase == GamePhase::Playing && self.scheduler.is_due() {
            self.spawn_tick(events);
        }
    }

    fn spawn_tick(&mut self, events: &mut Vec<GameEvent>) {
        let time_cap = self.config.levels.max_time_secs;
        if let Some(missed) = self.scheduler.resolve_miss(&mut self.session, time_cap) {
            log::debug!(
                "Missed {} at {} ({:+})",
                missed.kind.as_str(),
                missed.cell,
                missed.resolution.score_delta
            );
            events.push(GameEvent::TargetMissed {
                cell: missed.cell,
                kind: missed.kind,
                resolution: missed.resolution,
            });
            self.check_level(events);
        }
        if self.session.phase != GamePhase::Playing {
            return;
        }

        let spawned = self.scheduler.draw(&mut self.session);
        log::debug!(
            "Spawned {} at {}, next in {}ms",
            spawned.kind.as_str(),
            spawned.cell,
            spawned.next_interval_ms
        );
        events.push(GameEvent::TargetSpawned {
            cell: spawned.cell,
            kind: spawned.kind,
            next_interval_ms: spawned.next_interval_ms,
        });
    }

    fn check_level(&mut self, events: &mut Vec<GameEvent>) {
        match level::after_score_change(&self.session, &self.config.levels) {
            None => {}
            Some(LevelTransition::LevelComplete { level }) => {
                self.session.phase = GamePhase::LevelComplete;
                self.session.clear_target();
                self.transition.reset(self.config.levels.complete_display_ms);
                log::info!("Level {} complete with score {}", level, self.session.score);
                events.push(GameEvent::LevelComplete {
                    level,
                    score: self.session.score,
                });
            }
            Some(LevelTransition::Victory) => {
                self.session.phase = GamePhase::Victory;
                self.session.clear_target();
                log::info!(
                    "Victory with score {} and {}s left",
                    self.session.score,
                    self.session.time_left
                );
                events.push(GameEvent::Victory {
                    score: self.session.score,
                    time_left: self.session.time_left,
                });
                events.push(GameEvent::PlayingChanged(false));
                self.submit(SessionOutcome::Victory, events);
            }
        }
    }

    fn open_tutorial_gate(&mut self, events: &mut Vec<GameEvent>) {
        self.session.phase = GamePhase::TutorialGate;
        let next = self.session.level + 1;
        events.push(GameEvent::TutorialShown {
            level: next,
            tutorial_key: level::level_info(next).tutorial_key,
        });
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        self.session.phase = GamePhase::GameOver;
        self.session.clear_target();
        log::info!("Game over with score {}", self.session.score);
        events.push(GameEvent::GameOver {
            score: self.session.score,
        });
        events.push(GameEvent::PlayingChanged(false));
        self.submit(SessionOutcome::TimeUp, events);
    }

    fn submit(&mut self, outcome: SessionOutcome, events: &mut Vec<GameEvent>) {
        if self.submitted {
            return;
        }
        self.submitted = true;

        let report = ScoreReport {
            score: self.session.score,
            time_remaining: match outcome {
                SessionOutcome::TimeUp => 0,
                SessionOutcome::Victory => self.session.time_left,
            },
            level: self.session.level,
            outcome,
        };
        events.push(GameEvent::ScoreSubmitted(report));
        if let Some(handler) = self.on_score_submit.as_mut() {
            handler(report);
        }
    }
}
