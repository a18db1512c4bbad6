//! Whack a Robo entry point
//!
//! Natively this runs a headless demo session: an autoplayer drives the engine
//! on a virtual frame clock and the result is printed as JSON. The browser
//! build goes through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;

    use whack_a_robo::sim::{AutoPlayer, GameEvent, GameSession, ScoreReport};
    use whack_a_robo::{Difficulty, HighScores, Settings, cell_to_row_col, platform};

    /// Virtual frame length
    const FRAME_MS: u64 = 50;
    /// Safety stop for the demo loop
    const MAX_VIRTUAL_MS: u64 = 30 * 60 * 1000;

    #[derive(Debug, Default, serde::Serialize)]
    struct Stats {
        spawns: u32,
        hits: u32,
        traps_hit: u32,
        misses: u32,
        best_combo: u32,
    }

    #[derive(serde::Serialize)]
    struct Summary {
        seed: u64,
        difficulty: Difficulty,
        report: Option<ScoreReport>,
        stats: Stats,
        leaderboard_rank: Option<usize>,
    }

    /// Apply `--seed N`, `--nightmare`, `--skill F` on top of the settings file
    fn apply_args(settings: &mut Settings) {
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(seed) => settings.seed = Some(seed),
                    None => log::warn!("--seed expects an integer"),
                },
                "--nightmare" => settings.difficulty = Difficulty::Nightmare,
                "--difficulty" => match args.next().as_deref().and_then(Difficulty::from_str) {
                    Some(difficulty) => settings.difficulty = difficulty,
                    None => log::warn!("--difficulty expects normal or nightmare"),
                },
                "--skill" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(skill) => settings.autoplay_skill = skill,
                    None => log::warn!("--skill expects a number between 0 and 1"),
                },
                other => log::warn!("Ignoring unknown argument {}", other),
            }
        }
    }

    fn render_board(active: Option<u8>) -> String {
        let mut rows = [['.'; 3]; 3];
        if let Some(cell) = active {
            let (row, col) = cell_to_row_col(cell);
            rows[row as usize][col as usize] = 'X';
        }
        rows.iter()
            .map(|r| r.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn run() {
        let mut settings = Settings::load();
        apply_args(&mut settings);
        let seed = settings.seed.unwrap_or_else(platform::fresh_seed);
        log::info!(
            "Whack a Robo demo: seed {}, {}, skill {:.2}",
            seed,
            settings.difficulty.as_str(),
            settings.effective_skill()
        );

        let mut game = GameSession::new(settings.game_config(), seed);
        let mut player = AutoPlayer::new(settings.effective_skill(), seed.rotate_left(17));
        let mut stats = Stats::default();
        let mut report = None;

        let mut events = game.start(None);
        let mut elapsed = 0;
        loop {
            for event in events.drain(..) {
                match &event {
                    GameEvent::TargetSpawned { .. } => {
                        stats.spawns += 1;
                        log::trace!("{}", render_board(game.session().active_cell));
                    }
                    GameEvent::TargetHit { kind, .. } if kind.is_penalized_hit() => stats.traps_hit += 1,
                    GameEvent::TargetHit { resolution, .. } => {
                        stats.hits += 1;
                        stats.best_combo = stats.best_combo.max(resolution.combo_after);
                    }
                    GameEvent::TargetMissed { .. } => stats.misses += 1,
                    GameEvent::ScoreSubmitted(r) => report = Some(*r),
                    _ => {}
                }
                if settings.sound_enabled {
                    if let Some(cue) = event.sound_cue() {
                        log::debug!("sound: {}", cue.as_str());
                    }
                }
            }

            if game.phase().is_terminal() || elapsed >= MAX_VIRTUAL_MS {
                break;
            }
            events = player.step(&mut game, FRAME_MS);
            elapsed += FRAME_MS;
        }

        let leaderboard_rank = report.as_ref().and_then(|r| {
            let path = Path::new(HighScores::DEFAULT_PATH);
            let mut scores = HighScores::load_from(path);
            let place = scores.record(r, platform::now_ms());
            if place.is_some() {
                scores.save_to(path);
            }
            if let Some(best) = scores.best() {
                log::info!("Best run on this machine: {} points ({:?})", best.score, best.outcome);
            }
            place
        });

        let summary = Summary {
            seed,
            difficulty: settings.difficulty,
            report,
            stats,
            leaderboard_rank,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not encode summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry is `platform::web::wasm_start`
}
