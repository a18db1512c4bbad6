//! Local leaderboard of finished sessions
//!
//! Runs are ordered by standing: a cleared run beats one that ran out of
//! time, then the higher score wins, then the run with more seconds left.
//! Only the best `MAX_ENTRIES` are kept.

use serde::{Deserialize, Serialize};

use crate::sim::{ScoreReport, SessionOutcome};

/// Size of the board
pub const MAX_ENTRIES: usize = 10;

/// One finished session on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    #[serde(flatten)]
    pub report: ScoreReport,
    /// Unix timestamp (ms) of the finish
    pub recorded_at: f64,
}

impl HighScoreEntry {
    pub fn standing(&self) -> (bool, u32, u32) {
        standing(&self.report)
    }
}

/// Sort key for a report; larger is better
fn standing(report: &ScoreReport) -> (bool, u32, u32) {
    (
        report.outcome == SessionOutcome::Victory,
        report.score,
        report.time_remaining,
    )
}

/// Best finished sessions, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "whack_a_robo_highscores";

    /// Native leaderboard file
    pub const DEFAULT_PATH: &'static str = "whack_a_robo_highscores.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session and return its 1-based place, or `None` if it
    /// missed the board. Equal standings keep the older run ahead.
    pub fn record(&mut self, report: &ScoreReport, recorded_at: f64) -> Option<usize> {
        // A run that timed out without scoring is not worth a slot
        if report.outcome == SessionOutcome::TimeUp && report.score == 0 {
            return None;
        }

        let key = standing(report);
        let place = self.entries.partition_point(|e| e.standing() >= key);
        if place >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(
            place,
            HighScoreEntry {
                report: *report,
                recorded_at,
            },
        );
        self.entries.truncate(MAX_ENTRIES);
        Some(place + 1)
    }

    /// Best run so far
    pub fn best(&self) -> Option<&ScoreReport> {
        self.entries.first().map(|e| &e.report)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a stored board, restoring order and size if it was edited by hand
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: Self = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.standing().cmp(&a.standing()));
        scores.entries.truncate(MAX_ENTRIES);
        Ok(scores)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        crate::platform::storage_get(Self::STORAGE_KEY)
            .and_then(|json| {
                Self::from_json(&json)
                    .map_err(|e| log::warn!("Discarding stored leaderboard: {}", e))
                    .ok()
            })
            .unwrap_or_default()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let stored = serde_json::to_string(self)
            .is_ok_and(|json| crate::platform::storage_set(Self::STORAGE_KEY, &json));
        if !stored {
            log::warn!("Leaderboard not saved");
        }
    }

    /// Load the board from a JSON file; a missing file is an empty board
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::new();
        };
        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable leaderboard {}: {}", path.display(), e);
            Self::new()
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        let written = serde_json::to_string_pretty(self)
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(path, json));
        match written {
            Ok(()) => log::debug!("Leaderboard written to {}", path.display()),
            Err(e) => log::warn!("Could not save leaderboard to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_up(score: u32) -> ScoreReport {
        ScoreReport {
            score,
            time_remaining: 0,
            level: 1,
            outcome: SessionOutcome::TimeUp,
        }
    }

    fn victory(score: u32, time_remaining: u32) -> ScoreReport {
        ScoreReport {
            score,
            time_remaining,
            level: 3,
            outcome: SessionOutcome::Victory,
        }
    }

    fn scores_of(board: &HighScores) -> Vec<(SessionOutcome, u32, u32)> {
        board
            .entries
            .iter()
            .map(|e| (e.report.outcome, e.report.score, e.report.time_remaining))
            .collect()
    }

    #[test]
    fn test_scoreless_time_up_is_not_recorded() {
        let mut board = HighScores::new();
        assert_eq!(board.record(&time_up(0), 0.0), None);
        assert!(board.is_empty());
        assert_eq!(board.record(&victory(0, 3), 0.0), Some(1));
    }

    #[test]
    fn test_victory_outranks_time_up_at_equal_score() {
        let mut board = HighScores::new();
        assert_eq!(board.record(&time_up(120), 1.0), Some(1));
        assert_eq!(board.record(&victory(120, 4), 2.0), Some(1));
        assert_eq!(board.record(&victory(120, 11), 3.0), Some(1));
        assert_eq!(board.record(&time_up(45), 4.0), Some(4));
        assert_eq!(
            scores_of(&board),
            vec![
                (SessionOutcome::Victory, 120, 11),
                (SessionOutcome::Victory, 120, 4),
                (SessionOutcome::TimeUp, 120, 0),
                (SessionOutcome::TimeUp, 45, 0),
            ]
        );
        assert_eq!(board.best(), Some(&victory(120, 11)));
    }

    #[test]
    fn test_equal_runs_keep_older_first() {
        let mut board = HighScores::new();
        board.record(&time_up(40), 1.0);
        assert_eq!(board.record(&time_up(40), 2.0), Some(2));
        let stamps: Vec<f64> = board.entries.iter().map(|e| e.recorded_at).collect();
        assert_eq!(stamps, vec![1.0, 2.0]);
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = HighScores::new();
        for score in 1..=15 {
            board.record(&time_up(score), score as f64);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().map(|e| e.report.score), Some(6));
        assert_eq!(board.record(&time_up(6), 99.0), None);
        assert_eq!(board.record(&time_up(7), 99.0), Some(MAX_ENTRIES));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_stored_board_is_reordered() {
        let json = r#"{ "entries": [
            { "score": 50, "time_remaining": 0, "level": 2, "outcome": "TimeUp", "recorded_at": 1.0 },
            { "score": 125, "time_remaining": 8, "level": 3, "outcome": "Victory", "recorded_at": 2.0 }
        ] }"#;
        let board = HighScores::from_json(json).unwrap();
        assert_eq!(board.best(), Some(&victory(125, 8)));
        assert_eq!(board.entries[1].report.level, 2);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("whack_scores_{}.json", std::process::id()));
        let mut board = HighScores::new();
        board.record(&victory(130, 12), 1_700_000_000_000.0);
        board.record(&time_up(64), 1_700_000_100_000.0);
        board.save_to(&path);
        assert_eq!(HighScores::load_from(&path), board);

        std::fs::write(&path, "[1, 2").unwrap();
        assert!(HighScores::load_from(&path).is_empty());
        let _ = std::fs::remove_file(&path);
        assert!(HighScores::load_from(&path).is_empty());
    }
}
