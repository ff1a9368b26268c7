//! Match results storage and reporting

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameRecord;
use crate::match_runner::MatchConfig;

/// Result of a single game from one character's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Every game in the order played
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult, game: GameRecord) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.games.push(game);
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from the first character's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot access report {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed report {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A finished match as written to disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    /// Names of the two characters, first one first
    pub participants: [String; 2],
    /// Configuration used
    pub config: MatchConfig,
    pub result: MatchResult,
}

impl MatchReport {
    pub fn new(first: &str, second: &str, config: MatchConfig, result: MatchResult) -> Self {
        Self {
            participants: [first.to_string(), second.to_string()],
            config,
            result,
        }
    }

    /// Save the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let [first, second] = &self.participants;
        let r = &self.result;
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n\n", first, second));
        report.push_str(&format!(
            "Config: {} games, {} plies max, seed {}\n\n",
            self.config.num_games, self.config.max_turns, self.config.seed
        ));
        report.push_str(&format!(
            "{:<4} {:<8} {:<10} {:>6} {:>8}\n",
            "#", "Winner", "End", "Plies", "Score"
        ));
        report.push_str(&"-".repeat(40));
        report.push('\n');

        for (i, game) in r.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<8} {:<10} {:>6} {:>4}:{:<3}\n",
                i + 1,
                game.winner.as_deref().unwrap_or("draw"),
                format!("{:?}", game.end),
                game.plies,
                game.scores[0],
                game.scores[1]
            ));
        }

        report.push_str(&format!(
            "\n{}: {} wins, {} losses, {} draws ({:.1}%)\n",
            first,
            r.wins,
            r.losses,
            r.draws,
            r.score() * 100.0
        ));
        report
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
