//! Match runner for playing games between characters

use std::path::{Path, PathBuf};

use gunjin_core::{Character, FormationError, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::game::Game;
use crate::results::{GameResult, MatchResult};

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Maximum plies per game before declaring a draw
    pub max_turns: u32,
    /// Seed of the first game; game `n` uses `seed + n`
    pub seed: u64,
    /// Whether to swap sides each game
    pub alternate_sides: bool,
    /// Log every game result at info level
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_turns: 400,
            seed: 0,
            alternate_sides: true,
            verbose: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read match config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid match config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl MatchConfig {
    /// Reads a TOML file; missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Builds a character for the given side and game seed.
pub type Spawner<'a> = &'a dyn Fn(Player, u64) -> Box<dyn Character>;

/// Runs matches between two characters
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two characters
    ///
    /// Returns the result from `first`'s perspective. `first` plays North
    /// in even games, and in every game when sides do not alternate.
    pub fn run_match(
        &self,
        first: Spawner<'_>,
        second: Spawner<'_>,
    ) -> Result<MatchResult, FormationError> {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let seed = self.config.seed.wrapping_add(u64::from(game_num));
            let first_north = !self.config.alternate_sides || game_num % 2 == 0;
            let first_side = if first_north {
                Player::North
            } else {
                Player::South
            };

            let mut rng = StdRng::seed_from_u64(seed);
            let mut a = first(first_side, seed);
            let mut b = second(first_side.other(), seed.wrapping_add(1));
            let mut game = Game::new(self.config.max_turns, &mut rng);
            let record = if first_north {
                game.play(a.as_mut(), b.as_mut(), &mut rng)?
            } else {
                game.play(b.as_mut(), a.as_mut(), &mut rng)?
            };

            let game_result = match record.winner_side() {
                None => GameResult::Draw,
                Some(side) if side == first_side => GameResult::Win,
                Some(_) => GameResult::Loss,
            };
            result.record(game_result, record);

            if self.config.verbose {
                info!(
                    game = game_num + 1,
                    of = self.config.num_games,
                    side = %first_side,
                    result = ?game_result,
                    score = %format!("{}-{}-{}", result.wins, result.losses, result.draws),
                    "game finished"
                );
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
