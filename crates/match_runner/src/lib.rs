//! Match Runner for Gunjin Shogi
//!
//! This crate provides infrastructure for:
//! - Driving a single game between two characters
//! - Running seeded matches with alternating sides
//! - Saving and reporting match results
//!
//! # Usage
//!
//! ```bash
//! # Let the AI play twenty games against the random mover
//! cargo run -p match_runner -- --opponent random --games 20 --seed 7
//!
//! # Read settings from a file and keep a JSON report
//! cargo run -p match_runner -- --config match.toml --out report.json
//! ```

mod game;
mod match_runner;
mod results;

pub use game::*;
pub use match_runner::*;
pub use results::*;
