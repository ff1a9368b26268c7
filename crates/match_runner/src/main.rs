//! Match CLI
//!
//! Pit the Gunjin Shogi AI against another character and report the result.

use std::path::PathBuf;

use ai_engine::{Ai, AiConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gunjin_core::{Character, FormationBook, Player};
use match_runner::{MatchConfig, MatchReport, MatchRunner, Spawner};
use random_engine::RandomCharacter;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Another copy of the AI
    Ai,
    /// Uniformly random legal moves
    Random,
}

#[derive(Debug, Parser)]
#[command(
    name = "gunjin-match",
    version,
    about = "Run Gunjin Shogi matches between the AI and an opponent"
)]
struct Cli {
    /// Match settings in TOML; command line flags override them
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, short)]
    games: Option<u32>,

    /// Seed of the first game
    #[arg(long, short)]
    seed: Option<u64>,

    /// Plies before a game is called a draw
    #[arg(long)]
    max_turns: Option<u32>,

    /// Formation book used by every AI
    #[arg(long, default_value = "resources/formations.txt")]
    formations: PathBuf,

    /// Upper bound (exclusive) on random swaps after the AI places a formation
    #[arg(long)]
    max_random_swaps: Option<usize>,

    /// Who the AI plays against
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Write the match report as JSON
    #[arg(long)]
    out: Option<PathBuf>,

    /// Only print the final report
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if let Some(games) = cli.games {
        config.num_games = games;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = max_turns;
    }
    if cli.quiet {
        config.verbose = false;
    }

    let mut ai_config = AiConfig {
        formation_path: cli.formations.clone(),
        ..AiConfig::default()
    };
    if let Some(swaps) = cli.max_random_swaps {
        ai_config.max_random_swaps = swaps;
    }
    let book = FormationBook::load(&ai_config.formation_path).context("cannot set up the AI")?;
    info!(
        formations = book.len(),
        path = %ai_config.formation_path.display(),
        "formation book loaded"
    );

    let ai = |player: Player, _seed: u64| -> Box<dyn Character> {
        Box::new(Ai::with_formations(player, ai_config.clone(), book.clone()))
    };
    let random = |player: Player, seed: u64| -> Box<dyn Character> {
        Box::new(RandomCharacter::new(player, seed))
    };
    let opponent: Spawner<'_> = match cli.opponent {
        Opponent::Ai => &ai,
        Opponent::Random => &random,
    };
    let opponent_name = match cli.opponent {
        Opponent::Ai => "Computer",
        Opponent::Random => "Random",
    };

    info!(
        games = config.num_games,
        seed = config.seed,
        opponent = opponent_name,
        "match start"
    );
    let runner = MatchRunner::new(config.clone());
    let result = runner
        .run_match(&ai, opponent)
        .context("match aborted during setup")?;

    let report = MatchReport::new("Computer", opponent_name, config, result);
    println!("{}", report.generate_report());

    if let Some(path) = &cli.out {
        report.save(path)?;
        info!(path = %path.display(), "report saved");
    }
    Ok(())
}
