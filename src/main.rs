//! Point Salad - Main Binary
//!
//! Hot-seat play on one terminal, bot tournaments and manifest checking

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use point_salad_rs::{
    config::GameConfig,
    core::PlayerId,
    game::{
        ConsoleNotifier, FixedScriptController, GameLoop, GameState, HeuristicController,
        InteractiveController, PlayerController, VerbosityLevel,
    },
    loader::{load_manifest_async, StaticCatalogue},
    tournament::{run_tournament, TournamentConfig},
};
use std::path::PathBuf;

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "salad")]
#[command(about = "Point Salad - card drafting game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hot-seat game: humans share this terminal, bots fill the other seats
    Play {
        /// Total number of seats
        #[arg(long, short = 'p', default_value_t = 2)]
        players: usize,

        /// How many of the seats are bots (the last seats)
        #[arg(long, short = 'b', default_value_t = 1)]
        bots: usize,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Card manifest (defaults to the configured path)
        #[arg(long, value_name = "MANIFEST")]
        manifest: Option<PathBuf>,

        /// JSON file overriding the game configuration
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Scripted moves for the first human seat (space or comma separated, e.g. "AB n 1")
        #[arg(long, value_name = "MOVES")]
        fixed_inputs: Option<String>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run many bot-only games in parallel and report statistics
    Tourney {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Seats per game
        #[arg(long, short = 'p', default_value_t = 2)]
        players: usize,

        /// Tournament seed; game i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_name = "MANIFEST")]
        manifest: Option<PathBuf>,

        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a card manifest and print every criterion in canonical form
    CheckManifest {
        #[arg(value_name = "MANIFEST")]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            players,
            bots,
            seed,
            manifest,
            config,
            fixed_inputs,
            verbosity,
        } => {
            run_play(
                players,
                bots,
                seed,
                manifest,
                config,
                fixed_inputs,
                verbosity.into(),
            )
            .await?
        }
        Commands::Tourney {
            games,
            players,
            seed,
            manifest,
            config,
            json,
        } => run_tourney(games, players, seed, manifest, config, json).await?,
        Commands::CheckManifest { path } => run_check_manifest(path).await?,
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_json_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn manifest_path(config: &GameConfig, manifest: Option<PathBuf>) -> PathBuf {
    manifest.unwrap_or_else(|| PathBuf::from(&config.manifest_path))
}

#[allow(clippy::too_many_arguments)] // CLI parameters naturally map to function args
async fn run_play(
    players: usize,
    bots: usize,
    seed: Option<u64>,
    manifest: Option<PathBuf>,
    config: Option<PathBuf>,
    fixed_inputs: Option<String>,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    println!("=== Point Salad ===\n");

    let config = load_config(config)?;
    config.check_player_count(players)?;
    if bots > players {
        bail!("{bots} bots cannot fit in {players} seats");
    }

    let manifest = manifest_path(&config, manifest);
    println!("Loading cards from {}...", manifest.display());
    let start = std::time::Instant::now();
    let cards = load_manifest_async(&manifest).await?;
    println!("  Loaded {} cards", cards.len());
    eprintln!("  (Loading time: {:.2}ms)", start.elapsed().as_secs_f64() * 1000.0);
    let catalogue = StaticCatalogue::new(cards);

    let humans = players - bots;
    let seats: Vec<(String, bool)> = (0..players)
        .map(|i| {
            if i < humans {
                (format!("Player {}", i + 1), false)
            } else {
                (format!("Bot {}", i - humans + 1), true)
            }
        })
        .collect();
    let seat_refs: Vec<(&str, bool)> = seats.iter().map(|(n, b)| (n.as_str(), *b)).collect();

    let mut game = GameState::with_players(config, &seat_refs);
    let seed = seed.unwrap_or_else(rand::random);
    game.seed_rng(seed);
    game.logger.set_verbosity(verbosity);
    println!("Using random seed: {seed}\n");

    let mut fixed_inputs = fixed_inputs;
    let mut controllers: Vec<Box<dyn PlayerController>> = Vec::with_capacity(players);
    let mut human_ids: Vec<PlayerId> = Vec::new();
    for player in &game.players {
        let controller: Box<dyn PlayerController> = if player.is_bot {
            Box::new(HeuristicController::new(player.id))
        } else {
            human_ids.push(player.id);
            match fixed_inputs.take() {
                Some(script) => Box::new(FixedScriptController::from_text(player.id, &script)),
                None => Box::new(InteractiveController::new(player.id)),
            }
        };
        println!("  {}", player.label());
        controllers.push(controller);
    }
    println!();

    let mut notifier = ConsoleNotifier::new(human_ids);
    let mut game_loop = GameLoop::new(&mut game, &catalogue, &mut notifier);
    let result = game_loop.run_game(&mut controllers)?;

    if verbosity >= VerbosityLevel::Minimal {
        println!("\n=== Game Over ===");
        let winner = game.get_player(result.winner)?;
        println!("Winner: {} ({} points)", winner.name, result.winning_score());
        println!("Turns played: {}", result.turns_played);
        for player in &game.players {
            println!("  {}: {}", player.name, player.score);
        }
    }

    Ok(())
}

async fn run_tourney(
    games: usize,
    players: usize,
    seed: u64,
    manifest: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let manifest = manifest_path(&config, manifest);
    let cards = load_manifest_async(&manifest)
        .await
        .with_context(|| format!("loading manifest {}", manifest.display()))?;

    if !json {
        println!("=== Point Salad - Tournament Mode ===\n");
        println!("Running {games} games with {players} bots (seed {seed})\n");
    }

    let tournament = TournamentConfig {
        games,
        players,
        seed,
        game_config: config,
    };
    // rayon work; keep it off the async worker
    let report = tokio::task::spawn_blocking(move || run_tournament(cards, tournament)).await??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

async fn run_check_manifest(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(GameConfig::default().manifest_path));
    let cards = load_manifest_async(&path)
        .await
        .with_context(|| format!("checking manifest {}", path.display()))?;

    for card in &cards {
        match &card.criterion {
            Some(criterion) => println!(
                "{:>4} {:<8} [{}] {criterion}",
                card.id.as_u32(),
                card.vegetable.as_str(),
                criterion.shape()
            ),
            None => println!(
                "{:>4} {:<8} <no criterion>",
                card.id.as_u32(),
                card.vegetable.as_str()
            ),
        }
    }
    println!("\n{} cards OK", cards.len());
    Ok(())
}
