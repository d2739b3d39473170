//! Tournament mode: many bot-only matches in parallel
//!
//! Matches run concurrently with rayon. Every match owns its `GameState`, seeded
//! from the tournament seed plus the match index, so a tournament replays exactly
//! for a given seed no matter how rayon schedules the work.

use crate::config::GameConfig;
use crate::core::{Card, PlayerId};
use crate::game::{
    GameLoop, GameResult, GameState, HeuristicController, NullNotifier, PlayerController,
    VerbosityLevel,
};
use crate::loader::StaticCatalogue;
use crate::{Result, SaladError};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    pub players: usize,
    pub seed: u64,
    pub game_config: GameConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            games: 100,
            players: 2,
            seed: 42,
            game_config: GameConfig::default(),
        }
    }
}

/// Per-seat statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeatStats {
    pub seat: usize,
    pub wins: usize,
    pub average_score: f64,
    pub max_score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TournamentReport {
    pub games_played: usize,
    pub games_failed: usize,
    pub seed: u64,
    pub seats: Vec<SeatStats>,
    /// Highest score seen in any match
    pub max_score: i32,
    pub elapsed_ms: u128,
}

impl TournamentReport {
    fn from_results(results: &[GameResult], players: usize, failed: usize, seed: u64) -> Self {
        let mut seats: Vec<SeatStats> = (0..players)
            .map(|seat| SeatStats {
                seat,
                max_score: i32::MIN,
                ..Default::default()
            })
            .collect();
        let mut totals = vec![0i64; players];

        for result in results {
            for (seat, stats) in seats.iter_mut().enumerate() {
                let id = PlayerId::new(seat as u32);
                let score = result.score_of(id).unwrap_or_default();
                totals[seat] += i64::from(score);
                stats.max_score = stats.max_score.max(score);
                if result.winner == id {
                    stats.wins += 1;
                }
            }
        }

        if !results.is_empty() {
            for (stats, total) in seats.iter_mut().zip(&totals) {
                stats.average_score = *total as f64 / results.len() as f64;
            }
        } else {
            for stats in &mut seats {
                stats.max_score = 0;
            }
        }

        let max_score = seats.iter().map(|s| s.max_score).max().unwrap_or_default();
        TournamentReport {
            games_played: results.len(),
            games_failed: failed,
            seed,
            seats,
            max_score,
            elapsed_ms: 0,
        }
    }
}

impl std::fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Tournament Complete ===")?;
        writeln!(f, "Games played: {} ({} failed)", self.games_played, self.games_failed)?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Elapsed: {}ms", self.elapsed_ms)?;
        for seat in &self.seats {
            let rate = if self.games_played > 0 {
                100.0 * seat.wins as f64 / self.games_played as f64
            } else {
                0.0
            };
            writeln!(
                f,
                "  Seat {}: {} wins ({rate:.1}%), average {:.2}, best {}",
                seat.seat, seat.wins, seat.average_score, seat.max_score
            )?;
        }
        write!(f, "Highest score: {}", self.max_score)
    }
}

/// Play one silent bot-only match
pub fn play_bot_game(
    catalogue: &StaticCatalogue,
    players: usize,
    seed: u64,
    game_config: &GameConfig,
) -> Result<GameResult> {
    let seats: Vec<(String, bool)> = (1..=players).map(|n| (format!("Bot {n}"), true)).collect();
    let seat_refs: Vec<(&str, bool)> = seats.iter().map(|(n, b)| (n.as_str(), *b)).collect();

    let mut game = GameState::with_players(game_config.clone(), &seat_refs);
    game.seed_rng(seed);
    game.logger.set_verbosity(VerbosityLevel::Silent);

    let mut controllers: Vec<Box<dyn PlayerController>> = game
        .players
        .iter()
        .map(|p| Box::new(HeuristicController::new(p.id)) as Box<dyn PlayerController>)
        .collect();

    let mut notifier = NullNotifier;
    let mut game_loop = GameLoop::new(&mut game, catalogue, &mut notifier);
    game_loop.run_game(&mut controllers)
}

/// Run `config.games` bot-only matches in parallel and summarise them
pub fn run_tournament(cards: Vec<Card>, config: TournamentConfig) -> Result<TournamentReport> {
    config.game_config.validate()?;
    config.game_config.check_player_count(config.players)?;
    if config.games == 0 {
        return Err(SaladError::Config("a tournament needs at least one game".to_string()));
    }

    let catalogue = StaticCatalogue::new(cards);
    let start = Instant::now();

    let outcomes: Vec<Result<GameResult>> = (0..config.games)
        .into_par_iter()
        .map(|game_idx| {
            play_bot_game(
                &catalogue,
                config.players,
                config.seed.wrapping_add(game_idx as u64),
                &config.game_config,
            )
        })
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for (game_idx, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Warning: game {game_idx} failed: {e}");
                failed += 1;
            }
        }
    }

    let mut report = TournamentReport::from_results(&results, config.players, failed, config.seed);
    report.elapsed_ms = start.elapsed().as_millis();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Criterion, Vegetable};

    fn cards() -> Vec<Card> {
        let mut cards = Vec::new();
        for (i, vegetable) in Vegetable::ALL.iter().cycle().take(108).enumerate() {
            cards.push(Card::new(
                CardId::new(i as u32),
                *vegetable,
                Some(Criterion::PerMissingType { points: 5 }),
            ));
        }
        cards
    }

    #[test]
    fn test_tournament_is_deterministic() {
        let config = TournamentConfig {
            games: 4,
            players: 3,
            seed: 9,
            game_config: GameConfig::default(),
        };
        let mut a = run_tournament(cards(), config.clone()).unwrap();
        let mut b = run_tournament(cards(), config).unwrap();
        a.elapsed_ms = 0;
        b.elapsed_ms = 0;
        assert_eq!(a, b);
        assert_eq!(a.games_played, 4);
        assert_eq!(a.seats.iter().map(|s| s.wins).sum::<usize>(), 4);
    }

    #[test]
    fn test_tournament_rejects_bad_table() {
        let config = TournamentConfig {
            players: 7,
            ..Default::default()
        };
        assert!(matches!(run_tournament(cards(), config), Err(SaladError::Phase(_))));

        let config = TournamentConfig {
            games: 0,
            ..Default::default()
        };
        assert!(matches!(run_tournament(cards(), config), Err(SaladError::Config(_))));
    }
}
