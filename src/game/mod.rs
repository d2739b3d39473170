//! Game state, market and the phase state machine

pub mod command;
pub mod controller;
pub mod fixed_script_controller;
pub mod game_loop;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod logger;
pub mod market;
pub mod notifier;
pub mod phase;
pub mod scorer;
pub mod setup;
pub mod state;

pub use command::{DraftCommand, FlipCommand};
pub use controller::{GameStateView, PlayerController};
pub use fixed_script_controller::FixedScriptController;
pub use game_loop::{select_winner, GameLoop, GameResult, MAX_BOT_ATTEMPTS};
pub use heuristic_controller::HeuristicController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use market::{Market, MarketError, RefillSummary};
pub use notifier::{ConsoleNotifier, Notifier, NullNotifier, RecordingNotifier};
pub use phase::Phase;
pub use scorer::calculate_score;
pub use state::GameState;
