//! Command implementations

pub mod play;
pub mod selfplay;
pub mod suggest;

pub use play::{PlayCommand, run_play};
pub use selfplay::{GameOutcome, SELFPLAY_PLAYERS, SelfPlayStatistics, play_out, run_selfplay};
pub use suggest::{SuggestReport, suggest_for_file, suggest_for_game};
