//! Game rules: state, move validation and scoring

mod moves;
mod scoring;
mod state;

pub use moves::{MoveError, MoveRequest, Referee, Violation};
pub use scoring::ScoringPolicy;
pub use state::{AppliedMove, GameError, GameState, MIN_PLAYERS};
