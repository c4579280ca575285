//! Computer players
//!
//! A strategy picks one move out of the ranked suggestions for the player to
//! move; the referee validates it like any other move.

pub mod strategy;

pub use strategy::{GreedyStrategy, LongestStrategy, RandomStrategy, Strategy, StrategyType};
