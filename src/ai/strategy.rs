//! Move selection strategies
//!
//! Defines the Strategy trait and concrete implementations.

use crate::suggest::Suggestion;

/// A strategy for choosing a move from ranked suggestions
pub trait Strategy {
    /// Select a move from `suggestions`, which arrive best-ranked first
    ///
    /// Returns `None` if there is nothing to play.
    fn select_move<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion>;
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// Highest-scoring move (default)
    Greedy(GreedyStrategy),
    /// Longest word, ties broken by rank
    Longest(LongestStrategy),
    /// Uniform pick among the top few moves
    Random(RandomStrategy),
}

impl Default for StrategyType {
    fn default() -> Self {
        Self::Greedy(GreedyStrategy)
    }
}

impl Strategy for StrategyType {
    fn select_move<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion> {
        match self {
            Self::Greedy(s) => s.select_move(suggestions),
            Self::Longest(s) => s.select_move(suggestions),
            Self::Random(s) => s.select_move(suggestions),
        }
    }
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "greedy", "longest", "random"
    /// Any other name selects greedy.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "longest" => Self::Longest(LongestStrategy),
            "random" => Self::Random(RandomStrategy::default()),
            _ => Self::Greedy(GreedyStrategy),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Greedy(_) => "greedy",
            Self::Longest(_) => "longest",
            Self::Random(_) => "random",
        }
    }
}

/// Always plays the best-ranked suggestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn select_move<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion> {
        suggestions.first()
    }
}

/// Plays the longest word available
///
/// Differs from greedy only under a scoring policy that does not follow
/// length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestStrategy;

impl Strategy for LongestStrategy {
    fn select_move<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion> {
        // max_by_key keeps the last maximum; reverse so the best rank wins ties
        suggestions
            .iter()
            .rev()
            .max_by_key(|s| s.word.chars().count())
    }
}

/// Random pick among the `top` best suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomStrategy {
    pub top: usize,
}

impl RandomStrategy {
    #[must_use]
    pub const fn new(top: usize) -> Self {
        Self { top }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Strategy for RandomStrategy {
    fn select_move<'a>(&self, suggestions: &'a [Suggestion]) -> Option<&'a Suggestion> {
        use rand::prelude::IndexedRandom;

        let pool = &suggestions[..suggestions.len().min(self.top.max(1))];
        pool.choose(&mut rand::rng())
    }
}
