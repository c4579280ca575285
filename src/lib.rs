//! Balda
//!
//! Engine for Balda, the word-building board game: players take turns placing
//! one letter next to existing letters so that it completes a new dictionary
//! word traced through orthogonally adjacent cells.
//!
//! # Quick Start
//!
//! ```rust
//! use balda::config::GameConfig;
//! use balda::core::Position;
//! use balda::dictionary::WordSet;
//! use balda::game::{GameState, MoveRequest, Referee};
//! use balda::search::PathFinder;
//!
//! let words = WordSet::new(["hello", "shell", "hells"]);
//! let paths = PathFinder::default();
//! let config = GameConfig::default();
//! let referee = Referee::new(&words, &paths, &config);
//!
//! let game = GameState::create("demo", 5, "hello", ["Ann", "Bob"]).unwrap();
//! let request = MoveRequest::new("Ann", Position::new(1, 0), "s", "shell");
//! let game = referee.apply_move(&game, &request).unwrap();
//!
//! assert_eq!(game.score_of("Ann"), 5);
//! assert_eq!(game.current_player(), "Bob");
//! ```

// Board geometry and letter handling
pub mod core;

// Word-path search and its cache
pub mod search;

// Word lists
pub mod dictionary;

// Game state and move validation
pub mod game;

// Ranked move suggestions
pub mod suggest;

// Computer players
pub mod ai;

// Persistence
pub mod store;

// Store-backed game host
pub mod service;

// Engine tunables
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
