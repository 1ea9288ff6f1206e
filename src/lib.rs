//! Engine for a liquid-sorting puzzle: tubes of stacked colored units are
//! poured into one another until every non-empty tube is full and holds a
//! single color.
//!
//! The engine functions in [`rules`], [`generator`] and [`solver`] are pure:
//! they take a board snapshot and return fresh values. [`session`] layers a
//! caller-side state machine (selection, undo history, hints, level
//! progression) on top of them.

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod palette;
pub mod rules;
pub mod session;
pub mod solver;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use generator::{generate_level, generate_level_seeded, generate_level_with, generate_levels};
pub use model::{CAPACITY, Color, LevelDefinition, Tube, format_board, parse_board};
pub use palette::Palette;
pub use rules::{Move, PourOutcome, apply_move, can_move, check_win, execute_move, is_deadlocked, legal_moves};
pub use session::{GameSession, Phase, SessionAction, SessionEvent};
pub use solver::{Hint, find_best_move};
