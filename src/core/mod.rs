//! Core quiz-battleship engine (no_std + alloc compatible)
//!
//! Boards, sequence placement, turn resolution and question gating. Nothing
//! in here touches I/O, so the same engine drives local and networked games.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod placement;
pub mod quiz;
pub mod sequence;

// Re-export commonly used types
pub use board::{Board, GridGeometry};
pub use common::{BoardError, Cell, Color, SequenceId, ShotOutcome};
pub use config::*;
pub use game::{GameEngine, Player, ShotReport, TurnPhase};
pub use placement::{generate, Placement};
pub use quiz::{answers_match, ArithmeticQuestions, Question, QuestionBank, QuestionSource};
pub use sequence::{Orientation, Sequence};
