//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    Board, BoardConfig, Cell, GameEngine, Player, Question, QuestionSource, ShotOutcome,
    ShotReport, TurnPhase,
};
pub use crate::local::LocalGame;

#[cfg(feature = "std")]
pub use crate::{
    client::{ClientSession, ClientState, RemoteClient},
    protocol::{BoardSnapshot, BoardView, Message},
    server::{Match, MatchOutcome, Server},
    transport::{in_memory::InMemoryTransport, TcpTransport, Transport},
};
