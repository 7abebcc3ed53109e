#![cfg(feature = "std")]

//! Wire messages exchanged between the authoritative server and its two
//! clients. Every message is one JSON object whose `type` field selects the
//! variant.

pub mod snapshot;

pub use snapshot::{BoardSnapshot, BoardView};

use crate::core::Cell;

/// Messages exchanged over a line-delimited connection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Server assigns the peer its identity.
    ConnectionSuccess { player_name: String, player_id: usize },
    /// Initial state: own board with ships, opponent board without.
    GameStart {
        your_board: BoardSnapshot,
        opponent_board: BoardSnapshot,
        grid_size: usize,
    },
    /// Prompt sent to the current player only.
    QuizQuestion { question: String },
    /// Notice to the idle player while the other one answers.
    OpponentTurn { message: String },
    /// Verdict on the submitted answer.
    AnswerResult { correct: bool, message: String },
    /// Sent to the shooter with the opponent's updated board.
    ShotResult {
        result: String,
        opponent_board: BoardSnapshot,
        game_over: bool,
        winner: Option<String>,
    },
    /// Sent to the target with its own updated board.
    OpponentShot {
        result: String,
        cell: Cell,
        your_board: BoardSnapshot,
        game_over: bool,
        winner: Option<String>,
    },
    /// Wrong-answer notice to the idle player.
    TurnSkipped { message: String },
    /// Client's answer to the current question.
    Answer { answer: String },
    /// Client's targeted cell.
    Shot { cell: Cell },
}

impl Message {
    /// Wire name of the variant, as found in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::ConnectionSuccess { .. } => "connection_success",
            Message::GameStart { .. } => "game_start",
            Message::QuizQuestion { .. } => "quiz_question",
            Message::OpponentTurn { .. } => "opponent_turn",
            Message::AnswerResult { .. } => "answer_result",
            Message::ShotResult { .. } => "shot_result",
            Message::OpponentShot { .. } => "opponent_shot",
            Message::TurnSkipped { .. } => "turn_skipped",
            Message::Answer { .. } => "answer",
            Message::Shot { .. } => "shot",
        }
    }

    /// Encode as one JSON document without the trailing newline. JSON
    /// escapes control characters, so the result never contains `\n`.
    pub fn encode(&self) -> anyhow::Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))
    }

    /// Decode one frame (without its terminator).
    pub fn decode(frame: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(frame)
            .map_err(|e| anyhow::anyhow!("Frame is not valid UTF-8: {}", e))?;
        serde_json::from_str(text).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
    }
}
