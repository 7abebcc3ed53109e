//! Hot-seat play: both boards in one process, driven by the same engine and
//! question gating as a networked match.

use alloc::boxed::Box;
use rand::Rng;

use crate::core::{
    BoardConfig, BoardError, Cell, GameEngine, Question, QuestionSource, ShotReport, TurnPhase,
};

/// Verdict on a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerVerdict {
    /// The current player may fire.
    Correct,
    /// The turn passed to the other player.
    Wrong { expected: alloc::string::String },
    /// No question was pending.
    NotAsked,
}

pub struct LocalGame {
    engine: GameEngine,
    questions: Box<dyn QuestionSource>,
    pending: Option<Question>,
}

impl LocalGame {
    pub fn new(engine: GameEngine, questions: Box<dyn QuestionSource>) -> Self {
        Self {
            engine,
            questions,
            pending: None,
        }
    }

    /// New game between `names` on freshly generated boards.
    pub fn random<R: Rng>(
        rng: &mut R,
        names: [&str; 2],
        config: &BoardConfig,
        questions: Box<dyn QuestionSource>,
    ) -> Result<Self, BoardError> {
        Ok(Self::new(GameEngine::random(rng, names, config)?, questions))
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Question for the current player. The same question is returned until
    /// it is answered; `None` once the game is over.
    pub fn question(&mut self) -> Option<&Question> {
        if self.engine.phase() != TurnPhase::AwaitingAnswer {
            return None;
        }
        if self.pending.is_none() {
            self.pending = Some(self.questions.get_question());
        }
        self.pending.as_ref()
    }

    /// Answer the pending question.
    pub fn answer(&mut self, given: &str) -> AnswerVerdict {
        let Some(question) = self.pending.take() else {
            return AnswerVerdict::NotAsked;
        };
        let correct = question.accepts(given);
        self.engine.resolve_answer(correct);
        if correct {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Wrong {
                expected: question.answer,
            }
        }
    }

    /// Fire at `cell`; only allowed right after a correct answer.
    pub fn fire(&mut self, cell: Cell) -> Option<ShotReport> {
        if self.engine.phase() != TurnPhase::Shooting {
            return None;
        }
        Some(self.engine.process_shot(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Player, QuestionBank, SEQUENCE_COLORS};
    use alloc::collections::BTreeMap;

    fn single_cell_game() -> LocalGame {
        let board = |cell: Cell| {
            let mut layout = BTreeMap::new();
            layout.insert(cell, 0);
            Board::with_layout(10, layout, SEQUENCE_COLORS.to_vec())
        };
        let engine = GameEngine::new([
            Player::new("Ana", board(Cell::new(0, 0))),
            Player::new("Bor", board(Cell::new(5, 5))),
        ]);
        let questions = QuestionBank::with_seed(alloc::vec![Question::new("1 + 1?", "2")], 0);
        LocalGame::new(engine, Box::new(questions))
    }

    #[test]
    fn shot_requires_correct_answer() {
        let mut game = single_cell_game();
        assert_eq!(game.fire(Cell::new(5, 5)), None);
        assert_eq!(game.question().map(|q| q.prompt.clone()), Some("1 + 1?".into()));
        assert_eq!(
            game.answer("3"),
            AnswerVerdict::Wrong {
                expected: "2".into()
            }
        );
        assert_eq!(game.engine().current_turn(), 1);
        assert_eq!(game.fire(Cell::new(0, 0)), None);
    }

    #[test]
    fn correct_answer_then_winning_shot() {
        let mut game = single_cell_game();
        game.question();
        assert_eq!(game.answer(" 2 "), AnswerVerdict::Correct);
        let report = game.fire(Cell::new(5, 5)).unwrap();
        assert!(report.game_over);
        assert_eq!(report.winner.as_deref(), Some("Ana"));
        assert!(game.question().is_none());
        assert_eq!(game.answer("2"), AnswerVerdict::NotAsked);
    }
}
