use alloc::format;
use alloc::string::{String, ToString};
use rand::Rng;

use super::{
    board::Board,
    common::{BoardError, Cell, ShotOutcome},
    config::BoardConfig,
};

/// A named participant owning one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub board: Board,
}

impl Player {
    pub fn new(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
        }
    }
}

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player must answer a question.
    AwaitingAnswer,
    /// The current player answered correctly and may fire once.
    Shooting,
    /// Terminal: a winner has been declared.
    GameOver,
}

/// Result of [`GameEngine::process_shot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotReport {
    /// Narrative text for both peers.
    pub message: String,
    /// Board outcome, or `None` when the shot was rejected outright.
    pub outcome: Option<ShotOutcome>,
    pub game_over: bool,
    /// Winner's name once the game is over.
    pub winner: Option<String>,
}

/// Core turn engine holding both players and whose turn it is.
#[derive(Debug, Clone)]
pub struct GameEngine {
    players: [Player; 2],
    current_turn: usize,
    phase: TurnPhase,
    winner: Option<usize>,
}

impl GameEngine {
    /// Create an engine over two prepared players. Player 0 moves first.
    pub fn new(players: [Player; 2]) -> Self {
        Self {
            players,
            current_turn: 0,
            phase: TurnPhase::AwaitingAnswer,
            winner: None,
        }
    }

    /// Create an engine with a freshly generated board for each name.
    pub fn random<R: Rng>(
        rng: &mut R,
        names: [&str; 2],
        config: &BoardConfig,
    ) -> Result<Self, BoardError> {
        let first = Player::new(names[0], Board::random(rng, config)?);
        let second = Player::new(names[1], Board::random(rng, config)?);
        Ok(Self::new([first, second]))
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    /// Index of the player whose turn it is.
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Index of the player who is not current.
    pub fn opponent_index(&self) -> usize {
        1 - self.current_turn
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[self.opponent_index()]
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|i| &self.players[i])
    }

    /// Apply the verdict on the current player's answer: a correct answer
    /// unlocks one shot, a wrong one skips the turn.
    pub fn resolve_answer(&mut self, correct: bool) {
        if self.is_over() {
            return;
        }
        if correct {
            self.phase = TurnPhase::Shooting;
        } else {
            self.skip_turn();
        }
    }

    /// Pass the turn without touching any board.
    pub fn skip_turn(&mut self) {
        if self.is_over() {
            return;
        }
        self.advance_turn();
    }

    /// Resolve a shot by the current player against the opponent's board.
    ///
    /// A repeated or out-of-grid cell changes nothing and keeps the turn. A
    /// shot that completes the opponent's last sequence ends the game without
    /// rotating the turn. Any other shot passes the turn.
    pub fn process_shot(&mut self, cell: Cell) -> ShotReport {
        if self.is_over() {
            return self.report("The game is already over.".to_string(), None);
        }

        let shooter = self.players[self.current_turn].name.clone();
        let target = &mut self.players[1 - self.current_turn].board;
        let outcome = match target.register_shot(cell) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("{} fired outside the grid: {}", shooter, e);
                self.phase = TurnPhase::AwaitingAnswer;
                return self.report("Shot outside the grid.".to_string(), None);
            }
        };

        match outcome {
            ShotOutcome::AlreadyShot => {
                self.phase = TurnPhase::AwaitingAnswer;
                self.report("Already shot there.".to_string(), Some(outcome))
            }
            ShotOutcome::Hit if target.all_sunk() => {
                self.winner = Some(self.current_turn);
                self.phase = TurnPhase::GameOver;
                log::info!("{} sank the last sequence at {}", shooter, cell);
                self.report(format!("{} hit at {} and wins!", shooter, cell), Some(outcome))
            }
            ShotOutcome::Hit => {
                self.advance_turn();
                self.report(format!("{} hit at {}!", shooter, cell), Some(outcome))
            }
            ShotOutcome::Miss => {
                self.advance_turn();
                self.report(format!("{} missed at {}.", shooter, cell), Some(outcome))
            }
        }
    }

    fn advance_turn(&mut self) {
        self.current_turn = 1 - self.current_turn;
        self.phase = TurnPhase::AwaitingAnswer;
    }

    fn report(&self, message: String, outcome: Option<ShotOutcome>) -> ShotReport {
        ShotReport {
            message,
            outcome,
            game_over: self.is_over(),
            winner: self.winner().map(|p| p.name.clone()),
        }
    }
}
