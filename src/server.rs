#![cfg(feature = "std")]

//! Authoritative match server.
//!
//! One server runs one match between exactly two peers. The loop asks the
//! current player a question, waits for the answer, and either waits for a
//! shot or skips the turn. Every decision is made here; peers only receive
//! the resulting snapshots and narrative text.

use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::{rng_from_seed, ServerConfig};
use crate::core::{Cell, GameEngine, QuestionSource};
use crate::protocol::{BoardSnapshot, Message};
use crate::transport::{TcpTransport, Transport};

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A player sank every opposing sequence.
    Won { winner: String, winner_index: usize },
    /// A peer disconnected, timed out or broke the protocol.
    Aborted { reason: String },
}

/// Display name for the peer at `index`.
pub fn player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

/// One match: the engine, the question source and both peer connections.
pub struct Match {
    engine: GameEngine,
    questions: Box<dyn QuestionSource>,
    peers: [Box<dyn Transport>; 2],
    turn_timeout: Option<Duration>,
}

impl Match {
    pub fn new(
        engine: GameEngine,
        questions: Box<dyn QuestionSource>,
        peers: [Box<dyn Transport>; 2],
    ) -> Self {
        Self {
            engine,
            questions,
            peers,
            turn_timeout: None,
        }
    }

    /// Bound every wait on a peer. A peer that misses the deadline aborts
    /// the match.
    pub fn with_turn_timeout(mut self, turn_timeout: Option<Duration>) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Play the match to completion, then close both connections.
    pub async fn run(&mut self) -> MatchOutcome {
        let result = self.play().await;

        for peer in self.peers.iter_mut() {
            if let Err(e) = peer.close().await {
                log::debug!("error closing peer connection: {}", e);
            }
        }

        match (self.engine.winner_index(), result) {
            (Some(idx), result) => {
                if let Err(e) = result {
                    log::warn!("final broadcast incomplete: {}", e);
                }
                let winner = self.engine.player(idx).name.clone();
                log::info!("match over, winner: {}", winner);
                MatchOutcome::Won {
                    winner,
                    winner_index: idx,
                }
            }
            (None, Err(e)) => {
                log::warn!("match aborted: {}", e);
                MatchOutcome::Aborted {
                    reason: e.to_string(),
                }
            }
            (None, Ok(())) => MatchOutcome::Aborted {
                reason: "match ended without a winner".to_string(),
            },
        }
    }

    async fn play(&mut self) -> anyhow::Result<()> {
        let grid_size = self.engine.player(0).board.grid_size();
        for idx in 0..2 {
            let msg = Message::GameStart {
                your_board: BoardSnapshot::of(&self.engine.player(idx).board, true),
                opponent_board: BoardSnapshot::of(&self.engine.player(1 - idx).board, false),
                grid_size,
            };
            self.send(idx, msg).await?;
        }

        while !self.engine.is_over() {
            let cur = self.engine.current_turn();
            let opp = self.engine.opponent_index();
            let name = self.engine.current_player().name.clone();

            let question = self.questions.get_question();
            log::info!("question for {}: {}", name, question.prompt);
            self.send(
                cur,
                Message::QuizQuestion {
                    question: question.prompt.clone(),
                },
            )
            .await?;
            self.send(
                opp,
                Message::OpponentTurn {
                    message: format!("{} answering...", name),
                },
            )
            .await?;

            let answer = self.wait_for_answer(cur).await?;
            if question.accepts(&answer) {
                log::info!("correct answer from {}", name);
                self.engine.resolve_answer(true);
                self.send(
                    cur,
                    Message::AnswerResult {
                        correct: true,
                        message: "Correct! Take your shot.".to_string(),
                    },
                )
                .await?;

                let cell = self.wait_for_shot(cur).await?;
                let report = self.engine.process_shot(cell);
                log::info!("shot at {}: {}", cell, report.message);

                let target = &self.engine.player(opp).board;
                let to_shooter = Message::ShotResult {
                    result: report.message.clone(),
                    opponent_board: BoardSnapshot::of(target, false),
                    game_over: report.game_over,
                    winner: report.winner.clone(),
                };
                let to_target = Message::OpponentShot {
                    result: report.message,
                    cell,
                    your_board: BoardSnapshot::of(target, true),
                    game_over: report.game_over,
                    winner: report.winner,
                };
                self.send(cur, to_shooter).await?;
                self.send(opp, to_target).await?;
            } else {
                log::info!("wrong answer from {}", name);
                self.engine.resolve_answer(false);
                self.send(
                    cur,
                    Message::AnswerResult {
                        correct: false,
                        message: "Incorrect. Turn skipped.".to_string(),
                    },
                )
                .await?;
                self.send(
                    opp,
                    Message::TurnSkipped {
                        message: format!("{} answered incorrectly.", name),
                    },
                )
                .await?;
            }
        }
        Ok(())
    }

    async fn send(&mut self, idx: usize, msg: Message) -> anyhow::Result<()> {
        let name = &self.engine.player(idx).name;
        self.peers[idx]
            .send(msg)
            .await
            .map_err(|e| anyhow::anyhow!("{} disconnected: {}", name, e))
    }

    async fn wait(&mut self, idx: usize) -> anyhow::Result<Message> {
        let name = self.engine.player(idx).name.clone();
        let recv = self.peers[idx].recv();
        let received = match self.turn_timeout {
            Some(limit) => tokio::time::timeout(limit, recv)
                .await
                .map_err(|_| anyhow::anyhow!("{} did not respond within {:?}", name, limit))?,
            None => recv.await,
        };
        match received {
            Ok(Some(msg)) => Ok(msg),
            Ok(None) => Err(anyhow::anyhow!("{} disconnected", name)),
            Err(e) => {
                log::warn!("bad frame from {}: {}", name, e);
                Err(anyhow::anyhow!("{} sent an unreadable message: {}", name, e))
            }
        }
    }

    async fn wait_for_answer(&mut self, idx: usize) -> anyhow::Result<String> {
        match self.wait(idx).await? {
            Message::Answer { answer } => Ok(answer),
            other => Err(anyhow::anyhow!(
                "expected answer from {}, got {}",
                self.engine.player(idx).name,
                other.kind()
            )),
        }
    }

    async fn wait_for_shot(&mut self, idx: usize) -> anyhow::Result<Cell> {
        match self.wait(idx).await? {
            Message::Shot { cell } => Ok(cell),
            other => Err(anyhow::anyhow!(
                "expected shot from {}, got {}",
                self.engine.player(idx).name,
                other.kind()
            )),
        }
    }
}

/// TCP front end accepting two peers per match.
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.bind).await?;
        log::info!("server started on {}", listener.local_addr()?);
        Ok(Self { listener, config })
    }

    pub fn local_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept two peers, greeting each with its identity as it connects.
    pub async fn accept_players(&self) -> anyhow::Result<[TcpTransport; 2]> {
        let mut peers = Vec::with_capacity(2);
        for idx in 0..2 {
            let (stream, addr) = self.listener.accept().await?;
            stream.set_nodelay(true)?;
            let name = player_name(idx);
            log::info!("{} connected from {}", name, addr);
            let mut transport = TcpTransport::from_tcp(stream);
            transport
                .send(Message::ConnectionSuccess {
                    player_name: name,
                    player_id: idx,
                })
                .await?;
            peers.push(transport);
        }
        let second = peers.pop();
        let first = peers.pop();
        match (first, second) {
            (Some(a), Some(b)) => Ok([a, b]),
            _ => Err(anyhow::anyhow!("expected two connected players")),
        }
    }

    /// Accept two peers and play one match between them.
    pub async fn serve_match(&self) -> anyhow::Result<MatchOutcome> {
        let [first, second] = self.accept_players().await?;

        let mut rng = rng_from_seed(self.config.seed);
        let engine = GameEngine::random(
            &mut rng,
            [player_name(0).as_str(), player_name(1).as_str()],
            &self.config.board,
        )
        .map_err(|e| anyhow::anyhow!(e))?;
        let questions = self
            .config
            .questions
            .source(rng_from_seed(self.config.seed.map(|s| s.wrapping_add(1))));

        log::info!("starting game");
        let mut game = Match::new(engine, questions, [Box::new(first), Box::new(second)])
            .with_turn_timeout(self.config.turn_timeout);
        Ok(game.run().await)
    }
}
