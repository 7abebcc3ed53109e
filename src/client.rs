#![cfg(feature = "std")]

//! Client-side mirror of the server's game state.
//!
//! [`ClientSession`] is a pure state machine driven by inbound messages. It
//! never decides hits, turns or wins; it stores what the server announced and
//! only emits `answer`/`shot` intents while the matching state is active.
//! [`RemoteClient`] connects a session to a server, reading in a background
//! task so the caller's loop never blocks on the socket.

use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::ToSocketAddrs;
use tokio::sync::mpsc::{unbounded_channel, error::TryRecvError, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::core::{Cell, GridGeometry};
use crate::protocol::{BoardView, Message};
use crate::transport::{LineTransport, LineWriter, TcpTransport};

/// How long a result stays on screen before returning to waiting.
pub const RESULT_DISPLAY: Duration = Duration::from_secs(2);

/// Client states, entered only through server messages (plus the result
/// display timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connecting,
    Waiting,
    Answering,
    Shooting,
    ShowResult,
    GameOver,
    /// The server connection ended mid-match.
    Disconnected,
    /// The connection could not be established.
    Error,
}

impl ClientState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ClientState::GameOver | ClientState::Disconnected | ClientState::Error
        )
    }
}

/// Everything a renderer needs to draw one client's view.
#[derive(Debug, Clone)]
pub struct ClientSession {
    state: ClientState,
    message: String,
    player_name: String,
    player_id: Option<usize>,
    grid_size: usize,
    my_board: Option<BoardView>,
    opponent_board: Option<BoardView>,
    question: Option<String>,
    winner: Option<String>,
    last_incoming_shot: Option<Cell>,
    result_until: Option<Instant>,
    result_display: Duration,
}

impl Default for ClientSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSession {
    pub fn new() -> Self {
        Self {
            state: ClientState::Connecting,
            message: "Connecting to server...".to_string(),
            player_name: String::new(),
            player_id: None,
            grid_size: crate::core::GRID_SIZE,
            my_board: None,
            opponent_board: None,
            question: None,
            winner: None,
            last_incoming_shot: None,
            result_until: None,
            result_display: RESULT_DISPLAY,
        }
    }

    pub fn with_result_display(mut self, display: Duration) -> Self {
        self.result_display = display;
        self
    }

    /// Apply one server message.
    pub fn handle(&mut self, msg: Message, now: Instant) -> anyhow::Result<()> {
        if self.state.is_terminal() {
            log::debug!("ignoring {} in terminal state {:?}", msg.kind(), self.state);
            return Ok(());
        }
        match msg {
            Message::ConnectionSuccess {
                player_name,
                player_id,
            } => {
                log::info!("you are {}", player_name);
                self.message = format!("Connected as {}. Waiting for opponent...", player_name);
                self.player_name = player_name;
                self.player_id = Some(player_id);
                self.state = ClientState::Waiting;
            }
            Message::GameStart {
                your_board,
                opponent_board,
                grid_size,
            } => {
                self.my_board = Some(BoardView::from_snapshot(&your_board)?);
                self.opponent_board = Some(BoardView::from_snapshot(&opponent_board)?);
                self.grid_size = grid_size;
                self.state = ClientState::Waiting;
                self.message = "Game started! Waiting for your turn...".to_string();
            }
            Message::QuizQuestion { question } => {
                self.message = format!("Answer the question: {}", question);
                self.question = Some(question);
                self.state = ClientState::Answering;
            }
            Message::OpponentTurn { message } => {
                self.state = ClientState::Waiting;
                self.message = message;
            }
            Message::AnswerResult { correct, message } => {
                self.message = message;
                self.question = None;
                if correct {
                    self.state = ClientState::Shooting;
                } else {
                    self.show_result(now);
                }
            }
            Message::ShotResult {
                result,
                opponent_board,
                game_over,
                winner,
            } => {
                if let Some(view) = self.opponent_board.as_mut() {
                    view.apply_state(&opponent_board);
                }
                self.message = result;
                self.finish_or_show(game_over, winner, now);
            }
            Message::OpponentShot {
                result,
                cell,
                your_board,
                game_over,
                winner,
            } => {
                if let Some(view) = self.my_board.as_mut() {
                    view.apply_state(&your_board);
                }
                self.last_incoming_shot = Some(cell);
                self.message = result;
                self.finish_or_show(game_over, winner, now);
            }
            Message::TurnSkipped { message } => {
                self.message = message;
                self.show_result(now);
            }
            other @ (Message::Answer { .. } | Message::Shot { .. }) => {
                log::warn!("server sent client-only message {}", other.kind());
            }
        }
        Ok(())
    }

    /// Advance the result display timer.
    pub fn tick(&mut self, now: Instant) {
        if self.state != ClientState::ShowResult {
            return;
        }
        if self.result_until.is_some_and(|until| now >= until) {
            self.result_until = None;
            self.state = ClientState::Waiting;
            self.message = "Waiting for your turn...".to_string();
        }
    }

    /// Submit an answer. Returns the message to send, or `None` when no
    /// question is pending.
    pub fn submit_answer(&mut self, answer: &str) -> Option<Message> {
        if self.state != ClientState::Answering {
            return None;
        }
        self.state = ClientState::Waiting;
        self.message = "Answer submitted. Waiting for result...".to_string();
        Some(Message::Answer {
            answer: answer.to_string(),
        })
    }

    /// Fire at `cell` on the opponent grid. Returns `None` unless a shot is
    /// allowed and the cell lies inside the grid.
    pub fn fire_at(&mut self, cell: Cell) -> Option<Message> {
        if self.state != ClientState::Shooting || self.opponent_board.is_none() {
            return None;
        }
        if !cell.within(self.grid_size) {
            return None;
        }
        self.state = ClientState::Waiting;
        self.message = "Shot sent. Waiting for result...".to_string();
        Some(Message::Shot { cell })
    }

    /// Fire at the opponent cell under a click at `pos`.
    pub fn click(&mut self, geometry: &GridGeometry, pos: (i32, i32)) -> Option<Message> {
        let cell = geometry.cell_from_position(self.grid_size, pos)?;
        self.fire_at(cell)
    }

    /// The server connection ended. A finished game stays finished.
    pub fn connection_lost(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        log::info!("server disconnected");
        self.state = ClientState::Disconnected;
        self.message = "Connection to server lost.".to_string();
    }

    /// The connection could not be established.
    pub fn connection_failed(&mut self, err: &anyhow::Error) {
        log::warn!("connection failed: {}", err);
        self.state = ClientState::Error;
        self.message = format!("Connection failed: {}", err);
    }

    fn show_result(&mut self, now: Instant) {
        self.state = ClientState::ShowResult;
        self.result_until = Some(now + self.result_display);
    }

    fn finish_or_show(&mut self, game_over: bool, winner: Option<String>, now: Instant) {
        if game_over {
            let name = winner.clone().unwrap_or_default();
            self.state = ClientState::GameOver;
            self.message = format!("Game Over! {} wins!", name);
            self.winner = winner;
        } else {
            self.show_result(now);
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn player_id(&self) -> Option<usize> {
        self.player_id
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn my_board(&self) -> Option<&BoardView> {
        self.my_board.as_ref()
    }

    pub fn opponent_board(&self) -> Option<&BoardView> {
        self.opponent_board.as_ref()
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn last_incoming_shot(&self) -> Option<Cell> {
        self.last_incoming_shot
    }

    /// Returns `true` when this client won the finished game.
    pub fn won(&self) -> bool {
        self.state == ClientState::GameOver && self.winner.as_deref() == Some(self.player_name.as_str())
    }
}

/// What the background reader hands to the main loop.
#[derive(Debug)]
enum Inbound {
    Message(Message),
    Closed,
}

/// A session connected to a server.
///
/// The read half lives in a spawned task; the write half is only used from
/// the owner's loop.
pub struct RemoteClient<W> {
    session: ClientSession,
    writer: LineWriter<W>,
    inbound: UnboundedReceiver<Inbound>,
    reader_task: JoinHandle<()>,
}

impl RemoteClient<OwnedWriteHalf> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let transport = TcpTransport::connect(addr).await?;
        Ok(Self::from_transport(transport))
    }
}

impl<W> RemoteClient<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Start the background reader over `transport`'s read half.
    pub fn from_transport<R>(transport: LineTransport<R, W>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (mut reader, writer) = transport.into_split();
        let (tx, inbound) = unbounded_channel();
        let reader_task = tokio::spawn(async move {
            loop {
                match reader.recv().await {
                    Ok(Some(msg)) => {
                        if tx.send(Inbound::Message(msg)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = tx.send(Inbound::Closed);
                        break;
                    }
                    Err(e) => {
                        log::warn!("dropping connection after bad frame: {}", e);
                        let _ = tx.send(Inbound::Closed);
                        break;
                    }
                }
            }
        });
        Self {
            session: ClientSession::new(),
            writer,
            inbound,
            reader_task,
        }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ClientSession {
        &mut self.session
    }

    /// Apply every message received so far without blocking, then advance
    /// the display timer. Returns the number of messages applied.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        loop {
            match self.inbound.try_recv() {
                Ok(inbound) => {
                    self.apply(inbound, now);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.session.connection_lost();
                    break;
                }
            }
        }
        self.session.tick(now);
        applied
    }

    /// Wait for the next inbound message and apply it. Returns `false` once
    /// the connection is gone.
    pub async fn next_message(&mut self) -> bool {
        match self.inbound.recv().await {
            Some(inbound) => {
                let open = matches!(inbound, Inbound::Message(_));
                self.apply(inbound, Instant::now());
                open
            }
            None => {
                self.session.connection_lost();
                false
            }
        }
    }

    /// Send an answer if the session is answering.
    pub async fn submit_answer(&mut self, answer: &str) -> bool {
        match self.session.submit_answer(answer) {
            Some(msg) => self.send(msg).await,
            None => false,
        }
    }

    /// Fire at `cell` if the session is shooting.
    pub async fn fire_at(&mut self, cell: Cell) -> bool {
        match self.session.fire_at(cell) {
            Some(msg) => self.send(msg).await,
            None => false,
        }
    }

    async fn send(&mut self, msg: Message) -> bool {
        match self.writer.send(&msg).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("send failed: {}", e);
                self.session.connection_lost();
                false
            }
        }
    }

    fn apply(&mut self, inbound: Inbound, now: Instant) {
        match inbound {
            Inbound::Message(msg) => {
                if let Err(e) = self.session.handle(msg, now) {
                    log::warn!("unusable server message: {}", e);
                    self.session.connection_lost();
                }
            }
            Inbound::Closed => self.session.connection_lost(),
        }
    }
}

impl<W> Drop for RemoteClient<W> {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}
