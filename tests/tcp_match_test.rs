#![cfg(feature = "std")]

use std::net::SocketAddr;

use quizship::quiz::default_questions;
use quizship::{
    Cell, ClientSession, ClientState, MatchOutcome, Message, RemoteClient, Server, ServerConfig,
    TcpTransport, Transport,
};

fn config() -> ServerConfig {
    ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        seed: Some(7),
        ..ServerConfig::default()
    }
}

/// Answer every question correctly and sweep the opponent grid row by row.
async fn play(addr: SocketAddr) -> anyhow::Result<ClientSession> {
    let questions = default_questions();
    let mut client = RemoteClient::connect(addr).await?;
    loop {
        let session = client.session();
        match session.state() {
            state if state.is_terminal() => break,
            ClientState::Answering => {
                let prompt = session.question().unwrap_or_default().to_string();
                let answer = questions
                    .iter()
                    .find(|q| q.prompt == prompt)
                    .map(|q| q.answer.clone())
                    .unwrap_or_default();
                assert!(client.submit_answer(&answer).await);
            }
            ClientState::Shooting => {
                let grid = session.grid_size();
                let board = session.opponent_board().expect("board after game_start");
                let cell = (0..grid * grid)
                    .map(|i| Cell::new(i / grid, i % grid))
                    .find(|&c| !board.is_targeted(c))
                    .expect("an untargeted cell");
                assert!(client.fire_at(cell).await);
            }
            _ => {
                client.next_message().await;
            }
        }
    }
    Ok(client.session().clone())
}

#[tokio::test(flavor = "multi_thread")]
async fn two_clients_play_to_a_winner() -> anyhow::Result<()> {
    let server = Server::bind(config()).await?;
    let addr = server.local_addr()?;
    let server_task = tokio::spawn(async move { server.serve_match().await });

    let first = tokio::spawn(play(addr));
    // Connection order decides player ids.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let second = tokio::spawn(play(addr));

    let (first, second) = tokio::try_join!(first, second)?;
    let (first, second) = (first?, second?);
    let outcome = server_task.await??;

    assert_eq!(first.player_name(), "Player 1");
    assert_eq!(second.player_name(), "Player 2");
    assert_eq!(first.state(), ClientState::GameOver);
    assert_eq!(second.state(), ClientState::GameOver);
    assert_ne!(first.won(), second.won());
    assert_eq!(first.winner(), second.winner());

    match outcome {
        MatchOutcome::Won { winner, .. } => assert_eq!(Some(winner.as_str()), first.winner()),
        other => panic!("expected a winner, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn dropped_client_aborts_the_match() -> anyhow::Result<()> {
    let server = Server::bind(config()).await?;
    let addr = server.local_addr()?;
    let server_task = tokio::spawn(async move { server.serve_match().await });

    let mut first = TcpTransport::connect(addr).await?;
    assert!(matches!(
        first.recv().await?,
        Some(Message::ConnectionSuccess { player_id: 0, .. })
    ));
    let mut second = TcpTransport::connect(addr).await?;
    assert!(matches!(
        second.recv().await?,
        Some(Message::ConnectionSuccess { player_id: 1, .. })
    ));
    assert!(matches!(first.recv().await?, Some(Message::GameStart { .. })));
    assert!(matches!(first.recv().await?, Some(Message::QuizQuestion { .. })));
    drop(first);

    let outcome = server_task.await??;
    assert!(matches!(outcome, MatchOutcome::Aborted { .. }));

    // The remaining peer sees the server hang up.
    loop {
        match second.recv().await {
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => break,
        }
    }
    Ok(())
}

#[tokio::test]
async fn refused_connection_reports_error_state() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = match RemoteClient::connect(addr).await {
        Ok(_) => panic!("connected to a closed port"),
        Err(e) => e,
    };
    let mut session = ClientSession::new();
    session.connection_failed(&err);
    assert_eq!(session.state(), ClientState::Error);
    assert!(session.message().starts_with("Connection failed"));
}
