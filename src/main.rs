#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use quizship::{
    cli::{coord_to_string, parse_cell, print_session, prompt_for, read_line, render_engine_board},
    init_logging, rng_from_seed, AnswerVerdict, BoardConfig, ClientState, LocalGame, MatchOutcome,
    QuestionKind, RemoteClient, Server, ServerConfig, DEFAULT_PORT,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::time::{Duration, Instant};

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "std")]
#[derive(Subcommand)]
enum Commands {
    /// Host a match and wait for two players to connect.
    Server {
        #[arg(long, default_value_t = format!("0.0.0.0:{}", DEFAULT_PORT))]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Abort the match if a player takes longer than this to act")]
        turn_timeout_secs: Option<u64>,
        #[arg(long, value_enum, default_value_t = QuestionKind::Fixed)]
        questions: QuestionKind,
    },
    /// Join a match hosted by a server.
    Client {
        #[arg(long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
        connect: String,
    },
    /// Play both sides on this terminal.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible boards (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = QuestionKind::Fixed)]
        questions: QuestionKind,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Server {
            bind,
            seed,
            turn_timeout_secs,
            questions,
        } => {
            let config = ServerConfig {
                bind,
                seed,
                questions,
                turn_timeout: turn_timeout_secs.map(Duration::from_secs),
                ..ServerConfig::default()
            };
            let server = Server::bind(config).await?;
            println!("Waiting for two players on {}...", server.local_addr()?);
            match server.serve_match().await? {
                MatchOutcome::Won { winner, .. } => println!("Game over: {} wins.", winner),
                MatchOutcome::Aborted { reason } => println!("Match aborted: {}", reason),
            }
        }
        Commands::Client { connect } => quit_on_eof(run_client(&connect).await)?,
        Commands::Local { seed, questions } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = rng_from_seed(seed);
            let source = questions.source(rng_from_seed(seed.map(|s| s.wrapping_add(1))));
            let game = LocalGame::random(
                &mut rng,
                ["Player 1", "Player 2"],
                &BoardConfig::default(),
                source,
            )
            .map_err(|e| anyhow::anyhow!(e))?;
            quit_on_eof(run_local(game))?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_client(addr: &str) -> anyhow::Result<()> {
    println!("Connecting to {}...", addr);
    let mut client = match RemoteClient::connect(addr).await {
        Ok(client) => client,
        Err(e) => {
            let mut session = quizship::ClientSession::new();
            session.connection_failed(&e);
            println!("{}", session.message());
            return Ok(());
        }
    };

    let mut last_message = String::new();
    loop {
        let session = client.session();
        if session.message() != last_message {
            last_message = session.message().to_string();
            if matches!(
                session.state(),
                ClientState::Answering | ClientState::Shooting | ClientState::GameOver
            ) {
                print_session(session);
            }
            println!("\n{}", last_message);
        }
        if session.state().is_terminal() {
            break;
        }

        match session.state() {
            ClientState::Answering => {
                let prompt = prompt_for(ClientState::Answering).unwrap_or("> ");
                let line = tokio::task::spawn_blocking(move || read_line(prompt)).await??;
                client.submit_answer(&line).await;
            }
            ClientState::Shooting => {
                let grid_size = session.grid_size();
                let prompt = prompt_for(ClientState::Shooting).unwrap_or("> ");
                let line = tokio::task::spawn_blocking(move || read_line(prompt)).await??;
                match parse_cell(&line, grid_size) {
                    Ok(cell) => {
                        client.fire_at(cell).await;
                    }
                    Err(e) => println!("✗ {}", e),
                }
            }
            _ => {
                let mut timer_due = false;
                tokio::select! {
                    _ = client.next_message() => {}
                    _ = tokio::time::sleep(Duration::from_millis(250)) => timer_due = true,
                }
                if timer_due {
                    client.poll(Instant::now());
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn run_local(mut game: LocalGame) -> anyhow::Result<()> {
    while !game.engine().is_over() {
        let current = game.engine().current_player().name.clone();
        let opponent = game.engine().opponent();
        println!("\n{}'s turn. Target board ({}):", current, opponent.name);
        print!("{}", render_engine_board(&opponent.board, false));

        let prompt = match game.question() {
            Some(q) => q.prompt.clone(),
            None => break,
        };
        println!("{}", prompt);
        let answer = read_line("Your answer: ")?;
        match game.answer(&answer) {
            AnswerVerdict::Correct => println!("Correct! Take your shot."),
            AnswerVerdict::Wrong { expected } => {
                println!("Incorrect (expected {}). Turn skipped.", expected);
                continue;
            }
            AnswerVerdict::NotAsked => continue,
        }

        let grid_size = game.engine().opponent().board.grid_size();
        let report = loop {
            let line = read_line("Target (e.g. A5): ")?;
            match parse_cell(&line, grid_size) {
                Ok(cell) => match game.fire(cell) {
                    Some(report) => {
                        println!("Fired at {}.", coord_to_string(cell));
                        break report;
                    }
                    None => anyhow::bail!("shot refused outside the shooting phase"),
                },
                Err(e) => println!("✗ {}", e),
            }
        };
        println!("{}", report.message);
    }

    if let Some(winner) = game.engine().winner() {
        println!("\nGame Over! {} wins!", winner.name);
        for player in game.engine().players() {
            println!("\n{}'s board:", player.name);
            print!("{}", render_engine_board(&player.board, true));
        }
    }
    Ok(())
}

/// Closed stdin ends the session quietly.
#[cfg(feature = "std")]
fn quit_on_eof(result: anyhow::Result<()>) -> anyhow::Result<()> {
    match result {
        Err(e)
            if e.downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::UnexpectedEof) =>
        {
            println!("\nInput closed, quitting.");
            Ok(())
        }
        other => other,
    }
}
