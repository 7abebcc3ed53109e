#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
pub mod local;
pub mod prelude;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
pub use local::{AnswerVerdict, LocalGame};

#[cfg(feature = "std")]
pub use client::{ClientSession, ClientState, RemoteClient};
#[cfg(feature = "std")]
pub use config::{rng_from_seed, QuestionKind, ServerConfig};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::{BoardSnapshot, BoardView, Message};
#[cfg(feature = "std")]
pub use server::{Match, MatchOutcome, Server};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, TcpTransport, Transport};
