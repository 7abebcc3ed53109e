#![cfg(feature = "std")]

//! Runtime configuration shared by the binary, the server and local games.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::core::{ArithmeticQuestions, BoardConfig, QuestionBank, QuestionSource, DEFAULT_PORT};

/// Which question source gates the shots.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionKind {
    /// Pick from the stock question list.
    #[default]
    Fixed,
    /// Generate arithmetic questions.
    Arithmetic,
}

impl QuestionKind {
    pub fn source(self, rng: SmallRng) -> Box<dyn QuestionSource> {
        match self {
            QuestionKind::Fixed => Box::new(QuestionBank::new(Vec::new(), rng)),
            QuestionKind::Arithmetic => Box::new(ArithmeticQuestions::new(rng)),
        }
    }
}

/// Settings for one authoritative server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub board: BoardConfig,
    pub questions: QuestionKind,
    /// Deadline for each answer or shot. `None` waits forever.
    pub turn_timeout: Option<Duration>,
    /// Fixed seed for reproducible boards and questions.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: format!("0.0.0.0:{}", DEFAULT_PORT),
            board: BoardConfig::default(),
            questions: QuestionKind::default(),
            turn_timeout: None,
            seed: None,
        }
    }
}

/// Seeded RNG when `seed` is given, otherwise one seeded from the thread RNG.
pub fn rng_from_seed(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}
