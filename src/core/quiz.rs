//! Question sources gating each shot.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A prompt together with the answer that unlocks a shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Check a submitted answer against this question.
    pub fn accepts(&self, given: &str) -> bool {
        answers_match(given, &self.answer)
    }
}

/// Answers match when equal after trimming and ignoring case.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Supplies one question per turn.
pub trait QuestionSource: Send {
    fn get_question(&mut self) -> Question;
}

/// Picks uniformly from a fixed list of questions.
pub struct QuestionBank {
    questions: Vec<Question>,
    rng: SmallRng,
}

impl QuestionBank {
    /// Bank over `questions`. An empty list falls back to the default set.
    pub fn new(questions: Vec<Question>, rng: SmallRng) -> Self {
        let questions = if questions.is_empty() {
            default_questions()
        } else {
            questions
        };
        Self { questions, rng }
    }

    pub fn with_seed(questions: Vec<Question>, seed: u64) -> Self {
        Self::new(questions, SmallRng::seed_from_u64(seed))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for QuestionBank {
    fn get_question(&mut self) -> Question {
        let idx = self.rng.random_range(0..self.questions.len());
        self.questions[idx].clone()
    }
}

/// The stock question list.
pub fn default_questions() -> Vec<Question> {
    alloc::vec![
        Question::new("What is 2 + 2?", "4"),
        Question::new("What is 9 + 10?", "19"),
        Question::new("What is 3 * 5?", "15"),
    ]
}

/// Generates simple arithmetic questions with whole, non-negative answers.
pub struct ArithmeticQuestions {
    rng: SmallRng,
}

impl ArithmeticQuestions {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl QuestionSource for ArithmeticQuestions {
    fn get_question(&mut self) -> Question {
        let rng = &mut self.rng;
        let (a, op, b, answer) = match rng.random_range(0..4u8) {
            0 => {
                let a = rng.random_range(10..=100u32);
                let b = rng.random_range(10..=100u32);
                (a, '+', b, a + b)
            }
            1 => {
                let a = rng.random_range(10..=100u32);
                let b = rng.random_range(10..=a);
                (a, '-', b, a - b)
            }
            2 => {
                let a = rng.random_range(1..=10u32);
                let b = rng.random_range(1..=10u32);
                (a, '*', b, a * b)
            }
            _ => {
                let quotient = rng.random_range(1..=10u32);
                let b = rng.random_range(1..=10u32);
                (quotient * b, '/', b, quotient)
            }
        };
        Question::new(format!("What is {} {} {}?", a, op, b), answer.to_string())
    }
}
