//! Quiz rounds.
//!
//! A round is one multiple-choice question with four options, owned by the member who started
//! it and answerable until the difficulty's time limit runs out. Arithmetic and equation
//! questions are generated on the spot; trivia questions come from the catalog.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

use crate::server::{
    error::session::SessionError,
    progression::catalog::{Difficulty, GameCatalog, TriviaQuestion, TRIVIA_OPTION_COUNT},
};

/// Number of answer options in every round.
pub const OPTION_COUNT: usize = TRIVIA_OPTION_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizKind {
    Math,
    Equation,
    Puzzle,
    Trivia,
}

impl QuizKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "math" | "matika" | "priklad" | "příklad" => Some(Self::Math),
            "equation" | "rovnice" => Some(Self::Equation),
            "puzzle" | "hlavolam" => Some(Self::Puzzle),
            "trivia" | "kviz" | "kvíz" => Some(Self::Trivia),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Equation => "equation",
            Self::Puzzle => "puzzle",
            Self::Trivia => "trivia",
        }
    }
}

/// A question with shuffled options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub kind: QuizKind,
    pub text: String,
    pub options: Vec<String>,
    /// Index of the correct option in `options`.
    pub answer: usize,
}

impl QuizQuestion {
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }

    fn from_numbers(kind: QuizKind, text: String, answer: i64, fakes: Vec<i64>, rng: &mut impl Rng) -> Self {
        let mut options: Vec<String> = std::iter::once(answer)
            .chain(fakes)
            .map(|n| n.to_string())
            .collect();
        options.shuffle(rng);

        let correct = answer.to_string();
        let answer = options.iter().position(|o| *o == correct).unwrap_or_default();

        Self {
            kind,
            text,
            options,
            answer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
        };
        f.write_str(symbol)
    }
}

/// Distinct wrong answers near `answer`, each `answer + offset` for an offset in
/// `-spread..=spread` and at least `min`.
fn fake_answers(answer: i64, spread: i64, min: i64, rng: &mut impl Rng) -> Vec<i64> {
    let mut fakes = Vec::with_capacity(OPTION_COUNT - 1);
    while fakes.len() < OPTION_COUNT - 1 {
        let fake = answer + rng.random_range(-spread..=spread);
        if fake != answer && fake >= min && !fakes.contains(&fake) {
            fakes.push(fake);
        }
    }
    fakes
}

/// Generates an arithmetic question.
///
/// Easy rounds add or subtract numbers up to 20, medium rounds add multiplication with
/// operands up to 50 and hard rounds add exact division with operands up to 100. Results are
/// never negative.
pub fn generate_math(difficulty: Difficulty, rng: &mut impl Rng) -> QuizQuestion {
    let (mut a, b, operators): (i64, i64, &[Operator]) = match difficulty {
        Difficulty::Easy => (
            rng.random_range(1..=20),
            rng.random_range(1..=20),
            &[Operator::Add, Operator::Sub],
        ),
        Difficulty::Medium => (
            rng.random_range(10..=50),
            rng.random_range(1..=20),
            &[Operator::Add, Operator::Sub, Operator::Mul],
        ),
        Difficulty::Hard => (
            rng.random_range(20..=100),
            rng.random_range(2..=15),
            &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
        ),
    };
    let mut b = b;
    let operator = operators.choose(rng).copied().unwrap_or(Operator::Add);

    let answer = match operator {
        Operator::Add => a + b,
        Operator::Sub => {
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            a - b
        }
        Operator::Mul => a * b,
        Operator::Div => {
            a = b * rng.random_range(2..=10);
            a / b
        }
    };

    let fakes = fake_answers(answer, 10, 0, rng);
    QuizQuestion::from_numbers(
        QuizKind::Math,
        format!("{} {} {} = ?", a, operator, b),
        answer,
        fakes,
        rng,
    )
}

/// Generates a linear equation solved for a positive `x`.
pub fn generate_equation(difficulty: Difficulty, rng: &mut impl Rng) -> QuizQuestion {
    let (x, text) = match difficulty {
        Difficulty::Easy => {
            let x: i64 = rng.random_range(1..=10);
            let b: i64 = rng.random_range(1..=10);
            (x, format!("x + {} = {}, x = ?", b, x + b))
        }
        Difficulty::Medium => {
            let x: i64 = rng.random_range(2..=12);
            let a: i64 = rng.random_range(2..=5);
            (x, format!("{}x = {}, x = ?", a, a * x))
        }
        Difficulty::Hard => {
            let x: i64 = rng.random_range(1..=10);
            let a: i64 = rng.random_range(2..=5);
            let b: i64 = rng.random_range(1..=10);
            (x, format!("{}x + {} = {}, x = ?", a, b, a * x + b))
        }
    };

    let fakes = fake_answers(x, 5, 1, rng);
    QuizQuestion::from_numbers(QuizKind::Equation, text, x, fakes, rng)
}

/// Puzzle text, its options and the index of the correct one.
type Puzzle = (&'static str, [&'static str; OPTION_COUNT], usize);

const EASY_PUZZLES: [Puzzle; 3] = [
    ("Jaké číslo následuje: 2, 4, 6, 8, ?", ["9", "10", "11", "12"], 1),
    ("5 + 5 ÷ 5 = ?", ["2", "6", "10", "1"], 1),
    ("Kolik je polovina z 50?", ["20", "25", "30", "15"], 1),
];

const MEDIUM_PUZZLES: [Puzzle; 3] = [
    ("Jaké číslo následuje: 1, 1, 2, 3, 5, 8, ?", ["11", "12", "13", "14"], 2),
    ("3² + 4² = ?", ["12", "25", "49", "7"], 1),
    ("√144 = ?", ["10", "11", "12", "14"], 2),
];

const HARD_PUZZLES: [Puzzle; 3] = [
    ("Jaké číslo následuje: 2, 6, 12, 20, 30, ?", ["40", "42", "44", "46"], 1),
    ("2⁵ = ?", ["16", "32", "64", "25"], 1),
    ("Kolik je 15% z 200?", ["25", "30", "35", "40"], 1),
];

/// Picks a built-in number puzzle and shuffles its options.
pub fn generate_puzzle(difficulty: Difficulty, rng: &mut impl Rng) -> QuizQuestion {
    let pool: &[Puzzle] = match difficulty {
        Difficulty::Easy => &EASY_PUZZLES,
        Difficulty::Medium => &MEDIUM_PUZZLES,
        Difficulty::Hard => &HARD_PUZZLES,
    };
    let (text, options, answer) = pool.choose(rng).copied().unwrap_or(EASY_PUZZLES[0]);

    let correct = options[answer];
    let mut options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    options.shuffle(rng);
    let answer = options.iter().position(|o| o == correct).unwrap_or_default();

    QuizQuestion {
        kind: QuizKind::Puzzle,
        text: text.to_string(),
        options,
        answer,
    }
}

/// Builds a round from a catalog trivia question.
///
/// # Returns
/// - `Some(QuizQuestion)` - Question with shuffled options
/// - `None` - The question does not have exactly [`OPTION_COUNT`] options including its answer
pub fn from_trivia(question: &TriviaQuestion, rng: &mut impl Rng) -> Option<QuizQuestion> {
    if question.options.len() != OPTION_COUNT {
        return None;
    }

    let mut options = question.options.clone();
    options.shuffle(rng);
    let answer = options.iter().position(|o| *o == question.answer)?;

    Some(QuizQuestion {
        kind: QuizKind::Trivia,
        text: question.question.clone(),
        options,
        answer,
    })
}

/// Generates a question of `kind`. Trivia falls back to arithmetic when the catalog has no
/// usable question for `difficulty`.
pub fn generate(
    kind: QuizKind,
    difficulty: Difficulty,
    catalog: &GameCatalog,
    rng: &mut impl Rng,
) -> QuizQuestion {
    match kind {
        QuizKind::Math => generate_math(difficulty, rng),
        QuizKind::Equation => generate_equation(difficulty, rng),
        QuizKind::Puzzle => generate_puzzle(difficulty, rng),
        QuizKind::Trivia => catalog
            .trivia_questions(difficulty)
            .choose(rng)
            .and_then(|question| from_trivia(question, rng))
            .unwrap_or_else(|| generate_math(difficulty, rng)),
    }
}

/// A quiz question waiting for its owner's answer.
#[derive(Debug, Clone)]
pub struct QuizRound {
    pub owner_id: u64,
    pub guild_id: u64,
    pub difficulty: Difficulty,
    pub question: QuizQuestion,
    pub expires_at: DateTime<Utc>,
}

impl QuizRound {
    pub fn new(
        owner_id: u64,
        guild_id: u64,
        difficulty: Difficulty,
        question: QuizQuestion,
        now: DateTime<Utc>,
        time_limit_secs: u64,
    ) -> Self {
        Self {
            owner_id,
            guild_id,
            difficulty,
            question,
            expires_at: now + Duration::seconds(i64::try_from(time_limit_secs).unwrap_or(i64::MAX)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks an answer of `user_id`.
    ///
    /// # Returns
    /// - `Ok(true)` / `Ok(false)` - Whether option `choice` is correct
    /// - `Err(SessionError::NotQuizOwner)` - Someone else started the round
    /// - `Err(SessionError::QuizExpired)` - The time limit has passed
    pub fn check_answer(&self, user_id: u64, choice: usize, now: DateTime<Utc>) -> Result<bool, SessionError> {
        if user_id != self.owner_id {
            return Err(SessionError::NotQuizOwner);
        }
        if self.is_expired(now) {
            return Err(SessionError::QuizExpired);
        }

        Ok(choice == self.question.answer)
    }
}
