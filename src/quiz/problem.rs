use std::fmt;
use std::ops::RangeInclusive;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Operand magnitude tier chosen before a quiz starts
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Advanced];

    /// Inclusive range both operands are drawn from
    pub fn operand_range(&self) -> RangeInclusive<i64> {
        match self {
            Difficulty::Easy => 1..=9,
            Difficulty::Moderate => 10..=99,
            Difficulty::Advanced => 1000..=9999,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
        }
    }
}

/// One arithmetic question. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub operand_a: i64,
    pub operand_b: i64,
    pub operator: Operator,
}

impl Problem {
    pub fn new(operand_a: i64, operand_b: i64, operator: Operator) -> Self {
        Self {
            operand_a,
            operand_b,
            operator,
        }
    }

    pub fn expected(&self) -> i64 {
        self.operator.apply(self.operand_a, self.operand_b)
    }

    /// Non-numeric answers are simply wrong.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer
            .trim()
            .parse::<i64>()
            .map(|value| value == self.expected())
            .unwrap_or(false)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand_a,
            self.operator.symbol(),
            self.operand_b
        )
    }
}

/// Draws problems for a tier from any random source
#[derive(Debug)]
pub struct ProblemGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, difficulty: Difficulty) -> Problem {
        let range = difficulty.operand_range();
        let operand_a = self.rng.gen_range(range.clone());
        let operand_b = self.rng.gen_range(range);
        let operator = if self.rng.gen_bool(0.5) {
            Operator::Add
        } else {
            Operator::Subtract
        };

        Problem::new(operand_a, operand_b, operator)
    }
}
