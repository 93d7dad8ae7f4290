//! Arithmetic problem generation and multiple-choice answer construction.
//!
//! Difficulty is banded by level: small additions first, then mixed
//! addition/subtraction with growing bounds, and from level 7 on a share of
//! problems hides one operand instead of the result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Glyph shown in place of the unknown term.
pub const PLACEHOLDER: char = '?';

pub const CHOICE_COUNT: usize = 4;

const MISSING_OPERAND_THRESHOLD: f64 = 0.6;
const MAX_OFFSET: u32 = 5;
// Rejected offset draws tolerated before falling back to an outward walk.
const MAX_OFFSET_ATTEMPTS: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Sub,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
        }
    }
}

/// Which term of `left op right = result` the player has to supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hidden {
    Result,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equation {
    pub left: u32,
    pub op: Operation,
    pub right: u32,
    pub result: u32,
}

impl Equation {
    fn new(left: u32, op: Operation, right: u32) -> Self {
        let result = match op {
            Operation::Add => left + right,
            Operation::Sub => left - right,
        };
        Self { left, op, right, result }
    }

    pub fn value_of(&self, hidden: Hidden) -> u32 {
        match hidden {
            Hidden::Result => self.result,
            Hidden::Left => self.left,
            Hidden::Right => self.right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub prompt: String,
    pub answer: u32,
    pub equation: Equation,
    pub hidden: Hidden,
}

impl MathProblem {
    fn new(equation: Equation, hidden: Hidden) -> Self {
        Self {
            prompt: render_prompt(&equation, hidden),
            answer: equation.value_of(hidden),
            equation,
            hidden,
        }
    }

    pub fn is_missing_operand(&self) -> bool {
        self.hidden != Hidden::Result
    }

    pub fn is_correct(&self, value: u32) -> bool {
        self.answer == value
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}

/// Largest sum (or minuend) allowed at a level.
pub fn operand_bound(level: u32) -> u32 {
    match level {
        0..=4 => 10,
        5..=9 => 20,
        _ => 30,
    }
}

/// Sample one problem for `level`.
pub fn generate(level: u32, rng: &mut dyn RandomSource) -> MathProblem {
    let op = if level >= 3 {
        if rng.next_unit() > 0.5 { Operation::Add } else { Operation::Sub }
    } else {
        Operation::Add
    };

    let bound = operand_bound(level);
    let left = rng.below(bound + 1);
    let right = match op {
        Operation::Add => rng.below(bound - left + 1),
        Operation::Sub => rng.below(left + 1),
    };
    let equation = Equation::new(left, op, right);

    let hidden = if level >= 7 && rng.next_unit() > MISSING_OPERAND_THRESHOLD {
        if rng.next_unit() > 0.5 { Hidden::Left } else { Hidden::Right }
    } else {
        Hidden::Result
    };

    MathProblem::new(equation, hidden)
}

/// Four distinct non-negative choices, one of them `answer`, in shuffled order.
pub fn build_choices(answer: u32, rng: &mut dyn RandomSource) -> [u32; CHOICE_COUNT] {
    let mut wrong: Vec<u32> = Vec::with_capacity(CHOICE_COUNT - 1);

    let mut attempts = 0;
    while wrong.len() < CHOICE_COUNT - 1 && attempts < MAX_OFFSET_ATTEMPTS {
        attempts += 1;
        let magnitude = rng.below(MAX_OFFSET) + 1;
        let candidate = if rng.next_unit() > 0.5 {
            answer.checked_add(magnitude)
        } else {
            answer.checked_sub(magnitude)
        };
        if let Some(value) = candidate
            && !wrong.contains(&value)
        {
            wrong.push(value);
        }
    }

    let mut step = 1;
    while wrong.len() < CHOICE_COUNT - 1 {
        let neighbours = [answer.checked_add(step), answer.checked_sub(step)];
        for candidate in neighbours.into_iter().flatten() {
            if wrong.len() < CHOICE_COUNT - 1 && !wrong.contains(&candidate) {
                wrong.push(candidate);
            }
        }
        step += 1;
    }

    let mut choices = [answer, wrong[0], wrong[1], wrong[2]];
    for i in (1..CHOICE_COUNT).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        choices.swap(i, j);
    }
    choices
}

fn render_prompt(equation: &Equation, hidden: Hidden) -> String {
    let op = equation.op.symbol();
    match hidden {
        Hidden::Result => format!("{} {op} {} = {PLACEHOLDER}", equation.left, equation.right),
        Hidden::Left => format!("{PLACEHOLDER} {op} {} = {}", equation.right, equation.result),
        Hidden::Right => format!("{} {op} {PLACEHOLDER} = {}", equation.left, equation.result),
    }
}
