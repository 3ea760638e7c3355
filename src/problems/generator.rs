use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha2::{Sha256, Digest};
use std::collections::BTreeSet;
use crate::config::{get_engine_config, EngineConfig};
use crate::error::{ErrorKind, TutorError};
use crate::problems::aids;
use crate::problems::problem::Problem;
use crate::skills::concept::{Concept, DifficultyLevel, Operation};

/// Number of options shown for every problem.
pub const OPTION_COUNT: usize = 4;
/// Default largest operand for free-form practice.
pub const DEFAULT_MAX_OPERAND: u32 = 10;
/// Largest operand free-form and ranged addition will draw; the sum of two
/// such operands still fits in a `u32`.
pub const MAX_ADDEND: u32 = u32::MAX / 2;
/// Largest table or divisor accepted, so `× 10` stays in range.
pub const MAX_FACTOR: u32 = u32::MAX / 10;

pub fn hash_statement(statement: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(statement.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Largest multiplication table drawn at each difficulty.
fn table_cap(difficulty: DifficultyLevel) -> u32 {
    match difficulty {
        DifficultyLevel::Beginner => 5,
        DifficultyLevel::Intermediate => 7,
        DifficultyLevel::Advanced => 9,
        DifficultyLevel::Expert => 10,
    }
}

/// Largest divisor drawn at each difficulty.
fn divisor_cap(difficulty: DifficultyLevel) -> u32 {
    match difficulty {
        DifficultyLevel::Beginner => 5,
        DifficultyLevel::Intermediate => 6,
        DifficultyLevel::Advanced => 8,
        DifficultyLevel::Expert => 10,
    }
}

/// Three (or `count`) distinct, non-negative wrong answers near `correct`.
///
/// Each candidate is `correct + δ` with `δ` in `[-r, r]`, `r = max(1, correct / 3)`.
/// After `draws_per_range` draws the range doubles; after `widenings`
/// doublings the remaining slots are filled with the closest unused values
/// above `correct` (below it once `u32::MAX` is reached), so the search
/// always terminates.
pub fn distractors<R: Rng + ?Sized>(
    rng: &mut R,
    correct: u32,
    count: usize,
    draws_per_range: u32,
    widenings: u32,
) -> Vec<u32> {
    let mut found: BTreeSet<u32> = BTreeSet::new();
    let mut range = i64::from((correct / 3).max(1));

    'search: for round in 0..=widenings {
        for _ in 0..draws_per_range {
            if found.len() >= count {
                break 'search;
            }
            let delta = rng.gen_range(-range..=range);
            if delta == 0 {
                continue;
            }
            let candidate = i64::from(correct) + delta;
            if candidate < 0 || candidate > i64::from(u32::MAX) {
                continue;
            }
            found.insert(candidate as u32);
        }
        if found.len() >= count {
            break;
        }
        range = range.saturating_mul(2);
        tracing::debug!(correct, round, range, found = found.len(), "Widening distractor range");
    }

    let mut above = correct.checked_add(1);
    let mut below = correct.checked_sub(1);
    while found.len() < count {
        if let Some(n) = above {
            found.insert(n);
            above = n.checked_add(1);
        } else if let Some(n) = below {
            found.insert(n);
            below = n.checked_sub(1);
        } else {
            break;
        }
    }

    found.into_iter().take(count).collect()
}

/// Arithmetic problem generator over an injectable random source.
/// Seed it (`ProblemGenerator::seeded`) for reproducible sequences.
pub struct ProblemGenerator<R: Rng = StdRng> {
    rng: R,
    draws_per_range: u32,
    widenings: u32,
}

impl ProblemGenerator<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ProblemGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self::with_config(rng, get_engine_config())
    }

    pub fn with_config(rng: R, config: &EngineConfig) -> Self {
        ProblemGenerator {
            rng,
            draws_per_range: config.distractor_draws,
            widenings: config.distractor_widenings,
        }
    }

    /// The underlying random source, shared with callers that need to make
    /// their own draws (concept picking, feedback phrases).
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// A problem for `concept` at `difficulty`, with hints, visual aid and
    /// explanation.
    pub fn generate(&mut self, concept: Concept, difficulty: DifficultyLevel) -> Problem {
        let (a, b, correct) = self.draw_operands(concept, difficulty);
        self.build(concept.operation(), a, b, correct, concept, difficulty, true)
    }

    /// Free-form practice problem. Without an operation, addition and
    /// subtraction are equally likely.
    ///
    /// `max_operand` is clamped to `[1, MAX_ADDEND]`. Subtraction needs a
    /// minuend of at least 2, so its effective maximum is never below 2 and
    /// the concept is chosen from that effective maximum.
    pub fn generate_free(
        &mut self,
        max_operand: u32,
        operation: Option<Operation>,
        with_teaching_aids: bool,
    ) -> Problem {
        let operation = operation.unwrap_or_else(|| {
            if self.rng.gen_bool(0.5) {
                Operation::Addition
            } else {
                Operation::Subtraction
            }
        });
        let max = match operation {
            Operation::Subtraction => max_operand.clamp(2, MAX_ADDEND),
            _ => max_operand.clamp(1, MAX_ADDEND),
        };

        let (a, b, correct) = match operation {
            Operation::Addition => {
                let (a, b) = (self.rng.gen_range(1..=max), self.rng.gen_range(1..=max));
                (a, b, a + b)
            }
            Operation::Subtraction => {
                let a = self.rng.gen_range(5.min(max)..=max);
                let b = self.rng.gen_range(1..a);
                (a, b, a - b)
            }
            Operation::Multiplication => {
                let (a, b) = (self.rng.gen_range(1..=5), self.rng.gen_range(1..=5));
                (a, b, a * b)
            }
            Operation::Division => {
                let divisor = self.rng.gen_range(2..=5);
                let quotient = self.rng.gen_range(1..=5);
                (divisor * quotient, divisor, quotient)
            }
        };

        let concept = Concept::for_operation(operation, max);
        self.build(operation, a, b, correct, concept, DifficultyLevel::Beginner, with_teaching_aids)
    }

    /// Addition with both operands in `[min, max]`, capped at [`MAX_ADDEND`].
    pub fn generate_addition(&mut self, min: u32, max: u32, concept: Concept, difficulty: DifficultyLevel) -> Problem {
        let (min, max) = (min.min(max).min(MAX_ADDEND), max.max(min).min(MAX_ADDEND));
        let a = self.rng.gen_range(min..=max);
        let b = self.rng.gen_range(min..=max);
        self.build(Operation::Addition, a, b, a + b, concept, difficulty, true)
    }

    /// Subtraction with minuend in `(min, max]` and subtrahend in `[min, minuend)`.
    pub fn generate_subtraction(&mut self, min: u32, max: u32, concept: Concept, difficulty: DifficultyLevel) -> Problem {
        let min = min.clamp(1, u32::MAX - 1);
        let max = max.max(min + 1);
        let a = self.rng.gen_range(min + 1..=max);
        let b = self.rng.gen_range(min..a);
        self.build(Operation::Subtraction, a, b, a - b, concept, difficulty, true)
    }

    /// `table × n` with `n` in `[1, 10]`; `table` is capped at [`MAX_FACTOR`].
    pub fn generate_table(&mut self, table: u32, difficulty: DifficultyLevel) -> Problem {
        let table = table.min(MAX_FACTOR);
        let b = self.rng.gen_range(1..=10);
        self.build(Operation::Multiplication, table, b, table * b, Concept::MultiplicationTables, difficulty, true)
    }

    /// `(divisor × q) ÷ divisor` with `q` in `[1, 10]`; `divisor` is capped
    /// at [`MAX_FACTOR`].
    pub fn generate_division(&mut self, divisor: u32, difficulty: DifficultyLevel) -> Problem {
        let divisor = divisor.clamp(1, MAX_FACTOR);
        let quotient = self.rng.gen_range(1..=10);
        self.build(Operation::Division, divisor * quotient, divisor, quotient, Concept::DivisionBasics, difficulty, true)
    }

    /// A problem over caller-chosen operands. Fails for a negative
    /// difference, an inexact division or a result that overflows `u32`.
    pub fn generate_with_operands(
        &mut self,
        operation: Operation,
        a: u32,
        b: u32,
        difficulty: DifficultyLevel,
        with_teaching_aids: bool,
    ) -> Result<Problem, TutorError> {
        let correct = operation.apply(a, b).ok_or_else(|| {
            TutorError::new(
                ErrorKind::InvalidInput,
                format!("{} {} {} has no whole-number answer", a, operation.symbol(), b),
                "problem_generation",
            )
        })?;
        let concept = Concept::for_operation(operation, a.max(b));
        Ok(self.build(operation, a, b, correct, concept, difficulty, with_teaching_aids))
    }

    /// Operands and answer for `concept`. Every range keeps the answer whole,
    /// non-negative and well inside `u32`.
    fn draw_operands(&mut self, concept: Concept, difficulty: DifficultyLevel) -> (u32, u32, u32) {
        let rng = &mut self.rng;
        let (a, b) = match concept {
            Concept::SingleDigitAddition => (rng.gen_range(1..=9), rng.gen_range(1..=9)),
            Concept::DoubleDigitAddition => (rng.gen_range(10..=99), rng.gen_range(10..=99)),
            Concept::AdditionWithCarrying => {
                let units_a = rng.gen_range(1..=9);
                let units_b = rng.gen_range(10 - units_a..=9);
                let tens_a = rng.gen_range(1..=8);
                let tens_b = rng.gen_range(1..=8);
                (tens_a * 10 + units_a, tens_b * 10 + units_b)
            }
            Concept::SingleDigitSubtraction => {
                let a = rng.gen_range(2..=9);
                (a, rng.gen_range(1..a))
            }
            Concept::DoubleDigitSubtraction => {
                let a = rng.gen_range(11..=99);
                (a, rng.gen_range(10..a))
            }
            Concept::SubtractionWithBorrowing => {
                let tens_a = rng.gen_range(2..=9);
                let units_a = rng.gen_range(0..=8);
                let tens_b = rng.gen_range(1..tens_a);
                let units_b = rng.gen_range(units_a + 1..=9);
                (tens_a * 10 + units_a, tens_b * 10 + units_b)
            }
            Concept::MultiplicationTables => {
                let table = rng.gen_range(2..=table_cap(difficulty));
                (table, rng.gen_range(1..=10))
            }
            Concept::DivisionBasics => {
                let divisor = rng.gen_range(2..=divisor_cap(difficulty));
                let quotient = rng.gen_range(1..=10);
                (divisor * quotient, divisor)
            }
        };
        let correct = match concept.operation() {
            Operation::Addition => a + b,
            Operation::Subtraction => a - b,
            Operation::Multiplication => a * b,
            Operation::Division => a / b,
        };
        (a, b, correct)
    }

    fn build(
        &mut self,
        operation: Operation,
        a: u32,
        b: u32,
        correct: u32,
        concept: Concept,
        difficulty: DifficultyLevel,
        with_teaching_aids: bool,
    ) -> Problem {
        let mut options = distractors(&mut self.rng, correct, OPTION_COUNT - 1, self.draws_per_range, self.widenings);
        options.push(correct);
        options.shuffle(&mut self.rng);

        let statement = format!("{} {} {}", a, operation.symbol(), b);
        let nonce: u64 = self.rng.gen();
        let id = hash_statement(&format!("{}#{}", statement, nonce))[..12].to_string();

        let (hints, visual_aid, explanation) = if with_teaching_aids {
            (
                aids::hints(operation, a, b),
                Some(aids::visual_aid(operation, a, b, correct)),
                Some(aids::explanation(operation, a, b, correct)),
            )
        } else {
            (Vec::new(), None, None)
        };

        tracing::debug!(id = %id, statement = %statement, concept = ?concept, difficulty = ?difficulty, "Problem generated");

        Problem {
            id,
            operand_a: a,
            operand_b: b,
            operation,
            correct_answer: correct,
            options,
            difficulty,
            concept,
            hints,
            visual_aid,
            explanation,
        }
    }
}
