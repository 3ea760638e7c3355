use serde::{Serialize, Deserialize};

/// Curriculum grouping for units and operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Mixed,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Addition => "Suma",
            Category::Subtraction => "Resta",
            Category::Multiplication => "Multiplicación",
            Category::Division => "División",
            Category::Mixed => "Mixto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Name of the operation, used in feedback ("eres muy bueno en la suma")
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Addition => "suma",
            Operation::Subtraction => "resta",
            Operation::Multiplication => "multiplicación",
            Operation::Division => "división",
        }
    }

    /// Word read aloud between the operands ("3 más 4")
    pub fn spoken_word(&self) -> &'static str {
        match self {
            Operation::Addition => "más",
            Operation::Subtraction => "menos",
            Operation::Multiplication => "por",
            Operation::Division => "dividido entre",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Operation::Addition => Category::Addition,
            Operation::Subtraction => Category::Subtraction,
            Operation::Multiplication => Category::Multiplication,
            Operation::Division => Category::Division,
        }
    }

    /// Exact result, or `None` for division with a zero divisor or a remainder.
    pub fn apply(&self, a: u32, b: u32) -> Option<u32> {
        match self {
            Operation::Addition => a.checked_add(b),
            Operation::Subtraction => a.checked_sub(b),
            Operation::Multiplication => a.checked_mul(b),
            Operation::Division => {
                if b == 0 || a % b != 0 {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }
}

/// A named arithmetic skill. The set is closed; every consumer matches it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Concept {
    SingleDigitAddition,
    DoubleDigitAddition,
    AdditionWithCarrying,
    SingleDigitSubtraction,
    DoubleDigitSubtraction,
    SubtractionWithBorrowing,
    MultiplicationTables,
    DivisionBasics,
}

impl Concept {
    pub const ALL: [Concept; 8] = [
        Concept::SingleDigitAddition,
        Concept::DoubleDigitAddition,
        Concept::AdditionWithCarrying,
        Concept::SingleDigitSubtraction,
        Concept::DoubleDigitSubtraction,
        Concept::SubtractionWithBorrowing,
        Concept::MultiplicationTables,
        Concept::DivisionBasics,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Concept::SingleDigitAddition => "Suma de 1 dígito",
            Concept::DoubleDigitAddition => "Suma de 2 dígitos",
            Concept::AdditionWithCarrying => "Suma con llevada",
            Concept::SingleDigitSubtraction => "Resta de 1 dígito",
            Concept::DoubleDigitSubtraction => "Resta de 2 dígitos",
            Concept::SubtractionWithBorrowing => "Resta con préstamo",
            Concept::MultiplicationTables => "Tablas de multiplicar",
            Concept::DivisionBasics => "División básica",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Concept::SingleDigitAddition => "Sumar números del 1 al 9",
            Concept::DoubleDigitAddition => "Sumar números del 10 al 99",
            Concept::AdditionWithCarrying => "Suma que requiere llevar números",
            Concept::SingleDigitSubtraction => "Restar números del 1 al 9",
            Concept::DoubleDigitSubtraction => "Restar números del 10 al 99",
            Concept::SubtractionWithBorrowing => "Resta que requiere prestar",
            Concept::MultiplicationTables => "Multiplicación básica 1-10",
            Concept::DivisionBasics => "División simple sin residuo",
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Concept::SingleDigitAddition
            | Concept::DoubleDigitAddition
            | Concept::AdditionWithCarrying => Operation::Addition,
            Concept::SingleDigitSubtraction
            | Concept::DoubleDigitSubtraction
            | Concept::SubtractionWithBorrowing => Operation::Subtraction,
            Concept::MultiplicationTables => Operation::Multiplication,
            Concept::DivisionBasics => Operation::Division,
        }
    }

    pub fn category(&self) -> Category {
        self.operation().category()
    }

    /// Answer time (ms) at or under which a child gets full speed credit.
    pub fn ideal_time_ms(&self) -> u64 {
        match self {
            Concept::SingleDigitAddition => 5_000,
            Concept::DoubleDigitAddition => 8_000,
            Concept::AdditionWithCarrying => 7_000,
            Concept::SingleDigitSubtraction => 6_000,
            Concept::DoubleDigitSubtraction => 10_000,
            Concept::SubtractionWithBorrowing => 7_000,
            Concept::MultiplicationTables => 4_000,
            Concept::DivisionBasics => 8_000,
        }
    }

    /// Concept a free-form problem belongs to, from its operation and the
    /// largest operand it was drawn with.
    pub fn for_operation(operation: Operation, max_operand: u32) -> Concept {
        match operation {
            Operation::Addition if max_operand <= 9 => Concept::SingleDigitAddition,
            Operation::Addition => Concept::DoubleDigitAddition,
            Operation::Subtraction if max_operand <= 9 => Concept::SingleDigitSubtraction,
            Operation::Subtraction => Concept::DoubleDigitSubtraction,
            Operation::Multiplication => Concept::MultiplicationTables,
            Operation::Division => Concept::DivisionBasics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
        DifficultyLevel::Expert,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Principiante",
            DifficultyLevel::Intermediate => "Intermedio",
            DifficultyLevel::Advanced => "Avanzado",
            DifficultyLevel::Expert => "Experto",
        }
    }

    /// XP multiplier in tenths (1.0, 1.2, 1.5, 2.0), kept integral so the
    /// XP formula floors exactly.
    pub fn xp_multiplier_tenths(&self) -> u32 {
        match self {
            DifficultyLevel::Beginner => 10,
            DifficultyLevel::Intermediate => 12,
            DifficultyLevel::Advanced => 15,
            DifficultyLevel::Expert => 20,
        }
    }

    /// 0-based tier, handy for averaging.
    pub fn rank(&self) -> u8 {
        match self {
            DifficultyLevel::Beginner => 0,
            DifficultyLevel::Intermediate => 1,
            DifficultyLevel::Advanced => 2,
            DifficultyLevel::Expert => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryLevel {
    #[default]
    NotStarted,
    Learning,
    Practicing,
    Mastered,
}

impl MasteryLevel {
    /// Classification of a mastery score: >= 0.9 mastered, >= 0.7 practicing.
    pub fn from_score(score: f32) -> MasteryLevel {
        if score >= 0.9 {
            MasteryLevel::Mastered
        } else if score >= 0.7 {
            MasteryLevel::Practicing
        } else {
            MasteryLevel::Learning
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MasteryLevel::NotStarted => "No iniciado",
            MasteryLevel::Learning => "Aprendiendo",
            MasteryLevel::Practicing => "Practicando",
            MasteryLevel::Mastered => "Dominado",
        }
    }
}
