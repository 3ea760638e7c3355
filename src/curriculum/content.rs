use rand::Rng;
use crate::curriculum::{LearningPath, LearningUnit, Lesson, LESSON_XP, UNIT_TARGET_XP};
use crate::problems::generator::ProblemGenerator;
use crate::problems::problem::Problem;
use crate::skills::concept::{Category, Concept, DifficultyLevel, MasteryLevel};

const BEGINNER: DifficultyLevel = DifficultyLevel::Beginner;

fn lesson(unit_id: &str, n: u32, title: &str, concept: Concept, problems: Vec<Problem>) -> Lesson {
    Lesson {
        id: format!("{}_lesson_{}", unit_id, n),
        title: title.to_string(),
        concept,
        problems,
        is_completed: false,
        mastery_level: MasteryLevel::NotStarted,
        xp_value: LESSON_XP,
    }
}

fn repeat<R: Rng, F>(generator: &mut ProblemGenerator<R>, count: usize, mut f: F) -> Vec<Problem>
where
    F: FnMut(&mut ProblemGenerator<R>) -> Problem,
{
    (0..count).map(|_| f(generator)).collect()
}

fn addition_lessons<R: Rng>(generator: &mut ProblemGenerator<R>, unit_id: &str) -> Vec<Lesson> {
    let single = Concept::SingleDigitAddition;
    let double = Concept::DoubleDigitAddition;
    vec![
        lesson(unit_id, 1, "Suma 1-5", single,
            repeat(generator, 5, |g| g.generate_addition(1, 5, single, BEGINNER))),
        lesson(unit_id, 2, "Suma 1-10", single,
            repeat(generator, 8, |g| g.generate_addition(1, 10, single, BEGINNER))),
        lesson(unit_id, 3, "Suma con 10+", double,
            repeat(generator, 6, |g| g.generate_addition(10, 20, double, BEGINNER))),
    ]
}

fn subtraction_lessons<R: Rng>(generator: &mut ProblemGenerator<R>, unit_id: &str) -> Vec<Lesson> {
    let single = Concept::SingleDigitSubtraction;
    vec![
        lesson(unit_id, 1, "Resta 1-5", single,
            repeat(generator, 5, |g| g.generate_subtraction(1, 5, single, BEGINNER))),
        lesson(unit_id, 2, "Resta 1-10", single,
            repeat(generator, 8, |g| g.generate_subtraction(1, 10, single, BEGINNER))),
    ]
}

fn multiplication_lessons<R: Rng>(generator: &mut ProblemGenerator<R>, unit_id: &str) -> Vec<Lesson> {
    let tables = Concept::MultiplicationTables;
    vec![
        lesson(unit_id, 1, "Tabla del 2", tables,
            repeat(generator, 5, |g| g.generate_table(2, BEGINNER))),
        lesson(unit_id, 2, "Tabla del 3", tables,
            repeat(generator, 5, |g| g.generate_table(3, BEGINNER))),
    ]
}

fn division_lessons<R: Rng>(generator: &mut ProblemGenerator<R>, unit_id: &str) -> Vec<Lesson> {
    vec![lesson(unit_id, 1, "División por 2", Concept::DivisionBasics,
        repeat(generator, 5, |g| g.generate_division(2, BEGINNER)))]
}

fn unit(id: &str, title: &str, description: &str, icon: &str, category: Category, lessons: Vec<Lesson>) -> LearningUnit {
    LearningUnit {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        lessons,
        is_unlocked: false,
        completion_percentage: 0.0,
        xp_earned: 0,
        target_xp: UNIT_TARGET_XP,
        category,
    }
}

/// The built-in six-unit path. Only the first unit starts unlocked.
pub fn default_learning_path<R: Rng>(generator: &mut ProblemGenerator<R>) -> LearningPath {
    let mut units = vec![
        unit("unit_1", "Primeros Pasos", "Suma básica con números pequeños", "🌱", Category::Addition,
            addition_lessons(generator, "unit_1")),
        unit("unit_2", "Suma Divertida", "Suma con números más grandes", "➕", Category::Addition,
            addition_lessons(generator, "unit_2")),
        unit("unit_3", "Restar Fácil", "Resta básica paso a paso", "➖", Category::Subtraction,
            subtraction_lessons(generator, "unit_3")),
        unit("unit_4", "Resta Avanzada", "Resta con números grandes", "🎯", Category::Subtraction,
            subtraction_lessons(generator, "unit_4")),
        unit("unit_5", "Multiplicar", "Tablas de multiplicar", "✖️", Category::Multiplication,
            multiplication_lessons(generator, "unit_5")),
        unit("unit_6", "Dividir", "División básica", "➗", Category::Division,
            division_lessons(generator, "unit_6")),
    ];
    for (index, unit) in units.iter_mut().enumerate() {
        unit.is_unlocked = index == 0;
    }

    tracing::debug!(units = units.len(), "Built default learning path");
    LearningPath { units }
}
