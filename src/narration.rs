use rand::seq::SliceRandom;
use rand::Rng;
use crate::curriculum::Lesson;
use crate::problems::problem::{ExplanationStep, Problem};
use crate::profile::Badge;
use crate::skills::concept::{Concept, Operation};

pub const CORRECT_PHRASES: [&str; 4] = ["¡Muy bien!", "¡Excelente!", "¡Perfecto!", "¡Genial!"];
pub const INCORRECT_PHRASES: [&str; 4] =
    ["¡Inténtalo de nuevo!", "¡Casi!", "¡Tú puedes!", "¡Sigue intentando!"];

/// "¿Cuánto es 3 más 4?"
pub fn question(problem: &Problem) -> String {
    spoken_question(problem.operation, problem.operand_a, problem.operand_b)
}

pub fn spoken_question(operation: Operation, a: u32, b: u32) -> String {
    format!("¿Cuánto es {} {} {}?", a, operation.spoken_word(), b)
}

pub fn feedback<R: Rng + ?Sized>(rng: &mut R, is_correct: bool) -> &'static str {
    let phrases: &[&'static str] = if is_correct { &CORRECT_PHRASES } else { &INCORRECT_PHRASES };
    phrases.choose(rng).copied().unwrap_or(phrases[0])
}

pub fn lesson_intro(lesson: &Lesson) -> String {
    format!("Comenzamos la lección: {}", lesson.title)
}

pub fn operation_intro(operation: Operation) -> String {
    format!("Vamos a aprender sobre la {}. Te voy a enseñar paso a paso.", operation.name())
}

/// Said after a lesson; `has_next` is false once nothing is left to study.
pub fn lesson_completed(has_next: bool) -> &'static str {
    if has_next {
        "¡Lección completada! Pasemos a la siguiente."
    } else {
        "¡Felicidades! Has completado todas las lecciones disponibles."
    }
}

pub fn badge_unlocked(badge: &Badge) -> String {
    format!("¡Nuevo logro desbloqueado: {}!", badge.name)
}

pub fn practice_intro(concept: Concept) -> String {
    format!("Vamos a practicar {}", concept.display_name())
}

pub fn explanation_step(step: &ExplanationStep) -> String {
    format!("{}. {}", step.title, step.description)
}
