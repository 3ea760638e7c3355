use rand::seq::SliceRandom;
use rand::Rng;
use crate::problems::generator::ProblemGenerator;
use crate::problems::problem::Problem;
use crate::skills::concept::Concept;
use crate::skills::difficulty;
use crate::skills::model::{weakest_concept, MasteryMap};

/// Concept to practice next: one of the explicitly requested concepts, else
/// one of the recommended ones, else the weakest practiced concept, else
/// the first concept of the curriculum.
pub fn pick_concept<R: Rng + ?Sized>(
    rng: &mut R,
    requested: &[Concept],
    recommended: &[Concept],
    masteries: &MasteryMap,
) -> Concept {
    if let Some(concept) = requested.choose(rng) {
        return *concept;
    }
    if let Some(concept) = recommended.choose(rng) {
        return *concept;
    }
    weakest_concept(masteries).unwrap_or(Concept::SingleDigitAddition)
}

/// Generate the next practice problem at the difficulty the concept's
/// mastery calls for.
pub fn pick_problem<R: Rng>(
    generator: &mut ProblemGenerator<R>,
    requested: &[Concept],
    recommended: &[Concept],
    masteries: &MasteryMap,
) -> Problem {
    let concept = pick_concept(generator.rng(), requested, recommended, masteries);
    let level = difficulty::select_from_map(concept, masteries);

    tracing::debug!(
        concept = ?concept,
        difficulty = ?level,
        recommended = recommended.len(),
        "Picked practice concept"
    );

    generator.generate(concept, level)
}
