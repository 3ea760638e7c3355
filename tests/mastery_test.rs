use mathtrail::skills::difficulty;
use mathtrail::skills::model::{self, ConceptMastery, MasteryMap};
use mathtrail::{Concept, DifficultyLevel, PerformanceObservation};

const DAY_MS: i64 = 86_400_000;

fn observation(concept: Concept, is_correct: bool, time_spent_ms: u64, hints_used: u32, timestamp: i64) -> PerformanceObservation {
    PerformanceObservation {
        problem_id: format!("p{}", timestamp),
        concept,
        difficulty: DifficultyLevel::Beginner,
        is_correct,
        time_spent_ms,
        hints_used,
        attempts: 1,
        timestamp,
    }
}

fn mastery(concept: Concept, score: f32, average_time_ms: u64, last_practiced_at: i64) -> ConceptMastery {
    ConceptMastery {
        mastery_score: score,
        average_time_ms,
        last_practiced_at,
        total_attempts: 5,
        correct_attempts: 4,
        ..ConceptMastery::empty(concept)
    }
}

#[test]
fn test_empty_history_has_no_mastery() {
    let masteries = model::analyze(&[]);
    assert!(masteries.is_empty());
    assert_eq!(model::mastery_score(&masteries, Concept::SingleDigitAddition), 0.0);

    let empty = model::analyze_concept(Concept::DivisionBasics, &[]);
    assert_eq!(empty.mastery_score, 0.0);
    assert_eq!(empty.accuracy_rate(), 0.0);
}

#[test]
fn test_ten_perfect_answers_reach_full_mastery() {
    let history: Vec<_> = (0..10)
        .map(|i| observation(Concept::SingleDigitAddition, true, 2_000, 0, i * 1_000))
        .collect();

    let masteries = model::analyze(&history);
    let m = &masteries[&Concept::SingleDigitAddition];
    assert_eq!(m.total_attempts, 10);
    assert_eq!(m.correct_attempts, 10);
    assert_eq!(m.average_time_ms, 2_000);
    assert_eq!(m.last_practiced_at, 9_000);
    assert!((m.mastery_score - 1.0).abs() < 1e-5, "score was {}", m.mastery_score);
    assert_eq!(model::mastered_concepts(&masteries), vec![Concept::SingleDigitAddition]);
}

#[test]
fn test_few_samples_use_neutral_consistency() {
    let history = vec![
        observation(Concept::SingleDigitAddition, true, 1_000, 0, 1),
        observation(Concept::SingleDigitAddition, true, 1_000, 0, 2),
    ];
    let m = &model::analyze(&history)[&Concept::SingleDigitAddition];
    assert!((m.mastery_score - 0.9).abs() < 1e-5, "score was {}", m.mastery_score);
}

#[test]
fn test_slow_answers_and_hints_lower_the_score() {
    assert!((model::speed_score(10_000, Concept::SingleDigitAddition) - 0.5).abs() < 1e-6);
    assert_eq!(model::speed_score(100, Concept::SingleDigitAddition), 1.0);
    assert!((model::hint_score(2.0) - 0.5).abs() < 1e-6);
    assert_eq!(model::hint_score(9.0), 0.0);

    let fast: Vec<_> = (0..5)
        .map(|i| observation(Concept::MultiplicationTables, true, 3_000, 0, i))
        .collect();
    let slow: Vec<_> = (0..5)
        .map(|i| observation(Concept::MultiplicationTables, true, 12_000, 2, i))
        .collect();
    let fast_score = model::analyze(&fast)[&Concept::MultiplicationTables].mastery_score;
    let slow_score = model::analyze(&slow)[&Concept::MultiplicationTables].mastery_score;
    assert!(slow_score < fast_score);
}

#[test]
fn test_alternating_outcomes_are_inconsistent() {
    let history: Vec<_> = (0..6)
        .map(|i| observation(Concept::DivisionBasics, i % 2 == 0, 4_000, 0, i))
        .collect();
    let refs: Vec<&PerformanceObservation> = history.iter().collect();
    let consistency = model::consistency_score(&refs);
    assert!(consistency < 0.6, "consistency was {}", consistency);
}

#[test]
fn test_scores_stay_in_unit_range() {
    let mut history = Vec::new();
    for (i, concept) in Concept::ALL.iter().enumerate() {
        for j in 0..7 {
            let t = (i * 10 + j) as i64;
            history.push(observation(*concept, j % 3 != 0, 500 + 4_000 * j as u64, j as u32, t));
        }
    }
    history.push(observation(Concept::SingleDigitAddition, false, u64::MAX / 2, 50, 999));

    let masteries = model::analyze(&history);
    assert_eq!(masteries.len(), Concept::ALL.len());
    for m in masteries.values() {
        assert!((0.0..=1.0).contains(&m.mastery_score), "{:?} scored {}", m.concept, m.mastery_score);
    }
}

#[test]
fn test_mastery_is_recomputed_not_carried() {
    let mut history: Vec<_> = (0..5)
        .map(|i| observation(Concept::SingleDigitSubtraction, true, 2_000, 0, i))
        .collect();
    let before = model::analyze(&history)[&Concept::SingleDigitSubtraction].mastery_score;
    history.extend((5..10).map(|i| observation(Concept::SingleDigitSubtraction, false, 9_000, 3, i)));
    let after = model::analyze(&history)[&Concept::SingleDigitSubtraction].mastery_score;
    assert!(after < before);
}

#[test]
fn test_needs_review_when_weak_or_stale() {
    let now = 30 * DAY_MS;
    assert!(mastery(Concept::SingleDigitAddition, 0.5, 1_000, now).needs_review(now));
    assert!(!mastery(Concept::SingleDigitAddition, 0.95, 1_000, now - DAY_MS).needs_review(now));
    assert!(mastery(Concept::SingleDigitAddition, 0.95, 1_000, now - 8 * DAY_MS).needs_review(now));
}

#[test]
fn test_weakest_concept_prefers_concept_order_on_ties() {
    let mut masteries = MasteryMap::new();
    masteries.insert(Concept::DivisionBasics, mastery(Concept::DivisionBasics, 0.4, 1_000, 0));
    masteries.insert(Concept::DoubleDigitAddition, mastery(Concept::DoubleDigitAddition, 0.4, 1_000, 0));
    masteries.insert(Concept::SingleDigitAddition, mastery(Concept::SingleDigitAddition, 0.9, 1_000, 0));
    assert_eq!(model::weakest_concept(&masteries), Some(Concept::DoubleDigitAddition));
    assert_eq!(model::weakest_concept(&MasteryMap::new()), None);
}

#[test]
fn test_difficulty_thresholds() {
    let concept = Concept::SingleDigitAddition;
    assert_eq!(difficulty::select(concept, None), DifficultyLevel::Beginner);

    let cases = [
        (0.95, 4_000, DifficultyLevel::Expert),
        (0.95, 6_000, DifficultyLevel::Advanced),
        (0.85, 1_000, DifficultyLevel::Advanced),
        (0.8, 1_000, DifficultyLevel::Advanced),
        (0.65, 1_000, DifficultyLevel::Intermediate),
        (0.6, 1_000, DifficultyLevel::Intermediate),
        (0.3, 1_000, DifficultyLevel::Beginner),
    ];
    for (score, time, expected) in cases {
        let m = mastery(concept, score, time, 0);
        assert_eq!(difficulty::select(concept, Some(&m)), expected, "score {} time {}", score, time);
    }
}

#[test]
fn test_difficulty_from_map_defaults_to_beginner() {
    let mut masteries = MasteryMap::new();
    masteries.insert(Concept::DivisionBasics, mastery(Concept::DivisionBasics, 0.99, 2_000, 0));
    assert_eq!(
        difficulty::select_from_map(Concept::DivisionBasics, &masteries),
        DifficultyLevel::Expert
    );
    assert_eq!(
        difficulty::select_from_map(Concept::MultiplicationTables, &masteries),
        DifficultyLevel::Beginner
    );
}
