use mathtrail::analytics;
use mathtrail::curriculum::LessonContext;
use mathtrail::narration;
use mathtrail::state::session::PracticeState;
use mathtrail::{
    AppState, Concept, DifficultyLevel, EngineConfig, ErrorKind, Operation, PerformanceObservation, ProblemGenerator,
    ProgressionTracker,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NOW: i64 = 1_700_000_000_000;

fn three_plus_four() -> mathtrail::Problem {
    ProblemGenerator::seeded(0)
        .generate_with_operands(Operation::Addition, 3, 4, DifficultyLevel::Beginner, true)
        .expect("valid operands")
}

fn wrong_option(problem: &mathtrail::Problem) -> u32 {
    problem
        .options
        .iter()
        .copied()
        .find(|&o| o != problem.correct_answer)
        .expect("three distractors")
}

#[test]
fn test_answer_without_problem_is_empty_state() {
    let idle = PracticeState::Idle;
    let err = idle.select_answer(7, NOW).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyState);
    assert!(idle.request_hint().unwrap_err().is_empty_state());
    assert!(idle.current_problem().is_none());
}

#[test]
fn test_answer_produces_observation() {
    let problem = three_plus_four();
    let state = PracticeState::start(problem.clone(), NOW);
    assert!(state.is_awaiting_answer());

    let (state, hint) = state.request_hint().expect("problem has hints");
    assert_eq!(hint.level, 1);
    let (state, observation) = state.select_answer(7, NOW + 4_500).expect("awaiting answer");

    assert!(observation.is_correct);
    assert_eq!(observation.problem_id, problem.id);
    assert_eq!(observation.concept, Concept::SingleDigitAddition);
    assert_eq!(observation.time_spent_ms, 4_500);
    assert_eq!(observation.hints_used, 1);
    assert_eq!(observation.attempts, 1);
    assert_eq!(observation.timestamp, NOW + 4_500);

    let err = state.select_answer(7, NOW + 5_000).unwrap_err();
    assert!(err.is_empty_state(), "an answered problem cannot be scored twice");
    assert_eq!(state.next_problem(), PracticeState::Idle);
}

#[test]
fn test_wrong_answer_is_scored_once() {
    let problem = three_plus_four();
    let wrong = wrong_option(&problem);
    let (state, observation) = PracticeState::start(problem, NOW)
        .select_answer(wrong, NOW + 1_000)
        .expect("awaiting answer");
    assert!(!observation.is_correct);
    assert_eq!(observation.attempts, 1);
    assert!(!state.is_awaiting_answer());
    assert!(matches!(state, PracticeState::Answered { selected, .. } if selected == wrong));

    assert!(state.select_answer(7, NOW + 2_000).unwrap_err().is_empty_state());
    assert!(state.request_hint().unwrap_err().is_empty_state());
}

#[test]
fn test_hints_cap_at_the_last_one() {
    let mut state = PracticeState::start(three_plus_four(), NOW);
    let mut levels = Vec::new();
    for _ in 0..6 {
        let (next, hint) = state.request_hint().expect("hints available");
        levels.push(hint.level);
        state = next;
    }
    assert_eq!(levels, vec![1, 2, 3, 4, 4, 4]);

    let (_, observation) = state.select_answer(0, NOW).expect("awaiting answer");
    assert_eq!(observation.hints_used, 4);
    assert!(!observation.is_correct);
}

#[test]
fn test_problem_without_hints_reports_empty_state() {
    let bare = ProblemGenerator::seeded(1).generate_free(10, Some(Operation::Addition), false);
    let state = PracticeState::start(bare, NOW);
    assert!(state.request_hint().unwrap_err().is_empty_state());
}

#[test]
fn test_lesson_flow_through_app_state() {
    let mut generator = ProblemGenerator::seeded(21);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let config = EngineConfig::default();

    let app = AppState::initial(&mut generator, "learner", NOW);
    assert!(app.learning_path.units[0].is_unlocked);
    assert!(!app.learning_path.units[1].is_unlocked);

    let locked = app.start_lesson("unit_2_lesson_1", NOW).unwrap_err();
    assert_eq!(locked.kind, ErrorKind::InvalidInput);
    assert!(app.start_lesson("nope", NOW).unwrap_err().is_not_found());

    let app = app.start_lesson("unit_1_lesson_1", NOW).expect("first lesson is open");
    let first = app.session.current_problem().cloned().expect("problem shown");
    let outcome = app.answer(first.correct_answer, &tracker, NOW + 2_000).expect("awaiting answer");
    assert_eq!(outcome.xp_awarded, 30);
    assert_eq!(outcome.state.history.len(), 1);
    assert_eq!(outcome.state.user.progress.unit_progress["unit_1"].xp_earned, 30);

    let app = outcome.state.next_problem(&config, NOW + 3_000).expect("lesson exists");
    let second = app.session.current_problem().expect("lesson has more problems");
    assert_ne!(second.id, first.id);

    let wrong = wrong_option(second);
    let outcome = app.answer(wrong, &tracker, NOW + 20_000).expect("awaiting answer");
    assert_eq!(outcome.xp_awarded, 10);

    let mut app = outcome.state;
    for n in 1..=3 {
        app = app.complete_lesson(&format!("unit_1_lesson_{}", n), &config, NOW + 30_000).expect("lesson exists");
    }
    assert!(app.learning_path.units[1].is_unlocked);
    assert_eq!(app.session, PracticeState::Idle);
    let next = app.current_lesson.as_ref().expect("unit 2 is open");
    assert_eq!(next.lesson_id, "unit_2_lesson_1");
    assert!(app.complete_lesson("unit_7_lesson_1", &config, NOW).unwrap_err().is_not_found());
}

#[test]
fn test_finishing_a_lesson_opens_the_next_one() {
    let mut generator = ProblemGenerator::seeded(23);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let config = EngineConfig::default();

    let mut app = AppState::initial(&mut generator, "learner", NOW)
        .start_lesson("unit_1_lesson_1", NOW)
        .expect("first lesson is open");
    let count = app.learning_path.find_lesson("unit_1_lesson_1").expect("lesson exists").problems.len();
    assert_eq!(count, 5);

    for i in 0..count {
        let at = NOW + i as i64 * 10_000;
        let problem = app.session.current_problem().cloned().expect("problem shown");
        let outcome = app.answer(problem.correct_answer, &tracker, at + 2_000).expect("awaiting answer");
        let finished = i + 1 == count;
        assert_eq!(outcome.state.user.progress.is_lesson_completed("unit_1", "unit_1_lesson_1"), finished);
        assert_eq!(
            outcome.state.learning_path.find_lesson("unit_1_lesson_1").expect("lesson exists").is_completed,
            finished
        );
        app = outcome.state.next_problem(&config, at + 3_000).expect("lesson exists");
        if !finished {
            assert_eq!(app.current_lesson.as_ref().map(|c| c.lesson_id.as_str()), Some("unit_1_lesson_1"));
        }
    }

    let context = app.current_lesson.as_ref().expect("a lesson is recommended");
    assert_eq!(context.lesson_id, "unit_1_lesson_2");
    let first = &app.learning_path.find_lesson("unit_1_lesson_2").expect("lesson exists").problems[0];
    assert_eq!(app.session.current_problem().map(|p| p.id.as_str()), Some(first.id.as_str()));
    assert!(app.session.is_awaiting_answer());
    assert_eq!(app.history.len(), count);
}

#[test]
fn test_next_problem_outside_a_lesson_goes_idle() {
    let mut generator = ProblemGenerator::seeded(29);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let app = AppState::initial(&mut generator, "learner", NOW).start_practice(&mut generator, NOW);
    let answer = app.session.current_problem().map(|p| p.correct_answer).unwrap_or(0);
    let app = app.answer(answer, &tracker, NOW + 1_000).expect("awaiting answer").state;

    let next = app.next_problem(&EngineConfig::default(), NOW + 2_000).expect("no lesson to look up");
    assert_eq!(next.session, PracticeState::Idle);
    assert!(next.current_lesson.is_none());
}

#[test]
fn test_completing_context_refreshes_the_path() {
    let mut generator = ProblemGenerator::seeded(31);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let mut app = AppState::initial(&mut generator, "learner", NOW);

    for n in 1..=3 {
        assert!(!app.learning_path.units[1].is_unlocked, "unit 2 opened after {} lessons", n - 1);
        let lesson_id = format!("unit_1_lesson_{}", n);
        let context = app.learning_path.lesson_context(&lesson_id).expect("lesson exists").completing();
        let observation = PerformanceObservation {
            problem_id: format!("p{}", n),
            concept: Concept::SingleDigitAddition,
            difficulty: DifficultyLevel::Beginner,
            is_correct: true,
            time_spent_ms: 2_000,
            hints_used: 0,
            attempts: 1,
            timestamp: NOW + n,
        };
        app = app.record(&tracker, observation, Some(&context)).state;
        assert!(app.learning_path.find_lesson(&lesson_id).expect("lesson exists").is_completed);
    }
    assert!(app.learning_path.units[1].is_unlocked);

    let stray = LessonContext {
        unit_id: "unit_9".into(),
        lesson_id: "unit_9_lesson_1".into(),
        completes_lesson: true,
    };
    let observation = PerformanceObservation {
        problem_id: "stray".into(),
        concept: Concept::SingleDigitAddition,
        difficulty: DifficultyLevel::Beginner,
        is_correct: true,
        time_spent_ms: 2_000,
        hints_used: 0,
        attempts: 1,
        timestamp: NOW + 10,
    };
    let after = app.record(&tracker, observation, Some(&stray)).state;
    assert_eq!(after.history.len(), 4);
    assert_eq!(after.learning_path.units.len(), app.learning_path.units.len());
    assert!(after.learning_path.units[1].is_unlocked);
}

#[test]
fn test_practice_picks_recommended_concepts() {
    let mut generator = ProblemGenerator::seeded(8);
    let mut app = AppState::initial(&mut generator, "learner", NOW);
    app.recommended_practice = vec![Concept::DivisionBasics];

    let practice = app.start_practice(&mut generator, NOW);
    let problem = practice.session.current_problem().expect("problem shown");
    assert_eq!(problem.concept, Concept::DivisionBasics);
    assert_eq!(problem.difficulty, DifficultyLevel::Beginner);
    assert!(practice.current_lesson.is_none());

    let (with_hint, hint) = practice.request_hint().expect("hints available");
    assert_eq!(hint.level, 1);
    assert_eq!(practice.session.current_problem(), with_hint.session.current_problem());
}

#[test]
fn test_app_state_survives_json_snapshot() {
    let mut generator = ProblemGenerator::seeded(13);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let app = AppState::initial(&mut generator, "learner", NOW).start_practice(&mut generator, NOW);
    let answer = app.session.current_problem().map(|p| p.correct_answer).unwrap_or(0);
    let app = app.answer(answer, &tracker, NOW + 1_000).expect("awaiting answer").state;

    let json = serde_json::to_string(&app).expect("serializable");
    let restored: AppState = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(restored, app);
}

#[test]
fn test_narration_strings() {
    let problem = three_plus_four();
    assert_eq!(narration::question(&problem), "¿Cuánto es 3 más 4?");
    assert_eq!(
        narration::spoken_question(Operation::Division, 8, 2),
        "¿Cuánto es 8 dividido entre 2?"
    );

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        assert!(narration::CORRECT_PHRASES.contains(&narration::feedback(&mut rng, true)));
        assert!(narration::INCORRECT_PHRASES.contains(&narration::feedback(&mut rng, false)));
    }

    let explanation = problem.explanation.as_ref().expect("aids requested");
    let step = narration::explanation_step(&explanation.steps[0]);
    assert!(step.starts_with(&explanation.steps[0].title));
    assert_eq!(narration::lesson_completed(false), "¡Felicidades! Has completado todas las lecciones disponibles.");
}

#[test]
fn test_analytics_summary() {
    let mut generator = ProblemGenerator::seeded(17);
    let tracker = ProgressionTracker::new(EngineConfig::default());
    let mut app = AppState::initial(&mut generator, "learner", NOW);

    for (i, correct) in [true, true, false, true].into_iter().enumerate() {
        let shown = app.start_practice(&mut generator, NOW + i as i64 * 10_000);
        let problem = shown.session.current_problem().cloned().expect("problem shown");
        let value = if correct { problem.correct_answer } else { wrong_option(&problem) };
        app = shown
            .answer(value, &tracker, NOW + i as i64 * 10_000 + 2_000)
            .expect("awaiting answer")
            .state;
    }

    let summary = analytics::summarize(&app.history, &app.user);
    assert_eq!(summary.total_attempts, 4);
    assert!((summary.overall_accuracy - 0.75).abs() < 1e-6);
    let attempts: usize = summary.concepts.values().map(|c| c.attempts).sum();
    assert_eq!(attempts, 4);
    assert_eq!(summary.weekly_xp.len(), 7);
    assert_eq!(summary.weekly_xp_total, app.user.xp_total);

    let empty = analytics::summarize(&[], &app.user);
    assert_eq!(empty.total_attempts, 0);
    assert_eq!(empty.overall_accuracy, 0.0);
    assert!(empty.concepts.is_empty());
}
