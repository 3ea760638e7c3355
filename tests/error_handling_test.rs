use mathtrail::curriculum::content;
use mathtrail::{ErrorKind, ProblemGenerator, TutorError};

#[test]
fn test_error_creation() {
    let error = TutorError::new(ErrorKind::InvalidInput, "Test error", "test_stage");
    assert_eq!(error.message, "Test error");
    assert_eq!(error.stage, "test_stage");
    assert_eq!(error.kind, ErrorKind::InvalidInput);
    assert!(error.context.is_none());
}

#[test]
fn test_error_with_context_and_source() {
    let error = TutorError::new(ErrorKind::Config, "Test error", "test_stage")
        .with_context("Additional context")
        .with_source("toml");
    assert_eq!(error.context.as_deref(), Some("Additional context"));
    assert_eq!(error.source.as_deref(), Some("toml"));
}

#[test]
fn test_error_display() {
    let error = TutorError::not_found("lesson", "unit_1_lesson_9", "curriculum").with_context("context");
    let display = format!("{}", error);
    assert_eq!(display, "[curriculum] lesson not found: unit_1_lesson_9 (context: context)");
    assert!(error.is_not_found());
    assert!(!error.is_empty_state());
}

#[test]
fn test_conversions_keep_kind() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert_eq!(TutorError::from(io).kind, ErrorKind::Io);

    let json = serde_json::from_str::<u32>("not json").unwrap_err();
    assert_eq!(TutorError::from(json).kind, ErrorKind::Serialization);

    let converted: TutorError = anyhow::anyhow!("boom").into();
    assert_eq!(converted.kind, ErrorKind::InvalidInput);
    assert!(converted.message.contains("boom"));
}

#[test]
fn test_unknown_ids_are_not_found() {
    let path = content::default_learning_path(&mut ProblemGenerator::seeded(2));
    assert!(path.find_unit("unit_42").unwrap_err().is_not_found());
    assert!(path.find_lesson("unit_1_lesson_42").unwrap_err().is_not_found());
    assert!(path.lesson_context("").unwrap_err().is_not_found());

    let context = path.lesson_context("unit_3_lesson_2").expect("lesson exists");
    assert_eq!(context.unit_id, "unit_3");
    assert!(!context.completes_lesson);
}

#[test]
fn test_error_serializes_for_the_ui() {
    let error = TutorError::empty_state("No problem is awaiting an answer", "select_answer");
    let json = serde_json::to_value(&error).expect("serializable");
    assert_eq!(json["kind"], "EmptyState");
    assert_eq!(json["stage"], "select_answer");
}
