use serde::{Serialize, Deserialize};
use std::fmt;

/// Broad category of a [`TutorError`], so callers can branch without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A lesson, unit or concept id that does not exist.
    NotFound,
    /// An action that needs an active problem or lesson when there is none.
    EmptyState,
    InvalidInput,
    Config,
    Io,
    Serialization,
}

/// Unified error type for the whole engine.
/// All fallible functions return `Result<T, TutorError>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorError {
    pub message: String,
    pub stage: String,
    pub kind: ErrorKind,
    pub context: Option<String>,
    pub source: Option<String>,
}

pub type Result<T> = std::result::Result<T, TutorError>;

impl TutorError {
    /// Create a new error with kind, stage and message
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S, stage: &'static str) -> Self {
        TutorError {
            message: message.into(),
            stage: stage.to_string(),
            kind,
            context: None,
            source: None,
        }
    }

    pub fn not_found<S: Into<String>>(what: &str, id: S, stage: &'static str) -> Self {
        let id = id.into();
        TutorError::new(ErrorKind::NotFound, format!("{} not found: {}", what, id), stage)
    }

    pub fn empty_state<S: Into<String>>(message: S, stage: &'static str) -> Self {
        TutorError::new(ErrorKind::EmptyState, message, stage)
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_empty_state(&self) -> bool {
        self.kind == ErrorKind::EmptyState
    }
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for TutorError {}

impl From<anyhow::Error> for TutorError {
    fn from(err: anyhow::Error) -> Self {
        TutorError::new(ErrorKind::InvalidInput, err.to_string(), "unknown")
            .with_source("anyhow")
    }
}

impl From<std::io::Error> for TutorError {
    fn from(err: std::io::Error) -> Self {
        TutorError::new(ErrorKind::Io, format!("I/O error: {}", err), "io")
            .with_source("std::io")
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::new(ErrorKind::Serialization, format!("JSON error: {}", err), "json_parse")
            .with_source("serde_json")
    }
}

impl From<toml::de::Error> for TutorError {
    fn from(err: toml::de::Error) -> Self {
        TutorError::new(ErrorKind::Config, format!("TOML error: {}", err), "config")
            .with_source("toml")
    }
}
