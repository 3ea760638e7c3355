use crate::error::{ErrorKind, TutorError};

/// Initialize structured logging with tracing.
/// Meant to be called once by the host application at startup; calling it
/// again returns an error instead of replacing the installed subscriber.
pub fn init_logging() -> Result<(), TutorError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| TutorError::new(
            ErrorKind::Config,
            format!("Failed to set global tracing subscriber: {}", e),
            "logging",
        ))?;

    tracing::info!("Structured logging initialized");
    Ok(())
}
