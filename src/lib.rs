//! Adaptive practice engine for an arithmetic tutor: problem generation,
//! mastery tracking, difficulty selection, recommendations, progression
//! and badges. All state is held by the caller and every update returns a
//! new snapshot.

pub mod analytics;
pub mod badges;
pub mod brain;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod logging;
pub mod narration;
pub mod problems;
pub mod profile;
pub mod progress;
pub mod sessions;
pub mod skills;
pub mod state;

pub use config::{get_engine_config, EngineConfig};
pub use error::{ErrorKind, Result, TutorError};
pub use problems::generator::ProblemGenerator;
pub use problems::problem::Problem;
pub use profile::UserProfile;
pub use progress::{ProgressUpdate, ProgressionTracker};
pub use sessions::PerformanceObservation;
pub use skills::concept::{Concept, DifficultyLevel, MasteryLevel, Operation};
pub use state::app::AppState;
