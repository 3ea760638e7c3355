use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::TutorError;

/// Tunables for the progression and generation engine.
/// Every field has a default, so a partial TOML file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// XP before correctness, speed, hint and difficulty adjustments
    pub base_xp: u32,
    /// Daily XP goal given to new profiles
    pub daily_goal: u32,
    pub max_recommendations: usize,
    /// A concept not practiced for longer than this is recommended again
    pub stale_after_days: i64,
    /// Completion ratio of unit i-1 that unlocks unit i
    pub unit_unlock_ratio: f32,
    /// Distractor draws per range before the range is widened
    pub distractor_draws: u32,
    /// Widenings before remaining distractors are filled deterministically
    pub distractor_widenings: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_xp: 10,
            daily_goal: 50,
            max_recommendations: 3,
            stale_after_days: 7,
            unit_unlock_ratio: 0.7,
            distractor_draws: 32,
            distractor_widenings: 8,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, TutorError> {
        let config = toml::from_str::<EngineConfig>(content)?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, TutorError> {
        let content = fs::read_to_string(path)
            .map_err(|e| TutorError::from(e).with_context(format!("path: {:?}", path)))?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("path: {:?}", path)))
    }
}

fn get_config_path() -> PathBuf {
    match std::env::var_os("MATHTRAIL_CONFIG") {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from("mathtrail.toml"),
    }
}

fn load_engine_config_internal() -> EngineConfig {
    let config_path = get_config_path();
    if !config_path.exists() {
        tracing::debug!(path = ?config_path, "No engine config file, using defaults");
        return EngineConfig::default();
    }

    match EngineConfig::load_from_path(&config_path) {
        Ok(config) => {
            tracing::info!(path = ?config_path, "Loaded engine config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load engine config, using defaults");
            EngineConfig::default()
        }
    }
}

lazy_static! {
    static ref ENGINE_CONFIG: EngineConfig = load_engine_config_internal();
}

/// Get the cached engine configuration (loaded once on first use)
pub fn get_engine_config() -> &'static EngineConfig {
    &ENGINE_CONFIG
}
