//! Error types for the workout tracker

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkoutError>;

#[derive(Error, Debug)]
pub enum WorkoutError {
    #[error("Unauthorized user.")]
    Unauthorized { claimed: Option<i64> },

    #[error("Workout entry is empty.")]
    EmptyEntry,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl WorkoutError {
    pub fn storage(e: impl std::fmt::Display) -> Self {
        WorkoutError::Storage(e.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, WorkoutError::Unauthorized { .. })
    }
}

impl From<config::ConfigError> for WorkoutError {
    fn from(e: config::ConfigError) -> Self {
        WorkoutError::Config(e.to_string())
    }
}
