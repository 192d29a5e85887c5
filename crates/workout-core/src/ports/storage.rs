//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use workout_types::{NewWorkoutEntry, UserId, WorkoutEntry};

/// Append-only workout store
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Persist one entry and return it with its assigned id
    async fn append(&self, entry: NewWorkoutEntry) -> Result<WorkoutEntry>;

    /// Up to `limit` entries of `user_id`, newest first
    async fn recent(&self, user_id: UserId, limit: usize) -> Result<Vec<WorkoutEntry>>;
}

/// A store whose contents may be dropped in bulk
#[async_trait]
pub trait ClearableStore: WorkoutStore {
    /// Remove every entry, returning how many were dropped
    async fn clear(&self) -> Result<usize>;
}
