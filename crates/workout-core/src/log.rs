//! Workout log service
//!
//! Every operation runs the identity check before touching the store, so a
//! rejected request never persists anything.

use crate::error::{Result, WorkoutError};
use crate::guard::AuthorizedUser;
use crate::ports::{ClearableStore, WorkoutStore};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info};
use workout_types::{NewWorkoutEntry, WorkoutEntry, HISTORY_LIMIT};

pub struct WorkoutLog<S: WorkoutStore + ?Sized> {
    store: Arc<S>,
    guard: AuthorizedUser,
}

impl<S: WorkoutStore + ?Sized> Clone for WorkoutLog<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            guard: self.guard,
        }
    }
}

impl<S: WorkoutStore + ?Sized> WorkoutLog<S> {
    pub fn new(store: Arc<S>, guard: AuthorizedUser) -> Self {
        Self { store, guard }
    }

    pub fn authorized_user(&self) -> AuthorizedUser {
        self.guard
    }

    /// Identity check without touching the store
    pub fn authorize(&self, claimed: Option<i64>) -> Result<()> {
        self.guard.check(claimed).map(|_| ())
    }

    /// Append one entry stamped with the current local time
    pub async fn log(
        &self,
        claimed: Option<i64>,
        details: &str,
        category: Option<&str>,
    ) -> Result<WorkoutEntry> {
        let user_id = self.guard.check(claimed)?;

        let details = details.trim();
        if details.is_empty() {
            return Err(WorkoutError::EmptyEntry);
        }
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let new_entry =
            NewWorkoutEntry::new(user_id, Local::now().naive_local(), details, category);
        let entry = self.store.append(new_entry).await?;

        info!(
            "Logged workout: id={}, type={}",
            entry.id,
            entry.category.as_deref().unwrap_or("-")
        );
        Ok(entry)
    }

    /// Last `HISTORY_LIMIT` entries, newest first
    pub async fn history(&self, claimed: Option<i64>) -> Result<Vec<WorkoutEntry>> {
        let user_id = self.guard.check(claimed)?;
        let entries = self.store.recent(user_id, HISTORY_LIMIT).await?;
        debug!("History query returned {} entries", entries.len());
        Ok(entries)
    }
}

impl<S: ClearableStore + ?Sized> WorkoutLog<S> {
    /// Drop the whole history
    pub async fn clear(&self, claimed: Option<i64>) -> Result<usize> {
        self.guard.check(claimed)?;
        let removed = self.store.clear().await?;
        info!("Cleared {} workout entries", removed);
        Ok(removed)
    }
}
