//! In-memory workout store using DashMap
//!
//! Lives only as long as the process. Used by the chat bot.

use crate::ports::{ClearableStore, WorkoutStore};
use crate::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use workout_types::{NewWorkoutEntry, UserId, WorkoutEntry};

pub struct MemoryStore {
    entries: DashMap<i64, WorkoutEntry>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn append(&self, entry: NewWorkoutEntry) -> Result<WorkoutEntry> {
        // Ids keep growing across clears
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = entry.with_id(id);
        self.entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn recent(&self, user_id: UserId, limit: usize) -> Result<Vec<WorkoutEntry>> {
        let mut matching: Vec<WorkoutEntry> = self
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone())
            .collect();

        matching.sort_unstable_by(|a, b| b.id.cmp(&a.id));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[async_trait]
impl ClearableStore for MemoryStore {
    async fn clear(&self) -> Result<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }
}
