//! Workout entry types

use crate::UserId;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Text layout used for stored and serialized timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logged workout.
///
/// Entries are immutable once a store has assigned their `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: i64,
    pub user_id: UserId,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub entry: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

/// A workout that has passed validation but not yet been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkoutEntry {
    pub user_id: UserId,
    pub timestamp: NaiveDateTime,
    pub entry: String,
    pub category: Option<String>,
}

impl NewWorkoutEntry {
    /// Build a new entry, dropping sub-second precision from the timestamp
    pub fn new(
        user_id: UserId,
        timestamp: NaiveDateTime,
        entry: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        Self {
            user_id,
            timestamp,
            entry: entry.into(),
            category,
        }
    }

    /// Attach the store-assigned id
    pub fn with_id(self, id: i64) -> WorkoutEntry {
        WorkoutEntry {
            id,
            user_id: self.user_id,
            timestamp: self.timestamp,
            entry: self.entry,
            category: self.category,
        }
    }
}

/// Serde adapter for `TIMESTAMP_FORMAT`
pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a stored timestamp string
    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
    }
}
