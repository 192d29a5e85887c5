//! Workout Types - Pure type definitions
//!
//! This crate contains only plain data types with no async runtime
//! dependencies. Both the HTTP server and the chat bot speak in these types.

pub mod api;
pub mod workout;

pub use api::*;
pub use workout::*;

use serde::{Deserialize, Serialize};

/// Maximum number of entries returned by a history query
pub const HISTORY_LIMIT: usize = 5;

/// Numeric identity of a Telegram user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
