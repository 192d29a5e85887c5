//! Workout Tracker Core Library
//!
//! Identity guard, storage ports, the in-memory store and the workout log
//! service shared by the HTTP server and the chat bot.

// Re-export pure types from workout-types
pub use workout_types::*;

pub mod config;
pub mod error;
pub mod guard;
pub mod log;
pub mod memory;
pub mod ports;

pub use self::config::Settings;
pub use error::{Result, WorkoutError};
pub use guard::AuthorizedUser;
pub use log::WorkoutLog;
pub use memory::MemoryStore;
pub use ports::{ClearableStore, WorkoutStore};
