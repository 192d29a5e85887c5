//! Storage layer
//!
//! Uses SQLite (embedded) so the history survives restarts.

pub mod db;

pub use db::Database;
