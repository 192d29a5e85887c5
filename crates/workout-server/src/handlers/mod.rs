//! HTTP handlers

pub mod health;
pub mod mini_app;
pub mod workouts;

pub use health::health;
