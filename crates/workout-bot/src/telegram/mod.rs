//! Minimal Telegram Bot API binding (long polling only)

pub mod client;
pub mod types;

pub use client::{ParseMode, TelegramClient};
pub use types::Message;
