//! Command dispatch and the polling loop

use crate::commands::{self, Command, Incoming};
use crate::telegram::types::Update;
use crate::telegram::{Message, ParseMode, TelegramClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use workout_core::{AuthorizedUser, MemoryStore, WorkoutEntry, WorkoutError, WorkoutLog};

const ACCESS_DENIED: &str = "⛔️ Access Denied. This bot is private.";
const LOG_USAGE: &str = "📝 Please tell me what you did! Example: /log 30m run, 3 sets of 10 pull-ups";
const EMPTY_HISTORY: &str = "⏳ Your workout history is currently empty. Use /log to add an entry!";
const CLEARED: &str = "🗑 Workout history has been cleared.";
const STORAGE_FAILED: &str = "⚠️ Something went wrong while saving. Please try again.";

/// Pause before polling again after a transport failure
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Minute precision, as shown in chat replies
const REPLY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: ParseMode,
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Plain,
        }
    }

    fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: ParseMode::Html,
        }
    }
}

pub struct WorkoutBot {
    workouts: WorkoutLog<MemoryStore>,
    username: Option<String>,
}

impl WorkoutBot {
    pub fn new(authorized: AuthorizedUser) -> Self {
        Self {
            workouts: WorkoutLog::new(Arc::new(MemoryStore::new()), authorized),
            username: None,
        }
    }

    /// Username used to filter `/cmd@name` mentions
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Work out the reply to one incoming message, if any
    pub async fn handle(&self, message: &Message) -> Option<Reply> {
        let text = message.text.as_deref()?;
        let from = message.from.as_ref()?;

        let incoming = commands::parse(text, self.username.as_deref());
        let command = match incoming {
            Incoming::Ignored => return None,
            Incoming::Text => {
                // Plain text is only answered to turn strangers away
                return match self.workouts.authorize(Some(from.id)) {
                    Ok(()) => None,
                    Err(_) => Some(Reply::plain(ACCESS_DENIED)),
                };
            }
            Incoming::Command(command) => command,
        };

        if self.workouts.authorize(Some(from.id)).is_err() {
            return Some(Reply::plain(ACCESS_DENIED));
        }
        debug!("Handling {:?} from {}", command, from.id);

        let reply = match command {
            Command::Start => Reply::plain(format!(
                "👋 Welcome back, {}! I'm your private Workout Tracker.\n\
                 Use /log followed by your workout details to save an entry.\n\
                 Try: /log 45m weightlifting, 10 min cardio",
                from.first_name
            )),
            Command::Log(details) => {
                match self.workouts.log(Some(from.id), &details, None).await {
                    Ok(entry) => Reply::html(format_logged(&entry)),
                    Err(e) => failure_reply(e),
                }
            }
            Command::History => match self.workouts.history(Some(from.id)).await {
                Ok(entries) if entries.is_empty() => Reply::plain(EMPTY_HISTORY),
                Ok(entries) => Reply::html(format_history(&entries)),
                Err(e) => failure_reply(e),
            },
            Command::Clear => match self.workouts.clear(Some(from.id)).await {
                Ok(_) => Reply::plain(CLEARED),
                Err(e) => failure_reply(e),
            },
        };
        Some(reply)
    }
}

fn failure_reply(e: WorkoutError) -> Reply {
    match e {
        WorkoutError::Unauthorized { .. } => Reply::plain(ACCESS_DENIED),
        WorkoutError::EmptyEntry => Reply::plain(LOG_USAGE),
        other => {
            error!("Workout operation failed: {}", other);
            Reply::plain(STORAGE_FAILED)
        }
    }
}

fn format_logged(entry: &WorkoutEntry) -> String {
    format!(
        "✅ Workout logged successfully on <b>{}</b>:\n<i>{}</i>",
        entry.timestamp.format(REPLY_TIME_FORMAT),
        escape_html(&entry.entry)
    )
}

fn format_history(entries: &[WorkoutEntry]) -> String {
    let mut response = String::from("🗓 <b>Your Latest Workout History:</b>\n\n");
    for entry in entries {
        response.push_str(&format!(
            "• <b>{}:</b> {}\n",
            entry.timestamp.format(REPLY_TIME_FORMAT),
            escape_html(&entry.entry)
        ));
    }
    response.push_str(
        "\n<i>Note: This history is temporary (in-memory storage) and resets when the server restarts.</i>",
    );
    response
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Poll for updates until the future is dropped.
///
/// Updates are handled strictly one after another.
pub async fn run(client: &TelegramClient, bot: &WorkoutBot, poll_timeout: Duration) {
    let mut offset: Option<i64> = None;
    info!("Bot is running...");

    loop {
        let updates = match client.get_updates(offset, poll_timeout).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Polling failed: {:#}", e);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(process_update(client, bot, update).await);
        }
    }
}

/// Handle one update and return the offset that acknowledges it.
///
/// The update counts as consumed even when the reply cannot be sent.
async fn process_update(client: &TelegramClient, bot: &WorkoutBot, update: Update) -> i64 {
    let next_offset = update.update_id + 1;

    let Some(message) = update.message else {
        return next_offset;
    };
    let Some(reply) = bot.handle(&message).await else {
        return next_offset;
    };

    if let Err(e) = client
        .send_message(message.chat.id, &reply.text, reply.parse_mode)
        .await
    {
        warn!("Failed to reply in chat {}: {:#}", message.chat.id, e);
    }
    next_offset
}
