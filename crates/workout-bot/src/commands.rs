//! Slash command parsing

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    /// Arguments joined by single spaces, possibly empty
    Log(String),
    History,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    Command(Command),
    /// A slash command the bot does not handle, or one addressed to another bot
    Ignored,
    /// Anything that is not a command
    Text,
}

/// Classify a message text. `bot_username` filters `/cmd@OtherBot`.
pub fn parse(text: &str, bot_username: Option<&str>) -> Incoming {
    let trimmed = text.trim_start();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Incoming::Text;
    };

    let mut words = rest.split_whitespace();
    let head = words.next().unwrap_or_default();
    let (name, mention) = match head.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (head, None),
    };

    if let (Some(mention), Some(username)) = (mention, bot_username) {
        if !mention.eq_ignore_ascii_case(username) {
            return Incoming::Ignored;
        }
    }

    let command = match name {
        "start" => Command::Start,
        "log" => Command::Log(words.collect::<Vec<_>>().join(" ")),
        "history" => Command::History,
        "clear" => Command::Clear,
        _ => return Incoming::Ignored,
    };
    Incoming::Command(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(parse("/start", None), Incoming::Command(Command::Start));
        assert_eq!(parse("/history", None), Incoming::Command(Command::History));
        assert_eq!(parse("/clear", None), Incoming::Command(Command::Clear));
    }

    #[test]
    fn test_log_arguments_are_normalized() {
        assert_eq!(
            parse("/log  45m weightlifting,\n 10 min cardio ", None),
            Incoming::Command(Command::Log("45m weightlifting, 10 min cardio".to_string()))
        );
        assert_eq!(
            parse("/log", None),
            Incoming::Command(Command::Log(String::new()))
        );
    }

    #[test]
    fn test_mentions() {
        assert_eq!(
            parse("/log@WorkoutBot pushups", Some("workoutbot")),
            Incoming::Command(Command::Log("pushups".to_string()))
        );
        assert_eq!(parse("/log@OtherBot pushups", Some("WorkoutBot")), Incoming::Ignored);
    }

    #[test]
    fn test_non_commands() {
        assert_eq!(parse("did some squats", None), Incoming::Text);
        assert_eq!(parse("/help", None), Incoming::Ignored);
        assert_eq!(parse("/Start", None), Incoming::Ignored);
        assert_eq!(parse("/", None), Incoming::Ignored);
    }
}
