//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the assistant.

/// A parsed chat command.
///
/// These commands control the chat session and are never sent to the
/// assistant service.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the transcript.
    Clear,

    /// Set the mobile number.
    Mobile(String),

    /// Set the donor display name.
    Name(String),

    /// Set the donor code (0 = unknown).
    DonorCode(u32),

    /// Change the assistant endpoint URL.
    Url(String),

    /// Save the transcript to a file.
    Save(String),

    /// Load a transcript from a file.
    Load(String),

    /// Display session statistics (turn counts, profile, etc.).
    Stats,

    /// Show the current configuration.
    ShowConfig,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use sadhak::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/mobile +919876543210").is_some());
/// assert!(parse_command("Namaste!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "mobile" => match argument {
            Some(mobile) => ChatCommand::Mobile(mobile.to_string()),
            None => ChatCommand::Invalid("/mobile requires a mobile number".to_string()),
        },
        "name" => match argument {
            Some(name) => ChatCommand::Name(name.to_string()),
            None => ChatCommand::Invalid("/name requires a display name".to_string()),
        },
        "code" => match argument {
            Some(arg) => match arg.parse::<u32>() {
                Ok(value) => ChatCommand::DonorCode(value),
                Err(_) => {
                    ChatCommand::Invalid("/code expects a non-negative integer".to_string())
                }
            },
            None => ChatCommand::Invalid("/code requires a donor code (0 clears it)".to_string()),
        },
        "url" => match argument {
            Some(url) => ChatCommand::Url(url.to_string()),
            None => ChatCommand::Invalid("/url requires an endpoint URL".to_string()),
        },
        "save" => match argument {
            Some(path) => ChatCommand::Save(path.to_string()),
            None => ChatCommand::Invalid("/save requires a file path".to_string()),
        },
        "load" => match argument {
            Some(path) => ChatCommand::Load(path.to_string()),
            None => ChatCommand::Invalid("/load requires a file path".to_string()),
        },
        "stats" | "status" => ChatCommand::Stats,
        "config" => ChatCommand::ShowConfig,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /mobile <number>       Set your mobile number (required before sending)
  /name <name>           Set your display name
  /code <n>              Set your donor code (0 = unknown)
  /url <endpoint>        Change the assistant endpoint URL
  /clear                 Clear the transcript
  /save <file>           Save the transcript to a file
  /load <file>           Load a transcript from a file
  /stats                 Show session statistics
  /config                Show current configuration
  /help                  Show this help message
  /quit                  Exit the chat

Anything else is sent to the assistant. A message starting with http://
or https:// is sent as an image reference."#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
    }

    #[test]
    fn parse_mobile() {
        assert_eq!(
            parse_command("/mobile +919876543210"),
            Some(ChatCommand::Mobile("+919876543210".to_string()))
        );
        assert_eq!(
            parse_command("/mobile"),
            Some(ChatCommand::Invalid(
                "/mobile requires a mobile number".to_string()
            ))
        );
    }

    #[test]
    fn parse_name() {
        assert_eq!(
            parse_command("/name Asha Patel"),
            Some(ChatCommand::Name("Asha Patel".to_string()))
        );
        assert!(matches!(
            parse_command("/name"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("requires")
        ));
    }

    #[test]
    fn parse_donor_code() {
        assert_eq!(parse_command("/code 42"), Some(ChatCommand::DonorCode(42)));
        assert_eq!(parse_command("/code 0"), Some(ChatCommand::DonorCode(0)));
        assert!(matches!(
            parse_command("/code -5"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("non-negative")
        ));
        assert!(matches!(
            parse_command("/code abc"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_url() {
        assert_eq!(
            parse_command("/url http://localhost:8000/message"),
            Some(ChatCommand::Url("http://localhost:8000/message".to_string()))
        );
        assert!(matches!(
            parse_command("/url"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_save_and_load() {
        assert_eq!(
            parse_command("/save chat.json"),
            Some(ChatCommand::Save("chat.json".to_string()))
        );
        assert_eq!(
            parse_command("/load chat.json"),
            Some(ChatCommand::Load("chat.json".to_string()))
        );
        assert!(matches!(
            parse_command("/save"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_stats_and_config() {
        assert_eq!(parse_command("/stats"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Stats));
        assert_eq!(parse_command("/config"), Some(ChatCommand::ShowConfig));
    }

    #[test]
    fn unknown_command() {
        assert!(matches!(
            parse_command("/model claude"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("Unknown command")
        ));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        // Image references are messages, not commands.
        assert_eq!(parse_command("https://example.com/a.png"), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(!help.is_empty());
        assert!(help.contains("/quit"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/mobile"));
        assert!(help.contains("/url"));
    }
}
