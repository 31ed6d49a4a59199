//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the assistant.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Select a file to go out with the next message.
    Attach(String),

    /// Drop the selected file.
    Detach,

    /// Show the current theme.
    Theme,

    /// Print the transcript so far.
    History,

    /// Show the session identifiers.
    WhoAmI,

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
/// # use stainless::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/attach report.pdf").is_some());
/// assert!(parse_command("Which grade resists chlorides?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "attach" | "file" => match argument {
            Some(path) => ChatCommand::Attach(path.to_string()),
            None => ChatCommand::Invalid("/attach requires a file path".to_string()),
        },
        "detach" => ChatCommand::Detach,
        "theme" => ChatCommand::Theme,
        "history" => ChatCommand::History,
        "whoami" | "id" => ChatCommand::WhoAmI,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /attach <path>         Attach a file to the next message
  /detach                Remove the attached file
  /theme                 Show the current expertise theme
  /history               Print the conversation so far
  /whoami                Show the user and session identifiers
  /help                  Show this help message
  /quit                  Exit the chat

Type a message and press Enter to send it.  A message may be empty when a
file is attached."#
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
    fn parse_attach() {
        assert_eq!(
            parse_command("/attach mill-cert.pdf"),
            Some(ChatCommand::Attach("mill-cert.pdf".to_string()))
        );
        assert_eq!(
            parse_command("/attach   my report.csv  "),
            Some(ChatCommand::Attach("my report.csv".to_string()))
        );
        assert_eq!(
            parse_command("/ATTACH a.txt"),
            Some(ChatCommand::Attach("a.txt".to_string()))
        );
        assert_eq!(
            parse_command("/attach"),
            Some(ChatCommand::Invalid(
                "/attach requires a file path".to_string()
            ))
        );
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("/detach"), Some(ChatCommand::Detach));
        assert_eq!(parse_command("/theme"), Some(ChatCommand::Theme));
        assert_eq!(parse_command("/history"), Some(ChatCommand::History));
        assert_eq!(parse_command("/whoami"), Some(ChatCommand::WhoAmI));
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/model x"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("What is 304 vs 316?"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("a/b"), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/attach"));
        assert!(help.contains("/theme"));
    }
}
