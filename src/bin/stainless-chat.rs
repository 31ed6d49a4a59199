//! Interactive chat with the stainless steel assistant.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the default endpoint
//! stainless-chat
//!
//! # Talk to a local endpoint, in Traditional Chinese
//! stainless-chat --endpoint http://localhost:3000/assistant --locale zh-TW
//!
//! # Disable colors (useful for piping output)
//! stainless-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/attach <path>` - Attach a file to the next message
//! - `/detach` - Remove the attached file
//! - `/theme` - Show the current expertise theme
//! - `/history` - Print the conversation so far
//! - `/whoami` - Show the session identifiers
//! - `/help` - Show available commands
//! - `/quit` - Exit the application
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`.

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use stainless::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, help_text, parse_command,
};
use stainless::{AnsiMarkdown, AssistantClient, LocalFile, Notices, Sender};

/// Main entry point for the stainless-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("stainless-chat [OPTIONS]");
    let config = ChatConfig::from_args(args)?;
    let phrases = config.locale.phrases();

    let client = AssistantClient::with_options(Some(&config.endpoint), Some(config.timeout))?;
    let renderer = PlainTextRenderer::with_color(config.use_color).with_notices(Notices {
        loading: phrases.loading.to_string(),
        web_search: phrases.web_search_used.to_string(),
    });
    let session = ChatSession::new(Arc::new(client), &config)
        .with_markdown(Arc::new(AnsiMarkdown::new(config.use_color)))
        .with_renderer(Box::new(renderer));
    let mut rl = DefaultEditor::new()?;

    println!("Stainless Chat ({})", config.endpoint);
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    let _ = rl.add_history_entry(line);
                }

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Attach(path) => match LocalFile::open(&path) {
                            Ok(file) => {
                                session.select_file(Box::new(file));
                            }
                            Err(err) => session.print_error(&err.to_string()),
                        },
                        ChatCommand::Detach => {
                            if session.clear_file() {
                                session.print_info("Attachment removed.");
                            } else {
                                session.print_info("No file is attached.");
                            }
                        }
                        ChatCommand::Theme => {
                            let theme = session.theme();
                            session.print_info(&format!(
                                "    {} ({})",
                                theme.marker(),
                                theme.background()
                            ));
                        }
                        ChatCommand::History => print_history(&session),
                        ChatCommand::WhoAmI => {
                            let identity = session.identity();
                            session.print_info(&format!(
                                "    user_id: {}\n    session_id: {}",
                                identity.user_id(),
                                identity.session_id()
                            ));
                        }
                        ChatCommand::Invalid(message) => {
                            session.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message; an empty line still sends a selected file.
                session.send_text(line).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                session.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_history(session: &ChatSession) {
    let transcript = session.transcript();
    if transcript.is_empty() {
        session.print_info("    (no messages yet)");
        return;
    }
    for (idx, entry) in transcript.entries().iter().enumerate() {
        let sender = match entry.sender {
            Sender::User => "you",
            Sender::Assistant => "assistant",
        };
        session.print_info(&format!("    {:>3} [{}] {}", idx + 1, sender, entry.content));
    }
}
