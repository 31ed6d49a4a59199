//! Chat application module for conversations with the stainless steel
//! assistant.
//!
//! This module provides the session that drives a conversation plus the
//! pieces a front end needs around it:
//!
//! - [`config`]: CLI argument parsing, YAML file and resolved configuration
//! - [`phrases`]: the fixed user-facing strings of each locale
//! - [`message`]: turning text into transcript entries
//! - [`exchange`]: one request/response round trip
//! - [`session`]: the session state and send orchestration
//! - [`commands`]: slash command parsing

pub mod commands;
pub mod config;
pub mod exchange;
pub mod message;
pub mod phrases;
pub mod session;

pub use crate::render::{NullRenderer, PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, ConfigFile};
pub use exchange::exchange;
pub use message::render_message;
pub use phrases::{Locale, Phrases};
pub use session::{ChatSession, SendOutcome};
