// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod format;
pub mod markdown;
pub mod observability;
pub mod render;
pub mod theme;
pub mod types;

// Re-exports
pub use chat::{ChatConfig, ChatSession, Locale, SendOutcome};
pub use client::{AssistantClient, Transport};
pub use error::{Error, Result};
pub use format::format_file_size;
pub use markdown::{AnsiMarkdown, HtmlMarkdown, MarkdownRenderer};
pub use observability::register_biometrics;
pub use render::{Notices, NullRenderer, PlainTextRenderer, Renderer};
pub use theme::{PageTheme, ThemeColor, color_for};
pub use types::*;
