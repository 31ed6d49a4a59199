//! Turning message text into transcript entries.

use tracing::warn;

use crate::chat::phrases::Phrases;
use crate::markdown::MarkdownRenderer;
use crate::observability::MARKDOWN_FALLBACKS;
use crate::types::{EntryDisplay, Sender, TranscriptEntry};

/// Build the transcript entry for `content` sent by `sender`.
///
/// User text is always shown literally.  Assistant text goes through
/// `markdown`; if that fails the raw text is shown instead, and if there is
/// no text at all the locale's placeholder is shown.  Never fails.
pub fn render_message(
    markdown: &dyn MarkdownRenderer,
    phrases: &Phrases,
    sender: Sender,
    content: Option<&str>,
) -> TranscriptEntry {
    match sender {
        Sender::User => TranscriptEntry::user(content.unwrap_or_default()),
        Sender::Assistant => {
            let content = content.filter(|c| !c.is_empty());
            let Some(content) = content else {
                warn!("assistant entry has no content");
                return TranscriptEntry {
                    sender,
                    content: String::new(),
                    display: EntryDisplay::Plain(phrases.unrenderable.to_string()),
                };
            };
            let display = match markdown.render(content) {
                Ok(markup) => EntryDisplay::Markup(markup),
                Err(err) => {
                    MARKDOWN_FALLBACKS.click();
                    warn!(error = %err, "markdown rendering failed; showing plain text");
                    EntryDisplay::Plain(content.to_string())
                }
            };
            TranscriptEntry {
                sender,
                content: content.to_string(),
                display,
            }
        }
    }
}
