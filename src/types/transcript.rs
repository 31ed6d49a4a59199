use serde::{Deserialize, Serialize};

/// Who produced a transcript entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed or uploaded by the person at the keyboard.
    User,

    /// Produced by the assistant endpoint, or by the session on its behalf.
    Assistant,
}

/// How an entry is to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum EntryDisplay {
    /// Output of the markdown renderer.
    Markup(String),

    /// Literal text, shown as-is.
    Plain(String),
}

impl EntryDisplay {
    /// The displayable string, whichever form it takes.
    pub fn as_str(&self) -> &str {
        match self {
            EntryDisplay::Markup(s) | EntryDisplay::Plain(s) => s,
        }
    }

    /// Returns true if this entry went through the markdown renderer.
    pub fn is_markup(&self) -> bool {
        matches!(self, EntryDisplay::Markup(_))
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The author of the entry.
    pub sender: Sender,

    /// The raw text the entry was created from.
    pub content: String,

    /// The rendered form of `content`.
    pub display: EntryDisplay,
}

impl TranscriptEntry {
    /// A user entry.  User text is never rendered as markup.
    pub fn user(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            sender: Sender::User,
            display: EntryDisplay::Plain(content.clone()),
            content,
        }
    }
}

/// The ordered, append-only log of a session's messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.  Entries are never removed or edited.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// The newest entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries written by `sender`.
    pub fn by(&self, sender: Sender) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().filter(move |e| e.sender == sender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_appends_in_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.append(TranscriptEntry::user("first"));
        transcript.append(TranscriptEntry {
            sender: Sender::Assistant,
            content: "second".to_string(),
            display: EntryDisplay::Markup("<p>second</p>\n".to_string()),
        });
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].content, "first");
        assert_eq!(transcript.last().unwrap().sender, Sender::Assistant);
        assert_eq!(transcript.by(Sender::User).count(), 1);
    }

    #[test]
    fn user_entries_are_plain() {
        let entry = TranscriptEntry::user("*not emphasis*");
        assert_eq!(entry.display, EntryDisplay::Plain("*not emphasis*".to_string()));
        assert!(!entry.display.is_markup());
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Sender::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
