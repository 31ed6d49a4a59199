//! Output rendering for chat sessions.
//!
//! A [`Renderer`] is the visible surface of a session: it is told about
//! every transcript append, indicator change and theme change, in the order
//! the session makes them.  The session itself owns the state; renderers
//! only display it.

use std::io::{self, Stdout, Write};

use crate::theme::PageTheme;
use crate::types::{EntryDisplay, Sender, TranscriptEntry};

/// ANSI escape code for dim text (used for notices).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for bold text (used for sender labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for cyan text (used for user labels).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for assistant labels).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for yellow text (used for the web search notice).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for displaying session state changes.
///
/// Every method has a no-op default so that a front end only implements
/// what it can show.
pub trait Renderer: Send {
    /// A new transcript entry was appended.  Show it and bring it into view.
    fn append_entry(&mut self, entry: &TranscriptEntry) {
        _ = entry;
    }

    /// The loading indicator was shown or hidden.
    fn set_loading(&mut self, visible: bool) {
        _ = visible;
    }

    /// The web search indicator was shown or hidden.
    fn set_search_indicator(&mut self, visible: bool) {
        _ = visible;
    }

    /// A theme was applied.
    fn apply_theme(&mut self, theme: &PageTheme) {
        _ = theme;
    }

    /// The input field was cleared after a send.
    fn clear_input(&mut self) {}

    /// The file selection changed; `None` means nothing is selected.
    fn show_file_selection(&mut self, label: Option<&str>) {
        _ = label;
    }

    /// Print an informational message outside the transcript.
    fn print_info(&mut self, info: &str) {
        _ = info;
    }

    /// Print an error message outside the transcript.
    fn print_error(&mut self, error: &str) {
        _ = error;
    }
}

/// A renderer that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

/// Text labels a [`PlainTextRenderer`] prints for state it cannot draw.
#[derive(Debug, Clone)]
pub struct Notices {
    /// Printed when the loading indicator appears.
    pub loading: String,
    /// Printed when the web search indicator appears.
    pub web_search: String,
}

impl Default for Notices {
    fn default() -> Self {
        Self {
            loading: "…".to_string(),
            web_search: "(web search used)".to_string(),
        }
    }
}

/// Plain text renderer with optional ANSI styling.
///
/// Entries are printed as they arrive.  Markup produced by the session's
/// markdown renderer is printed verbatim, so pair this renderer with
/// [`crate::markdown::AnsiMarkdown`].
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    notices: Notices,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            notices: Notices::default(),
        }
    }

    /// Replaces the notice texts.
    pub fn with_notices(mut self, notices: Notices) -> Self {
        self.notices = notices;
        self
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn styled(&self, code: &str, text: &str) -> String {
        if self.use_color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn label(&self, sender: Sender) -> String {
        match sender {
            Sender::User => self.styled(&format!("{ANSI_BOLD}{ANSI_CYAN}"), "You:"),
            Sender::Assistant => self.styled(&format!("{ANSI_BOLD}{ANSI_GREEN}"), "Assistant:"),
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn append_entry(&mut self, entry: &TranscriptEntry) {
        let body = match &entry.display {
            EntryDisplay::Markup(markup) => markup.clone(),
            EntryDisplay::Plain(text) => text.clone(),
        };
        println!("{}\n{}\n", self.label(entry.sender), body);
        self.flush();
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            let notice = self.styled(ANSI_DIM, &self.notices.loading);
            println!("{notice}");
            self.flush();
        }
    }

    fn set_search_indicator(&mut self, visible: bool) {
        if visible {
            let notice = self.styled(ANSI_YELLOW, &self.notices.web_search);
            println!("{notice}");
            self.flush();
        }
    }

    fn apply_theme(&mut self, theme: &PageTheme) {
        let swatch = if self.use_color {
            let (r, g, b) = theme.background().rgb();
            format!("\x1b[48;2;{r};{g};{b}m    {ANSI_RESET} ")
        } else {
            String::new()
        };
        let line = format!("{swatch}[{}] {}", theme.level(), theme.background());
        println!("{}", self.styled(ANSI_DIM, &line));
        self.flush();
    }

    fn show_file_selection(&mut self, label: Option<&str>) {
        if let Some(label) = label {
            println!("{}", self.styled(ANSI_DIM, label));
            self.flush();
        }
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("{}", self.styled(ANSI_RED, &format!("Error: {error}")));
    }
}
