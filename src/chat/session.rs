//! Core chat session management.
//!
//! A [`ChatSession`] owns everything the user sees: the transcript, the
//! expertise theme, the loading and web search indicators, and the composer
//! (pending text plus at most one selected file).  Every change is mirrored
//! to a [`Renderer`] in the order it happens.
//!
//! Sessions are cheap to clone.  Clones share state, so several sends may be
//! in flight at once; their completions are applied in arrival order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chat::config::ChatConfig;
use crate::chat::exchange::exchange;
use crate::chat::message::render_message;
use crate::chat::phrases::Phrases;
use crate::client::Transport;
use crate::error::{Error, Result};
use crate::format::format_file_size;
use crate::markdown::{HtmlMarkdown, MarkdownRenderer};
use crate::observability::{ATTACHMENTS_SENT, PLACEHOLDER_REPLIES, SENDS_SKIPPED, THEME_CHANGES};
use crate::render::{NullRenderer, Renderer};
use crate::theme::PageTheme;
use crate::types::{
    ChatRequest, DecodedResponse, ExpertiseLevel, FileSource, ResponseShape, Sender,
    SessionIdentity, Transcript, TranscriptEntry, read_attachment,
};

/// What became of one call to [`ChatSession::send`].
#[derive(Debug)]
pub enum SendOutcome {
    /// Nothing to send: no text and no file.
    Skipped,

    /// The endpoint answered with a 2xx status.
    Answered {
        /// The envelope shape the body was decoded as.
        shape: ResponseShape,
        /// Whether the reply used web search.
        web_search_used: bool,
        /// The expertise level the theme was switched to.
        expertise_level: ExpertiseLevel,
    },

    /// The exchange failed.  An error entry is already in the transcript.
    Failed(Error),
}

impl SendOutcome {
    /// Returns true if nothing was sent.
    pub fn is_skipped(&self) -> bool {
        matches!(self, SendOutcome::Skipped)
    }

    /// Returns true if the endpoint answered.
    pub fn is_answered(&self) -> bool {
        matches!(self, SendOutcome::Answered { .. })
    }

    /// Returns true if the exchange failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, SendOutcome::Failed(_))
    }
}

struct Surface {
    transcript: Transcript,
    theme: PageTheme,
    loading: bool,
    search_indicator: bool,
    input: String,
    selected_file: Option<Box<dyn FileSource>>,
    renderer: Box<dyn Renderer>,
}

impl Surface {
    fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            theme: PageTheme::default(),
            loading: false,
            search_indicator: false,
            input: String::new(),
            selected_file: None,
            renderer: Box::new(NullRenderer),
        }
    }

    fn append(&mut self, entry: TranscriptEntry) {
        self.renderer.append_entry(&entry);
        self.transcript.append(entry);
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
        self.renderer.set_loading(visible);
    }

    fn set_search_indicator(&mut self, visible: bool) {
        if self.search_indicator != visible {
            self.search_indicator = visible;
            self.renderer.set_search_indicator(visible);
        }
    }

    fn apply_theme(&mut self, level: ExpertiseLevel) {
        self.theme.apply(level);
        THEME_CHANGES.click();
        self.renderer.apply_theme(&self.theme);
    }
}

fn lock(surface: &Mutex<Surface>) -> MutexGuard<'_, Surface> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A chat session against one assistant endpoint.
#[derive(Clone)]
pub struct ChatSession {
    identity: SessionIdentity,
    transport: Arc<dyn Transport>,
    markdown: Arc<dyn MarkdownRenderer>,
    phrases: &'static Phrases,
    search_indicator_delay: Duration,
    surface: Arc<Mutex<Surface>>,
}

impl ChatSession {
    /// Creates a session with a fresh identity and the beginner theme.
    ///
    /// Assistant replies are rendered to HTML and nothing is displayed
    /// until a renderer is installed with [`ChatSession::with_renderer`].
    pub fn new(transport: Arc<dyn Transport>, config: &ChatConfig) -> Self {
        let identity = SessionIdentity::generate();
        info!(
            user_id = identity.user_id(),
            session_id = identity.session_id(),
            locale = %config.locale,
            "chat session created"
        );
        Self {
            identity,
            transport,
            markdown: Arc::new(HtmlMarkdown),
            phrases: config.locale.phrases(),
            search_indicator_delay: config.search_indicator_delay,
            surface: Arc::new(Mutex::new(Surface::new())),
        }
    }

    /// Replaces the markdown renderer used for assistant replies.
    pub fn with_markdown(mut self, markdown: Arc<dyn MarkdownRenderer>) -> Self {
        self.markdown = markdown;
        self
    }

    /// Installs the renderer and shows it the current theme.
    pub fn with_renderer(self, renderer: Box<dyn Renderer>) -> Self {
        {
            let mut guard = lock(&self.surface);
            let surface = &mut *guard;
            surface.renderer = renderer;
            surface.renderer.apply_theme(&surface.theme);
        }
        self
    }

    /// Replaces the generated identity.
    pub fn with_identity(mut self, identity: SessionIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// The identifiers sent with every request.
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// The fixed strings of this session's locale.
    pub fn phrases(&self) -> &'static Phrases {
        self.phrases
    }

    /// Replaces the pending input text.
    pub fn set_input(&self, text: impl Into<String>) {
        self.with_surface(|surface| surface.input = text.into());
    }

    /// The pending input text.
    pub fn input(&self) -> String {
        self.with_surface(|surface| surface.input.clone())
    }

    /// Selects the file to go out with the next send, replacing any earlier
    /// selection.  Returns the selection label.
    pub fn select_file(&self, file: Box<dyn FileSource>) -> String {
        let label = self
            .phrases
            .selected_file(file.name(), &format_file_size(file.size()));
        debug!(name = file.name(), mime_type = file.mime_type(), "file selected");
        self.with_surface(|surface| {
            surface.selected_file = Some(file);
            surface.renderer.show_file_selection(Some(&label));
        });
        label
    }

    /// Drops the selected file.  Returns false if nothing was selected.
    pub fn clear_file(&self) -> bool {
        self.with_surface(|surface| {
            let dropped = surface.selected_file.take().is_some();
            if dropped {
                surface.renderer.show_file_selection(None);
            }
            dropped
        })
    }

    /// The label of the selected file, if any.
    pub fn selected_file_label(&self) -> Option<String> {
        self.with_surface(|surface| {
            surface.selected_file.as_ref().map(|file| {
                self.phrases
                    .selected_file(file.name(), &format_file_size(file.size()))
            })
        })
    }

    /// A snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.with_surface(|surface| surface.transcript.clone())
    }

    /// The current theme.
    pub fn theme(&self) -> PageTheme {
        self.with_surface(|surface| surface.theme.clone())
    }

    /// Whether the loading indicator is showing.
    pub fn is_loading(&self) -> bool {
        self.with_surface(|surface| surface.loading)
    }

    /// Whether the web search indicator is showing.
    pub fn is_search_indicator_visible(&self) -> bool {
        self.with_surface(|surface| surface.search_indicator)
    }

    /// Prints an informational line on the renderer, outside the transcript.
    pub fn print_info(&self, info: &str) {
        self.with_surface(|surface| surface.renderer.print_info(info));
    }

    /// Prints an error line on the renderer, outside the transcript.
    pub fn print_error(&self, error: &str) {
        self.with_surface(|surface| surface.renderer.print_error(error));
    }

    /// Replaces the input with `text` and sends it.
    pub async fn send_text(&self, text: impl Into<String>) -> SendOutcome {
        self.set_input(text);
        self.send().await
    }

    /// Sends the composer contents.
    ///
    /// Does nothing when there is neither text nor a file.  Otherwise the
    /// user's entries are added to the transcript before the exchange starts,
    /// and exactly one assistant entry is added when it ends, whatever the
    /// result.
    ///
    /// The web search indicator is hidden again by a task on the current
    /// Tokio runtime.  Outside a runtime the indicator stays up until the
    /// next send.
    pub async fn send(&self) -> SendOutcome {
        let Some((request, file)) = self.begin_send() else {
            return SendOutcome::Skipped;
        };
        let request = match file {
            Some(file) => match self.attach(request, file.as_ref()).await {
                Ok(request) => request,
                Err(err) => return self.fail(err),
            },
            None => request,
        };
        match exchange(self.transport.as_ref(), &request).await {
            Ok(decoded) => self.complete(decoded),
            Err(err) => self.fail(err),
        }
    }

    fn with_surface<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> R {
        let mut guard = lock(&self.surface);
        f(&mut guard)
    }

    fn begin_send(&self) -> Option<(ChatRequest, Option<Box<dyn FileSource>>)> {
        self.with_surface(|surface| {
            let message = surface.input.trim().to_string();
            if message.is_empty() && surface.selected_file.is_none() {
                SENDS_SKIPPED.click();
                debug!("nothing to send");
                return None;
            }
            if !message.is_empty() {
                surface.append(render_message(
                    self.markdown.as_ref(),
                    self.phrases,
                    Sender::User,
                    Some(&message),
                ));
            }
            surface.input.clear();
            surface.renderer.clear_input();
            surface.set_loading(true);
            surface.set_search_indicator(false);
            let file = surface.selected_file.take();
            if file.is_some() {
                surface.renderer.show_file_selection(None);
            }
            Some((ChatRequest::new(&self.identity, message), file))
        })
    }

    async fn attach(&self, request: ChatRequest, file: &dyn FileSource) -> Result<ChatRequest> {
        debug!(name = file.name(), size = file.size(), "reading attachment");
        let attachment = read_attachment(file).await?;
        ATTACHMENTS_SENT.click();
        let text = self
            .phrases
            .uploaded_file(file.name(), &format_file_size(file.size()));
        self.with_surface(|surface| surface.append(TranscriptEntry::user(text)));
        Ok(request.with_file(attachment))
    }

    fn complete(&self, decoded: DecodedResponse) -> SendOutcome {
        let DecodedResponse { shape, reply } = decoded;
        let text = match reply.text {
            Some(text) => text,
            None => {
                PLACEHOLDER_REPLIES.click();
                warn!(?shape, "reply carried no usable text");
                self.phrases.invalid_response.to_string()
            }
        };
        let entry = render_message(
            self.markdown.as_ref(),
            self.phrases,
            Sender::Assistant,
            Some(&text),
        );
        let web_search_used = reply.web_search_used;
        let expertise_level = reply.expertise_level;
        self.with_surface(|surface| {
            surface.append(entry);
            if web_search_used {
                surface.set_search_indicator(true);
            }
            surface.apply_theme(expertise_level.clone());
            surface.set_loading(false);
        });
        if web_search_used {
            self.schedule_search_indicator_hide();
        }
        info!(
            ?shape,
            web_search_used,
            expertise_level = %expertise_level,
            "assistant replied"
        );
        SendOutcome::Answered {
            shape,
            web_search_used,
            expertise_level,
        }
    }

    fn fail(&self, err: Error) -> SendOutcome {
        warn!(error = %err, "chat request failed");
        let entry = render_message(
            self.markdown.as_ref(),
            self.phrases,
            Sender::Assistant,
            Some(&self.phrases.failure(&err)),
        );
        self.with_surface(|surface| {
            surface.set_loading(false);
            surface.append(entry);
        });
        SendOutcome::Failed(err)
    }

    fn schedule_search_indicator_hide(&self) {
        let surface = Arc::clone(&self.surface);
        let delay = self.search_indicator_delay;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime; search indicator stays up until the next send");
            return;
        };
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&surface).set_search_indicator(false);
        });
    }
}
