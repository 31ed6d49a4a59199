// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod expertise_level;
pub mod file_source;
pub mod session_identity;
pub mod transcript;

// Re-exports
pub use chat_request::{ChatRequest, FileAttachment};
pub use chat_response::{AssistantReply, DecodedResponse, ResponseShape};
pub use expertise_level::ExpertiseLevel;
pub use file_source::{FileSource, LocalFile, base64_payload, read_attachment, to_data_url};
pub use session_identity::SessionIdentity;
pub use transcript::{EntryDisplay, Sender, Transcript, TranscriptEntry};
