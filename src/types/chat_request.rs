use serde::{Deserialize, Serialize};

use crate::types::SessionIdentity;

/// A file carried inside a [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// The file name as selected by the user.
    pub name: String,

    /// The MIME type of the file.
    #[serde(rename = "type")]
    pub mime_type: String,

    /// Base64 encoding of the full file contents.
    pub content: String,
}

/// The request envelope posted to the assistant endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user identifier of the session.
    pub user_id: String,

    /// The session identifier.
    pub session_id: String,

    /// The trimmed user text.  May be empty when a file is attached.
    pub message: String,

    /// The attached file, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file: Option<FileAttachment>,
}

impl ChatRequest {
    /// Create a request for `message` on behalf of `identity`.
    pub fn new(identity: &SessionIdentity, message: impl Into<String>) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            session_id: identity.session_id().to_string(),
            message: message.into(),
            file: None,
        }
    }

    /// Attach a file to the request.
    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.file = Some(file);
        self
    }
}
