//! One request/response round trip with the assistant.

use tracing::info;

use crate::client::Transport;
use crate::error::Result;
use crate::types::{ChatRequest, DecodedResponse};

/// Post `request` and decode whatever comes back.
///
/// Only transport failures are errors; a body that cannot be interpreted
/// decodes to default values.
///
/// # Examples
///
/// ```
/// use stainless::chat::exchange;
/// use stainless::{ChatRequest, Result, SessionIdentity, Transport};
///
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl Transport for Echo {
///     async fn post(&self, request: &ChatRequest) -> Result<String> {
///         Ok(serde_json::json!({ "response": request.message }).to_string())
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let request = ChatRequest::new(&SessionIdentity::generate(), "hello");
/// let decoded = exchange(&Echo, &request).await.unwrap();
/// assert_eq!(decoded.reply.text.as_deref(), Some("hello"));
/// # });
/// ```
pub async fn exchange(transport: &dyn Transport, request: &ChatRequest) -> Result<DecodedResponse> {
    info!(
        session_id = %request.session_id,
        message_len = request.message.len(),
        file = request.file.as_ref().map(|f| f.name.as_str()),
        "sending chat request"
    );
    let raw = transport.post(request).await?;
    Ok(DecodedResponse::decode(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{ExpertiseLevel, ResponseShape, SessionIdentity};

    struct Canned(std::result::Result<&'static str, u16>);

    #[async_trait::async_trait]
    impl Transport for Canned {
        async fn post(&self, _: &ChatRequest) -> Result<String> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(status) => Err(Error::api(status, "")),
            }
        }
    }

    fn request() -> ChatRequest {
        ChatRequest::new(&SessionIdentity::generate(), "hello")
    }

    #[tokio::test]
    async fn success_decodes_body() {
        let transport = Canned(Ok(r#"{"response":"hi","expertise_level":"EXPERT"}"#));
        let decoded = exchange(&transport, &request()).await.unwrap();
        assert_eq!(decoded.shape, ResponseShape::Direct);
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Expert);
    }

    #[tokio::test]
    async fn bad_body_is_not_an_error() {
        let transport = Canned(Ok("not json"));
        let decoded = exchange(&transport, &request()).await.unwrap();
        assert_eq!(decoded.shape, ResponseShape::Malformed);
        assert_eq!(decoded.reply.text, None);
    }

    #[tokio::test]
    async fn status_failure_propagates() {
        let transport = Canned(Err(504));
        let err = exchange(&transport, &request()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(504));
    }
}
