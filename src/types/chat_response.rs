//! Decoding of the assistant endpoint's response envelope.
//!
//! The endpoint answers either with the reply object itself or with a gateway
//! wrapper whose `body` field is the reply object encoded as a JSON string.
//! Decoding happens in two explicit stages and neither stage can fail the
//! exchange: a stage that cannot be decoded yields default values.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::observability::NESTED_BODY_DECODE_ERRORS;
use crate::types::ExpertiseLevel;

/// Which of the two envelope shapes a response turned out to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "body": "<json string>" }` and the inner string parsed.
    Wrapped,
    /// `{ "body": "<json string>" }` but the inner string did not parse.
    WrappedUndecodable,
    /// `{ "response": ... }` at the top level.
    Direct,
    /// Valid JSON that matches neither shape.
    Unrecognized,
    /// The body was not JSON at all.
    Malformed,
}

/// The facets of a reply the session acts on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistantReply {
    /// Display text.  `None` unless the server sent a non-empty string.
    pub text: Option<String>,

    /// Whether the server consulted the web to answer.
    pub web_search_used: bool,

    /// The server's expertise classification, `beginner` when absent.
    pub expertise_level: ExpertiseLevel,

    /// An error reported by the server inside a successful response.
    pub service_error: Option<String>,
}

/// The result of decoding one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedResponse {
    /// The detected envelope shape.
    pub shape: ResponseShape,
    /// The extracted reply facets.
    pub reply: AssistantReply,
}

/// The gateway wrapper.  Only `body` matters; the rest is logged.
#[derive(Deserialize)]
struct GatewayEnvelope {
    body: Option<Value>,
    #[serde(rename = "statusCode")]
    status_code: Option<Value>,
}

/// The reply object.  Fields are loosely typed because the server is not
/// trusted to send the right JSON types.
#[derive(Deserialize, Default)]
struct ReplyFields {
    response: Option<Value>,
    web_search_used: Option<Value>,
    expertise_level: Option<Value>,
    error: Option<Value>,
}

impl ReplyFields {
    fn into_reply(self) -> AssistantReply {
        let text = match self.response {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        let web_search_used = self.web_search_used.as_ref().is_some_and(is_truthy);
        let expertise_level = match self.expertise_level {
            Some(Value::String(s)) if !s.is_empty() => ExpertiseLevel::parse(&s),
            _ => ExpertiseLevel::default(),
        };
        let service_error = match self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        AssistantReply {
            text,
            web_search_used,
            expertise_level,
            service_error,
        }
    }
}

// The flag is read the way a loosely typed client would read it: `1`,
// `"yes"` and `{}` all count as set; `0`, `""` and `null` do not.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl DecodedResponse {
    /// Decode a raw response body.  Never fails.
    pub fn decode(raw: &str) -> Self {
        // Stage one: the outer document.
        let outer: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "response body is not JSON");
                return Self::defaults(ResponseShape::Malformed);
            }
        };
        if !outer.is_object() {
            debug!("response is JSON but not an object");
            return Self::defaults(ResponseShape::Unrecognized);
        }

        let envelope = GatewayEnvelope::deserialize(&outer).ok();
        if let Some(GatewayEnvelope {
            body: Some(Value::String(body)),
            status_code,
        }) = envelope
            && !body.is_empty()
        {
            if let Some(status_code) = status_code {
                debug!(%status_code, "gateway envelope status");
            }
            return Self::decode_nested(&body);
        }

        if outer.get("response").is_some() {
            let fields = ReplyFields::deserialize(&outer).unwrap_or_default();
            return Self::finish(ResponseShape::Direct, fields.into_reply());
        }

        debug!("response matches neither envelope shape");
        Self::defaults(ResponseShape::Unrecognized)
    }

    // Stage two: the JSON document inside `body`.
    fn decode_nested(body: &str) -> Self {
        match serde_json::from_str::<ReplyFields>(body) {
            Ok(fields) => Self::finish(ResponseShape::Wrapped, fields.into_reply()),
            Err(err) => {
                NESTED_BODY_DECODE_ERRORS.click();
                warn!(error = %err, body, "failed to decode nested response body");
                Self::defaults(ResponseShape::WrappedUndecodable)
            }
        }
    }

    fn finish(shape: ResponseShape, reply: AssistantReply) -> Self {
        if let Some(service_error) = &reply.service_error {
            warn!(service_error = %service_error, "assistant reported an error");
        }
        debug!(
            ?shape,
            expertise_level = %reply.expertise_level,
            web_search_used = reply.web_search_used,
            has_text = reply.text.is_some(),
            "decoded response"
        );
        Self { shape, reply }
    }

    fn defaults(shape: ResponseShape) -> Self {
        Self {
            shape,
            reply: AssistantReply::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_body_is_decoded() {
        let raw = json!({
            "body": "{\"response\":\"hi\",\"expertise_level\":\"expert\"}"
        })
        .to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.shape, ResponseShape::Wrapped);
        assert_eq!(decoded.reply.text.as_deref(), Some("hi"));
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Expert);
        assert!(!decoded.reply.web_search_used);
    }

    #[test]
    fn gateway_wrapper_with_status_and_headers() {
        let inner = json!({
            "response": "**bold**",
            "web_search_used": true,
            "expertise_level": "Intermediate"
        })
        .to_string();
        let raw = json!({
            "statusCode": 200,
            "headers": {"Content-Type": "application/json"},
            "body": inner
        })
        .to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.shape, ResponseShape::Wrapped);
        assert_eq!(decoded.reply.text.as_deref(), Some("**bold**"));
        assert!(decoded.reply.web_search_used);
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Intermediate);
    }

    #[test]
    fn direct_object_defaults_to_beginner() {
        let decoded = DecodedResponse::decode(r#"{"response":"hi"}"#);
        assert_eq!(decoded.shape, ResponseShape::Direct);
        assert_eq!(decoded.reply.text.as_deref(), Some("hi"));
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Beginner);
        assert!(!decoded.reply.web_search_used);
    }

    #[test]
    fn unparseable_body_yields_defaults() {
        let decoded = DecodedResponse::decode("<html>502 Bad Gateway</html>");
        assert_eq!(decoded.shape, ResponseShape::Malformed);
        assert_eq!(decoded.reply, AssistantReply::default());
    }

    #[test]
    fn undecodable_nested_body_falls_through_to_defaults() {
        let raw = json!({"body": "{not json", "response": "ignored"}).to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.shape, ResponseShape::WrappedUndecodable);
        assert_eq!(decoded.reply.text, None);
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Beginner);
    }

    #[test]
    fn body_takes_priority_over_direct_fields() {
        let raw = json!({
            "response": "outer",
            "body": "{\"response\":\"inner\"}"
        })
        .to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.reply.text.as_deref(), Some("inner"));
    }

    #[test]
    fn non_string_body_falls_back_to_direct_fields() {
        let raw = json!({"body": {"x": 1}, "response": "direct"}).to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.shape, ResponseShape::Direct);
        assert_eq!(decoded.reply.text.as_deref(), Some("direct"));
    }

    #[test]
    fn unrecognized_shapes() {
        assert_eq!(
            DecodedResponse::decode(r#"{"message":"hello"}"#).shape,
            ResponseShape::Unrecognized
        );
        assert_eq!(
            DecodedResponse::decode(r#"["response"]"#).shape,
            ResponseShape::Unrecognized
        );
        assert_eq!(
            DecodedResponse::decode(r#"{"body":""}"#).shape,
            ResponseShape::Unrecognized
        );
    }

    #[test]
    fn non_string_response_is_absent() {
        let decoded = DecodedResponse::decode(r#"{"response":42,"expertise_level":7}"#);
        assert_eq!(decoded.shape, ResponseShape::Direct);
        assert_eq!(decoded.reply.text, None);
        assert_eq!(decoded.reply.expertise_level, ExpertiseLevel::Beginner);

        let decoded = DecodedResponse::decode(r#"{"response":""}"#);
        assert_eq!(decoded.reply.text, None);
    }

    #[test]
    fn padded_level_is_not_recognized() {
        let decoded = DecodedResponse::decode(r#"{"response":"x","expertise_level":"expert\n"}"#);
        assert_eq!(
            decoded.reply.expertise_level,
            ExpertiseLevel::Unrecognized("expert\n".to_string())
        );
        assert_eq!(
            crate::theme::color_for(&decoded.reply.expertise_level),
            crate::theme::ThemeColor::DEFAULT
        );
    }

    #[test]
    fn web_search_flag_is_read_loosely() {
        for flag in [json!(true), json!(1), json!("true"), json!("false"), json!({})] {
            let raw = json!({"response": "x", "web_search_used": flag}).to_string();
            assert!(
                DecodedResponse::decode(&raw).reply.web_search_used,
                "flag {flag}"
            );
        }
        for flag in [json!(false), json!(0), json!(""), json!(null)] {
            let raw = json!({"response": "x", "web_search_used": flag}).to_string();
            assert!(
                !DecodedResponse::decode(&raw).reply.web_search_used,
                "flag {flag}"
            );
        }
    }

    #[test]
    fn nested_service_error_is_surfaced() {
        let raw = json!({"body": "{\"error\":\"bedrock unavailable\"}"}).to_string();
        let decoded = DecodedResponse::decode(&raw);
        assert_eq!(decoded.shape, ResponseShape::Wrapped);
        assert_eq!(decoded.reply.text, None);
        assert_eq!(
            decoded.reply.service_error.as_deref(),
            Some("bedrock unavailable")
        );
    }
}
