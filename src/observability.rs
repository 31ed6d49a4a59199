use biometrics::{Collector, Counter, Moments};

pub(crate) static CHAT_REQUESTS: Counter = Counter::new("stainless.client.requests");
pub(crate) static CHAT_REQUEST_ERRORS: Counter = Counter::new("stainless.client.request_errors");
pub(crate) static CHAT_REQUEST_DURATION: Moments =
    Moments::new("stainless.client.request_duration_seconds");

pub(crate) static NESTED_BODY_DECODE_ERRORS: Counter =
    Counter::new("stainless.response.nested_body_decode_errors");
pub(crate) static PLACEHOLDER_REPLIES: Counter =
    Counter::new("stainless.response.placeholder_replies");

pub(crate) static SENDS_SKIPPED: Counter = Counter::new("stainless.session.sends_skipped");
pub(crate) static ATTACHMENTS_SENT: Counter = Counter::new("stainless.session.attachments");
pub(crate) static MARKDOWN_FALLBACKS: Counter =
    Counter::new("stainless.session.markdown_fallbacks");
pub(crate) static THEME_CHANGES: Counter = Counter::new("stainless.session.theme_changes");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&CHAT_REQUEST_ERRORS);
    collector.register_moments(&CHAT_REQUEST_DURATION);

    collector.register_counter(&NESTED_BODY_DECODE_ERRORS);
    collector.register_counter(&PLACEHOLDER_REPLIES);

    collector.register_counter(&SENDS_SKIPPED);
    collector.register_counter(&ATTACHMENTS_SENT);
    collector.register_counter(&MARKDOWN_FALLBACKS);
    collector.register_counter(&THEME_CHANGES);
}
