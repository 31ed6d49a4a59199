use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The pair of identifiers sent with every request of a session.
///
/// Both are derived from the creation timestamp and never change afterwards.
/// They are only as unique as the millisecond clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    user_id: String,
    session_id: String,
}

impl SessionIdentity {
    /// Generate an identity from the current wall-clock time.
    pub fn generate() -> Self {
        Self::from_timestamp(OffsetDateTime::now_utc())
    }

    /// Generate an identity from an explicit instant.
    pub fn from_timestamp(now: OffsetDateTime) -> Self {
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        Self {
            user_id: format!("user_{millis}"),
            session_id: format!("session_{millis}"),
        }
    }

    /// The user identifier.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn identity_from_timestamp() {
        let identity = SessionIdentity::from_timestamp(datetime!(2024-05-01 12:00:00.123 UTC));
        assert_eq!(identity.user_id(), "user_1714564800123");
        assert_eq!(identity.session_id(), "session_1714564800123");
    }

    #[test]
    fn generated_identity_is_non_empty() {
        let identity = SessionIdentity::generate();
        assert!(identity.user_id().starts_with("user_"));
        assert!(identity.session_id().starts_with("session_"));
        assert!(identity.user_id().len() > "user_".len());
    }
}
