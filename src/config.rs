//! Runtime configuration
//!
//! All knobs are explicit values injected at construction; nothing reads
//! the environment or mutates after startup.

use chrono::Duration;

/// Configuration for [`crate::services::AuthService`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long issued session tokens stay valid.
    pub session_ttl: Duration,
    /// How long password-reset tokens stay valid.
    pub reset_token_ttl: Duration,
    /// Base URL for reset links; the token is appended as `/reset/{token}`.
    pub reset_link_base: String,
    /// From address stamped on outbound email.
    pub from_address: String,
}

impl AuthConfig {
    pub fn new(reset_link_base: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            session_ttl: Duration::days(1),
            reset_token_ttl: Duration::seconds(3600),
            reset_link_base: reset_link_base.into(),
            from_address: from_address.into(),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_reset_token_ttl(mut self, ttl: Duration) -> Self {
        self.reset_token_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("https://app.example.com", "noreply@example.com");
        assert_eq!(config.session_ttl, Duration::days(1));
        assert_eq!(config.reset_token_ttl, Duration::seconds(3600));
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::new("https://app.example.com", "noreply@example.com")
            .with_session_ttl(Duration::hours(2))
            .with_reset_token_ttl(Duration::minutes(15));
        assert_eq!(config.session_ttl, Duration::hours(2));
        assert_eq!(config.reset_token_ttl, Duration::minutes(15));
    }
}
