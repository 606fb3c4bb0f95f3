//! Signed session tokens
//!
//! Sessions are stateless JWTs: the token itself binds the account id, role,
//! and expiry under an HMAC signature, so verification needs no store
//! lookup. The tradeoff is that a token cannot be revoked server-side; it is
//! honored until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    account::{AccountId, Role},
    error::SessionError,
};

/// A signed, self-contained session credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an existing token string, e.g. one received from a client.
    pub fn new(token: &str) -> Self {
        SessionToken(token.to_string())
    }

    /// Sign claims into a token.
    pub fn sign(claims: &SessionClaims, config: &JwtConfig) -> Result<Self, Error> {
        let token = encode(&Header::default(), claims, &config.encoding_key())
            .map_err(|e| SessionError::InvalidToken(format!("Failed to encode JWT: {e}")))?;

        Ok(SessionToken(token))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Claims carried inside a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - account id
    pub sub: String,
    /// Role tag for the account
    pub role: Role,
    /// Issued at in seconds (as UTC timestamp)
    pub iat: i64,
    /// Expiration time in seconds (as UTC timestamp)
    pub exp: i64,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl SessionClaims {
    pub fn account_id(&self) -> AccountId {
        AccountId::new(&self.sub)
    }
}

/// Configuration for session token signing.
///
/// The secret is a process-wide value, read-only after startup; both signing
/// and verification use it (HS256).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret_key: Vec<u8>,
    issuer: Option<String>,
}

impl JwtConfig {
    pub fn new(secret_key: Vec<u8>) -> Self {
        Self {
            secret_key,
            issuer: None,
        }
    }

    /// Set the issuer claim stamped into every token.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.secret_key)
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.secret_key)
    }

    fn validation(&self) -> Validation {
        Validation::new(Algorithm::HS256)
    }
}

/// Issues and verifies session tokens.
pub struct SessionTokenIssuer {
    config: JwtConfig,
}

impl SessionTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Mint a token binding the account id and role, valid for `ttl`.
    pub fn issue(
        &self,
        account_id: &AccountId,
        role: Role,
        ttl: Duration,
    ) -> Result<SessionToken, Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.config.issuer.clone(),
        };

        SessionToken::sign(&claims, &self.config)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Expired-but-well-formed tokens yield `SessionError::Expired`;
    /// anything malformed or tampered with yields
    /// `SessionError::InvalidToken`.
    pub fn verify(&self, token: &SessionToken) -> Result<SessionClaims, Error> {
        let token_data = decode::<SessionClaims>(
            token.as_str(),
            &self.config.decoding_key(),
            &self.config.validation(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => Error::Session(SessionError::Expired),
            _ => Error::Session(SessionError::InvalidToken(format!(
                "JWT validation failed: {e}"
            ))),
        })?;

        // The decoder validates exp with a leeway window; enforce the exact
        // expiry as well so short-lived tokens do not outlive their TTL.
        let claims = token_data.claims;
        let now = Utc::now();
        let exp = DateTime::from_timestamp(claims.exp, 0).unwrap_or(now);
        if now > exp {
            return Err(Error::Session(SessionError::Expired));
        }

        Ok(claims)
    }
}
