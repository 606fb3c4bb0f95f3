//! # Wicket
//!
//! A minimal account backend core: registration with a pre-resolved profile
//! image, credential login issuing a signed session token, advisory logout,
//! and a forgot/reset password flow over emailed one-time tokens.
//!
//! The crate owns the credential and token lifecycle - password hashing and
//! verification, stateless session-token issuance, and the single-use,
//! time-bounded reset-token workflow. Everything at the edges is a narrow,
//! injected collaborator: the account directory is a document store behind
//! [`AccountDirectory`], mail transport sits behind [`Mailer`], and HTTP
//! wiring is left to the embedding application.
//!
//! See [`AuthService`] for the five account flows, and the
//! [`repositories::memory`] module for the in-memory reference stores.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod id;
pub mod mailer;
pub mod password;
pub mod repositories;
pub mod services;
pub mod session;
pub mod validation;

pub use account::{Account, AccountId, AccountProfile, Role};
pub use config::AuthConfig;
pub use error::Error;
pub use mailer::{Email, Mailer, PasswordResetEmail, SmtpMailer};
pub use repositories::{
    AccountDirectory, MemoryAccountDirectory, MemoryResetTokenStore, ResetToken, ResetTokenStore,
};
pub use services::{AccountService, AuthService, LoginResponse, NewAccount, RegisterRequest};
pub use session::{JwtConfig, SessionClaims, SessionToken, SessionTokenIssuer};
