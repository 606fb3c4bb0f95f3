//! Storage traits for the account directory and reset-token store
//!
//! These traits are the narrow seams to persistence. The account directory
//! is an external document store reachable by key lookups; the reset-token
//! store owns the single-use/expiry invariants of reset tokens. In-memory
//! reference implementations live in [`memory`].

pub mod memory;

pub use memory::{MemoryAccountDirectory, MemoryResetTokenStore};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    Error,
    account::{Account, AccountId},
};

/// Document store holding account records, keyed by id and email.
///
/// Email uniqueness (case-insensitive) is enforced here. Accounts are never
/// deleted through this interface.
#[async_trait]
pub trait AccountDirectory: Send + Sync + 'static {
    /// Insert a new account. Fails with a constraint violation when the
    /// email is already held.
    async fn create(&self, account: Account) -> Result<Account, Error>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Look up an account by (case-insensitive) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    /// Replace the stored password hash and bump `updated_at`.
    async fn update_password_hash(&self, id: &AccountId, hash: &str) -> Result<(), Error>;
}

/// A password-reset token as issued to (and consumed from) the store.
///
/// Lifecycle: `Active` from issue until it is consumed or its expiry
/// passes; both end states are terminal. A later issue for the same account
/// is a fresh, unrelated token.
#[derive(Debug, Clone)]
pub struct ResetToken {
    pub account_id: AccountId,
    /// The raw secret. Only available at issue time; the store keeps a hash.
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Store of single-use, time-bounded password-reset tokens.
#[async_trait]
pub trait ResetTokenStore: Send + Sync + 'static {
    /// Issue a fresh token for the account, valid for `expires_in`.
    ///
    /// Any previously issued token for the same account is invalidated, so
    /// at most one token per account is ever live.
    async fn issue(
        &self,
        account_id: &AccountId,
        expires_in: Duration,
    ) -> Result<ResetToken, Error>;

    /// Consume a token, returning the owning account id.
    ///
    /// Deletion is atomic with the lookup: of any number of concurrent
    /// calls with the same token, at most one receives `Some`. Expired
    /// tokens return `None` even if not yet purged.
    async fn consume(&self, token: &str) -> Result<Option<AccountId>, Error>;

    /// Drop expired records. Correctness does not depend on this running;
    /// `consume` checks expiry itself.
    async fn cleanup_expired(&self) -> Result<(), Error>;
}
