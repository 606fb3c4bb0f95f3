use crate::{
    Error,
    account::Account,
    error::AuthError,
    password::hash_password,
    repositories::{AccountDirectory, ResetTokenStore},
    services::AccountService,
    validation::validate_password_policy,
};
use chrono::Duration;
use std::sync::Arc;

/// Service for the forgot/reset password flow
pub struct PasswordResetService<D: AccountDirectory, T: ResetTokenStore> {
    accounts: Arc<AccountService<D>>,
    tokens: Arc<T>,
}

impl<D: AccountDirectory, T: ResetTokenStore> PasswordResetService<D, T> {
    /// Create a new PasswordResetService with the given directory and store
    pub fn new(directory: Arc<D>, tokens: Arc<T>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(directory)),
            tokens,
        }
    }

    /// Start a password reset for the given email address.
    ///
    /// Issues a fresh token valid for `expires_in`, invalidating any token
    /// previously issued to the same account. Returns the account together
    /// with the raw token; the token is only ever available here, the store
    /// keeps a hash.
    ///
    /// Fails with `AccountNotFound` for unknown emails; callers that need
    /// enumeration protection must not forward that distinction.
    pub async fn request_reset(
        &self,
        email: &str,
        expires_in: Duration,
    ) -> Result<(Account, String), Error> {
        let account = self
            .accounts
            .get_account_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let reset_token = self.tokens.issue(&account.id, expires_in).await?;

        tracing::debug!(account_id = %account.id, "reset token issued");
        Ok((account, reset_token.token))
    }

    /// Complete a password reset.
    ///
    /// The policy check runs before the token is consumed, so a rejected
    /// password leaves the token live for another attempt. Consumption is
    /// single-use: a second call with the same token fails with
    /// `InvalidResetToken`, as does an expired token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Account, Error> {
        validate_password_policy(new_password)?;

        let account_id = self
            .tokens
            .consume(token)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        // The account can disappear between issue and consume only through
        // channels outside this core; surface it rather than ignore it.
        let account = self
            .accounts
            .get_account(&account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let new_hash = hash_password(new_password);
        self.accounts.set_password_hash(&account.id, &new_hash).await?;

        Ok(account)
    }

    /// Drop expired reset tokens from the store.
    pub async fn cleanup_expired_tokens(&self) -> Result<(), Error> {
        self.tokens.cleanup_expired().await
    }
}
