use crate::{
    Error,
    account::{AccountProfile, Role},
    config::AuthConfig,
    error::AuthError,
    mailer::{Mailer, PasswordResetEmail},
    password::{hash_password, verify_password},
    repositories::{AccountDirectory, ResetTokenStore},
    services::{AccountService, NewAccount, PasswordResetService},
    session::{SessionToken, SessionTokenIssuer},
    validation::validate_required,
};
use std::sync::Arc;

/// Registration input. The profile image arrives as a reference already
/// resolved by the upload collaborator.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub profile_image: String,
    pub role: Option<Role>,
}

/// Successful login: the session credential plus a public-safe projection
/// of the account.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: SessionToken,
    pub account: AccountProfile,
}

/// The authentication facade.
///
/// Orchestrates the account directory, reset-token store, session issuer,
/// and mailer behind the five account flows. All collaborators are injected
/// at construction; nothing here is ambient state.
pub struct AuthService<D: AccountDirectory, T: ResetTokenStore> {
    accounts: AccountService<D>,
    reset: PasswordResetService<D, T>,
    sessions: SessionTokenIssuer,
    mailer: Arc<dyn Mailer>,
    config: AuthConfig,
}

impl<D: AccountDirectory, T: ResetTokenStore> AuthService<D, T> {
    pub fn new(
        directory: Arc<D>,
        reset_tokens: Arc<T>,
        sessions: SessionTokenIssuer,
        mailer: Arc<dyn Mailer>,
        config: AuthConfig,
    ) -> Self {
        Self {
            accounts: AccountService::new(directory.clone()),
            reset: PasswordResetService::new(directory, reset_tokens),
            sessions,
            mailer,
            config,
        }
    }

    /// Register a new account.
    ///
    /// All fields are required; the email must not already be registered.
    /// The role defaults to `User`. Nothing sensitive is echoed back.
    pub async fn register(&self, request: RegisterRequest) -> Result<AccountProfile, Error> {
        validate_required(&request.password, "Password")?;
        validate_required(&request.profile_image, "Profile image")?;

        if self
            .accounts
            .get_account_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(Error::Auth(AuthError::DuplicateEmail));
        }

        let password_hash = hash_password(&request.password);

        let account = self
            .accounts
            .create_account(NewAccount {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                password_hash,
                profile_image: request.profile_image,
                role: request.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(account_id = %account.id, "account registered");
        Ok(AccountProfile::from(&account))
    }

    /// Authenticate with email and password, minting a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error> {
        let account = self
            .accounts
            .get_account_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        if !verify_password(password, &account.password_hash) {
            return Err(Error::Auth(AuthError::InvalidCredentials));
        }

        let token = self
            .sessions
            .issue(&account.id, account.role, self.config.session_ttl)?;

        tracing::info!(account_id = %account.id, "login succeeded");
        Ok(LoginResponse {
            token,
            account: AccountProfile::from(&account),
        })
    }

    /// End a session, advisorily.
    ///
    /// Session tokens are stateless and cannot be revoked server-side; the
    /// client discards its credential and the token lapses at expiry.
    pub async fn logout(&self) -> Result<(), Error> {
        tracing::debug!("logout requested; stateless session tokens expire on their own");
        Ok(())
    }

    /// Start the forgot-password flow for an email address.
    ///
    /// Issues a reset token (replacing any prior one for the account) and
    /// emails a reset link carrying the raw token. A mail transport failure
    /// surfaces as an error, but the issued token stays valid - the flow
    /// can be retried.
    pub async fn forgot_password(&self, email: &str) -> Result<(), Error> {
        let (account, token) = self
            .reset
            .request_reset(email, self.config.reset_token_ttl)
            .await?;

        let reset_link = format!(
            "{}/reset/{}",
            self.config.reset_link_base.trim_end_matches('/'),
            token
        );
        let email =
            PasswordResetEmail::build(&self.config.from_address, &account.email, &reset_link);

        self.mailer.send_email(email).await?;

        tracing::info!(account_id = %account.id, "reset link dispatched");
        Ok(())
    }

    /// Complete the reset flow: consume the token and set the new password.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), Error> {
        let account = self.reset.reset_password(token, new_password).await?;

        tracing::info!(account_id = %account.id, "password reset completed");
        Ok(())
    }
}
