use crate::{
    Error,
    account::{Account, AccountId, Role},
    error::{AuthError, StorageError},
    repositories::AccountDirectory,
    validation::{normalize_email, validate_email, validate_name},
};
use std::sync::Arc;

/// Input record for account creation. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub role: Role,
}

/// Service for account management operations
pub struct AccountService<D: AccountDirectory> {
    directory: Arc<D>,
}

impl<D: AccountDirectory> AccountService<D> {
    /// Create a new AccountService with the given directory
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Validate and store a new account.
    ///
    /// Emails are normalized (trimmed, lowercased) before storage so
    /// uniqueness is case-insensitive. A uniqueness violation from the
    /// directory surfaces as `DuplicateEmail`, which also covers two
    /// registrations racing past the facade's pre-check.
    pub async fn create_account(&self, new: NewAccount) -> Result<Account, Error> {
        validate_name(&new.first_name, "First name")?;
        validate_name(&new.last_name, "Last name")?;

        let email = normalize_email(&new.email);
        validate_email(&email)?;

        let account = Account::builder()
            .first_name(new.first_name.trim().to_string())
            .last_name(new.last_name.trim().to_string())
            .email(email)
            .password_hash(new.password_hash)
            .profile_image(new.profile_image)
            .role(new.role)
            .build()?;

        match self.directory.create(account).await {
            Ok(account) => Ok(account),
            Err(Error::Storage(StorageError::Constraint(_))) => {
                Err(Error::Auth(AuthError::DuplicateEmail))
            }
            Err(e) => Err(e),
        }
    }

    /// Get an account by id
    pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.directory.find_by_id(id).await
    }

    /// Get an account by email, normalized before lookup
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.directory.find_by_email(&normalize_email(email)).await
    }

    /// Replace an account's password hash
    pub async fn set_password_hash(&self, id: &AccountId, hash: &str) -> Result<(), Error> {
        self.directory.update_password_hash(id, hash).await
    }
}
