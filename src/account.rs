//! Account records and identity types
//!
//! The core account struct holds the identity record the directory stores:
//!
//! | Field           | Type       | Description                                  |
//! | --------------- | ---------- | -------------------------------------------- |
//! | `id`            | `String`   | The unique identifier for the account.       |
//! | `first_name`    | `String`   | The account holder's first name.             |
//! | `last_name`     | `String`   | The account holder's last name.              |
//! | `email`         | `String`   | Unique email, stored lowercased.             |
//! | `password_hash` | `String`   | Salted argon2 digest, never plaintext.       |
//! | `profile_image` | `String`   | Resolved profile image URL.                  |
//! | `role`          | `Role`     | `User` or `Admin`.                           |
//! | `created_at`    | `DateTime` | When the account was created.                |
//! | `updated_at`    | `DateTime` | When the account was last updated.           |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
};

/// A unique, stable identifier for an account.
///
/// Treated as opaque by everything except the directory that stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acct"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this id has the expected `acct_` format.
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "acct")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary role tag carried on the account and inside session tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_image: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }
}

#[derive(Default)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
    profile_image: Option<String>,
    role: Option<Role>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn first_name(mut self, first_name: String) -> Self {
        self.first_name = Some(first_name);
        self
    }

    pub fn last_name(mut self, last_name: String) -> Self {
        self.last_name = Some(last_name);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub fn profile_image(mut self, profile_image: String) -> Self {
        self.profile_image = Some(profile_image);
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> Result<Account, Error> {
        let now = Utc::now();
        Ok(Account {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.ok_or(ValidationError::MissingField(
                "First name is required".to_string(),
            ))?,
            last_name: self.last_name.ok_or(ValidationError::MissingField(
                "Last name is required".to_string(),
            ))?,
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            password_hash: self.password_hash.ok_or(ValidationError::MissingField(
                "Password hash is required".to_string(),
            ))?,
            profile_image: self.profile_image.ok_or(ValidationError::MissingField(
                "Profile image is required".to_string(),
            ))?,
            role: self.role.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Public-safe projection of an account, returned to clients.
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: String,
    pub role: Role,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            profile_image: account.profile_image.clone(),
            role: account.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::builder()
            .first_name("Jane".to_string())
            .last_name("Doe".to_string())
            .email("jane@x.com".to_string())
            .password_hash("$argon2id$fake".to_string())
            .profile_image("https://cdn.test/jane.png".to_string())
            .build()
            .unwrap()
    }

    #[test]
    fn test_account_id_prefixed() {
        let id = AccountId::new_random();
        assert!(id.as_str().starts_with("acct_"));
        assert!(id.is_valid());

        let id2 = AccountId::new_random();
        assert_ne!(id, id2);

        assert!(!AccountId::new("invalid").is_valid());
    }

    #[test]
    fn test_role_default_and_display() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::User.to_string(), "User");
        assert_eq!(Role::Admin.to_string(), "Admin");
    }

    #[test]
    fn test_builder_defaults() {
        let account = sample_account();
        assert!(account.id.is_valid());
        assert_eq!(account.role, Role::User);
        assert_eq!(account.created_at, account.updated_at);
    }

    #[test]
    fn test_builder_requires_fields() {
        let result = Account::builder()
            .first_name("Jane".to_string())
            .email("jane@x.com".to_string())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_projection() {
        let account = sample_account();
        let profile = AccountProfile::from(&account);
        assert_eq!(profile.id, account.id);
        assert_eq!(profile.first_name, "Jane");
        assert_eq!(profile.email, "jane@x.com");
        assert_eq!(profile.role, Role::User);
    }
}
