//! In-memory reference implementations
//!
//! Concurrent-map-backed stores used by tests and single-process
//! deployments. The reset-token store keys records by account id, which
//! makes the one-live-token-per-account invariant structural: issuing
//! replaces any prior record in a single map operation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, mapref::entry::Entry};

use crate::{
    Error,
    account::{Account, AccountId},
    crypto::{generate_secure_token, hash_token},
    error::StorageError,
    validation::normalize_email,
};

use super::{AccountDirectory, ResetToken, ResetTokenStore};

/// Account directory backed by process-local maps.
#[derive(Default)]
pub struct MemoryAccountDirectory {
    accounts: DashMap<AccountId, Account>,
    ids_by_email: DashMap<String, AccountId>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn create(&self, account: Account) -> Result<Account, Error> {
        let email_key = normalize_email(&account.email);

        match self.ids_by_email.entry(email_key) {
            Entry::Occupied(_) => {
                return Err(Error::Storage(StorageError::Constraint(format!(
                    "email already registered: {}",
                    account.email
                ))));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(account.id.clone());
            }
        }

        self.accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        Ok(self.accounts.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let id = match self.ids_by_email.get(&normalize_email(email)) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };

        self.find_by_id(&id).await
    }

    async fn update_password_hash(&self, id: &AccountId, hash: &str) -> Result<(), Error> {
        let mut account = self
            .accounts
            .get_mut(id)
            .ok_or(Error::Storage(StorageError::NotFound))?;

        account.password_hash = hash.to_string();
        account.updated_at = Utc::now();
        Ok(())
    }
}

struct StoredResetToken {
    token_hash: String,
    expires_at: DateTime<Utc>,
}

/// Reset-token store backed by a process-local map keyed by account id.
#[derive(Default)]
pub struct MemoryResetTokenStore {
    tokens: DashMap<AccountId, StoredResetToken>,
}

impl MemoryResetTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResetTokenStore for MemoryResetTokenStore {
    async fn issue(
        &self,
        account_id: &AccountId,
        expires_in: Duration,
    ) -> Result<ResetToken, Error> {
        let token = generate_secure_token();
        let now = Utc::now();
        let expires_at = now + expires_in;

        // Keyed by account: inserting replaces any prior token atomically.
        self.tokens.insert(
            account_id.clone(),
            StoredResetToken {
                token_hash: hash_token(&token),
                expires_at,
            },
        );

        Ok(ResetToken {
            account_id: account_id.clone(),
            token,
            created_at: now,
            expires_at,
        })
    }

    async fn consume(&self, token: &str) -> Result<Option<AccountId>, Error> {
        let hash = hash_token(token);

        let account_id = match self.tokens.iter().find_map(|entry| {
            (entry.value().token_hash == hash).then(|| entry.key().clone())
        }) {
            Some(account_id) => account_id,
            None => return Ok(None),
        };

        // Re-check the hash inside the removal so a concurrent consume or
        // re-issue cannot be swallowed: at most one caller removes a given
        // token.
        match self
            .tokens
            .remove_if(&account_id, |_, stored| stored.token_hash == hash)
        {
            Some((_, stored)) if Utc::now() <= stored.expires_at => Ok(Some(account_id)),
            _ => Ok(None),
        }
    }

    async fn cleanup_expired(&self) -> Result<(), Error> {
        let now = Utc::now();
        self.tokens.retain(|_, stored| stored.expires_at > now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Role;
    use std::sync::Arc;

    fn account(email: &str) -> Account {
        Account::builder()
            .first_name("Jane".to_string())
            .last_name("Doe".to_string())
            .email(email.to_string())
            .password_hash("$argon2id$fake".to_string())
            .profile_image("https://cdn.test/jane.png".to_string())
            .role(Role::User)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_directory_create_and_lookup() {
        let directory = MemoryAccountDirectory::new();
        let created = directory.create(account("jane@x.com")).await.unwrap();

        let by_id = directory.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "jane@x.com");

        let by_email = directory.find_by_email("jane@x.com").await.unwrap();
        assert!(by_email.is_some());
    }

    #[tokio::test]
    async fn test_directory_email_is_case_insensitive() {
        let directory = MemoryAccountDirectory::new();
        directory.create(account("jane@x.com")).await.unwrap();

        let found = directory.find_by_email("JANE@X.COM").await.unwrap();
        assert!(found.is_some());

        let duplicate = directory.create(account("Jane@X.com")).await;
        assert!(matches!(
            duplicate,
            Err(Error::Storage(StorageError::Constraint(_)))
        ));
    }

    #[tokio::test]
    async fn test_directory_update_password_hash() {
        let directory = MemoryAccountDirectory::new();
        let created = directory.create(account("jane@x.com")).await.unwrap();

        directory
            .update_password_hash(&created.id, "$argon2id$new")
            .await
            .unwrap();

        let reloaded = directory.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$argon2id$new");
        assert!(reloaded.updated_at >= created.updated_at);

        let missing = directory
            .update_password_hash(&AccountId::new_random(), "$argon2id$new")
            .await;
        assert!(matches!(
            missing,
            Err(Error::Storage(StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_issue_and_consume() {
        let store = MemoryResetTokenStore::new();
        let account_id = AccountId::new_random();

        let issued = store.issue(&account_id, Duration::hours(1)).await.unwrap();
        assert!(!issued.is_expired());

        let consumed = store.consume(&issued.token).await.unwrap();
        assert_eq!(consumed, Some(account_id));
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let store = MemoryResetTokenStore::new();
        let account_id = AccountId::new_random();

        let issued = store.issue(&account_id, Duration::hours(1)).await.unwrap();

        assert!(store.consume(&issued.token).await.unwrap().is_some());
        assert!(store.consume(&issued.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reissue_invalidates_prior_token() {
        let store = MemoryResetTokenStore::new();
        let account_id = AccountId::new_random();

        let first = store.issue(&account_id, Duration::hours(1)).await.unwrap();
        let second = store.issue(&account_id, Duration::hours(1)).await.unwrap();
        assert_ne!(first.token, second.token);

        assert!(store.consume(&first.token).await.unwrap().is_none());
        assert_eq!(store.consume(&second.token).await.unwrap(), Some(account_id));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let store = MemoryResetTokenStore::new();
        let account_id = AccountId::new_random();

        let issued = store
            .issue(&account_id, Duration::seconds(-1))
            .await
            .unwrap();
        assert!(issued.is_expired());

        assert!(store.consume(&issued.token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_drops_only_expired_tokens() {
        let store = MemoryResetTokenStore::new();
        let expired_owner = AccountId::new_random();
        let live_owner = AccountId::new_random();

        store
            .issue(&expired_owner, Duration::seconds(-1))
            .await
            .unwrap();
        let live = store.issue(&live_owner, Duration::hours(1)).await.unwrap();

        store.cleanup_expired().await.unwrap();

        assert_eq!(store.tokens.len(), 1);
        assert_eq!(store.consume(&live.token).await.unwrap(), Some(live_owner));
    }

    #[tokio::test]
    async fn test_concurrent_consume_races_to_one_success() {
        let store = Arc::new(MemoryResetTokenStore::new());
        let account_id = AccountId::new_random();
        let issued = store.issue(&account_id, Duration::hours(1)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            let token = issued.token.clone();
            handles.push(tokio::spawn(
                async move { store.consume(&token).await.unwrap() },
            ));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
