use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Constructor;
use proto::{rules, UserId};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::store::{NewUser, StoreError, User, UserStore};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username cannot be empty.")]
    UsernameEmpty,
    #[error("Password cannot be empty.")]
    PasswordEmpty,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Username is already taken.")]
    UsernameTaken,
    #[error("User not found.")]
    UserNotFound,
    #[error("Invalid password.")]
    InvalidPassword,
    #[error("could not process password: {0}")]
    Hashing(String),
    #[error("Database error occurred")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => AccountError::UsernameTaken,
            other => AccountError::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;

/// Sign-up form as the player filled it in
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    pub mem_cost: u32,
    pub time_cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            mem_cost: 19 * 1024,
            time_cost: 2,
        }
    }
}

impl PasswordHasher {
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt: [u8; 16] = rand::random();
        let config = argon2::Config {
            variant: argon2::Variant::Argon2id,
            mem_cost: self.mem_cost,
            time_cost: self.time_cost,
            ..argon2::Config::default()
        };
        argon2::hash_encoded(password.as_bytes(), &salt, &config)
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    pub fn verify(encoded: &str, password: &str) -> Result<bool> {
        argon2::verify_encoded(encoded, password.as_bytes())
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_up(&self, account: NewAccount) -> Result<UserId>;
    async fn authenticate(&self, username: &str, password: &str) -> Result<User>;
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>>;
}

#[derive(Constructor)]
pub struct CoreAccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

fn validate(account: &NewAccount) -> Result<()> {
    if rules::is_blank(&account.username) {
        return Err(AccountError::UsernameEmpty);
    }
    if rules::is_blank(&account.password) {
        return Err(AccountError::PasswordEmpty);
    }
    if !rules::is_valid_email(&account.email) {
        return Err(AccountError::InvalidEmail);
    }
    Ok(())
}

/// Blank optional fields are stored as NULL
fn optional(field: Option<String>) -> Option<String> {
    field.filter(|value| !rules::is_blank(value))
}

#[async_trait]
impl AccountService for CoreAccountService {
    async fn sign_up(&self, account: NewAccount) -> Result<UserId> {
        validate(&account)?;

        // CPU bound, off the runtime threads
        let hasher = self.hasher;
        let password = account.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))??;

        let user_id = self
            .users
            .insert_user(NewUser {
                username: account.username.clone(),
                password_hash,
                email: account.email,
                first_name: optional(account.first_name),
                last_name: optional(account.last_name),
            })
            .await?;
        info!(user_id, username = %account.username, "account created");
        Ok(user_id)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let creds = self
            .users
            .find_credentials(username)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let encoded = creds.password_hash;
        let password = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || PasswordHasher::verify(&encoded, &password))
                .await
                .map_err(|e| AccountError::Hashing(e.to_string()))??;
        if !matches {
            debug!(username, "password mismatch");
            return Err(AccountError::InvalidPassword);
        }

        self.users
            .get_user(creds.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let user = self.users.get_user(user_id).await?;
        if user.is_none() {
            warn!(user_id, "no user found");
        }
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::MemoryStore;

    pub(crate) fn cheap_hasher() -> PasswordHasher {
        PasswordHasher {
            mem_cost: 256,
            time_cost: 1,
        }
    }

    fn service() -> CoreAccountService {
        CoreAccountService::new(Arc::new(MemoryStore::new()), cheap_hasher())
    }

    fn account(username: &str, password: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..NewAccount::default()
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let hasher = cheap_hasher();
        let a = hasher.hash("pingpong").unwrap();
        let b = hasher.hash("pingpong").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(PasswordHasher::verify(&a, "pingpong").unwrap());
        assert!(!PasswordHasher::verify(&a, "pingpang").unwrap());
    }

    #[tokio::test]
    async fn test_sign_up_validation_order() {
        let svc = service();
        let err = svc.sign_up(account(" ", "", "bad")).await.unwrap_err();
        assert_eq!(err.to_string(), "Username cannot be empty.");

        let err = svc.sign_up(account("ann", "  ", "bad")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password cannot be empty.");

        let err = svc.sign_up(account("ann", "pw", "bad")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format.");
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let svc = service();
        svc.sign_up(account("ann", "pw", "ann@example.com"))
            .await
            .unwrap();
        let err = svc
            .sign_up(account("ann", "other", "ann2@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::UsernameTaken));
        assert_eq!(err.to_string(), "Username is already taken.");
    }

    #[tokio::test]
    async fn test_authenticate() {
        let svc = service();
        let id = svc
            .sign_up(NewAccount {
                first_name: Some("Ann".into()),
                last_name: Some("  ".into()),
                ..account("ann", "pw", "ann@example.com")
            })
            .await
            .unwrap();

        let user = svc.authenticate("ann", "pw").await.unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.first_name.as_deref(), Some("Ann"));
        assert_eq!(user.last_name, None);

        let err = svc.authenticate("ann", "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid password.");
        let err = svc.authenticate("zed", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found.");
    }

    #[tokio::test]
    async fn test_get_user_miss_is_none() {
        let svc = service();
        assert!(svc.get_user(3).await.unwrap().is_none());
    }
}
