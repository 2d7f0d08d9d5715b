//! Registration and credential checks

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::auth::{Credentials, PasswordHasher};
use crate::db::UserRepository;
use crate::error::{AppError, AppResult};
use crate::models::{EmailAddress, NewUser, User};

/// User operations over any [`UserRepository`]
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    /// Verified against when the email is unknown, so both failures cost one argon2 run
    decoy_hash: Arc<OnceCell<String>>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self {
            repo,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn decoy_hash(&self) -> AppResult<String> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash_blocking("coursedir-decoy".to_owned()))
            .await?;
        Ok(hash.clone())
    }

    /// Hash the password and store the user.
    ///
    /// A taken email surfaces as a 400 through the repository's conflict error.
    pub async fn register(&self, new_user: NewUser) -> AppResult<User> {
        let hash = self
            .hasher
            .hash_blocking(new_user.password.expose().to_owned())
            .await?;

        let user = self.repo.create(&new_user, &hash).await?;
        tracing::info!(user_id = user.id, email = %user.email_address, "user registered");

        Ok(user)
    }

    /// Resolve Basic credentials to a stored user.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn authenticate(&self, credentials: Credentials) -> AppResult<User> {
        let email = EmailAddress::for_lookup(&credentials.email);

        let Some(user) = self.repo.find_by_email(&email).await? else {
            self.hasher
                .verify_blocking(credentials.password, self.decoy_hash().await?)
                .await?;
            tracing::warn!(email = %email.as_str(), "authentication failed: unknown user");
            return Err(AppError::unauthorized());
        };

        let verified = self
            .hasher
            .verify_blocking(credentials.password, user.password_hash.clone())
            .await?;

        if !verified {
            tracing::warn!(user_id = user.id, email = %email.as_str(), "authentication failed: wrong password");
            return Err(AppError::unauthorized());
        }

        tracing::debug!(user_id = user.id, "authenticated");
        Ok(user)
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.repo.count().await?)
    }
}
