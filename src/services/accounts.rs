//! Registration and authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::user::{RegisterForm, SessionClaims, User},
    repository::Repository,
    services::non_blank,
};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored hash. The comparison inside the
/// hashing primitive is constant-time; a malformed stored hash reads as a
/// failed check.
pub fn verify_password(password_hash: &str, password: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
    config: SessionConfig,
}

impl AccountsService {
    pub fn new(repository: Repository, config: SessionConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user. Stores a salted hash, never the raw password.
    pub async fn register(&self, form: &RegisterForm) -> AppResult<User> {
        form.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let username = non_blank(&form.username, "Username")?;
        non_blank(&form.password, "Password")?;

        if self.repository.users.username_exists(username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(&form.password)?;
        let user = self.repository.users.create(username, &password_hash).await?;

        tracing::info!(user_id = user.id, "Registered user {}", user.username);
        Ok(user)
    }

    /// Authenticate by username and password, returning a session token.
    /// Unknown users and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username.trim())
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !verify_password(&user.password_hash, password) {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok((token, user))
    }

    /// Create a signed session token for a user
    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.expiration_hours as i64 * 3600);

        let claims = SessionClaims {
            sub: user.username.clone(),
            user_id: user.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.secret)
            .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))
    }
}
