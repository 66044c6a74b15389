//! Authentication service.
//!
//! Registration and password login over the user repository, with
//! Argon2id password hashing.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

use minimart_core::Email;

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// All three fields are required and non-empty. Uniqueness of both
    /// username and email is enforced by the insert itself; a collision
    /// on either surfaces as the same `UserAlreadyExists`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any input is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if username or email is taken.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either input is empty.
    /// Returns `AuthError::InvalidCredentials` for an unknown username
    /// and for a wrong password alike.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let (user, password_hash) = self
            .users
            .get_auth_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
///
/// The PHC-format digest embeds the algorithm parameters and a random
/// salt, so verification needs no separate state.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored digest.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_self_contained() {
        let digest = hash_password("correct horse battery staple").unwrap();
        // PHC string embeds algorithm, parameters, and salt
        assert!(digest.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_password_salted() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let digest = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &digest).is_ok());
    }

    #[test]
    fn test_verify_password_wrong_password() {
        let digest = hash_password("pw1").unwrap();
        assert!(matches!(
            verify_password("pw2", &digest),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_garbage_digest() {
        assert!(matches!(
            verify_password("pw1", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
