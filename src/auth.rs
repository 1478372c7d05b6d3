// ABOUTME: JWT-based user authentication and session management
// ABOUTME: Handles password hashing, token generation, and token validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! # Authentication and Session Management
//!
//! Session tokens are HS256 JWTs signed with a shared secret from
//! configuration. Password hashing uses bcrypt; verification runs inside
//! `spawn_blocking` so it never stalls the async executor. The web layer
//! extracts the token from a bearer header or the `auth_token` cookie and
//! resolves it to an [`AuthenticatedUser`], which is the explicit caller
//! identity passed into every core operation.

use crate::errors::AppError;
use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Explicit caller identity resolved from a validated session token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Authenticated user email
    pub email: String,
}

/// Authentication manager for session tokens and password credentials
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// When a token issued now will expire
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: self.token_expiry().timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an auth error when the token is expired, malformed, or has an
    /// invalid signature
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::auth_expired(),
            _ => AppError::auth_invalid(format!("Invalid session token: {e}")),
        })
    }

    /// Validate a token and resolve the caller identity
    ///
    /// # Errors
    ///
    /// Returns an auth error when validation fails or the subject is not a
    /// valid user id
    pub fn authenticate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Malformed token subject: {e}")))?;
        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }

    /// Hash a password for storage
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails
    pub fn hash_password(password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verify a password against a stored hash without blocking the executor
    ///
    /// # Errors
    ///
    /// Returns an error if the verification task fails
    pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-key-for-unit-tests".to_vec(), 24)
    }

    fn test_user() -> User {
        User::new(
            "test@example.com".into(),
            "hashed_password_123".into(),
            Some("Test User".into()),
        )
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.sub, user.id.to_string());
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_authenticate_token_resolves_identity() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let auth = manager.authenticate_token(&token).unwrap();
        assert_eq!(auth.user_id, user.id);
        assert_eq!(auth.email, user.email);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let manager = test_manager();
        let result = manager.validate_token("not.a.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let user = test_user();
        let token = test_manager().generate_token(&user).unwrap();

        let other = AuthManager::new(b"a-different-secret".to_vec(), 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_password_round_trip() {
        let hash = AuthManager::hash_password("hunter2-but-longer").unwrap();
        assert!(
            AuthManager::verify_password("hunter2-but-longer".into(), hash.clone())
                .await
                .unwrap()
        );
        assert!(!AuthManager::verify_password("wrong".into(), hash)
            .await
            .unwrap());
    }
}
