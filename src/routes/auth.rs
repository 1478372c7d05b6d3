// ABOUTME: User authentication route handlers for registration, login, and logout
// ABOUTME: Validates credentials, rejects duplicate emails, and issues session tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Authentication routes for user account management.
//!
//! Registration rejects duplicate emails before any write. Login verifies the
//! bcrypt hash, issues a session token, and sets it as an `HttpOnly` cookie
//! alongside the JSON response; logout clears the cookie.

use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;
use crate::routes::AUTH_COOKIE;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    fn is_valid_email(email: &str) -> bool {
        email.contains('@') && email.contains('.') && !email.starts_with('@')
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        // Duplicate check happens before any write
        if resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            return Err(AppError::already_exists(
                "User with this email already exists",
            ));
        }

        let password_hash = crate::auth::AuthManager::hash_password(&request.password)?;
        let user = User::new(request.email.clone(), password_hash, request.name);

        let user_id = resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!("User registered successfully: {} ({user_id})", request.email);

        let response = RegisterResponse {
            user_id: user_id.to_string(),
            message: "Registration successful! Please log in.".into(),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        info!("User login attempt for email: {}", request.email);

        let user = resources
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        let is_valid = crate::auth::AuthManager::verify_password(
            request.password.clone(),
            user.password_hash.clone(),
        )
        .await?;
        if !is_valid {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let token = resources.auth_manager.generate_token(&user)?;
        let expires_at = resources.auth_manager.token_expiry();

        info!("User logged in successfully: {} ({})", request.email, user.id);

        let body = LoginResponse {
            token: token.clone(),
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        };

        let cookie = format!("{AUTH_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax");
        Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(body)).into_response())
    }

    /// Handle POST /api/auth/logout — clears the session cookie
    async fn handle_logout(
        State(_resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let cookie = format!("{AUTH_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
        let body = serde_json::json!({ "message": "Logged out successfully." });
        Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(body)).into_response())
    }
}
