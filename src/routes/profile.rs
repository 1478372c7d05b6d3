// ABOUTME: Profile route handlers for viewing and updating user preferences
// ABOUTME: Exposes display name, dietary preferences, and restrictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Profile routes

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::authenticate;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Profile view response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub email: String,
    pub display_name: Option<String>,
    pub dietary_preferences: String,
    pub restrictions: String,
}

/// Profile update request; absent fields keep their current values
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub dietary_preferences: Option<String>,
    pub restrictions: Option<String>,
}

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::handle_get))
            .route("/api/profile", put(Self::handle_update))
            .with_state(resources)
    }

    /// Handle GET /api/profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let response = ProfileResponse {
            email: user.email,
            display_name: user.display_name,
            dietary_preferences: user.dietary_preferences,
            restrictions: user.restrictions,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/profile
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let user = resources
            .database
            .get_user(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("User {}", auth.user_id)))?;

        let display_name = request.display_name.or(user.display_name);
        let dietary_preferences = request
            .dietary_preferences
            .unwrap_or(user.dietary_preferences);
        let restrictions = request.restrictions.unwrap_or(user.restrictions);

        resources
            .database
            .update_user_profile(
                auth.user_id,
                display_name.as_deref(),
                &dietary_preferences,
                &restrictions,
            )
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!("Profile updated for user {}", auth.user_id);

        let response = ProfileResponse {
            email: user.email,
            display_name,
            dietary_preferences,
            restrictions,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
