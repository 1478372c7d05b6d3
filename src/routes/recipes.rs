// ABOUTME: Recipe route handlers for supplier-backed suggestions
// ABOUTME: Runs the supplier bridge and returns fetched recipes to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Recipe suggestion routes

use crate::errors::AppError;
use crate::models::{PreferenceFilter, Recipe};
use crate::resources::ServerResources;
use crate::routes::authenticate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Response for recipe suggestions
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestRecipesResponse {
    pub recipes: Vec<Recipe>,
    pub total: usize,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/suggest", get(Self::handle_suggest))
            .with_state(resources)
    }

    /// Handle GET /api/recipes/suggest?key=value&...
    ///
    /// The whole query string becomes the preference filter forwarded to the
    /// supplier; new recipes are stored as a side effect.
    async fn handle_suggest(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<BTreeMap<String, String>>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let filter = PreferenceFilter::from(params);
        let recipes = resources.suggester.suggest(&filter).await?;

        let response = SuggestRecipesResponse {
            total: recipes.len(),
            recipes,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
