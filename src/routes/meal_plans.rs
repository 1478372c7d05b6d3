// ABOUTME: Meal plan route handlers for listing, generation, detail, and customization
// ABOUTME: Owner-scoped REST endpoints delegating to PlanGenerator and PlanCustomizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Meal plan routes.
//!
//! All endpoints require authentication; plans are scoped to their owner, so
//! another user's plan id behaves as if it did not exist.

use crate::errors::AppError;
use crate::models::{IngredientSubstitution, MealPlan, PlanDuration, PreferenceFilter, Recipe};
use crate::resources::ServerResources;
use crate::routes::authenticate;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request body for generating a plan
#[derive(Debug, Deserialize)]
pub struct CreateMealPlanRequest {
    /// Duration category; unrecognized values fall back to daily
    pub duration: String,
    /// Preference filter narrowing candidate recipes
    #[serde(default)]
    pub preferences: PreferenceFilter,
}

/// Request body for customizing a plan
#[derive(Debug, Deserialize)]
pub struct CustomizeMealPlanRequest {
    /// Uniform servings overwrite for every meal
    pub new_servings: Option<u32>,
    /// Ingredient substitution applied across all meals
    pub substitute_ingredient: Option<IngredientSubstitution>,
}

/// Full plan detail response
#[derive(Debug, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub id: String,
    pub user_id: String,
    pub start_date: String,
    pub duration: String,
    pub meals: Vec<Recipe>,
}

impl From<MealPlan> for MealPlanResponse {
    fn from(plan: MealPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            user_id: plan.user_id.to_string(),
            start_date: plan.start_date.to_rfc3339(),
            duration: plan.duration.to_string(),
            meals: plan.meals,
        }
    }
}

/// One entry in the plan list
#[derive(Debug, Serialize, Deserialize)]
pub struct MealPlanSummary {
    pub id: String,
    pub start_date: String,
    pub duration: String,
    pub meal_count: usize,
}

/// Response for listing plans
#[derive(Debug, Serialize, Deserialize)]
pub struct ListMealPlansResponse {
    pub meal_plans: Vec<MealPlanSummary>,
    pub total: usize,
}

/// Meal plan routes handler
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create all meal plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meal-plans", get(Self::handle_list))
            .route("/api/meal-plans", post(Self::handle_create))
            .route("/api/meal-plans/:id", get(Self::handle_detail))
            .route("/api/meal-plans/:id/customize", post(Self::handle_customize))
            .with_state(resources)
    }

    /// Look up a plan and verify the caller owns it
    async fn get_owned_plan(
        resources: &Arc<ServerResources>,
        plan_id: Uuid,
        owner_id: Uuid,
    ) -> Result<MealPlan, AppError> {
        let plan = resources
            .database
            .get_meal_plan(plan_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("Meal plan {plan_id}")))?;

        // Another user's plan is indistinguishable from a missing one
        if plan.user_id != owner_id {
            return Err(AppError::not_found(format!("Meal plan {plan_id}")));
        }
        Ok(plan)
    }

    fn parse_plan_id(id: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(id).map_err(|_| AppError::not_found(format!("Meal plan {id}")))
    }

    /// Handle GET /api/meal-plans — list the caller's plans
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let plans = resources
            .database
            .list_meal_plans(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let response = ListMealPlansResponse {
            total: plans.len(),
            meal_plans: plans
                .into_iter()
                .map(|plan| MealPlanSummary {
                    id: plan.id.to_string(),
                    start_date: plan.start_date.to_rfc3339(),
                    duration: plan.duration.to_string(),
                    meal_count: plan.meals.len(),
                })
                .collect(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/meal-plans — generate a plan for the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateMealPlanRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let duration = PlanDuration::parse(&request.duration);
        let plan_id = resources
            .generator
            .generate(auth.user_id, &request.preferences, duration)
            .await?;

        let plan = resources
            .database
            .get_meal_plan(plan_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::internal("Generated plan vanished before read-back"))?;

        let response: MealPlanResponse = plan.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/meal-plans/:id — plan detail
    async fn handle_detail(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plan_id = Self::parse_plan_id(&id)?;

        let plan = Self::get_owned_plan(&resources, plan_id, auth.user_id).await?;

        let response: MealPlanResponse = plan.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/meal-plans/:id/customize
    async fn handle_customize(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<CustomizeMealPlanRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plan_id = Self::parse_plan_id(&id)?;

        // Ownership check before mutation
        Self::get_owned_plan(&resources, plan_id, auth.user_id).await?;

        let plan = resources
            .customizer
            .customize(
                plan_id,
                request.new_servings,
                request.substitute_ingredient.as_ref(),
            )
            .await?;

        let response: MealPlanResponse = plan.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
