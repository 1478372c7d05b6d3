// ABOUTME: Meal plan generator: per-day randomized selection from the filtered recipe pool
// ABOUTME: Persists exactly one plan document on success, nothing on an all-empty result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Meal plan generation

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{MealPlan, PlanDuration, PreferenceFilter};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Generates meal plans by independent per-day draws from the recipe store.
///
/// The random source is injected so generation is deterministic under test:
/// production uses an entropy-seeded [`StdRng`], tests hand in a fixed seed.
pub struct PlanGenerator {
    database: Database,
    rng: Mutex<StdRng>,
}

impl PlanGenerator {
    /// Create a generator with an entropy-seeded random source
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self::with_rng(database, StdRng::from_entropy())
    }

    /// Create a generator with an explicit random source (deterministic tests)
    #[must_use]
    pub fn with_rng(database: Database, rng: StdRng) -> Self {
        Self {
            database,
            rng: Mutex::new(rng),
        }
    }

    /// Generate and persist a meal plan for `owner_id`.
    ///
    /// For each day of the duration the recipe store is queried afresh with
    /// the preference filter. Days with zero matches are skipped outright; a
    /// matching day contributes one uniformly random snapshot. If no day
    /// matched, nothing is persisted and a no-match error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::NoMatchingRecipes`] when every day
    /// came up empty, or a database error if a store operation fails
    pub async fn generate(
        &self,
        owner_id: Uuid,
        filter: &PreferenceFilter,
        duration: PlanDuration,
    ) -> Result<Uuid, AppError> {
        let mut plan = MealPlan::new(owner_id, duration);

        for day in 0..duration.day_count() {
            let candidates = self
                .database
                .find_recipes(filter)
                .await
                .map_err(|e| AppError::database(e.to_string()))?;

            if candidates.is_empty() {
                debug!("No matching recipes for day {day}, skipping");
                continue;
            }

            let pick = {
                let mut rng = self.rng.lock().await;
                candidates.choose(&mut *rng).cloned()
            };
            if let Some(recipe) = pick {
                plan.meals.push(recipe);
            }
        }

        if plan.meals.is_empty() {
            return Err(AppError::no_matching_recipes());
        }

        let plan_id = self
            .database
            .insert_meal_plan(&plan)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!(
            "Generated {} plan {plan_id} with {} meals for user {owner_id}",
            duration,
            plan.meals.len()
        );
        Ok(plan_id)
    }
}
