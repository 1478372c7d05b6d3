// ABOUTME: Meal plan customizer: blanket servings overwrite and ingredient substitution
// ABOUTME: Rewrites the stored plan document in full and returns the mutated plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Meal plan customization

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{IngredientSubstitution, MealPlan};
use tracing::info;
use uuid::Uuid;

/// Applies serving-size overrides and ingredient substitutions to stored plans
#[derive(Clone)]
pub struct PlanCustomizer {
    database: Database,
}

impl PlanCustomizer {
    /// Create a customizer over the given store
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Customize an existing plan in place.
    ///
    /// `new_servings` overwrites the servings field on every meal uniformly.
    /// A substitution merges its present fields into every ingredient whose
    /// name matches exactly, across all meals. The whole mutated document is
    /// written back (full replace, last-write-wins).
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the plan id is unknown, an invalid-input
    /// error for a zero servings value, or a database error on store failure
    pub async fn customize(
        &self,
        plan_id: Uuid,
        new_servings: Option<u32>,
        substitution: Option<&IngredientSubstitution>,
    ) -> Result<MealPlan, AppError> {
        let mut plan = self
            .database
            .get_meal_plan(plan_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("Meal plan {plan_id}")))?;

        if let Some(servings) = new_servings {
            if servings == 0 {
                return Err(AppError::invalid_input(
                    "new_servings must be a positive integer",
                ));
            }
            for meal in &mut plan.meals {
                meal.servings = servings;
            }
        }

        if let Some(substitution) = substitution {
            for meal in &mut plan.meals {
                for ingredient in &mut meal.ingredients {
                    if ingredient.name == substitution.name {
                        ingredient.apply(substitution);
                    }
                }
            }
        }

        self.database
            .replace_meal_plan(&plan)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        info!("Customized meal plan {plan_id}");
        Ok(plan)
    }
}
