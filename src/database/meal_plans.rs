// ABOUTME: Meal plan store database operations
// ABOUTME: Insert, lookup, owner-scoped listing, and full-document replace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

use super::Database;
use crate::models::{MealPlan, PlanDuration, Recipe};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the meal plans table
    pub(super) async fn migrate_meal_plans(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                start_date DATETIME NOT NULL,
                duration TEXT NOT NULL CHECK (duration IN ('daily', 'weekly', 'monthly')),
                meals TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meal_plans_user_id ON meal_plans(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Persist a newly generated meal plan
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert_meal_plan(&self, plan: &MealPlan) -> Result<Uuid> {
        let meals = serde_json::to_string(&plan.meals)?;

        sqlx::query(
            r"
            INSERT INTO meal_plans (id, user_id, start_date, duration, meals)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.start_date)
        .bind(plan.duration.as_str())
        .bind(meals)
        .execute(&self.pool)
        .await?;

        Ok(plan.id)
    }

    /// Look up a meal plan by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_meal_plan(&self, plan_id: Uuid) -> Result<Option<MealPlan>> {
        let row = sqlx::query("SELECT * FROM meal_plans WHERE id = ?")
            .bind(plan_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Self::row_to_meal_plan(&r)).transpose()
    }

    /// List all meal plans owned by a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn list_meal_plans(&self, user_id: Uuid) -> Result<Vec<MealPlan>> {
        let rows = sqlx::query(
            "SELECT * FROM meal_plans WHERE user_id = ? ORDER BY start_date DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_meal_plan).collect()
    }

    /// Replace a stored meal plan document in full.
    ///
    /// Customization rewrites the entire document; there is no versioning, so
    /// concurrent replacements are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan does not exist or the update fails
    pub async fn replace_meal_plan(&self, plan: &MealPlan) -> Result<()> {
        let meals = serde_json::to_string(&plan.meals)?;

        let result = sqlx::query(
            r"
            UPDATE meal_plans
            SET user_id = ?, start_date = ?, duration = ?, meals = ?
            WHERE id = ?
            ",
        )
        .bind(plan.user_id.to_string())
        .bind(plan.start_date)
        .bind(plan.duration.as_str())
        .bind(meals)
        .bind(plan.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("Meal plan {} not found", plan.id));
        }
        Ok(())
    }

    /// Count stored meal plans (used by tests)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_meal_plans(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM meal_plans")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    fn row_to_meal_plan(row: &sqlx::sqlite::SqliteRow) -> Result<MealPlan> {
        let meals: Vec<Recipe> = serde_json::from_str(&row.try_get::<String, _>("meals")?)?;
        Ok(MealPlan {
            id: Uuid::parse_str(&row.try_get::<String, _>("id")?)?,
            user_id: Uuid::parse_str(&row.try_get::<String, _>("user_id")?)?,
            start_date: row.try_get::<DateTime<Utc>, _>("start_date")?,
            duration: PlanDuration::parse(&row.try_get::<String, _>("duration")?),
            meals,
        })
    }
}
