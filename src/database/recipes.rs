// ABOUTME: Recipe store database operations over supplier-native JSON documents
// ABOUTME: Idempotent insert keyed on supplier id and opaque-filter queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

use super::Database;
use crate::models::{PreferenceFilter, Recipe};
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create the recipes table.
    ///
    /// Recipes are stored as supplier-native JSON documents with the
    /// supplier-assigned id extracted into the primary key, which gives the
    /// at-most-once-per-id invariant for free.
    pub(super) async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                supplier_id INTEGER PRIMARY KEY,
                document TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a recipe unless one with the same supplier id is already stored.
    ///
    /// Returns `true` when the recipe was newly inserted, `false` when a
    /// record with that supplier id already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert_recipe_if_absent(&self, recipe: &Recipe) -> Result<bool> {
        let document = serde_json::to_string(recipe)?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO recipes (supplier_id, document) VALUES (?, ?)",
        )
        .bind(recipe.id)
        .bind(document)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Query the recipe store with an opaque preference filter.
    ///
    /// The predicate is evaluated over the stored documents here in the store
    /// layer; callers never see the underlying query mechanics.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored document is malformed
    pub async fn find_recipes(&self, filter: &PreferenceFilter) -> Result<Vec<Recipe>> {
        let rows = sqlx::query("SELECT document FROM recipes ORDER BY supplier_id")
            .fetch_all(&self.pool)
            .await?;

        let mut matches = Vec::new();
        for row in rows {
            let document: serde_json::Value =
                serde_json::from_str(&row.try_get::<String, _>("document")?)?;
            if filter.matches(&document) {
                matches.push(serde_json::from_value(document)?);
            }
        }
        Ok(matches)
    }

    /// Count stored recipes (used by tests and the readiness probe)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_recipes(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM recipes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}
