// ABOUTME: Database management over a SQLite pool with per-domain operation modules
// ABOUTME: Handles user, recipe, and meal-plan storage plus schema migration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! # Database Management
//!
//! Storage layer for the meal-planning server. One [`Database`] wraps a
//! SQLite pool; user, recipe, and meal-plan operations live in their own
//! modules as `impl Database` blocks. The store layer reports failures with
//! `anyhow`; callers map them to typed application errors at the boundary.

mod meal_plans;
mod recipes;
mod users;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user, recipe, and meal-plan storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_meal_plans().await?;
        Ok(())
    }
}
