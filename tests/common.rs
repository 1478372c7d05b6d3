// ABOUTME: Shared helpers for integration tests
// ABOUTME: Temp-file databases, seeded RNGs, and recipe/user fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // Not every test file uses every helper

use mealplan_server::database::Database;
use mealplan_server::models::{Recipe, User};
use mealplan_server::planner::PlanGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tempfile::TempDir;

/// Create a migrated database backed by a temp file.
///
/// The `TempDir` must stay alive for the duration of the test.
pub async fn test_database() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("test.db");
    let db = Database::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("Failed to create test database");
    (db, dir)
}

/// Deterministic generator for reproducible plan tests
pub fn seeded_generator(database: Database, seed: u64) -> PlanGenerator {
    PlanGenerator::with_rng(database, StdRng::seed_from_u64(seed))
}

/// A vegan-tagged recipe fixture with a salt and a tofu ingredient
pub fn vegan_recipe(id: i64, name: &str) -> Recipe {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "servings": 2,
        "diets": ["vegan"],
        "ingredients": [
            {"name": "salt", "amount": 1.0, "unit": "tsp"},
            {"name": "tofu", "amount": 200.0, "unit": "g"}
        ]
    }))
    .expect("Fixture recipe should deserialize")
}

/// A recipe fixture with arbitrary diet tags
pub fn tagged_recipe(id: i64, name: &str, diets: &[&str]) -> Recipe {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "servings": 4,
        "diets": diets,
        "ingredients": [
            {"name": "salt", "amount": 0.5, "unit": "tsp"}
        ]
    }))
    .expect("Fixture recipe should deserialize")
}

/// Seed `count` vegan recipes with ids starting at `first_id`
pub async fn seed_vegan_recipes(db: &Database, first_id: i64, count: i64) {
    for i in 0..count {
        let id = first_id + i;
        let recipe = vegan_recipe(id, &format!("Vegan Dish {id}"));
        db.insert_recipe_if_absent(&recipe)
            .await
            .expect("Seeding recipe should succeed");
    }
}

/// Create and store a user, returning the model
pub async fn create_test_user(db: &Database, email: &str) -> User {
    let user = User::new(
        email.into(),
        "$2b$12$fake.hash.for.tests.only.aaaaaaaaaaaaaaaaaaaaaaaaaaaa".into(),
        Some("Test User".into()),
    );
    db.create_user(&user).await.expect("User creation should succeed");
    user
}
