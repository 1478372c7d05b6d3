// ABOUTME: End-to-end HTTP test exercising the full REST surface over a real listener
// ABOUTME: Registers, logs in, generates, customizes, and checks auth failures via reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use mealplan_server::config::{AuthConfig, DatabaseConfig, ServerConfig, SupplierConfig};
use mealplan_server::database::Database;
use mealplan_server::resources::ServerResources;
use mealplan_server::routes::auth::{LoginResponse, RegisterResponse};
use mealplan_server::routes::meal_plans::{ListMealPlansResponse, MealPlanResponse};
use mealplan_server::server;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Spawn the full router on an OS-assigned port, returning its base URL.
///
/// The `TempDir` keeps the backing database file alive for the test.
async fn spawn_server() -> (String, Database, TempDir) {
    let (database, dir) = common::test_database().await;

    let config = ServerConfig {
        http_port: 0,
        database: DatabaseConfig {
            url: "unused-in-test".into(),
        },
        auth: AuthConfig {
            jwt_secret: "e2e-test-secret-not-for-production".into(),
            token_expiry_hours: 1,
        },
        supplier: SupplierConfig::default(),
    };

    let resources = Arc::new(ServerResources::new(&config, database.clone()));
    let app = server::router(resources);

    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), database, dir)
}

async fn register_and_login(client: &reqwest::Client, base: &str, email: &str) -> String {
    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"name": "E2E User", "email": email, "password": "hunter2hunter2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: RegisterResponse = response.json().await.unwrap();
    assert!(!body.user_id.is_empty());

    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"email": email, "password": "hunter2hunter2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("auth_token="));

    let body: LoginResponse = response.json().await.unwrap();
    assert_eq!(body.user.email, email);
    body.token
}

#[tokio::test]
async fn full_plan_lifecycle_over_http() {
    let (base, db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let token = register_and_login(&client, &base, "lifecycle@example.com").await;
    common::seed_vegan_recipes(&db, 1, 10).await;

    // Generate a weekly vegan plan
    let response = client
        .post(format!("{base}/api/meal-plans"))
        .bearer_auth(&token)
        .json(&json!({"duration": "weekly", "preferences": {"diets": "vegan"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let plan: MealPlanResponse = response.json().await.unwrap();
    assert_eq!(plan.duration, "weekly");
    assert_eq!(plan.meals.len(), 7);
    for meal in &plan.meals {
        assert!((1..=10).contains(&meal.id));
    }

    // Detail read returns the same plan
    let response = client
        .get(format!("{base}/api/meal-plans/{}", plan.id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let detail: MealPlanResponse = response.json().await.unwrap();
    assert_eq!(detail.id, plan.id);

    // Customize: blanket servings plus a salt substitution
    let response = client
        .post(format!("{base}/api/meal-plans/{}/customize", plan.id))
        .bearer_auth(&token)
        .json(&json!({
            "new_servings": 4,
            "substitute_ingredient": {"name": "salt", "new_name": "sea salt", "amount": 2.0}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let customized: MealPlanResponse = response.json().await.unwrap();
    for meal in &customized.meals {
        assert_eq!(meal.servings, 4);
        assert_eq!(meal.ingredients[0].name, "sea salt");
        assert_eq!(meal.ingredients[0].amount, Some(2.0));
    }

    // The list shows the single plan
    let response = client
        .get(format!("{base}/api/meal-plans"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let list: ListMealPlansResponse = response.json().await.unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.meal_plans[0].meal_count, 7);
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/api/meal-plans"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");

    let response = client
        .get(format!("{base}/api/profile"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    register_and_login(&client, &base, "dupe@example.com").await;

    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"email": "dupe@example.com", "password": "hunter2hunter2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn wrong_password_and_weak_registration_are_rejected() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({"email": "weak@example.com", "password": "short"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    register_and_login(&client, &base, "secure@example.com").await;
    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"email": "secure@example.com", "password": "wrong-password"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn empty_store_yields_404_with_error_envelope() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "hungry@example.com").await;

    let response = client
        .post(format!("{base}/api/meal-plans"))
        .bearer_auth(&token)
        .json(&json!({"duration": "weekly"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NO_MATCHING_RECIPES");
}

#[tokio::test]
async fn plans_are_invisible_to_other_users() {
    let (base, db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let owner_token = register_and_login(&client, &base, "plan-owner@example.com").await;
    let other_token = register_and_login(&client, &base, "intruder@example.com").await;
    common::seed_vegan_recipes(&db, 1, 3).await;

    let response = client
        .post(format!("{base}/api/meal-plans"))
        .bearer_auth(&owner_token)
        .json(&json!({"duration": "daily"}))
        .send()
        .await
        .unwrap();
    let plan: MealPlanResponse = response.json().await.unwrap();

    let response = client
        .get(format!("{base}/api/meal-plans/{}", plan.id))
        .bearer_auth(&other_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .post(format!("{base}/api/meal-plans/{}/customize", plan.id))
        .bearer_auth(&other_token)
        .json(&json!({"new_servings": 2}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn profile_round_trips_over_http() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "profile@example.com").await;

    let response = client
        .put(format!("{base}/api/profile"))
        .bearer_auth(&token)
        .json(&json!({
            "dietary_preferences": "vegan, high protein",
            "restrictions": "no peanuts"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{base}/api/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["dietary_preferences"], "vegan, high protein");
    assert_eq!(body["restrictions"], "no peanuts");
    // Absent fields kept their values
    assert_eq!(body["display_name"], "E2E User");
}

#[tokio::test]
async fn health_endpoints_answer_without_auth() {
    let (base, _db, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    for path in ["/health", "/ready"] {
        let response = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }
}
