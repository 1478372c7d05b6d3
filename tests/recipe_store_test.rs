// ABOUTME: Integration tests for the recipe store
// ABOUTME: Covers id-based dedup, filter queries, and document round-trips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use mealplan_server::models::{PreferenceFilter, Recipe};
use serde_json::json;

#[tokio::test]
async fn duplicate_ids_are_ignored() {
    let (db, _dir) = common::test_database().await;

    let recipe = common::vegan_recipe(42, "Tofu Scramble");
    assert!(db.insert_recipe_if_absent(&recipe).await.unwrap());
    assert!(!db.insert_recipe_if_absent(&recipe).await.unwrap());

    // A different document under the same id is also ignored
    let renamed = common::vegan_recipe(42, "Something Else");
    assert!(!db.insert_recipe_if_absent(&renamed).await.unwrap());

    assert_eq!(db.count_recipes().await.unwrap(), 1);
    let stored = db.find_recipes(&PreferenceFilter::new()).await.unwrap();
    assert_eq!(stored[0].name, "Tofu Scramble");
}

#[tokio::test]
async fn count_grows_only_with_new_ids() {
    let (db, _dir) = common::test_database().await;
    common::seed_vegan_recipes(&db, 1, 5).await;
    assert_eq!(db.count_recipes().await.unwrap(), 5);

    // Re-seeding the same ids adds nothing
    common::seed_vegan_recipes(&db, 1, 5).await;
    assert_eq!(db.count_recipes().await.unwrap(), 5);

    common::seed_vegan_recipes(&db, 6, 2).await;
    assert_eq!(db.count_recipes().await.unwrap(), 7);
}

#[tokio::test]
async fn find_applies_the_filter() {
    let (db, _dir) = common::test_database().await;
    common::seed_vegan_recipes(&db, 1, 3).await;
    for id in 10..12 {
        let recipe = common::tagged_recipe(id, &format!("Dish {id}"), &["keto"]);
        db.insert_recipe_if_absent(&recipe).await.unwrap();
    }

    let vegan = db
        .find_recipes(&PreferenceFilter::new().with("diets", "vegan"))
        .await
        .unwrap();
    assert_eq!(vegan.len(), 3);

    let keto = db
        .find_recipes(&PreferenceFilter::new().with("diets", "keto"))
        .await
        .unwrap();
    assert_eq!(keto.len(), 2);

    let all = db.find_recipes(&PreferenceFilter::new()).await.unwrap();
    assert_eq!(all.len(), 5);

    let none = db
        .find_recipes(&PreferenceFilter::new().with("diets", "carnivore"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn supplier_documents_round_trip_through_the_store() {
    let (db, _dir) = common::test_database().await;

    let document = json!({
        "id": 715_594,
        "name": "Homemade Garlic and Basil French Fries",
        "servings": 2,
        "ingredients": [{"name": "potato", "amount": 3.0, "unit": "whole"}],
        "readyInMinutes": 45,
        "sourceUrl": "https://example.com/fries",
        "diets": ["vegan", "gluten free"]
    });
    let recipe: Recipe = serde_json::from_value(document.clone()).unwrap();
    db.insert_recipe_if_absent(&recipe).await.unwrap();

    let stored = db
        .find_recipes(&PreferenceFilter::new().with("diets", "gluten free"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(serde_json::to_value(&stored[0]).unwrap(), document);
}
