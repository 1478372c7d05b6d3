// ABOUTME: Recipe supplier API client and store-refill bridge
// ABOUTME: Single best-effort complexSearch call plus idempotent recipe store inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Recipe Supplier Client
//!
//! Client for the third-party recipe search API. The contract is deliberately
//! minimal: one synchronous GET to `/recipes/complexSearch` with the caller's
//! preference pairs and the API credential, parse the `results` array, done.
//! No retry, no pagination, no timeout handling; any network or parse failure
//! propagates to the caller as an external-service error.
//!
//! [`RecipeSuggester`] wraps the client and offers every fetched recipe to
//! the local recipe store via idempotent insert, so repeated suggestions
//! never duplicate records.

use crate::config::SupplierConfig;
use crate::database::Database;
use crate::errors::AppError;
use crate::models::{PreferenceFilter, Recipe};
use serde::Deserialize;
use tracing::{debug, info};

/// Name used when reporting supplier failures
const SUPPLIER_SERVICE: &str = "Recipe supplier";

/// Supplier search response body
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Recipe>,
}

/// Recipe supplier API client
#[derive(Clone)]
pub struct SupplierClient {
    config: SupplierConfig,
    http_client: reqwest::Client,
}

impl SupplierClient {
    /// Create a new supplier client
    #[must_use]
    pub fn new(config: SupplierConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Issue a single best-effort search request against the supplier.
    ///
    /// # Errors
    ///
    /// Returns an external-service error on any network failure, non-success
    /// status, or malformed response body
    pub async fn search(&self, filter: &PreferenceFilter) -> Result<Vec<Recipe>, AppError> {
        let url = format!("{}/recipes/complexSearch", self.config.base_url);

        let mut pairs = filter.query_pairs();
        pairs.push(("apiKey".into(), self.config.api_key.clone()));

        debug!("Supplier search: {url} with {} filter pairs", pairs.len() - 1);

        let response = self
            .http_client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| AppError::external_service(SUPPLIER_SERVICE, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                SUPPLIER_SERVICE,
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(SUPPLIER_SERVICE, format!("JSON parse error: {e}"))
        })?;

        Ok(body.results)
    }
}

/// Bridge between the supplier and the local recipe store.
///
/// `suggest` returns the recipes the supplier produced and, as a side effect,
/// refills the recipe store with any ids it has not seen before.
#[derive(Clone)]
pub struct RecipeSuggester {
    client: SupplierClient,
    database: Database,
}

impl RecipeSuggester {
    /// Create a new suggester over the given client and store
    #[must_use]
    pub fn new(client: SupplierClient, database: Database) -> Self {
        Self { client, database }
    }

    /// Fetch supplier suggestions for a preference filter and store new ones.
    ///
    /// # Errors
    ///
    /// Propagates supplier failures unchanged; store failures surface as
    /// database errors
    pub async fn suggest(&self, filter: &PreferenceFilter) -> Result<Vec<Recipe>, AppError> {
        let recipes = self.client.search(filter).await?;

        let mut stored = 0usize;
        for recipe in &recipes {
            if self
                .database
                .insert_recipe_if_absent(recipe)
                .await
                .map_err(|e| AppError::database(e.to_string()))?
            {
                stored += 1;
            }
        }

        info!(
            "Supplier returned {} recipes, {stored} newly stored",
            recipes.len()
        );
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_query_pairs_are_deterministic_and_credentialed() {
        let filter = PreferenceFilter::new()
            .with("query", "pasta")
            .with("diet", "vegan");

        let config = SupplierConfig {
            base_url: "https://supplier.test".into(),
            api_key: "secret-key".into(),
        };
        let client = SupplierClient::new(config);

        let mut pairs = filter.query_pairs();
        pairs.push(("apiKey".into(), client.config.api_key.clone()));

        // BTreeMap ordering keeps the preference pairs stable; the credential
        // is always appended last, matching the supplier's expected shape.
        assert_eq!(
            pairs,
            vec![
                ("diet".into(), "vegan".into()),
                ("query".into(), "pasta".into()),
                ("apiKey".into(), "secret-key".into()),
            ]
        );
    }

    #[test]
    fn test_search_response_parses_results_field() {
        let body = r#"{
            "results": [
                {"id": 1, "name": "Tofu Bowl", "servings": 2, "ingredients": []},
                {"id": 2, "name": "Lentil Soup"}
            ],
            "offset": 0,
            "totalResults": 2
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].name, "Tofu Bowl");
        // Missing servings defaults to one
        assert_eq!(parsed.results[1].servings, 1);
    }
}
