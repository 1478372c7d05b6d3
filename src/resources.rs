// ABOUTME: Shared server resources injected into route handlers as axum state
// ABOUTME: Bundles the database, auth manager, planner components, and supplier bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Shared server state.
//!
//! One [`ServerResources`] is built at startup and handed to every router
//! behind an `Arc`. Handlers reach collaborators through it instead of any
//! ambient state, which keeps the core independently testable.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::external::{RecipeSuggester, SupplierClient};
use crate::planner::{PlanCustomizer, PlanGenerator};

/// Everything route handlers need, wired once at startup
pub struct ServerResources {
    /// Storage layer
    pub database: Database,
    /// Session token and credential management
    pub auth_manager: AuthManager,
    /// Meal plan generation
    pub generator: PlanGenerator,
    /// Meal plan customization
    pub customizer: PlanCustomizer,
    /// Supplier bridge for recipe suggestions
    pub suggester: RecipeSuggester,
}

impl ServerResources {
    /// Wire up resources from configuration and an initialized database
    #[must_use]
    pub fn new(config: &ServerConfig, database: Database) -> Self {
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.clone().into_bytes(),
            config.auth.token_expiry_hours,
        );
        let supplier_client = SupplierClient::new(config.supplier.clone());

        Self {
            auth_manager,
            generator: PlanGenerator::new(database.clone()),
            customizer: PlanCustomizer::new(database.clone()),
            suggester: RecipeSuggester::new(supplier_client, database.clone()),
            database,
        }
    }
}
