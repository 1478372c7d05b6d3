// ABOUTME: HTTP server assembly: router construction and listener startup
// ABOUTME: Merges domain routers and applies trace and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! HTTP server assembly

use crate::config::ServerConfig;
use crate::resources::ServerResources;
use crate::routes::{
    auth::AuthRoutes, health::HealthRoutes, meal_plans::MealPlanRoutes, profile::ProfileRoutes,
    recipes::RecipeRoutes,
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(ProfileRoutes::routes(resources.clone()))
        .merge(MealPlanRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the HTTP listener and serve until shutdown
///
/// # Errors
///
/// Returns an error if binding or serving fails
pub async fn run(config: &ServerConfig, resources: Arc<ServerResources>) -> Result<()> {
    let app = router(resources);

    let listener = TcpListener::bind(("0.0.0.0", config.http_port)).await?;
    info!("HTTP server listening on port {}", config.http_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, stopping HTTP server");
    }
}
