// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed server, database, auth, and supplier configs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Default HTTP port when `HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default session token lifetime in hours
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
/// Default SQLite database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/mealplan.db";
/// Default recipe supplier API host
const DEFAULT_SUPPLIER_BASE_URL: &str = "https://api.spoonacular.com";

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection string (`sqlite:` URL or file path)
    pub url: String,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_expiry_hours: i64,
}

/// Recipe supplier (third-party search API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// Base URL of the supplier API
    pub base_url: String,
    /// Supplier API credential, appended to every search request
    pub api_key: String,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SUPPLIER_BASE_URL.into(),
            api_key: String::new(),
        }
    }
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port for the web API
    pub http_port: u16,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Recipe supplier settings
    pub supplier: SupplierConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; everything else has a default. A missing
    /// `SUPPLIER_API_KEY` is tolerated (supplier requests will be rejected
    /// upstream) but logged so misconfiguration is visible at startup.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is unset or a numeric variable fails
    /// to parse.
    pub fn from_env() -> Result<Self> {
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
            .parse::<u16>()
            .context("Invalid HTTP_PORT value")?;

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
        };

        let auth = AuthConfig {
            jwt_secret: env::var("JWT_SECRET")
                .context("JWT_SECRET environment variable is required")?,
            token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_HOURS.to_string())
                .parse::<i64>()
                .context("Invalid TOKEN_EXPIRY_HOURS value")?,
        };

        let supplier = SupplierConfig {
            base_url: env::var("SUPPLIER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SUPPLIER_BASE_URL.into()),
            api_key: env::var("SUPPLIER_API_KEY").unwrap_or_default(),
        };
        if supplier.api_key.is_empty() {
            warn!("SUPPLIER_API_KEY is not set; recipe suggestions will fail upstream");
        }

        Ok(Self {
            http_port,
            database,
            auth,
            supplier,
        })
    }

    /// One-line startup summary, safe to log (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} supplier={} token_expiry={}h",
            self.http_port, self.database.url, self.supplier.base_url, self.auth.token_expiry_hours
        )
    }
}
