// ABOUTME: Main library entry point for the meal-planning web service
// ABOUTME: Exposes the planner core, storage, auth, supplier bridge, and HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

#![deny(unsafe_code)]

//! # Mealplan Server
//!
//! A meal-planning web service: users register, log in, set dietary
//! preferences, and receive generated meal plans composed of recipes pulled
//! from the local recipe store or a third-party recipe API.
//!
//! ## Architecture
//!
//! - **Planner**: plan generation (per-day randomized selection) and
//!   customization (servings overwrite, ingredient substitution)
//! - **Database**: SQLite-backed user, recipe, and meal-plan stores
//! - **External**: the recipe supplier client and store-refill bridge
//! - **Auth**: bcrypt credentials and JWT session tokens
//! - **Routes**: the REST surface over all of the above
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealplan_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Mealplan server configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

/// Authentication and session management
pub mod auth;

/// Configuration management
pub mod config;

/// User, recipe, and meal-plan storage
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// External API clients (recipe supplier)
pub mod external;

/// Production logging and structured output
pub mod logging;

/// Common data models for the meal-planning domain
pub mod models;

/// Meal-plan generation and customization core
pub mod planner;

/// Shared server state for route handlers
pub mod resources;

/// HTTP routes for account, profile, meal-plan, and recipe endpoints
pub mod routes;

/// HTTP server assembly
pub mod server;
