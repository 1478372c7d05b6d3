// ABOUTME: External API client modules (recipe supplier)
// ABOUTME: Provides the supplier search client and the store-refill bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! External API Clients
//!
//! Clients for third-party services the meal planner depends on. Today that
//! is a single recipe search supplier.

pub mod supplier;

pub use supplier::{RecipeSuggester, SupplierClient};
