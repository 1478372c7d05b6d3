// ABOUTME: Configuration module for environment-based server settings
// ABOUTME: Re-exports ServerConfig and its typed sub-configurations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Configuration management.
//!
//! All runtime configuration comes from environment variables, parsed once at
//! startup into [`ServerConfig`].

pub mod environment;

pub use environment::{AuthConfig, DatabaseConfig, ServerConfig, SupplierConfig};
