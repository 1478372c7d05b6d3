// ABOUTME: Core meal-plan components: generation and customization
// ABOUTME: Re-exports PlanGenerator and PlanCustomizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Meal-plan generation and customization.
//!
//! This is the core of the service. Generation is a per-day randomized draw
//! from the filtered recipe pool, not a scheduler: there is no deduplication
//! across days, no nutritional balancing, and no constraint solving.

pub mod customizer;
pub mod generator;

pub use customizer::PlanCustomizer;
pub use generator::PlanGenerator;
