// ABOUTME: Core domain models for users, recipes, meal plans, and preference filters
// ABOUTME: PlanDuration, PreferenceFilter, Ingredient, Recipe, MealPlan, and User definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! Common data models for the meal-planning domain.
//!
//! Recipes embedded in a plan are snapshots: they are copied out of the
//! recipe store at generation time, so later edits to the stored recipe do
//! not retroactively alter historical plans.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Duration category for a generated meal plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanDuration {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl PlanDuration {
    /// Number of days of meals to generate for this duration
    #[must_use]
    pub const fn day_count(&self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parse from string, falling back to `Daily` for unrecognized values.
    ///
    /// The fallback is deliberate legacy behavior: callers sending an unknown
    /// duration get a one-day plan rather than a validation error. The gap is
    /// logged so it stays visible.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            other => {
                warn!("Unrecognized plan duration {other:?}, falling back to daily");
                Self::Daily
            }
        }
    }
}

impl Display for PlanDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque key-value equality predicate used to narrow candidate recipes.
///
/// The same filter drives both the local recipe store query and the supplier
/// search request. A pair matches a recipe document when the document field
/// equals the value; array fields match by membership, so `{"diets": "vegan"}`
/// matches a recipe whose `diets` array contains `"vegan"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PreferenceFilter(BTreeMap<String, String>);

impl PreferenceFilter {
    /// Create an empty filter (matches every recipe)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a key-value pair
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether the filter has no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a recipe document satisfies every pair of the filter
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        self.0
            .iter()
            .all(|(key, expected)| Self::field_matches(document.get(key), expected))
    }

    fn field_matches(field: Option<&Value>, expected: &str) -> bool {
        match field {
            Some(Value::String(s)) => s == expected,
            Some(Value::Array(items)) => items
                .iter()
                .any(|item| Self::field_matches(Some(item), expected)),
            Some(Value::Number(n)) => n.to_string() == expected,
            Some(Value::Bool(b)) => b.to_string() == expected,
            _ => false,
        }
    }

    /// Deterministically ordered key-value pairs for the supplier query string
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl From<BTreeMap<String, String>> for PreferenceFilter {
    fn from(pairs: BTreeMap<String, String>) -> Self {
        Self(pairs)
    }
}

/// One ingredient of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    /// Ingredient name, matched exactly by substitutions
    pub name: String,
    /// Quantity in `unit` units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Measurement unit (e.g. "g", "tsp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Merge the substitute's fields into this ingredient in place.
    /// Fields absent from the substitution are left untouched.
    pub fn apply(&mut self, substitution: &IngredientSubstitution) {
        if let Some(new_name) = &substitution.new_name {
            self.name.clone_from(new_name);
        }
        if let Some(amount) = substitution.amount {
            self.amount = Some(amount);
        }
        if let Some(unit) = &substitution.unit {
            self.unit = Some(unit.clone());
        }
    }
}

/// Replacement attributes for ingredients matching `name`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientSubstitution {
    /// Exact name of the ingredient to replace
    pub name: String,
    /// Replacement name, if the name itself should change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Replacement quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Replacement unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A recipe record, sourced from local storage or the external supplier.
///
/// Unknown supplier fields are preserved in `extra` so supplier-native
/// documents round-trip through the store unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Supplier-assigned identifier, unique within the recipe store
    pub id: i64,
    /// Recipe name
    pub name: String,
    /// Servings the ingredient quantities are scaled for
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Supplier-native fields carried through as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

const fn default_servings() -> u32 {
    1
}

/// A persisted sequence of recipe selections for a user over a time window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    /// Opaque identifier assigned at creation
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Generation timestamp
    pub start_date: DateTime<Utc>,
    /// Requested duration category
    pub duration: PlanDuration,
    /// Ordered recipe snapshots, one per day that produced a match
    pub meals: Vec<Recipe>,
}

impl MealPlan {
    /// Create an empty plan owned by `user_id`, timestamped now
    #[must_use]
    pub fn new(user_id: Uuid, duration: PlanDuration) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            start_date: Utc::now(),
            duration,
            meals: Vec::new(),
        }
    }
}

/// Represents a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (unique, used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password for authentication
    pub password_hash: String,
    /// Free-text dietary preferences (e.g. "vegan, high protein")
    pub dietary_preferences: String,
    /// Free-text restrictions (e.g. "no peanuts")
    pub restrictions: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given email and password hash
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            dietary_preferences: String::new(),
            restrictions: String::new(),
            created_at: now,
            last_active: now,
        }
    }
}
