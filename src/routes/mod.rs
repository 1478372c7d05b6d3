// ABOUTME: HTTP route modules and shared request authentication helpers
// ABOUTME: Bearer-or-cookie token extraction used by every authenticated handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealplan Server Project

//! HTTP routes.
//!
//! Each domain gets a route struct with a `routes()` constructor returning an
//! axum `Router`; handlers are thin and delegate to the core components on
//! [`crate::resources::ServerResources`].

pub mod auth;
pub mod health;
pub mod meal_plans;
pub mod profile;
pub mod recipes;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Name of the session cookie set at login
pub const AUTH_COOKIE: &str = "auth_token";

/// Read a cookie value from the `Cookie` request header
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Extract and authenticate the caller from the authorization header or the
/// session cookie.
///
/// # Errors
///
/// Returns an auth error when no token is present or validation fails
pub fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthenticatedUser, AppError> {
    let token = if let Some(header) = headers.get("authorization").and_then(|h| h.to_str().ok()) {
        header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Malformed authorization header"))?
            .to_owned()
    } else if let Some(token) = get_cookie_value(headers, AUTH_COOKIE) {
        token
    } else {
        return Err(AppError::auth_required());
    };

    resources.auth_manager.authenticate_token(&token)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_get_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            "theme=dark; auth_token=abc.def.ghi; lang=en".parse().unwrap(),
        );

        assert_eq!(
            get_cookie_value(&headers, AUTH_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(get_cookie_value(&headers, "lang").as_deref(), Some("en"));
        assert!(get_cookie_value(&headers, "missing").is_none());
    }
}
