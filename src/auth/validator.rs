//! Token validator
//!
//! Bearer-token guard for protected routes. Accepts the token from either
//! `X-Api-Key` or `Authorization: Bearer`.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use subtle::ConstantTimeEq;

use super::guard::{AccessGuard, AuthContext};

const API_KEY_HEADER: &str = "x-api-key";

/// Performs basic input sanitation on a presented token.
fn is_valid_input(input: &str) -> bool {
    !input.trim().is_empty() && !input.contains(['\r', '\n', '\0'])
}

/// Pulls the presented token out of the request headers, if any.
fn presented_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
}

/// Guard that admits callers presenting a shared secret token
pub struct BearerToken {
    expected: String,
}

impl BearerToken {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Compares in constant time so response timing does not leak the token.
    pub fn validate_token(&self, token: &str) -> bool {
        is_valid_input(token)
            && token.len() == self.expected.len()
            && token.as_bytes().ct_eq(self.expected.as_bytes()).into()
    }
}

impl AccessGuard for BearerToken {
    fn check(&self, headers: &HeaderMap) -> AuthContext {
        match presented_token(headers) {
            Some(token) if self.validate_token(token) => AuthContext::granted(),
            _ => AuthContext::denied(),
        }
    }
}
