//! Access guards
//!
//! Turns an incoming request into a yes/no capability the responder consumes.

use axum::http::HeaderMap;

/// Whether the current caller may read from the storage root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub permitted: bool,
}

impl AuthContext {
    pub fn granted() -> Self {
        Self { permitted: true }
    }

    pub fn denied() -> Self {
        Self { permitted: false }
    }
}

/// Decides, from request headers alone, whether a caller is permitted
pub trait AccessGuard: Send + Sync {
    fn check(&self, headers: &HeaderMap) -> AuthContext;
}

/// Guard for public routes
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessGuard for AllowAll {
    fn check(&self, _headers: &HeaderMap) -> AuthContext {
        AuthContext::granted()
    }
}

impl<F> AccessGuard for F
where
    F: Fn(&HeaderMap) -> bool + Send + Sync,
{
    fn check(&self, headers: &HeaderMap) -> AuthContext {
        AuthContext { permitted: self(headers) }
    }
}
