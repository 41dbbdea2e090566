//! Shared types for the API layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::auth::TokenSigner;
use crate::db::Database;

/// Shared context for all routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Database,
    pub tokens: Arc<TokenSigner>,
}

impl ApiContext {
    pub fn new(db: Database, tokens: TokenSigner) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
        }
    }
}

/// Authenticated user, injected into request extensions by the auth
/// middleware after token verification.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub usuario_id: i64,
}

/// `?page=&per_page=` on list endpoints.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaginationQuery {
    /// Resolve to `(page, per_page, offset)` with defaults 1 and 20.
    /// Values below 1 are clamped.
    pub fn limites(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).max(1);
        (page, per_page, (page - 1) * per_page)
    }
}
