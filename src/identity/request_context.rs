//! Per-request authentication context built from the Authorization header.

use axum::http::{header, HeaderMap};

use super::token::TokenCodec;
use crate::catalog::model::User;
use crate::catalog::store::UserDirectory;
use crate::error::{AppError, AppResult};

/// Request-scoped context handed to resolvers. Constructed fresh for every
/// request and owned by it; never shared or reused across requests.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub current_user: Option<User>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { current_user: None }
    }

    pub fn for_user(user: User) -> Self {
        Self { current_user: Some(user) }
    }

    /// Authorization gate used by mutating resolvers.
    pub fn require_user(&self) -> AppResult<&User> {
        self.current_user
            .as_ref()
            .ok_or_else(|| AppError::auth("not_authenticated", "not authenticated"))
    }
}

const BEARER_PREFIX: &str = "bearer ";

/// Build the request context from inbound headers.
///
/// No Authorization header, or a non-Bearer scheme, yields an anonymous
/// context; anonymous access is valid for read operations. A Bearer token
/// that fails verification fails the whole request. A verified token whose
/// user id matches no record falls back to anonymous.
pub async fn context_for_headers(
    headers: &HeaderMap,
    codec: &TokenCodec,
    users: &dyn UserDirectory,
) -> AppResult<RequestContext> {
    let Some(raw) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return Ok(RequestContext::anonymous());
    };
    // Scheme match is case-insensitive; the header value is ASCII here
    // since to_str() already rejected anything else.
    if raw.len() < BEARER_PREFIX.len() || !raw[..BEARER_PREFIX.len()].eq_ignore_ascii_case(BEARER_PREFIX) {
        return Ok(RequestContext::anonymous());
    }
    let claims = codec.verify(&raw[BEARER_PREFIX.len()..])?;
    match users.find_by_id(&claims.id).await? {
        Some(user) => Ok(RequestContext::for_user(user)),
        None => {
            tracing::debug!(target: "auth", "verified token for unknown user id {}", claims.id);
            Ok(RequestContext::anonymous())
        }
    }
}
