//! Unified application error model and mapping helpers.
//! This module provides a common error enum used across the request path
//! (context building, resolvers, store implementations), along with helper
//! mappers to GraphQL error extensions and plain HTTP.

use async_graphql::ErrorExtensions;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    Auth { code: String, message: String },
    UserInput { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Auth { code, .. }
            | AppError::UserInput { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Auth { message, .. }
            | AppError::UserInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn auth<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn user<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn not_found<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn internal<C: Into<String>, M: Into<String>>(code: C, msg: M) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Machine-readable code surfaced in GraphQL error extensions.
    /// Matches the Apollo server conventions so existing clients keep working.
    pub fn graphql_code(&self) -> &'static str {
        match self {
            AppError::Auth { .. } => "UNAUTHENTICATED",
            AppError::UserInput { .. } => "BAD_USER_INPUT",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Map to HTTP status code for non-GraphQL surfaces.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Auth { .. } => 401,
            AppError::UserInput { .. } => 400,
            AppError::NotFound { .. } => 404,
            AppError::Internal { .. } => 500,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { code: "internal".into(), message: err.to_string() }
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message().to_string())
            .extend_with(|_, e| e.set("code", self.graphql_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(AppError::auth("auth", "no").http_status(), 401);
        assert_eq!(AppError::user("bad_input", "oops").http_status(), 400);
        assert_eq!(AppError::not_found("not_found", "missing").http_status(), 404);
        assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
    }

    #[test]
    fn graphql_code_mapping() {
        assert_eq!(AppError::auth("auth", "no").graphql_code(), "UNAUTHENTICATED");
        assert_eq!(AppError::user("bad_input", "oops").graphql_code(), "BAD_USER_INPUT");
        assert_eq!(AppError::not_found("nf", "missing").graphql_code(), "NOT_FOUND");
        assert_eq!(AppError::internal("internal", "x").graphql_code(), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn extensions_carry_code_and_message() {
        let err = AppError::auth("invalid_token", "invalid authentication token").extend();
        assert_eq!(err.message, "invalid authentication token");
        let ext = serde_json::to_value(err.extensions.expect("extensions present")).expect("serializable");
        assert_eq!(ext["code"], "UNAUTHENTICATED");
    }
}
