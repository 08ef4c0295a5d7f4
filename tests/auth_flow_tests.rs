//! Authentication flow integration tests: token codec laws and the
//! per-request context built from the Authorization header.
//! These exercise positive and negative paths for every header shape.

use anyhow::Result;
use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;

use librarium::catalog::model::User;
use librarium::catalog::{MemoryCatalog, UserDirectory};
use librarium::identity::{context_for_headers, RequestContext, TokenCodec};

const SECRET: &str = "integration-test-secret";

fn codec() -> TokenCodec {
    TokenCodec::new(SECRET, Duration::minutes(60))
}

async fn directory_with_alice() -> (MemoryCatalog, User) {
    let store = MemoryCatalog::new();
    let alice = User::new("alice", "refactoring");
    store.insert_user(&alice).await.expect("insert user");
    (store, alice)
}

fn bearer_headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).expect("header value"));
    headers
}

#[tokio::test]
async fn missing_header_yields_anonymous_context() -> Result<()> {
    let (store, _alice) = directory_with_alice().await;
    let ctx = context_for_headers(&HeaderMap::new(), &codec(), &store).await?;
    assert!(ctx.current_user.is_none());
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_yields_anonymous_context() -> Result<()> {
    let (store, _alice) = directory_with_alice().await;
    for value in ["Basic dXNlcjpwYXNz", "Token abcdef", "Bearer"] {
        let ctx = context_for_headers(&bearer_headers(value), &codec(), &store).await?;
        assert!(ctx.current_user.is_none(), "expected anonymous for {:?}", value);
    }
    Ok(())
}

#[tokio::test]
async fn valid_token_resolves_current_user() -> Result<()> {
    let (store, alice) = directory_with_alice().await;
    let c = codec();
    let token = c.issue(&alice.username, &alice.id)?;
    let ctx = context_for_headers(&bearer_headers(&format!("Bearer {}", token)), &c, &store).await?;
    assert_eq!(ctx.current_user.expect("current user").id, alice.id);
    Ok(())
}

#[tokio::test]
async fn bearer_scheme_match_is_case_insensitive() -> Result<()> {
    let (store, alice) = directory_with_alice().await;
    let c = codec();
    let token = c.issue(&alice.username, &alice.id)?;
    for scheme in ["bearer", "BEARER", "bEaReR"] {
        let ctx = context_for_headers(&bearer_headers(&format!("{} {}", scheme, token)), &c, &store).await?;
        assert!(ctx.current_user.is_some(), "expected user for scheme {:?}", scheme);
    }
    Ok(())
}

#[tokio::test]
async fn malformed_token_fails_the_request() -> Result<()> {
    let (store, _alice) = directory_with_alice().await;
    let err = context_for_headers(&bearer_headers("Bearer not-a-real-token"), &codec(), &store)
        .await
        .expect_err("malformed token must fail");
    assert_eq!(err.graphql_code(), "UNAUTHENTICATED");
    Ok(())
}

#[tokio::test]
async fn wrong_secret_fails_the_request() -> Result<()> {
    let (store, alice) = directory_with_alice().await;
    let forged = TokenCodec::new("some-other-secret", Duration::minutes(60)).issue(&alice.username, &alice.id)?;
    let err = context_for_headers(&bearer_headers(&format!("Bearer {}", forged)), &codec(), &store)
        .await
        .expect_err("forged token must fail");
    assert_eq!(err.graphql_code(), "UNAUTHENTICATED");
    Ok(())
}

#[tokio::test]
async fn expired_token_fails_the_request() -> Result<()> {
    let (store, alice) = directory_with_alice().await;
    let stale = TokenCodec::new(SECRET, Duration::minutes(-5)).issue(&alice.username, &alice.id)?;
    let err = context_for_headers(&bearer_headers(&format!("Bearer {}", stale)), &codec(), &store)
        .await
        .expect_err("expired token must fail");
    assert_eq!(err.graphql_code(), "UNAUTHENTICATED");
    Ok(())
}

#[tokio::test]
async fn verified_token_for_unknown_user_yields_anonymous_context() -> Result<()> {
    let (store, _alice) = directory_with_alice().await;
    let c = codec();
    let token = c.issue("ghost", "no-such-id")?;
    let ctx = context_for_headers(&bearer_headers(&format!("Bearer {}", token)), &c, &store).await?;
    assert!(ctx.current_user.is_none());
    Ok(())
}

#[tokio::test]
async fn require_user_gates_on_presence() {
    let anon = RequestContext::anonymous();
    let err = anon.require_user().expect_err("anonymous must be rejected");
    assert_eq!(err.graphql_code(), "UNAUTHENTICATED");

    let ctx = RequestContext::for_user(User::new("alice", "refactoring"));
    assert_eq!(ctx.require_user().expect("user present").username, "alice");
}
