//!
//! librarium HTTP server
//! ---------------------
//! Axum-based HTTP transport for the GraphQL catalog API.
//!
//! Responsibilities:
//! - Startup: configuration from the environment, store selection
//!   (MongoDB or in-memory), first-run demo seeding, schema assembly.
//! - Per-request authentication context built from the Authorization
//!   header before the GraphQL executor runs. An invalid bearer token
//!   fails the whole request; no resolver executes.
//! - GraphiQL IDE on GET /graphql for interactive use.

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{ErrorExtensions, Pos};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use tracing::{info, warn};

use crate::catalog::store::{CatalogStore, UserDirectory};
use crate::catalog::{seed, MemoryCatalog, MongoCatalog};
use crate::config::Config;
use crate::graphql::{build_schema, LibrariumSchema};
use crate::identity::{context_for_headers, CredentialCheck, SharedSecretCredentials, TokenCodec};

/// Shared server state injected into all handlers.
///
/// The schema carries the store and identity collaborators as context
/// data; the codec and user directory are also held here because the
/// transport needs them before execution starts.
#[derive(Clone)]
pub struct AppState {
    pub schema: LibrariumSchema,
    pub codec: Arc<TokenCodec>,
    pub users: Arc<dyn UserDirectory>,
}

/// Entry point using configuration from the environment.
pub async fn run() -> anyhow::Result<()> {
    run_with_config(Config::from_env()?).await
}

pub async fn run_with_config(config: Config) -> anyhow::Result<()> {
    let (store, users): (Arc<dyn CatalogStore>, Arc<dyn UserDirectory>) = match &config.mongodb_uri {
        Some(uri) => {
            info!(target: "startup", "connecting to MongoDB database '{}'", config.db_name);
            let mongo = Arc::new(MongoCatalog::connect(uri, &config.db_name).await?);
            let store: Arc<dyn CatalogStore> = mongo.clone();
            let users: Arc<dyn UserDirectory> = mongo;
            (store, users)
        }
        None => {
            warn!(target: "startup", "MONGODB_URI not set, using the in-memory store; state is lost on shutdown");
            let mem = Arc::new(MemoryCatalog::new());
            let store: Arc<dyn CatalogStore> = mem.clone();
            let users: Arc<dyn UserDirectory> = mem;
            (store, users)
        }
    };

    if seed::seed_if_empty(store.as_ref()).await? {
        info!(target: "startup", "demo catalog seeded");
    }

    let codec = Arc::new(TokenCodec::new(
        &config.token_secret,
        chrono::Duration::minutes(config.token_ttl_min),
    ));
    let credentials: Arc<dyn CredentialCheck> =
        Arc::new(SharedSecretCredentials::new(config.login_password.clone()));
    let schema = build_schema(store, users.clone(), codec.clone(), credentials);

    let app = router(AppState { schema, codec, users });

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "librarium ok" }))
        .route("/graphql", get(graphiql).post(graphql_handler))
        .with_state(state)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Builds the per-request context, then hands the request to the executor.
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let ctx = match context_for_headers(&headers, &state.codec, state.users.as_ref()).await {
        Ok(ctx) => ctx,
        Err(err) => {
            let server_error = err.extend().into_server_error(Pos { line: 0, column: 0 });
            return async_graphql::Response::from_errors(vec![server_error]).into();
        }
    };
    state.schema.execute(req.into_inner().data(ctx)).await.into()
}
