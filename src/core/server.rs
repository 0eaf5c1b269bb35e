use crate::core::schema::{build_schema, EstadosSchema, SharedSource};
use crate::core::upstream::RestEstadosSource;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::validate_socket_addr;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const GRAPHQL_PATH_PLACEHOLDER: &str = "__GRAPHQL_PATH__";

#[derive(Clone)]
struct AppState {
    schema: EstadosSchema,
    graphql_path: Arc<str>,
    index_page: Arc<str>,
}

/// Builds the HTTP router: GraphQL endpoint, optional GraphiQL, the browser page and `/health`.
pub fn build_router(schema: EstadosSchema, graphql_path: &str, playground: bool) -> Router {
    let state = AppState {
        schema,
        graphql_path: Arc::from(graphql_path),
        index_page: Arc::from(INDEX_HTML.replace(GRAPHQL_PATH_PLACEHOLDER, graphql_path)),
    };

    let graphql_route = if playground {
        post(graphql_handler).get(graphiql)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(graphql_path, graphql_route)
        .layer(middleware::from_fn(log_request_timing))
        .with_state(state)
}

/// Wires the REST upstream, schema and router from configuration.
pub fn router_from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Router> {
    let source: SharedSource = Arc::new(RestEstadosSource::from_config(config)?);
    let schema = build_schema(source);
    Ok(build_router(
        schema,
        config.graphql_path(),
        config.playground_enabled(),
    ))
}

/// Binds the listen address and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let addr = validate_socket_addr("listen_addr", config.listen_addr())?;
    let router = router_from_config(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 GraphQL endpoint exposed at http://{}{}", addr, config.graphql_path());
    tracing::info!("📡 Upstream REST API: {}", config.upstream_endpoint());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down gracefully");
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql(State(state): State<AppState>) -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(&state.graphql_path).finish())
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_page.to_string())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn log_request_timing(request: Request, next: Next) -> Response {
    let request_id: String = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    tracing::info!("[{}] {} {} started", request_id, method, path);

    let response = next.run(request).await;

    tracing::info!(
        "[{}] finished in {:.2} ms - status {}",
        request_id,
        start.elapsed().as_secs_f64() * 1000.0,
        response.status().as_u16()
    );
    response
}
