//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /          - Own shifts (worker), whole plan or ?userid=N (admin)
//! POST   /          - Take a shift (worker only, form: day, shift)
//! DELETE /          - Give up a shift (?day=&shift=, admin adds &userid=)
//! GET    /whoami    - Resolved identity
//! POST   /token     - Mint a credential (only when enrollment is enabled)
//! GET    /health    - Liveness check
//! GET    /html/*    - Static files (only when a static dir is configured)
//! ```
//!
//! Everything except `/health`, `/token`, and `/html` needs an `Auth-Token`.

pub mod shifts;
pub mod token;
pub mod whoami;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Credential-gated planner routes.
pub fn planner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shifts::list).post(shifts::create).delete(shifts::remove),
        )
        .route("/whoami", get(whoami::whoami))
}

/// All application routes for `state`'s configuration.
pub fn routes(state: &AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(planner_routes());

    if state.config().enrollment_enabled {
        tracing::warn!("Credential enrollment is enabled on POST /token");
        router = router.route("/token", post(token::issue));
    }

    if let Some(dir) = &state.config().static_dir {
        router = router.nest_service("/html", ServeDir::new(dir));
    }

    router
}

/// Build the full application with middleware, ready to serve.
///
/// Sentry layers are left to the binary so tests can drive this router
/// without a Sentry hub.
pub fn app(state: AppState) -> Router {
    let timeout = state.config().request_timeout;

    routes(&state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        #[allow(clippy::cast_possible_truncation)] // Request latency fits in u64 millis
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
