/// Router assembly
use crate::{api, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// All routes live under `/api`; CORS is permissive because the service is
/// meant to sit behind arbitrary front-ends.
pub fn create_router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/master", post(api::master::master));

    Router::new()
        .nest("/api", routes)
        // Uncompressed WAV gets big quickly; the default 2 MB cap is too tight
        .layer(DefaultBodyLimit::max(256 * 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
