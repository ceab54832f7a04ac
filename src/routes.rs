// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{content, health, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Routes that call the language model share one global rate limiter (single-user tool).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (config, gateway, quiz session).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origins.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let model_routes = Router::new()
        .route("/summarize", post(content::summarize))
        .route("/translate", post(content::translate))
        .route("/quiz/generate", post(quiz::generate_quiz));

    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(GlobalKeyExtractor)
        .per_second(state.config.rate_limit_replenish_secs.max(1))
        .burst_size(state.config.rate_limit_burst.max(1))
        .finish();

    let model_routes = match governor_conf {
        Some(conf) => model_routes.layer(GovernorLayer::new(Arc::new(conf))),
        None => {
            tracing::warn!("Invalid rate limit settings, model routes are not rate limited");
            model_routes
        }
    };

    let session_routes = Router::new()
        .route("/health", get(health::health))
        .route("/quiz", get(quiz::get_quiz))
        .route("/quiz/score", get(quiz::get_score))
        .route("/quiz/questions/{index}/submit", post(quiz::submit_answer));

    Router::new()
        .nest("/api", model_routes.merge(session_routes))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
