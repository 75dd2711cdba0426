use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient, TextSplitter};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, question_answer_handler};
use crate::presentation::state::AppState;

pub const QUESTION_ANSWER_PATH: &str = "/api/v1/qa";

pub fn create_router<F, T, L>(state: AppState<F, T, L>) -> Router
where
    F: FileLoader + 'static,
    T: TextSplitter + ?Sized + 'static,
    L: LlmClient + 'static,
{
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(QUESTION_ANSWER_PATH, post(question_answer_handler::<F, T, L>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(permissive_cors())
        .with_state(state)
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
