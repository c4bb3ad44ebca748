//! HTTP routes for training endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    end_training, evaluate, get_session, respond, start_training, TrainingHandlers,
};

/// Creates the training router. Mounted under `/api/training`.
pub fn training_routes(handlers: TrainingHandlers) -> Router {
    Router::new()
        .route("/start", post(start_training))
        .route("/respond", post(respond))
        .route("/end", post(end_training))
        .route("/evaluate", post(evaluate))
        .route("/:session_id", get(get_session))
        .with_state(handlers)
}
