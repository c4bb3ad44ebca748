//! HTTP handlers for training endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::evaluation::{
    EvaluateResponseCommand, EvaluateResponseError, EvaluateResponseHandler,
};
use crate::application::handlers::training::{
    EndScenarioCommand, EndScenarioError, EndScenarioHandler, GetSessionError, GetSessionHandler,
    GetSessionQuery, RespondCommand, RespondError, RespondHandler, StartScenarioCommand,
    StartScenarioError, StartScenarioHandler,
};
use crate::domain::foundation::{ScenarioId, SessionId, UserId};

use super::dto::{
    EndTrainingRequest, EndTrainingResponse, EvaluateRequest, EvaluationResponse, RespondRequest,
    RespondResponse, SessionResponse, StartTrainingRequest, StartTrainingResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TrainingHandlers {
    start_handler: Arc<StartScenarioHandler>,
    respond_handler: Arc<RespondHandler>,
    end_handler: Arc<EndScenarioHandler>,
    get_handler: Arc<GetSessionHandler>,
    evaluate_handler: Arc<EvaluateResponseHandler>,
}

impl TrainingHandlers {
    pub fn new(
        start_handler: Arc<StartScenarioHandler>,
        respond_handler: Arc<RespondHandler>,
        end_handler: Arc<EndScenarioHandler>,
        get_handler: Arc<GetSessionHandler>,
        evaluate_handler: Arc<EvaluateResponseHandler>,
    ) -> Self {
        Self {
            start_handler,
            respond_handler,
            end_handler,
            get_handler,
            evaluate_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/training/start - Start a training scenario
pub async fn start_training(
    State(handlers): State<TrainingHandlers>,
    Json(req): Json<StartTrainingRequest>,
) -> Response {
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = StartScenarioCommand {
        scenario_id: ScenarioId::new(req.scenario_id),
        user_id,
        user_name: req.user_name,
        partner_name: req.partner_name,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: StartTrainingResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_start_error(e),
    }
}

/// POST /api/training/respond - Respond within a session
pub async fn respond(
    State(handlers): State<TrainingHandlers>,
    Json(req): Json<RespondRequest>,
) -> Response {
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RespondCommand {
        session_id,
        user_response: req.user_response,
    };

    match handlers.respond_handler.handle(cmd).await {
        Ok(result) => {
            let response: RespondResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_respond_error(e),
    }
}

/// POST /api/training/end - End a session
pub async fn end_training(
    State(handlers): State<TrainingHandlers>,
    Json(req): Json<EndTrainingRequest>,
) -> Response {
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .end_handler
        .handle(EndScenarioCommand { session_id })
        .await
    {
        Ok(result) => {
            let response: EndTrainingResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_end_error(e),
    }
}

/// GET /api/training/:session_id - Fetch a session transcript
pub async fn get_session(
    State(handlers): State<TrainingHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetSessionQuery { session_id })
        .await
    {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_get_error(e),
    }
}

/// POST /api/training/evaluate - Evaluate a candidate response
pub async fn evaluate(
    State(handlers): State<TrainingHandlers>,
    Json(req): Json<EvaluateRequest>,
) -> Response {
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = EvaluateResponseCommand {
        scenario_id: ScenarioId::new(req.scenario_id),
        user_id,
        user_response: req.user_response,
    };

    match handlers.evaluate_handler.handle(cmd).await {
        Ok(result) => {
            let response: EvaluationResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_evaluate_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_start_error(error: StartScenarioError) -> Response {
    match error {
        StartScenarioError::ScenarioNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Scenario", &id.to_string())),
        )
            .into_response(),
        StartScenarioError::ScenarioNotTrainable(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        StartScenarioError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        StartScenarioError::Persistence(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

fn handle_respond_error(error: RespondError) -> Response {
    match error {
        RespondError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        RespondError::SessionEnded | RespondError::EmptyResponse | RespondError::Domain(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        RespondError::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.to_string())),
        )
            .into_response(),
        RespondError::Persistence(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

fn handle_end_error(error: EndScenarioError) -> Response {
    match error {
        EndScenarioError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        EndScenarioError::Persistence(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

fn handle_get_error(error: GetSessionError) -> Response {
    match error {
        GetSessionError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        GetSessionError::Persistence(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}

fn handle_evaluate_error(error: EvaluateResponseError) -> Response {
    match error {
        EvaluateResponseError::ScenarioNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Scenario", &id.to_string())),
        )
            .into_response(),
        EvaluateResponseError::EmptyResponse => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        EvaluateResponseError::EvaluationFailed(msg) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::bad_gateway(msg)),
        )
            .into_response(),
    }
}
