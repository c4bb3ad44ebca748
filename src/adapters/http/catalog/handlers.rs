//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::catalog::{
    ListStageScenariosError, ListStageScenariosHandler, ListStageScenariosQuery,
};
use crate::domain::foundation::{StageNumber, UserId};

use super::dto::{StageScenariosParams, StageScenariosResponse};

#[derive(Clone)]
pub struct CatalogHandlers {
    list_handler: Arc<ListStageScenariosHandler>,
}

impl CatalogHandlers {
    pub fn new(list_handler: Arc<ListStageScenariosHandler>) -> Self {
        Self { list_handler }
    }
}

/// GET /api/stages/:stage_number/scenarios - List visible scenarios of a stage
pub async fn list_stage_scenarios(
    State(handlers): State<CatalogHandlers>,
    Path(stage_number): Path<u32>,
    Query(params): Query<StageScenariosParams>,
) -> Response {
    // A blank or malformed user id means anonymous, not an error: the
    // catalog is browsable without an account.
    let user_id = params
        .user_id
        .as_deref()
        .and_then(|id| UserId::new(id).ok());

    let query = ListStageScenariosQuery {
        stage_number: StageNumber::new(stage_number),
        user_id,
    };

    match handlers.list_handler.handle(query).await {
        Ok(view) => {
            let response: StageScenariosResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

fn handle_catalog_error(error: ListStageScenariosError) -> Response {
    match error {
        ListStageScenariosError::StageNotFound(stage) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Stage", &stage.to_string())),
        )
            .into_response(),
        ListStageScenariosError::Persistence(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
