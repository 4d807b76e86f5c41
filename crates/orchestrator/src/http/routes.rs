use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::error::OrchestratorError;
use crate::http::dto::{
    CreateOperationRequest, CreateOperationResponse, ListOperationsQuery, ListOperationsResponse, OperationDetail,
};
use crate::orchestrator::Orchestrator;
use store::Store;

/// Shared state every handler needs: the orchestrator for writes, the store for reads.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<Store>,
}

/// Build the router for the operations surface: `POST /operations`, `GET /operations/{id}`,
/// `GET /operations`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/operations", post(create_operation).get(list_operations))
        .route("/operations/:id", get(get_operation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn create_operation(
    State(state): State<AppState>,
    Json(request): Json<CreateOperationRequest>,
) -> Result<Json<CreateOperationResponse>, OrchestratorError> {
    let kind = request.validate()?;
    let operation_id = state
        .orchestrator
        .execute(kind, &request.domain, &request.token_id, &request.blockchain_id, &request.amount, &request.operator)
        .await?;
    Ok(Json(CreateOperationResponse {
        success: true,
        message: format!("operation {operation_id} accepted"),
    }))
}

async fn get_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OperationDetail>, OrchestratorError> {
    let operation = state.store.find_operation_by_id(&id).await.map_err(|err| match err {
        store::StoreError::NotFound { .. } => OrchestratorError::BadRequest { field: "id", reason: format!("operation not found: {id}") },
        other => OrchestratorError::Persistence(other),
    })?;
    let logs = state.store.find_operation_logs_by_operation_id(&operation.id).await?;
    Ok(Json(OperationDetail { operation, logs }))
}

async fn list_operations(
    State(state): State<AppState>,
    Query(query): Query<ListOperationsQuery>,
) -> Result<Json<ListOperationsResponse>, OrchestratorError> {
    let page = state.store.find_operations_paginated(query.into()).await?;
    Ok(Json(ListOperationsResponse(page)))
}
