use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use store::{Operation, OperationKind, OperationLog, OperationQuery, PaginatedOperations};

use crate::error::OrchestratorError;

/// Body of `POST /operations`.
#[derive(Debug, Deserialize)]
pub struct CreateOperationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub blockchain_id: String,
    pub token_id: String,
    pub amount: String,
    pub domain: String,
    pub operator: String,
}

impl CreateOperationRequest {
    /// Validate and parse this request's fields: `type` must be MINT/BURN, `amount` must parse to
    /// a decimal `>= 1`, and every field must be present and non-empty.
    pub fn validate(&self) -> Result<OperationKind, OrchestratorError> {
        if self.blockchain_id.is_empty() {
            return Err(OrchestratorError::BadRequest { field: "blockchain_id", reason: "required".to_string() });
        }
        if self.token_id.is_empty() {
            return Err(OrchestratorError::BadRequest { field: "token_id", reason: "required".to_string() });
        }
        if self.domain.is_empty() {
            return Err(OrchestratorError::BadRequest { field: "domain", reason: "required".to_string() });
        }
        if self.operator.is_empty() {
            return Err(OrchestratorError::BadRequest { field: "operator", reason: "required".to_string() });
        }

        let kind = OperationKind::parse(&self.kind)
            .ok_or_else(|| OrchestratorError::BadRequest { field: "type", reason: format!("must be MINT or BURN, got {}", self.kind) })?;

        let amount = Decimal::from_str(&self.amount)
            .map_err(|_| OrchestratorError::BadRequest { field: "amount", reason: format!("not a decimal: {}", self.amount) })?;
        if amount < Decimal::ONE {
            return Err(OrchestratorError::BadRequest { field: "amount", reason: "must be >= 1".to_string() });
        }

        Ok(kind)
    }
}

/// Response body of a successful `POST /operations`.
#[derive(Debug, Serialize)]
pub struct CreateOperationResponse {
    pub success: bool,
    pub message: String,
}

/// Response body of `GET /operations/{id}`: the operation plus its logs, most recent first.
#[derive(Debug, Serialize)]
pub struct OperationDetail {
    pub operation: Operation,
    pub logs: Vec<OperationLog>,
}

/// Query parameters accepted by `GET /operations`.
#[derive(Debug, Deserialize)]
pub struct ListOperationsQuery {
    pub filter_param: Option<String>,
    pub filter_value: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Cap on `limit`, so a caller can't request an unbounded page.
const MAX_PAGE_SIZE: u64 = 100;

impl From<ListOperationsQuery> for OperationQuery {
    fn from(query: ListOperationsQuery) -> Self {
        let default = OperationQuery::default();
        OperationQuery {
            filter_param: query.filter_param,
            filter_value: query.filter_value,
            sort_field: query.sort_field.unwrap_or(default.sort_field),
            sort_order: query.sort_order.unwrap_or(default.sort_order),
            page: query.page.unwrap_or(default.page).max(1),
            limit: query.limit.unwrap_or(default.limit).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Response body of `GET /operations`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ListOperationsResponse(pub PaginatedOperations);
