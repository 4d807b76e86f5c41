//! Request-shape validation and pagination defaults for the `/operations` HTTP surface.
//!
//! These exercise the pure request/response DTOs directly, without a running HTTP server, store,
//! or external collaborator — the orchestration scenarios that need a live KMS/XRPL node/document
//! store are out of reach of an offline test run and are not faked here.

use orchestrator::http::dto::{CreateOperationRequest, ListOperationsQuery};
use orchestrator::OrchestratorError;

fn sample_request() -> CreateOperationRequest {
    CreateOperationRequest {
        kind: "MINT".to_string(),
        blockchain_id: "blockchain-1".to_string(),
        token_id: "token-1".to_string(),
        amount: "2.75".to_string(),
        domain: "tenant-a".to_string(),
        operator: "operator-1".to_string(),
    }
}

#[test]
fn accepts_a_well_formed_mint_request() {
    let request = sample_request();
    let kind = request.validate().unwrap();
    assert_eq!(kind, store::OperationKind::Mint);
}

#[test]
fn accepts_burn_case_insensitively() {
    let mut request = sample_request();
    request.kind = "burn".to_string();
    let kind = request.validate().unwrap();
    assert_eq!(kind, store::OperationKind::Burn);
}

#[test]
fn rejects_an_unknown_operation_type() {
    let mut request = sample_request();
    request.kind = "TRANSFER".to_string();
    let err = request.validate().unwrap_err();
    assert!(matches!(err, OrchestratorError::BadRequest { field: "type", .. }));
}

#[test]
fn rejects_an_amount_below_one() {
    let mut request = sample_request();
    request.amount = "0.5".to_string();
    let err = request.validate().unwrap_err();
    assert!(matches!(err, OrchestratorError::BadRequest { field: "amount", .. }));
}

#[test]
fn rejects_a_non_decimal_amount() {
    let mut request = sample_request();
    request.amount = "not-a-number".to_string();
    let err = request.validate().unwrap_err();
    assert!(matches!(err, OrchestratorError::BadRequest { field: "amount", .. }));
}

#[test]
fn rejects_an_empty_operator() {
    let mut request = sample_request();
    request.operator = String::new();
    let err = request.validate().unwrap_err();
    assert!(matches!(err, OrchestratorError::BadRequest { field: "operator", .. }));
}

#[test]
fn list_query_defaults_are_applied_when_absent() {
    let query = ListOperationsQuery {
        filter_param: None,
        filter_value: None,
        sort_field: None,
        sort_order: None,
        page: None,
        limit: None,
    };
    let converted: store::OperationQuery = query.into();
    assert_eq!(converted.sort_field, "updated_at");
    assert_eq!(converted.sort_order, "desc");
    assert_eq!(converted.page, 1);
    assert_eq!(converted.limit, 10);
}

#[test]
fn list_query_clamps_limit_to_one_hundred() {
    let query = ListOperationsQuery {
        filter_param: None,
        filter_value: None,
        sort_field: None,
        sort_order: None,
        page: Some(2),
        limit: Some(500),
    };
    let converted: store::OperationQuery = query.into();
    assert_eq!(converted.limit, 100);
    assert_eq!(converted.page, 2);
}

#[test]
fn list_query_floors_page_at_one() {
    let query = ListOperationsQuery {
        filter_param: None,
        filter_value: None,
        sort_field: None,
        sort_order: None,
        page: Some(0),
        limit: None,
    };
    let converted: store::OperationQuery = query.into();
    assert_eq!(converted.page, 1);
}
