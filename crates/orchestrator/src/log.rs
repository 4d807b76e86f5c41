use chrono::Utc;
use serde_json::Value;
use store::{OperationLog, Store, StoreError};

/// Append one [`OperationLog`] row. Every external call and state transition writes one of these
/// before the caller returns or continues, per the operation's audit-trail invariant — exactly
/// one `"Operation Started"` row and at least one row per external call.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn record(
    store: &Store,
    operation_id: &str,
    event: &str,
    description: impl Into<String>,
    kms_tx_id: &str,
    payload: Value,
    response: Value,
    error: Value,
) -> Result<(), StoreError> {
    let log = OperationLog {
        id: String::new(),
        operation_id: operation_id.to_string(),
        event: event.to_string(),
        description: description.into(),
        kms_tx_id: kms_tx_id.to_string(),
        payload,
        response,
        error,
        created_at: Utc::now(),
    };
    store.save_operation_log(log).await?;
    Ok(())
}
