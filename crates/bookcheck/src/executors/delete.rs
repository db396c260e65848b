//! DeleteBook: remove a stored identifier
//!
//! No existence check is made first. Deleting twice simply fails the status
//! check on the second call.

use bookcheck_core::{Identifier, Result, SoftAssertions};
use serde_json::{json, Value};
use tracing::instrument;

use super::{
    finalize, report_error, ExecutionContext, OperationResult, DELETE_BOOK_PATH, SUCCESS_STATUS,
};

/// Delete the book stored under `id`
///
/// # Errors
///
/// Returns an error if the request fails or the status is not 200.
#[instrument(skip_all, fields(%id))]
pub async fn run(ctx: &ExecutionContext, id: &Identifier) -> Result<OperationResult> {
    let outcome = execute(ctx, id).await;
    if let Err(err) = &outcome {
        report_error(ctx.reporter.as_ref(), "Delete", err, &format!("ID: {id}"));
    }
    outcome
}

async fn execute(ctx: &ExecutionContext, id: &Identifier) -> Result<OperationResult> {
    let payload = json!({ "ID": id.as_str() });
    let raw = ctx.transport.post_json(DELETE_BOOK_PATH, &payload).await?;

    let mut soft = SoftAssertions::new("Delete");
    soft.assert_eq(&raw.status, &SUCCESS_STATUS, "").context("ID", id);
    finalize(ctx.reporter.as_ref(), soft)?;

    ctx.reporter.success(&format!("Book deleted with ID: {id}"));

    // The service echoes a human-readable `msg`; keep it when present.
    let msg = serde_json::from_str::<Value>(&raw.body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(str::to_string));
    let result = OperationResult::new(raw.status, raw.body).with_derived("ID", id);
    Ok(match msg {
        Some(msg) => result.with_derived("msg", msg),
        None => result,
    })
}
