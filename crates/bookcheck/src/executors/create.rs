//! Addbook: create one book and capture the identifier the service assigns

use bookcheck_core::{BookInput, Error, Identifier, IdentifierStore, Result, SoftAssertions};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{
    finalize, report_error, ExecutionContext, OperationResult, ADDED_MESSAGE, ADD_BOOK_PATH,
    SUCCESS_STATUS,
};
use crate::transport::RawResponse;

/// Create `book` and append the returned `ID` to `store`.
///
/// The identifier is appended as soon as it is parsed, before validation, so
/// the dependent phase exercises it even when this invocation fails.
///
/// # Errors
///
/// Returns an error if:
/// - The request fails at the transport level
/// - The body is not JSON or lacks `ID` / `Msg`
/// - Status, message or identifier do not match the contract (all reported together)
#[instrument(skip_all, fields(code = %book.code, category = %book.category))]
pub async fn run(
    ctx: &ExecutionContext,
    store: &IdentifierStore,
    book: &BookInput,
) -> Result<OperationResult> {
    let payload = book.wire_payload();
    let expected = book.expected_identifier();

    let outcome = execute(ctx, store, &payload, &expected).await;
    if let Err(err) = &outcome {
        report_error(
            ctx.reporter.as_ref(),
            "AddBook",
            err,
            &format!("Book: {payload} | ID: {expected}"),
        );
    }
    outcome
}

async fn execute(
    ctx: &ExecutionContext,
    store: &IdentifierStore,
    payload: &Value,
    expected: &Identifier,
) -> Result<OperationResult> {
    let raw = ctx.transport.post_json(ADD_BOOK_PATH, payload).await?;
    let body: Value = serde_json::from_str(&raw.body).map_err(|e| {
        Error::response_parse(format!("body is not JSON: {e}"), raw.status, &raw.body)
    })?;

    let id = Identifier::new(string_field(&body, "ID", &raw)?);
    store.append(id.clone());
    debug!(%id, stored = store.len(), "identifier captured");
    ctx.reporter
        .success(&format!("Book added successfully with ID: {id}"));

    let msg = string_field(&body, "Msg", &raw)?;

    let mut soft = SoftAssertions::new("AddBook");
    soft.check(
        raw.status == SUCCESS_STATUS,
        format!("Expected status code {SUCCESS_STATUS} but got: {}", raw.status),
    )
    .check(msg == ADDED_MESSAGE, format!("Unexpected response message: {msg}"))
    .assert_eq(&id, expected, "Book ID mismatch.")
    .context("Book", payload)
    .context("ID", expected)
    .context("Response", raw.status);
    finalize(ctx.reporter.as_ref(), soft)?;

    Ok(OperationResult::new(raw.status, raw.body)
        .with_derived("ID", &id)
        .with_derived("Msg", &msg))
}

fn string_field(body: &Value, name: &str, raw: &RawResponse) -> Result<String> {
    body.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::response_parse(format!("missing field `{name}`"), raw.status, &raw.body)
        })
}
