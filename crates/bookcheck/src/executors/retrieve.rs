//! GetBook: look up a stored identifier

use bookcheck_core::{Identifier, Result, SoftAssertions};
use tracing::instrument;

use super::{
    finalize, report_error, ExecutionContext, OperationResult, GET_BOOK_PATH, SUCCESS_STATUS,
};

/// Retrieve the book stored under `id`
///
/// # Errors
///
/// Returns an error if the request fails or the status is not 200.
#[instrument(skip_all, fields(%id))]
pub async fn run(ctx: &ExecutionContext, id: &Identifier) -> Result<OperationResult> {
    let outcome = execute(ctx, id).await;
    if let Err(err) = &outcome {
        report_error(ctx.reporter.as_ref(), "GetBook", err, &format!("ID: {id}"));
    }
    outcome
}

async fn execute(ctx: &ExecutionContext, id: &Identifier) -> Result<OperationResult> {
    let raw = ctx
        .transport
        .get(GET_BOOK_PATH, &[("ID", id.as_str())])
        .await?;

    let mut soft = SoftAssertions::new("GetBook");
    soft.check(
        raw.status == SUCCESS_STATUS,
        format!("Expected status code {SUCCESS_STATUS} but got: {}", raw.status),
    )
    .context("ID", id);
    finalize(ctx.reporter.as_ref(), soft)?;

    ctx.reporter
        .success(&format!("Book retrieved with ID: {id}"));
    Ok(OperationResult::new(raw.status, raw.body).with_derived("ID", id))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bookcheck_core::Error;

    use super::*;
    use crate::{
        executors::testing::{ScriptedTransport, Sent},
        reporter::{MemoryReporter, ReportLevel},
    };

    #[tokio::test]
    async fn test_lookup_sends_id_as_query_parameter() -> Result<()> {
        let transport = Arc::new(ScriptedTransport::new().respond(200, "[]"));
        let reporter = Arc::new(MemoryReporter::new());
        let ctx = ExecutionContext::new(transport.clone(), reporter.clone());

        let result = run(&ctx, &Identifier::new("12345678Fiction")).await?;

        assert_eq!(result.status, 200);
        match transport.sent().as_slice() {
            [Sent::Get { path, query }] => {
                assert_eq!(path, GET_BOOK_PATH);
                assert_eq!(query, &[("ID".to_string(), "12345678Fiction".to_string())]);
            }
            other => unreachable!("unexpected requests: {other:?}"),
        }
        assert!(reporter.messages(ReportLevel::Failure).is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_is_reported_with_identifier() {
        let transport = Arc::new(ScriptedTransport::new().respond(404, r#"{"msg":"not found"}"#));
        let reporter = Arc::new(MemoryReporter::new());
        let ctx = ExecutionContext::new(transport, reporter.clone());

        let result = run(&ctx, &Identifier::new("gone")).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(
            reporter.messages(ReportLevel::Failure),
            vec!["GetBook assertion failed: Expected status code 200 but got: 404 | ID: gone"]
        );
    }
}
