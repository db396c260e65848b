//! Operation executors for the Library API
//!
//! One call per input. Each executor validates through [`SoftAssertions`],
//! reports failures with their context, then returns the failure to the caller.
//! A failed invocation never affects its siblings.

pub mod create;
pub mod delete;
pub mod retrieve;

use std::{collections::BTreeMap, sync::Arc};

use bookcheck_core::{Error, Result, SoftAssertions};

use crate::{reporter::Reporter, transport::Transport};

pub const ADD_BOOK_PATH: &str = "/Library/Addbook.php";
pub const GET_BOOK_PATH: &str = "/Library/GetBook.php";
pub const DELETE_BOOK_PATH: &str = "/Library/DeleteBook.php";

pub const SUCCESS_STATUS: u16 = 200;
pub const ADDED_MESSAGE: &str = "successfully added";

/// Collaborators shared by every invocation of a session
#[derive(Clone)]
pub struct ExecutionContext {
    pub transport: Arc<dyn Transport>,
    pub reporter: Arc<dyn Reporter>,
}

impl ExecutionContext {
    pub fn new(transport: Arc<dyn Transport>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            transport,
            reporter,
        }
    }
}

/// Response of one validated invocation plus the fields derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    pub status: u16,
    pub body: String,
    pub derived: BTreeMap<String, String>,
}

impl OperationResult {
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        Self {
            status,
            body,
            derived: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_derived(mut self, key: &str, value: impl ToString) -> Self {
        self.derived.insert(key.to_string(), value.to_string());
        self
    }

    /// Derived field by name (`ID`, `Msg`, ...)
    #[must_use]
    pub fn derived(&self, key: &str) -> Option<&str> {
        self.derived.get(key).map(String::as_str)
    }
}

/// Finalize soft assertions, reporting the aggregated failure if there is one
fn finalize(reporter: &dyn Reporter, soft: SoftAssertions) -> Result<()> {
    soft.finalize().map_err(|failure| {
        reporter.failure(&failure.to_string());
        Error::from(failure)
    })
}

/// Report a non-validation failure (parse or transport) with its context.
/// Validation failures were already reported by [`finalize`].
fn report_error(reporter: &dyn Reporter, operation: &str, err: &Error, context: &str) {
    if !err.is_validation() {
        reporter.failure(&format!("{operation} request failed: {err} | {context}"));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by executor and session tests

    use std::{
        collections::VecDeque,
        sync::{Mutex, PoisonError},
    };

    use async_trait::async_trait;
    use bookcheck_core::{Error, Result};
    use serde_json::Value;

    use crate::transport::{RawResponse, Transport};

    /// Request as seen by the transport
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Post { path: String, body: Value },
        Get { path: String, query: Vec<(String, String)> },
    }

    /// Replays queued responses; an empty queue answers with a transport error
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<RawResponse>>>,
        sent: Mutex<Vec<Sent>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: &str) -> Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Ok(RawResponse::new(status, body)));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Err(Error::Transport(message.to_string())));
            self
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn next(&self, request: Sent) -> Result<RawResponse> {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            self.responses
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Err(Error::Transport("no scripted response".to_string())))
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse> {
            self.next(Sent::Post {
                path: path.to_string(),
                body: body.clone(),
            })
        }

        async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
            self.next(Sent::Get {
                path: path.to_string(),
                query: query
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            })
        }
    }
}
