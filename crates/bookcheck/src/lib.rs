//! bookcheck - Data-driven CRUD harness for the Library API
//!
//! Generates books, creates each one, captures the identifiers the service
//! assigns, then retrieves and deletes every captured identifier once the
//! create phase is complete.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod executors;
pub mod report;
pub mod reporter;
pub mod session;
pub mod transport;

pub use bookcheck_core::{Error, Result};
pub use config::{load_config, Config, PartialConfig};
pub use executors::{ExecutionContext, OperationResult};
pub use report::{InvocationOutcome, Phase, PhaseReport, SessionReport};
pub use reporter::{MemoryReporter, ReportLevel, ReportLine, Reporter, TracingReporter};
pub use session::{Session, SessionOptions};
pub use transport::{HttpTransport, RawResponse, Transport};
