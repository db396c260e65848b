//! One harness session: create phase, barrier, dependent phases
//!
//! ```text
//! generate ──► create × N ──► store ──► snapshot ──► retrieve × M ──► delete × M
//!                (append)              (barrier)
//! ```
//!
//! The snapshot is taken only after the create phase future has resolved, so
//! every create invocation has either appended its identifier or failed by then.

use bookcheck_core::{generate, BookInput, DependentFeed, IdentifierStore, Result};
use futures::{stream, StreamExt};
use tracing::{info, info_span, Instrument};

use crate::{
    executors::{create, delete, retrieve, ExecutionContext},
    report::{InvocationOutcome, Phase, PhaseReport, SessionReport},
};

/// Session sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Records generated for the create phase
    pub record_count: usize,
    /// Creates in flight at once; 1 keeps generation order in the store
    pub create_concurrency: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            record_count: 12,
            create_concurrency: 1,
        }
    }
}

/// Owns the identifier store for the lifetime of one run
pub struct Session {
    ctx: ExecutionContext,
    store: IdentifierStore,
    options: SessionOptions,
}

impl Session {
    #[must_use]
    pub fn new(ctx: ExecutionContext, options: SessionOptions) -> Self {
        Self {
            ctx,
            store: IdentifierStore::new(),
            options,
        }
    }

    /// The session's identifier store
    #[must_use]
    pub const fn store(&self) -> &IdentifierStore {
        &self.store
    }

    /// Generate records and run every phase
    ///
    /// # Errors
    ///
    /// Returns an error only if record generation fails; invocation failures
    /// are recorded in the report.
    pub async fn run(&self) -> Result<SessionReport> {
        let books = generate(self.options.record_count)?;
        Ok(self.run_with(&books).await)
    }

    /// Run every phase over caller-supplied records
    pub async fn run_with(&self, books: &[BookInput]) -> SessionReport {
        let create = self.create_phase(books).await;

        // Barrier: all creates have completed.
        let feed = DependentFeed::snapshot(&self.store);
        info!(identifiers = feed.len(), "dependent phase input captured");

        let retrieve = self.retrieve_phase(&feed).await;
        let delete = self.delete_phase(&feed).await;

        SessionReport {
            records: books.len(),
            identifiers: feed.feed().to_vec(),
            create,
            retrieve,
            delete,
        }
    }

    /// Run one create per record, up to `create_concurrency` at a time.
    /// Outcomes are reported in record order whatever the completion order.
    pub async fn create_phase(&self, books: &[BookInput]) -> PhaseReport {
        let concurrency = self.options.create_concurrency.max(1);
        let span = info_span!("phase", name = %Phase::Create, records = books.len(), concurrency);

        async {
            let mut outcomes: Vec<(usize, InvocationOutcome)> =
                stream::iter(books.iter().enumerate())
                    .map(|(index, book)| async move {
                        let result = create::run(&self.ctx, &self.store, book).await;
                        let subject = book.expected_identifier().to_string();
                        (index, InvocationOutcome::from_result(subject, &result))
                    })
                    .buffer_unordered(concurrency)
                    .collect()
                    .await;
            outcomes.sort_by_key(|(index, _)| *index);
            let report = PhaseReport::new(
                Phase::Create,
                outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
            );
            log_phase(&report);
            report
        }
        .instrument(span)
        .await
    }

    /// Retrieve every identifier in the feed, one at a time
    pub async fn retrieve_phase(&self, feed: &DependentFeed) -> PhaseReport {
        let span = info_span!("phase", name = %Phase::Retrieve, identifiers = feed.len());
        async {
            let mut outcomes = Vec::with_capacity(feed.len());
            for id in feed {
                let result = retrieve::run(&self.ctx, id).await;
                outcomes.push(InvocationOutcome::from_result(id.as_str(), &result));
            }
            let report = PhaseReport::new(Phase::Retrieve, outcomes);
            log_phase(&report);
            report
        }
        .instrument(span)
        .await
    }

    /// Delete every identifier in the feed, one at a time
    pub async fn delete_phase(&self, feed: &DependentFeed) -> PhaseReport {
        let span = info_span!("phase", name = %Phase::Delete, identifiers = feed.len());
        async {
            let mut outcomes = Vec::with_capacity(feed.len());
            for id in feed {
                let result = delete::run(&self.ctx, id).await;
                outcomes.push(InvocationOutcome::from_result(id.as_str(), &result));
            }
            let report = PhaseReport::new(Phase::Delete, outcomes);
            log_phase(&report);
            report
        }
        .instrument(span)
        .await
    }
}

fn log_phase(report: &PhaseReport) {
    info!(
        phase = %report.phase,
        total = report.total(),
        passed = report.passed(),
        failed = report.failed(),
        "phase complete"
    );
}
