//! Soft assertions
//!
//! Checks are recorded, never short-circuited. [`SoftAssertions::finalize`]
//! turns the recorded failures into a single [`ValidationFailure`] carrying
//! every message plus the context needed to diagnose the invocation.

use std::fmt::{Debug, Display};

use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone)]
struct Check {
    passed: bool,
    message: String,
}

/// Accumulates checks for one operation invocation
#[derive(Debug, Clone)]
pub struct SoftAssertions {
    operation: String,
    checks: Vec<Check>,
    context: Vec<(String, String)>,
}

impl SoftAssertions {
    /// Start collecting checks for the named operation (e.g. `AddBook`)
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            checks: Vec::new(),
            context: Vec::new(),
        }
    }

    /// Record a check; `message` is reported only if `passed` is false
    pub fn check(&mut self, passed: bool, message: impl Into<String>) -> &mut Self {
        self.checks.push(Check {
            passed,
            message: message.into(),
        });
        self
    }

    /// Record an equality check, TestNG style: `message expected [e] but found [a]`
    pub fn assert_eq<A, E>(&mut self, actual: &A, expected: &E, message: &str) -> &mut Self
    where
        A: PartialEq<E> + Display + ?Sized,
        E: Display + ?Sized,
    {
        let passed = actual == expected;
        let message = if message.is_empty() {
            format!("expected [{expected}] but found [{actual}]")
        } else {
            format!("{message} expected [{expected}] but found [{actual}]")
        };
        self.check(passed, message)
    }

    /// Attach a labelled piece of context to the eventual failure report
    pub fn context(&mut self, label: impl Into<String>, value: impl Display) -> &mut Self {
        self.context.push((label.into(), value.to_string()));
        self
    }

    /// Number of recorded checks
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no checks were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Messages of the checks that failed so far, in recording order
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.message.as_str())
    }

    /// Evaluate every recorded check
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationFailure`] listing all failed checks if any failed.
    pub fn finalize(self) -> std::result::Result<(), ValidationFailure> {
        let failures: Vec<String> = self.failures().map(normalize_whitespace).collect();
        if failures.is_empty() {
            return Ok(());
        }
        Err(ValidationFailure {
            operation: self.operation,
            failures,
            context: self
                .context
                .into_iter()
                .map(|(label, value)| (label, normalize_whitespace(&value)))
                .collect(),
        })
    }
}

/// Aggregated failure for a single invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// Operation name, e.g. `AddBook`
    pub operation: String,
    /// Every failed check message, whitespace-normalized
    pub failures: Vec<String>,
    /// Labelled context (payload, derived key, response status)
    pub context: Vec<(String, String)>,
}

impl ValidationFailure {
    /// Context value recorded under `label`, if any
    #[must_use]
    pub fn context_value(&self, label: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} assertion failed: {}",
            self.operation,
            self.failures.iter().join("; ")
        )?;
        for (label, value) in &self.context {
            write!(f, " | {label}: {value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Collapse every run of whitespace (including newlines) into one space
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}
