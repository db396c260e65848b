//! Per-phase and per-session outcome summaries

use bookcheck_core::{Identifier, Result};
use serde::Serialize;

/// Session phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Create,
    Retrieve,
    Delete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Retrieve => write!(f, "retrieve"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationOutcome {
    /// Identifier the invocation was about (expected one for creates)
    pub subject: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvocationOutcome {
    pub fn from_result<T>(subject: impl Into<String>, result: &Result<T>) -> Self {
        Self {
            subject: subject.into(),
            passed: result.is_ok(),
            error: result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// All invocations of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    pub outcomes: Vec<InvocationOutcome>,
}

impl PhaseReport {
    #[must_use]
    pub const fn new(phase: Phase, outcomes: Vec<InvocationOutcome>) -> Self {
        Self { phase, outcomes }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }
}

/// Everything one session did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Records generated for the create phase
    pub records: usize,
    /// Store contents when the dependent phase began
    pub identifiers: Vec<Identifier>,
    pub create: PhaseReport,
    pub retrieve: PhaseReport,
    pub delete: PhaseReport,
}

impl SessionReport {
    pub fn phases(&self) -> [&PhaseReport; 3] {
        [&self.create, &self.retrieve, &self.delete]
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.phases().iter().map(|p| p.failed()).sum()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use bookcheck_core::Error;

    use super::*;

    #[test]
    fn test_counts() {
        let ok: Result<()> = Ok(());
        let bad: Result<()> = Err(Error::Transport("down".to_string()));
        let report = PhaseReport::new(
            Phase::Retrieve,
            vec![
                InvocationOutcome::from_result("a", &ok),
                InvocationOutcome::from_result("b", &bad),
            ],
        );
        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.outcomes[1].error.as_deref(), Some("Transport error: down"));
    }

    #[test]
    fn test_outcome_serialization_omits_missing_error(
    ) -> std::result::Result<(), serde_json::Error> {
        let ok: Result<()> = Ok(());
        let json = serde_json::to_value(InvocationOutcome::from_result("x", &ok))?;
        assert_eq!(json, serde_json::json!({ "subject": "x", "passed": true }));
        Ok(())
    }
}
