use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How a single test ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The test body returned `true`.
    Pass,
    /// The test body returned `false`, or no client could be created for it.
    Fail,
    /// The test body did not finish within the per-test timeout.
    Timeout,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Pass => write!(f, "passed"),
            Outcome::Fail => write!(f, "failed"),
            Outcome::Timeout => write!(f, "timed out"),
        }
    }
}

/// The recorded result of one scheduled test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl TestOutcome {
    pub fn new<S>(name: S, outcome: Outcome, elapsed: Duration) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            outcome,
            elapsed,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// An append-only record of outcomes, in the order they were produced. The engine appends to it
/// and the watchdog reads it if it has to abort the run, so clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog {
    outcomes: Arc<Mutex<Vec<TestOutcome>>>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: TestOutcome) {
        self.outcomes().push(outcome);
    }

    /// A copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<TestOutcome> {
        self.outcomes().clone()
    }

    pub fn len(&self) -> usize {
        self.outcomes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn outcomes(&self) -> MutexGuard<'_, Vec<TestOutcome>> {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// The result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub seed: u64,
    pub outcomes: Vec<TestOutcome>,
}

impl RunSummary {
    /// `true` when every outcome passed. A run without tests has passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(TestOutcome::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.passed()).count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn outcome(name: &str, outcome: Outcome) -> TestOutcome {
        TestOutcome::new(name, outcome, Duration::from_secs(1))
    }

    #[test]
    fn aggregate() {
        let summary = RunSummary {
            seed: 1,
            outcomes: vec![outcome("A", Outcome::Pass), outcome("B", Outcome::Pass)],
        };
        assert!(summary.passed());
        assert_eq!(summary.failed_count(), 0);

        let summary = RunSummary {
            seed: 1,
            outcomes: vec![outcome("A", Outcome::Pass), outcome("B", Outcome::Timeout)],
        };
        assert!(!summary.passed());
        assert_eq!(summary.failed_count(), 1);
    }

    #[test]
    fn empty_run_passes() {
        let summary = RunSummary {
            seed: 1,
            outcomes: Vec::new(),
        };
        assert!(summary.passed());
    }

    #[test]
    fn log_is_shared_between_clones() {
        let log = OutcomeLog::new();
        let watcher = log.clone();
        log.record(outcome("A", Outcome::Fail));
        log.record(outcome("B", Outcome::Pass));
        assert_eq!(watcher.len(), 2);
        let names: Vec<_> = watcher.snapshot().into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
