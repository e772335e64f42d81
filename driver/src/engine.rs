use crate::outcome::{Outcome, OutcomeLog, RunSummary, TestOutcome};
use crate::scheduler::Schedule;
use crate::test_spec::{TestContext, TestSpec};
use e2e_model::clients::ClientFactory;
use e2e_model::RunConfiguration;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};

/// How long the cleanup actions of a single test may take before the engine gives up on them.
pub const DEFAULT_CLEANUP_TIMEOUT: Duration = Duration::from_secs(60);

/// The `Engine` runs a [`Schedule`] one test at a time, in order.
///
/// Each test gets a client of its own from the [`ClientFactory`], so that throttling or broken
/// connections can be attributed to a single test. A test that fails, times out, or cannot get a
/// client is recorded as failed and the engine moves on to the next one; a run always attempts
/// every scheduled test. After each test, whatever its verdict, the engine releases the test's
/// [`Cleanup`](crate::Cleanup) scope.
///
/// Outcomes are recorded in schedule order to the engine's [`OutcomeLog`] as soon as each test
/// finishes, so that a watchdog sharing the log can report a partial run.
pub struct Engine<F>
where
    F: ClientFactory,
{
    factory: F,
    config: Arc<RunConfiguration>,
    test_timeout: Option<Duration>,
    cleanup_timeout: Duration,
    log: OutcomeLog,
}

impl<F> Engine<F>
where
    F: ClientFactory,
{
    pub fn new(factory: F, config: Arc<RunConfiguration>) -> Self {
        Self {
            factory,
            config,
            test_timeout: None,
            cleanup_timeout: DEFAULT_CLEANUP_TIMEOUT,
            log: OutcomeLog::new(),
        }
    }

    /// Sets the deadline for each test. `None`, the default, lets a test run until the watchdog
    /// ends the run.
    pub fn with_test_timeout(mut self, test_timeout: Option<Duration>) -> Self {
        self.test_timeout = test_timeout;
        self
    }

    /// Sets how long the cleanup actions of a test may run. Actions still pending when it expires
    /// are abandoned.
    pub fn with_cleanup_timeout(mut self, cleanup_timeout: Duration) -> Self {
        self.cleanup_timeout = cleanup_timeout;
        self
    }

    /// Records outcomes to `log` instead of a log private to the engine.
    pub fn with_outcome_log(mut self, log: OutcomeLog) -> Self {
        self.log = log;
        self
    }

    /// Runs every test in `schedule` and returns their outcomes in schedule order.
    pub async fn run(&self, schedule: &Schedule<F::Client>) -> RunSummary {
        let mut outcomes = Vec::with_capacity(schedule.len());
        for (i, test) in schedule.tests().iter().enumerate() {
            let index = i + 1;
            info!("Running test {} {}", index, test.name());
            let outcome = self.run_test(index, test).await;
            info!(
                "        test {} {} in {:.1}s",
                index,
                outcome.outcome,
                outcome.elapsed.as_secs_f64()
            );
            self.log.record(outcome.clone());
            outcomes.push(outcome);
        }
        RunSummary {
            seed: schedule.seed(),
            outcomes,
        }
    }

    async fn run_test(&self, index: usize, test: &TestSpec<F::Client>) -> TestOutcome {
        let start = Instant::now();
        let client = match self.factory.client().await {
            Ok(client) => client,
            Err(e) => {
                error!(
                    "Unable to create a client for test {} {}: {}",
                    index,
                    test.name(),
                    e
                );
                return TestOutcome::new(test.name(), Outcome::Fail, start.elapsed());
            }
        };

        let context = TestContext::new(test.name(), index, Arc::clone(&self.config));
        let body = test.run(client, context.clone());
        let outcome = match self.test_timeout {
            Some(deadline) => match timeout(deadline, body).await {
                Ok(passed) => verdict(passed),
                Err(_) => {
                    error!(
                        "Test {} {} did not finish within {:?}",
                        index,
                        test.name(),
                        deadline
                    );
                    Outcome::Timeout
                }
            },
            None => verdict(body.await),
        };

        debug!(
            "Releasing {} cleanup action(s) for test {}",
            context.cleanup().len(),
            index
        );
        if timeout(self.cleanup_timeout, context.cleanup().release())
            .await
            .is_err()
        {
            error!(
                "Cleanup of test {} {} did not finish within {:?}",
                index,
                test.name(),
                self.cleanup_timeout
            );
        }
        TestOutcome::new(test.name(), outcome, start.elapsed())
    }
}

fn verdict(passed: bool) -> Outcome {
    if passed {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}
