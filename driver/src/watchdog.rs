use log::error;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// The default ceiling for a whole run.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// The message logged when the run exceeds its ceiling.
pub const TIMED_OUT: &str = "This test run has timed out. Cleanup not guaranteed.";

/// A timer running alongside the whole test run. If the run is still going when the timer
/// expires, the watchdog's action is executed; by default the action ends the process. The timer
/// does not care which test is running and is never reset.
///
/// The timer is stopped by [`Watchdog::cancel`] or by dropping the `Watchdog`.
#[derive(Debug)]
pub struct Watchdog {
    ceiling: Duration,
    handle: JoinHandle<()>,
}

impl Watchdog {
    /// Starts a watchdog that logs [`TIMED_OUT`] and exits the process with status 1 once
    /// `ceiling` has elapsed. Must be called from within a tokio runtime.
    pub fn start(ceiling: Duration) -> Self {
        Self::start_with(ceiling, || {
            error!("{}", TIMED_OUT);
            log::logger().flush();
            std::process::exit(1);
        })
    }

    /// Starts a watchdog that runs `on_expire` once `ceiling` has elapsed.
    pub fn start_with<F>(ceiling: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            sleep(ceiling).await;
            on_expire();
        });
        Self { ceiling, handle }
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    /// `true` once the timer has expired and its action has run.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the timer. The action will not run unless it already has.
    pub fn cancel(self) {
        // Drop aborts the task.
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
