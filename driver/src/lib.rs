/*!

The orchestration core of the end-to-end driver.

A run goes through these steps:
- [`schedule`] filters, repeats and shuffles the registered [`TestSpec`]s.
- A [`Watchdog`] is started to bound the duration of the whole run.
- The [`Engine`] runs the schedule, one test at a time, each with a fresh client from a
  [`ClientFactory`](e2e_model::clients::ClientFactory), and records a [`TestOutcome`] for each.
- [`reporter::report`] writes the outcomes as TAP.

Checks that wait on the cluster use [`poll_until`] to sample its state at a fixed interval and a
bounded number of times.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

mod cleanup;
mod engine;
mod outcome;
mod poller;
pub mod reporter;
mod scheduler;
mod test_spec;
mod watchdog;

pub use cleanup::Cleanup;
pub use engine::{Engine, DEFAULT_CLEANUP_TIMEOUT};
pub use outcome::{Outcome, OutcomeLog, RunSummary, TestOutcome};
pub use poller::{poll_until, PollAttempt, PollResult, PollSettings};
pub use scheduler::{effective_seed, schedule, shuffle, Schedule, MAX_REPEAT_COUNT};
pub use test_spec::{TestBody, TestContext, TestSpec};
pub use watchdog::{Watchdog, DEFAULT_RUN_TIMEOUT, TIMED_OUT};
