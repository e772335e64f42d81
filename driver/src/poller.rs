use log::trace;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// How often, and how many times, [`poll_until`] samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollSettings {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// The longest a poll with these settings can take, ignoring the time spent sampling.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// The sample that satisfied the predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollAttempt<T> {
    /// 1-based number of the attempt.
    pub attempt: u32,
    pub observed: T,
    /// Time since polling started.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<T> {
    Satisfied(PollAttempt<T>),
    /// Every attempt was used without satisfying the predicate. `last` is the final sample.
    Exhausted { attempts: u32, last: Option<T> },
}

impl<T> PollResult<T> {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PollResult::Satisfied(_))
    }
}

/// Samples external state until `predicate(baseline, sample)` holds, waiting
/// `settings.interval` before each sample and giving up after `settings.max_attempts` samples.
///
/// Returns as soon as a sample satisfies the predicate. An error from `sample` ends the poll
/// immediately and is returned as is; sampling errors are not retried here.
pub async fn poll_until<T, E, S, Fut, P>(
    settings: PollSettings,
    baseline: &T,
    mut sample: S,
    predicate: P,
) -> Result<PollResult<T>, E>
where
    S: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&T, &T) -> bool,
{
    let start = Instant::now();
    let mut last = None;
    for attempt in 1..=settings.max_attempts {
        sleep(settings.interval).await;
        let observed = sample().await?;
        if predicate(baseline, &observed) {
            trace!(
                "Poll satisfied on attempt {} of {}",
                attempt,
                settings.max_attempts
            );
            return Ok(PollResult::Satisfied(PollAttempt {
                attempt,
                observed,
                elapsed: start.elapsed(),
            }));
        }
        trace!(
            "Poll not satisfied on attempt {} of {}",
            attempt,
            settings.max_attempts
        );
        last = Some(observed);
    }
    Ok(PollResult::Exhausted {
        attempts: settings.max_attempts,
        last,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const SETTINGS: PollSettings = PollSettings::new(Duration::from_secs(5), 10);

    fn greater(baseline: &i32, sample: &i32) -> bool {
        sample > baseline
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_first_success() {
        let mut samples = vec![2, 2, 2, 3, 4, 5].into_iter();
        let mut calls = 0;
        let result = poll_until(
            SETTINGS,
            &2,
            || {
                calls += 1;
                let next = samples.next();
                async move { next.ok_or("ran out of samples") }
            },
            greater,
        )
        .await
        .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(
            result,
            PollResult::Satisfied(PollAttempt {
                attempt: 4,
                observed: 3,
                elapsed: Duration::from_secs(20),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_exactly_max_attempts() {
        let mut calls = 0;
        let result = poll_until(
            SETTINGS,
            &5,
            || {
                calls += 1;
                async { Ok::<_, String>(5) }
            },
            greater,
        )
        .await
        .unwrap();

        assert_eq!(calls, 10);
        assert_eq!(
            result,
            PollResult::Exhausted {
                attempts: 10,
                last: Some(5)
            }
        );
        assert!(!result.is_satisfied());
    }

    #[tokio::test(start_paused = true)]
    async fn sample_error_aborts() {
        let mut calls = 0;
        let result = poll_until(
            SETTINGS,
            &0,
            || {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt == 2 {
                        Err("connection refused")
                    } else {
                        Ok(0)
                    }
                }
            },
            greater,
        )
        .await;

        assert_eq!(result, Err("connection refused"));
        assert_eq!(calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_never_samples() {
        let mut calls = 0;
        let result = poll_until(
            PollSettings::new(Duration::from_secs(1), 0),
            &0,
            || {
                calls += 1;
                async { Ok::<_, String>(1) }
            },
            greater,
        )
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(
            result,
            PollResult::Exhausted {
                attempts: 0,
                last: None
            }
        );
    }

    #[test]
    fn budget() {
        assert_eq!(
            PollSettings::new(Duration::from_secs(5), 48).budget(),
            Duration::from_secs(240)
        );
    }
}
