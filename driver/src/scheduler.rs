/*!

The scheduler turns the registry of checks into the order they will run in: filter by name,
repeat, then shuffle with a seeded random source. The shuffle flushes out checks that only pass
because of what ran before them, and since the seed is logged any order can be replayed.

!*/

use crate::test_spec::TestSpec;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// The largest repeat count [`schedule`] accepts. Larger counts are clamped to it.
pub const MAX_REPEAT_COUNT: usize = 10_000;

/// The final, read-only order of a run together with the seed that produced it.
pub struct Schedule<C> {
    tests: Vec<TestSpec<C>>,
    seed: u64,
    unknown_names: Vec<String>,
}

impl<C> Schedule<C> {
    /// The tests in the order they must be run.
    pub fn tests(&self) -> &[TestSpec<C>] {
        &self.tests
    }

    /// The seed the shuffle used. Passing it back to [`schedule`] reproduces the same order.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Names from the filter that did not match any registered test.
    pub fn unknown_names(&self) -> &[String] {
        &self.unknown_names
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|test| test.name()).collect()
    }
}

/// Builds the run order from `all_tests`.
///
/// - When `name_filter` is not empty only the tests it names are kept, in their registered order.
///   Every name in the filter that matches no test is logged as a warning and ignored. A filter
///   made only of unknown names therefore selects nothing.
/// - The kept tests are repeated `repeat_count` times; zero yields an empty schedule. Counts above
///   [`MAX_REPEAT_COUNT`] are clamped to it.
/// - The result is shuffled with `seed`, or with a seed taken from the clock when `seed` is zero.
pub fn schedule<C>(
    all_tests: &[TestSpec<C>],
    name_filter: &BTreeSet<String>,
    repeat_count: usize,
    seed: u64,
) -> Schedule<C> {
    let (retained, unknown_names) = filter_tests(all_tests, name_filter);
    let repeat_count = if repeat_count > MAX_REPEAT_COUNT {
        warn!(
            "Repeat count {} is above the maximum of {}, using the maximum",
            repeat_count, MAX_REPEAT_COUNT
        );
        MAX_REPEAT_COUNT
    } else {
        repeat_count
    };
    let mut tests = repeat_tests(&retained, repeat_count);
    let seed = effective_seed(seed);
    shuffle(&mut tests, &mut StdRng::seed_from_u64(seed));
    info!("Tests shuffled with seed {:#x}", seed);
    Schedule {
        tests,
        seed,
        unknown_names,
    }
}

/// Fisher-Yates shuffle of `items` driven by `rng`.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns `seed` unless it is zero, in which case a seed is derived from the low 32 bits of the
/// current time in nanoseconds. Using all the bits makes for long seeds that look alike from one
/// run to the next. The derived seed is never zero, since zero asks for a clock seed.
pub fn effective_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    clock_seed(nanos)
}

fn clock_seed(nanos: u64) -> u64 {
    match nanos & u64::from(u32::MAX) {
        0 => 1,
        low => low,
    }
}

fn filter_tests<C>(
    all_tests: &[TestSpec<C>],
    name_filter: &BTreeSet<String>,
) -> (Vec<TestSpec<C>>, Vec<String>) {
    if name_filter.is_empty() {
        return (all_tests.to_vec(), Vec::new());
    }

    let mut unknown_names = Vec::new();
    for name in name_filter {
        if !all_tests.iter().any(|test| test.name() == name) {
            warn!("Requested test {} does not exist", name);
            unknown_names.push(name.clone());
        }
    }

    let retained = all_tests
        .iter()
        .enumerate()
        .filter_map(|(i, test)| {
            if name_filter.contains(test.name()) {
                Some(test.clone())
            } else {
                info!("Skipping test {} {}", i + 1, test.name());
                None
            }
        })
        .collect();
    (retained, unknown_names)
}

fn repeat_tests<C>(tests: &[TestSpec<C>], repeat_count: usize) -> Vec<TestSpec<C>> {
    let capacity = tests.len().checked_mul(repeat_count).unwrap_or_default();
    let mut repeated = Vec::with_capacity(capacity);
    for _ in 0..repeat_count {
        repeated.extend(tests.iter().cloned());
    }
    repeated
}
