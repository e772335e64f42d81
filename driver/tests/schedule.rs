use e2e_driver::{schedule, TestContext, TestSpec};
use proptest::prelude::*;
use std::collections::BTreeSet;

const REGISTERED: &[&str] = &[
    "TestLivenessHttp",
    "TestLivenessExec",
    "TestReadiness",
    "TestJobCompletes",
    "TestServiceDns",
    "TestVolumeMount",
];

fn registry() -> Vec<TestSpec<()>> {
    REGISTERED
        .iter()
        .map(|name| TestSpec::new(*name, |_: (), _: TestContext| async { true }))
        .collect()
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

/// Any subset of the registered names, plus possibly some names nobody registered.
fn name_filter() -> impl Strategy<Value = BTreeSet<String>> {
    (
        proptest::collection::btree_set(proptest::sample::select(REGISTERED), 0..=REGISTERED.len()),
        proptest::collection::btree_set("Unknown[A-Z]{1,4}", 0..3),
    )
        .prop_map(|(known, unknown)| {
            known
                .into_iter()
                .map(str::to_string)
                .chain(unknown)
                .collect()
        })
}

proptest! {
    #[test]
    fn same_seed_same_order(filter in name_filter(), times in 0usize..5, seed in 1u64..) {
        let all = registry();
        let first = schedule(&all, &filter, times, seed);
        let second = schedule(&all, &filter, times, seed);
        prop_assert_eq!(first.names(), second.names());
        prop_assert_eq!(first.seed(), seed);
    }

    #[test]
    fn schedule_is_a_permutation_of_the_repeated_selection(
        filter in name_filter(),
        times in 0usize..5,
        seed in 1u64..,
    ) {
        let all = registry();
        let selected: Vec<&str> = if filter.is_empty() {
            REGISTERED.to_vec()
        } else {
            REGISTERED
                .iter()
                .copied()
                .filter(|name| filter.contains(*name))
                .collect()
        };
        let expected: Vec<String> = selected
            .iter()
            .cycle()
            .take(selected.len() * times)
            .map(|name| name.to_string())
            .collect();

        let schedule = schedule(&all, &filter, times, seed);
        let actual: Vec<String> = schedule.names().iter().map(|name| name.to_string()).collect();

        prop_assert_eq!(schedule.len(), selected.len() * times);
        prop_assert_eq!(sorted(actual), sorted(expected));
    }

    #[test]
    fn unknown_names_are_exactly_the_unregistered_ones(filter in name_filter(), seed in 1u64..) {
        let all = registry();
        let schedule = schedule(&all, &filter, 1, seed);
        let expected: Vec<String> = filter
            .iter()
            .filter(|name| !REGISTERED.contains(&name.as_str()))
            .cloned()
            .collect();
        prop_assert_eq!(schedule.unknown_names(), expected.as_slice());
    }
}
