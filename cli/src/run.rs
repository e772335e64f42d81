use crate::Args;
use anyhow::{Context, Result};
use e2e_checks::all_tests;
use e2e_driver::reporter::{report, report_bail_out};
use e2e_driver::{schedule, Engine, OutcomeLog, Watchdog, TIMED_OUT};
use e2e_model::clients::{PodClient, PodClientFactory};
use e2e_model::RunConfiguration;
use log::{error, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Runs the selected checks and reports them. Returns `true` if every check passed.
pub(crate) async fn run(args: Args) -> Result<bool> {
    let tests = all_tests::<PodClient>();
    if args.list {
        for test in &tests {
            println!("{}", test.name());
        }
        return Ok(true);
    }

    let config = Arc::new(run_configuration(&args)?);
    info!(
        "Running checks against provider '{}' in namespace '{}'",
        config.provider, config.namespace
    );

    let name_filter: BTreeSet<String> = args.tests.iter().cloned().collect();
    let schedule = schedule(&tests, &name_filter, args.times, args.seed);
    let planned = schedule.len();

    let log = OutcomeLog::new();
    let watchdog_log = log.clone();
    let watchdog = Watchdog::start_with(Duration::from_secs(args.timeout_secs), move || {
        report_bail_out(planned, &watchdog_log.snapshot(), TIMED_OUT);
        error!("{}", TIMED_OUT);
        log::logger().flush();
        std::process::exit(1);
    });

    let test_timeout = match args.test_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let summary = Engine::new(PodClientFactory::new(Arc::clone(&config)), config)
        .with_test_timeout(test_timeout)
        .with_outcome_log(log)
        .run(&schedule)
        .await;
    watchdog.cancel();

    report(&summary.outcomes);
    info!("Tests were shuffled with seed {:#x}", summary.seed);
    Ok(summary.passed())
}

fn run_configuration(args: &Args) -> Result<RunConfiguration> {
    let repo_root = args
        .repo_root
        .canonicalize()
        .with_context(|| format!("Unable to find repo root '{}'", args.repo_root.display()))?;
    Ok(RunConfiguration {
        kubeconfig: args.kubeconfig.clone(),
        context: args.context.clone(),
        host: args.host.clone(),
        namespace: args.namespace.clone(),
        provider: args.provider.clone(),
        repo_root,
    })
}
