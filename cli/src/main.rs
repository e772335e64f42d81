/*!

This is the command line interface of the end-to-end driver. It runs the registered checks
against an existing Kubernetes cluster in a random but reproducible order and writes a TAP
summary to stdout.

!*/

mod run;

use clap::Parser;
use e2e_driver::MAX_REPEAT_COUNT;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::path::PathBuf;

/// Runs the end-to-end checks against a Kubernetes cluster.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Path to the kubeconfig file. When absent the configuration is inferred from the
    /// environment, e.g. the `KUBECONFIG` environment variable.
    #[clap(long = "kubeconfig")]
    kubeconfig: Option<PathBuf>,

    /// The kubeconfig context to use instead of the current context.
    #[clap(long = "context")]
    context: Option<String>,

    /// The address of the API server, overriding the one found in the kubeconfig.
    #[clap(long = "host")]
    host: Option<String>,

    /// The namespace the checks create their pods in.
    #[clap(long = "namespace", default_value = "default")]
    namespace: String,

    /// The provider the cluster runs on, e.g. `gce` or `local`.
    #[clap(long = "provider", default_value = "local")]
    provider: String,

    /// The root of this repository. Manifests are read from its `manifests` directory.
    #[clap(long = "repo-root", default_value = ".")]
    repo_root: PathBuf,

    /// Run only the named check. Can be given more than once. All checks run when absent.
    #[clap(long = "test")]
    tests: Vec<String>,

    /// How many times to run each selected check, at most 10000.
    #[clap(long = "times", default_value = "1", parse(try_from_str = parse_repeat_count))]
    times: usize,

    /// The seed used to shuffle the checks. `0` picks a seed from the clock. The seed is logged
    /// so that a run order can be reproduced.
    #[clap(long = "seed", default_value = "0")]
    seed: u64,

    /// Seconds after which the whole run is aborted.
    #[clap(long = "timeout-secs", default_value = "600")]
    timeout_secs: u64,

    /// Seconds after which a single check is failed. `0`, the default, lets a check run until the
    /// whole run times out.
    #[clap(long = "test-timeout-secs", default_value = "0")]
    test_timeout_secs: u64,

    /// Print the names of the registered checks and exit.
    #[clap(long = "list")]
    list: bool,
}

fn parse_repeat_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|e| format!("{}", e))?;
    if count > MAX_REPEAT_COUNT {
        return Err(format!("must be at most {}", MAX_REPEAT_COUNT));
    }
    Ok(count)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    match run::run(args).await {
        Ok(true) => info!("All tests pass"),
        Ok(false) => {
            error!("At least one test failed");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for the driver crates only.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("e2e_checks"), level)
                .filter(Some("e2e_driver"), level)
                .filter(Some("e2e_model"), level)
                .init();
        }
    }
}
