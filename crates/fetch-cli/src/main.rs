use std::process::ExitCode;

use clap::Parser;
use fetch_core::paths;
use fetch_core::run::{self, RunOptions};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = cli::Cli::parse();
    let root = paths::project_root();
    let options = RunOptions {
        config_path: paths::resolve(&root, &args.config),
        root,
        repo_filter: args.repo,
        status_only: args.status,
    };

    match run::run(&options) {
        Ok(summary) if summary.all_ok() => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!(
                "{} of {} repositories failed",
                summary.total - summary.succeeded,
                summary.total
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
