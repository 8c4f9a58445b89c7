use crate::config::FetchConfig;
use crate::git::GitCli;
use crate::model::RepoEntry;
use crate::paths;
use crate::sync::process_repo;
use anyhow::bail;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct RunOptions {
    pub config_path: PathBuf,
    pub root: PathBuf,
    pub repo_filter: Option<String>,
    pub status_only: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn all_ok(&self) -> bool {
        self.succeeded == self.total
    }
}

pub fn run(options: &RunOptions) -> anyhow::Result<RunSummary> {
    run_with_git(&GitCli::default(), options)
}

/// Sequential pass over the configured repositories. Config and filter
/// errors abort before anything is touched; a failure on one repository
/// is recorded and the loop moves on to the next.
pub fn run_with_git(git: &GitCli, options: &RunOptions) -> anyhow::Result<RunSummary> {
    let config = FetchConfig::load(&options.config_path)?;
    let mut repositories = config.repositories;
    if let Some(name) = options.repo_filter.as_deref() {
        repositories.retain(|entry| entry.name == name);
        if repositories.is_empty() {
            bail!("no repository named '{name}' in the configuration");
        }
    }

    println!("Processing {} repositories...", repositories.len());
    let total = repositories.len();
    let mut succeeded = 0;
    for entry in repositories {
        let entry = resolve_entry(entry, &options.root);
        if process_repo(git, &entry, &config.global, options.status_only) {
            succeeded += 1;
        } else {
            warn!(repo = %entry.name, "repository processing failed");
        }
        println!();
    }

    println!("Processed {succeeded}/{total} repositories");
    Ok(RunSummary { succeeded, total })
}

fn resolve_entry(mut entry: RepoEntry, root: &Path) -> RepoEntry {
    entry.path = paths::resolve(root, &entry.path);
    entry
}
