use crate::git::GitCli;
use crate::model::{GlobalOptions, RepoEntry};
use crate::status::{self, RepoStatus, probe};
use tracing::warn;

/// What the dispatcher decided to do for one repository.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Clone,
    Update,
    Skip,
}

/// Maps a probed status to an action. Clause order makes a stale
/// `is_up_to_date` on a non-git path irrelevant: such paths always
/// reclone.
pub fn plan(status: &RepoStatus) -> Action {
    if status.needs_clone || !status.is_git {
        Action::Clone
    } else if !status.is_up_to_date {
        Action::Update
    } else {
        Action::Skip
    }
}

/// Probe and handle one repository. Returns true when the entry was
/// handled successfully; `status_only` reports and never mutates.
pub fn process_repo(
    git: &GitCli,
    entry: &RepoEntry,
    global: &GlobalOptions,
    status_only: bool,
) -> bool {
    let status = probe(git, &entry.path, &entry.branch);
    if status_only {
        println!("{}", status::render(entry, &status));
        return true;
    }
    match plan(&status) {
        Action::Clone => clone_repo(git, entry, global),
        Action::Update => update_repo(git, entry, global),
        Action::Skip => {
            println!("Repository {} already up to date, skipping", entry.name);
            true
        }
    }
}

/// Clone `entry` fresh. A failed clone is reported and returned as
/// false; a failed submodule pass afterwards is not.
pub fn clone_repo(git: &GitCli, entry: &RepoEntry, global: &GlobalOptions) -> bool {
    println!("Cloning {} into {}...", entry.name, entry.path.display());
    let output = match git.clone_repo(
        &entry.url,
        &entry.path,
        &entry.branch,
        global.default_depth,
        global.recursive,
    ) {
        Ok(output) => output,
        Err(err) => {
            warn!(repo = %entry.name, error = %err, "clone could not be started");
            return false;
        }
    };
    if !output.status_ok {
        warn!(repo = %entry.name, stderr = %output.stderr, "clone failed");
        return false;
    }
    println!("Cloned {}", entry.name);
    if global.update_submodules {
        update_submodules_best_effort(git, entry);
    }
    true
}

/// Bring an existing clone onto the tip of its target branch. Switching
/// branches first is best-effort; the pull itself is not.
pub fn update_repo(git: &GitCli, entry: &RepoEntry, global: &GlobalOptions) -> bool {
    println!("Updating {}...", entry.name);
    let current = match git.current_branch(&entry.path) {
        Ok(current) => current,
        Err(err) => {
            warn!(repo = %entry.name, error = %err, "could not read current branch");
            return false;
        }
    };
    if current.as_deref() != Some(entry.branch.as_str()) {
        println!("  switching to branch {}...", entry.branch);
        match git.checkout(&entry.path, &entry.branch) {
            Ok(output) if !output.status_ok => {
                warn!(repo = %entry.name, stderr = %output.stderr, "checkout failed")
            }
            Ok(_) => {}
            Err(err) => warn!(repo = %entry.name, error = %err, "checkout failed"),
        }
    }
    println!("  pulling...");
    let output = match git.pull(&entry.path, &entry.branch) {
        Ok(output) => output,
        Err(err) => {
            warn!(repo = %entry.name, error = %err, "pull could not be started");
            return false;
        }
    };
    if !output.status_ok {
        warn!(repo = %entry.name, stderr = %output.stderr, "pull failed");
        return false;
    }
    if global.update_submodules {
        update_submodules_best_effort(git, entry);
    }
    println!("Updated {}", entry.name);
    true
}

fn update_submodules_best_effort(git: &GitCli, entry: &RepoEntry) {
    println!("  updating submodules...");
    match git.update_submodules(&entry.path) {
        Ok(output) if !output.status_ok => {
            warn!(repo = %entry.name, stderr = %output.stderr, "submodule update failed")
        }
        Ok(_) => {}
        Err(err) => warn!(repo = %entry.name, error = %err, "submodule update failed"),
    }
}
