use crate::git::GitCli;
use crate::model::RepoEntry;
use std::path::Path;
use tracing::warn;

/// Snapshot of a local repository relative to its upstream, computed
/// fresh on every run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepoStatus {
    pub exists: bool,
    pub is_git: bool,
    pub current_branch: Option<String>,
    pub remote_url: Option<String>,
    pub is_up_to_date: bool,
    pub behind_count: u32,
    pub needs_clone: bool,
}

/// Read-only probe of the repository at `path` against `origin/<branch>`.
/// The only side effect is the best-effort `git fetch`.
pub fn probe(git: &GitCli, path: &Path, branch: &str) -> RepoStatus {
    if !path.exists() {
        return RepoStatus {
            needs_clone: true,
            ..RepoStatus::default()
        };
    }
    if !path.join(".git").exists() {
        return RepoStatus {
            exists: true,
            ..RepoStatus::default()
        };
    }
    match probe_git(git, path, branch) {
        Ok(status) => status,
        Err(err) => {
            // Degrade to "not a git repository" so the dispatcher reclones
            // instead of the whole run aborting.
            warn!(path = %path.display(), error = %err, "status probe failed");
            RepoStatus {
                exists: true,
                ..RepoStatus::default()
            }
        }
    }
}

fn probe_git(git: &GitCli, path: &Path, branch: &str) -> anyhow::Result<RepoStatus> {
    let current_branch = git.current_branch(path)?;
    let remote_url = git.remote_url(path)?;
    let fetch = git.fetch_origin(path)?;
    if !fetch.status_ok {
        warn!(path = %path.display(), stderr = %fetch.stderr, "fetch origin failed; behind count may be stale");
    }
    let behind_count = git.behind_count(path, branch)?;
    Ok(RepoStatus {
        exists: true,
        is_git: true,
        current_branch,
        remote_url,
        is_up_to_date: behind_count == 0,
        behind_count,
        needs_clone: false,
    })
}

/// Human-readable status report for `--status` mode.
pub fn render(entry: &RepoEntry, status: &RepoStatus) -> String {
    let mut lines = vec![
        format!("Repository: {}", entry.name),
        format!("  path: {}", entry.path.display()),
        format!("  url: {}", entry.url),
        format!("  branch: {}", entry.branch),
    ];
    if !status.exists {
        lines.push("  status: directory missing - clone required".to_string());
    } else if !status.is_git {
        lines.push("  status: not a git repository - reclone required".to_string());
    } else {
        lines.push(format!(
            "  current branch: {}",
            status.current_branch.as_deref().unwrap_or("(detached)")
        ));
        lines.push(format!(
            "  remote url: {}",
            status.remote_url.as_deref().unwrap_or("(none)")
        ));
        if status.is_up_to_date {
            lines.push("  status: up to date".to_string());
        } else {
            lines.push(format!(
                "  status: behind {} commit(s) - update required",
                status.behind_count
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::process::Command;
    use tempfile::TempDir;

    fn entry(path: &Path) -> RepoEntry {
        RepoEntry {
            name: "demo".to_string(),
            url: "https://example.com/demo.git".to_string(),
            path: path.to_path_buf(),
            branch: "main".to_string(),
        }
    }

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn missing_path_needs_clone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");
        let status = probe(&GitCli::default(), &path, "main");
        assert!(status.needs_clone);
        assert!(!status.exists);
        assert!(!status.is_git);
        assert!(!status.is_up_to_date);
    }

    #[test]
    fn plain_directory_is_not_git() {
        let dir = TempDir::new().unwrap();
        let status = probe(&GitCli::default(), dir.path(), "main");
        assert!(status.exists);
        assert!(!status.is_git);
        assert!(!status.needs_clone);
        assert!(!status.is_up_to_date);
    }

    #[test]
    fn failing_git_degrades_to_not_git() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let git = GitCli::new("git-binary-that-does-not-exist");
        let status = probe(&git, dir.path(), "main");
        assert!(status.exists);
        assert!(!status.is_git);
        assert!(!status.is_up_to_date);
    }

    #[test]
    fn fresh_repo_probes_as_up_to_date() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = GitCli::default();
        Command::new("git")
            .args(["init", "-b", "main"])
            .arg(dir.path())
            .output()
            .unwrap();
        let status = probe(&git, dir.path(), "main");
        assert!(status.is_git);
        assert_eq!(status.current_branch.as_deref(), Some("main"));
        assert_eq!(status.remote_url, None);
        assert!(status.is_up_to_date);
        assert_eq!(status.behind_count, 0);
    }

    #[test]
    fn render_reports_missing_directory() {
        let entry = entry(&PathBuf::from("vendor/demo"));
        let status = RepoStatus {
            needs_clone: true,
            ..RepoStatus::default()
        };
        let report = render(&entry, &status);
        assert!(report.contains("Repository: demo"));
        assert!(report.contains("clone required"));
    }

    #[test]
    fn render_reports_behind_count() {
        let entry = entry(&PathBuf::from("vendor/demo"));
        let status = RepoStatus {
            exists: true,
            is_git: true,
            current_branch: Some("main".to_string()),
            remote_url: Some("https://example.com/demo.git".to_string()),
            is_up_to_date: false,
            behind_count: 3,
            needs_clone: false,
        };
        let report = render(&entry, &status);
        assert!(report.contains("current branch: main"));
        assert!(report.contains("behind 3 commit(s)"));
    }
}
