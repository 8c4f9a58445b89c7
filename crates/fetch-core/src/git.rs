use anyhow::Context;
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of one git invocation. Callers decide whether a
/// non-zero exit is fatal, recoverable, or ignorable.
#[derive(Debug)]
pub struct GitOutput {
    pub status_ok: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for GitOutput {
    fn from(output: Output) -> Self {
        Self {
            status_ok: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Thin wrapper over the git binary. The working directory is always an
/// explicit argument so operations stay composable; process-wide current
/// directory is never touched.
#[derive(Clone, Debug)]
pub struct GitCli {
    binary: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
        }
    }
}

impl GitCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run<S: AsRef<str>>(&self, workdir: Option<&Path>, args: &[S]) -> anyhow::Result<GitOutput> {
        let mut command = Command::new(&self.binary);
        for arg in args {
            command.arg(arg.as_ref());
        }
        if let Some(dir) = workdir {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .with_context(|| format!("run {} {}", self.binary, args_label(args)))?;
        Ok(GitOutput::from(output))
    }

    /// Name of the currently checked-out branch, `None` when git cannot
    /// report one (detached HEAD, not a repository).
    pub fn current_branch(&self, workdir: &Path) -> anyhow::Result<Option<String>> {
        let output = self.run(Some(workdir), &["branch", "--show-current"])?;
        Ok((output.status_ok && !output.stdout.is_empty()).then_some(output.stdout))
    }

    /// URL of the `origin` remote, `None` when it is not configured.
    pub fn remote_url(&self, workdir: &Path) -> anyhow::Result<Option<String>> {
        let output = self.run(Some(workdir), &["remote", "get-url", "origin"])?;
        Ok(output.status_ok.then_some(output.stdout))
    }

    pub fn fetch_origin(&self, workdir: &Path) -> anyhow::Result<GitOutput> {
        self.run(Some(workdir), &["fetch", "origin"])
    }

    /// Number of commits on `origin/<branch>` that are not in local HEAD.
    /// When the comparison itself fails (no upstream ref, unborn HEAD)
    /// the count is reported as zero, matching `git rev-list` being
    /// unable to say anything useful.
    pub fn behind_count(&self, workdir: &Path, branch: &str) -> anyhow::Result<u32> {
        let range = format!("HEAD..origin/{branch}");
        let output = self.run(Some(workdir), &["rev-list", "--count", &range])?;
        if !output.status_ok {
            return Ok(0);
        }
        output
            .stdout
            .parse()
            .with_context(|| format!("parse rev-list count '{}'", output.stdout))
    }

    pub fn clone_repo(
        &self,
        url: &str,
        dest: &Path,
        branch: &str,
        depth: Option<u32>,
        recursive: bool,
    ) -> anyhow::Result<GitOutput> {
        self.run(None, &clone_args(url, dest, branch, depth, recursive))
    }

    pub fn checkout(&self, workdir: &Path, branch: &str) -> anyhow::Result<GitOutput> {
        self.run(Some(workdir), &["checkout", branch])
    }

    pub fn pull(&self, workdir: &Path, branch: &str) -> anyhow::Result<GitOutput> {
        self.run(Some(workdir), &["pull", "origin", branch])
    }

    pub fn update_submodules(&self, workdir: &Path) -> anyhow::Result<GitOutput> {
        self.run(
            Some(workdir),
            &["submodule", "update", "--init", "--recursive"],
        )
    }
}

fn clone_args(
    url: &str,
    dest: &Path,
    branch: &str,
    depth: Option<u32>,
    recursive: bool,
) -> Vec<String> {
    let mut args = vec!["clone".to_string(), "-b".to_string(), branch.to_string()];
    if let Some(depth) = depth {
        args.push("--depth".to_string());
        args.push(depth.to_string());
    }
    if recursive {
        args.push("--recursive".to_string());
    }
    args.push(url.to_string());
    args.push(dest.display().to_string());
    args
}

fn args_label<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| arg.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn clone_args_minimal() {
        let args = clone_args(
            "https://example.com/demo.git",
            Path::new("/tmp/demo"),
            "main",
            None,
            false,
        );
        assert_eq!(
            args,
            vec![
                "clone",
                "-b",
                "main",
                "https://example.com/demo.git",
                "/tmp/demo"
            ]
        );
    }

    #[test]
    fn clone_args_with_depth_and_recursive() {
        let args = clone_args(
            "https://example.com/demo.git",
            Path::new("/tmp/demo"),
            "develop",
            Some(1),
            true,
        );
        assert_eq!(
            args,
            vec![
                "clone",
                "-b",
                "develop",
                "--depth",
                "1",
                "--recursive",
                "https://example.com/demo.git",
                "/tmp/demo"
            ]
        );
    }

    #[test]
    fn missing_binary_is_an_error() {
        let git = GitCli::new("git-binary-that-does-not-exist");
        let dir = TempDir::new().unwrap();
        assert!(git.current_branch(dir.path()).is_err());
    }

    #[test]
    fn current_branch_on_fresh_repo() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = GitCli::default();
        git.run(
            Some(dir.path()),
            &["init", "-b", "main", dir.path().to_str().unwrap()],
        )
        .unwrap();
        let branch = git.current_branch(dir.path()).unwrap();
        assert_eq!(branch.as_deref(), Some("main"));
        // no origin configured
        assert_eq!(git.remote_url(dir.path()).unwrap(), None);
        assert!(!git.fetch_origin(dir.path()).unwrap().status_ok);
        assert_eq!(git.behind_count(dir.path(), "main").unwrap(), 0);
    }
}
