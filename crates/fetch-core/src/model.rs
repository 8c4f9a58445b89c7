use serde::Deserialize;
use std::path::PathBuf;

/// One managed repository from the configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RepoEntry {
    pub name: String,
    pub url: String,
    pub path: PathBuf,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

/// Options that apply to every repository in the run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobalOptions {
    pub default_depth: Option<u32>,
    pub recursive: bool,
    pub update_submodules: bool,
}
