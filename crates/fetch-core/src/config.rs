use crate::model::{GlobalOptions, RepoEntry};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML in config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("config is missing the 'repositories' section")]
    MissingRepositories,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    global: GlobalOptions,
    repositories: Option<Vec<RepoEntry>>,
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub global: GlobalOptions,
    pub repositories: Vec<RepoEntry>,
}

impl FetchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        let raw: RawConfig = serde_yaml::from_str(&data)?;
        let repositories = raw.repositories.ok_or(ConfigError::MissingRepositories)?;
        Ok(Self {
            global: raw.global,
            repositories,
        })
    }
}
