use super::errors::StatePathError;
use std::path::PathBuf;

pub const DEFAULT_STATE_ROOT_DIR: &str = ".promptcraft";
pub const STATE_ROOT_ENV_VAR: &str = "PROMPTCRAFT_STATE_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub root: PathBuf,
}

impl StatePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_dir().join("promptcraft.log")
    }
}

pub fn default_state_root_path() -> Result<PathBuf, StatePathError> {
    if let Some(root) = std::env::var_os(STATE_ROOT_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let home = std::env::var_os("HOME").ok_or(StatePathError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(DEFAULT_STATE_ROOT_DIR))
}
