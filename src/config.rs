use anyhow::{Context, Result};
use std::path::PathBuf;

/// Python version provisioned when `--version` is not given
pub const DEFAULT_PYTHON_VERSION: &str = "3.9.5";

const DEFAULT_PYENV: &str = "pyenv";
const DEFAULT_PACKAGE: &str = "poetry";

/// Configuration for poetry-venv
#[derive(Debug, Clone)]
pub struct Config {
    /// pyenv executable (name on PATH or absolute path)
    pub pyenv: String,
    /// pip requirement used to install Poetry, e.g. `poetry==1.8.3`
    pub package: String,
    /// Directory where `poetry init` runs
    pub project_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let project_dir =
            std::env::current_dir().context("Failed to read the current directory")?;
        Ok(Self::from_lookup(project_dir, |key| std::env::var(key).ok()))
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(project_dir: PathBuf, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            pyenv: read("POETRY_VENV_PYENV", DEFAULT_PYENV),
            package: read("POETRY_VENV_PACKAGE", DEFAULT_PACKAGE),
            project_dir,
        }
    }
}
