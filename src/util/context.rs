//! Global context for mono operations.
//!
//! Holds the working directory a command was started from and knows how
//! to turn it into a mono repo and its merged configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::discovery::MonoRepo;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// Global context containing the invocation's paths and overrides.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Client set on the command line, overriding every config file
    client_override: Option<String>,

    /// Global config file location, if the platform has one
    global_config: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context rooted at a specific directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        GlobalContext {
            cwd: cwd.into(),
            client_override: None,
            global_config: global_config_path(),
        }
    }

    /// Override the package manager client.
    pub fn with_client(mut self, client: Option<String>) -> Self {
        self.client_override = client;
        self
    }

    /// Use a different global config file, or none at all.
    pub fn with_global_config(mut self, path: Option<PathBuf>) -> Self {
        self.global_config = path;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Locate the mono repo containing the working directory.
    pub fn load_mono_repo(&self) -> Result<Option<MonoRepo>> {
        MonoRepo::load(&self.cwd)
    }

    /// Merged configuration for the workspace rooted at `root`.
    pub fn config_for(&self, root: &Path) -> Result<Config> {
        let project = project_config_path(root);
        let mut config = load_config(self.global_config.as_deref(), Some(&project))?;

        if let Some(client) = &self.client_override {
            config.client = Some(client.clone());
        }

        Ok(config)
    }
}
