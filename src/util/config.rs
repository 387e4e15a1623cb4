//! Configuration file support for mono.
//!
//! Two optional locations are read:
//! - Global: `<config dir>/mono/config.toml` - user-wide defaults
//! - Project: `mono.toml` in the workspace root - project overrides
//!
//! Project config takes precedence over global config; command-line flags
//! take precedence over both.
//!
//! ```toml
//! client = "yarn"
//!
//! [registry]
//! source = "http"
//! url = "https://registry.npmjs.org"
//!
//! [run]
//! shell = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::util::errors::MonoError;
use crate::util::fs;

/// Package manager used when nothing is configured.
pub const DEFAULT_CLIENT: &str = "yarn";

/// Registry queried by the `http` registry source.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Program queried by the `npm` registry source.
pub const DEFAULT_REGISTRY_PROGRAM: &str = "npm";

/// Name of the project config file in the workspace root.
pub const PROJECT_CONFIG_NAME: &str = "mono.toml";

/// mono configuration. Unset fields fall back to defaults through the
/// accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Package manager executable (yarn, npm, pnpm, ...)
    pub client: Option<String>,

    /// Registry lookup settings
    pub registry: RegistryConfig,

    /// Script execution settings
    pub run: RunConfig,
}

/// How the latest version of an external package is looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrySource {
    /// Ask the npm CLI (`npm show <name> version`).
    #[default]
    Npm,
    /// Query the registry's HTTP API directly.
    Http,
}

/// Registry settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub source: Option<RegistrySource>,
    pub url: Option<String>,
    pub program: Option<String>,
}

/// Script execution settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Run scripts through the platform shell instead of the client.
    pub shell: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        let config: Config = toml::from_str(&contents).map_err(|e| MonoError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        if let Some(raw) = &config.registry.url {
            Url::parse(raw).map_err(|e| MonoError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("registry url `{}`: {}", raw, e),
            })?;
        }

        Ok(config)
    }

    /// Load configuration if the file exists.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if path.is_file() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.client.is_some() {
            self.client = other.client;
        }
        if other.registry.source.is_some() {
            self.registry.source = other.registry.source;
        }
        if other.registry.url.is_some() {
            self.registry.url = other.registry.url;
        }
        if other.registry.program.is_some() {
            self.registry.program = other.registry.program;
        }
        if other.run.shell.is_some() {
            self.run.shell = other.run.shell;
        }
    }

    /// The package manager executable.
    pub fn client(&self) -> &str {
        self.client.as_deref().unwrap_or(DEFAULT_CLIENT)
    }

    /// The registry lookup strategy.
    pub fn registry_source(&self) -> RegistrySource {
        self.registry.source.unwrap_or_default()
    }

    /// The registry base URL, validated.
    pub fn registry_url(&self) -> Result<Url> {
        let raw = self.registry.url.as_deref().unwrap_or(DEFAULT_REGISTRY_URL);
        Url::parse(raw).with_context(|| format!("invalid registry url `{}`", raw))
    }

    /// The program used by the `npm` registry source.
    pub fn registry_program(&self) -> &str {
        self.registry
            .program
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRY_PROGRAM)
    }

    /// Whether scripts run through the shell rather than the client.
    pub fn run_in_shell(&self) -> bool {
        self.run.shell.unwrap_or(false)
    }
}

/// Get the global config path (`<config dir>/mono/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mono").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path for a workspace root.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_NAME)
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`mono.toml`)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    for path in [global_path, project_path].into_iter().flatten() {
        if let Some(file) = Config::load_if_exists(path)? {
            tracing::debug!("loaded config from {}", path.display());
            config.merge(file);
        }
    }

    Ok(config)
}
