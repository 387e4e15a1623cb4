//! Latest-version lookups against an external package registry.
//!
//! Two implementations are provided:
//! - [`NpmRegistry`] asks the npm CLI (`npm show <name> version`)
//! - [`HttpRegistry`] queries `<registry>/<name>/latest` over HTTP

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::util::config::{Config, RegistrySource};
use crate::util::process::{find_executable, ProcessBuilder};

/// A source of published package versions.
pub trait Registry {
    /// Return the latest published version of `name`, or `None` if the
    /// registry does not know the package.
    fn latest_version(&self, name: &str) -> Result<Option<String>>;
}

/// Registry lookups through the npm CLI.
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    program: PathBuf,
}

impl NpmRegistry {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        NpmRegistry {
            program: program.into(),
        }
    }
}

impl Registry for NpmRegistry {
    fn latest_version(&self, name: &str) -> Result<Option<String>> {
        let output = ProcessBuilder::new(&self.program)
            .args(["show", name, "version"])
            .exec()?;

        if !output.status.success() {
            tracing::debug!(
                "`{} show {}` failed: {}",
                self.program.display(),
                name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(version).filter(|v| !v.is_empty()))
    }
}

/// Registry lookups over the registry's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    base: Url,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

impl HttpRegistry {
    pub fn new(base: Url) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mono/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpRegistry { base, client })
    }

    /// URL of the `latest` dist-tag document for `name`.
    ///
    /// A scoped name keeps its `/`: `<url>/@scope/name/latest`.
    pub fn latest_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("registry url `{}` cannot be a base", self.base))?
            .pop_if_empty()
            .extend(name.split('/'))
            .push("latest");
        Ok(url)
    }
}

impl Registry for HttpRegistry {
    fn latest_version(&self, name: &str) -> Result<Option<String>> {
        let url = self.latest_url(name)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("failed to query {}", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let manifest: LatestManifest = response
            .error_for_status()
            .with_context(|| format!("registry request failed: {}", url))?
            .json()
            .with_context(|| format!("invalid registry response from {}", url))?;

        Ok(Some(manifest.version))
    }
}

/// Build the registry selected by the configuration.
pub fn registry_from_config(config: &Config) -> Result<Box<dyn Registry>> {
    match config.registry_source() {
        RegistrySource::Npm => {
            let program = config.registry_program();
            let program = find_executable(program).unwrap_or_else(|| PathBuf::from(program));
            Ok(Box::new(NpmRegistry::new(program)))
        }
        RegistrySource::Http => Ok(Box::new(HttpRegistry::new(config.registry_url()?)?)),
    }
}
