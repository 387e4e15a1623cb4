//! The aggregate install: one package manager run at the workspace root.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::process::{find_executable, ProcessBuilder};

/// Runs the package manager's install in a workspace root.
#[derive(Debug, Clone)]
pub struct Installer {
    client: String,
}

impl Installer {
    pub fn new(client: impl Into<String>) -> Self {
        Installer {
            client: client.into(),
        }
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    /// Resolve the client on `PATH`.
    pub fn program(&self) -> Result<PathBuf> {
        match find_executable(&self.client) {
            Some(path) => Ok(path),
            None => bail!(
                "package manager `{}` was not found on PATH; set `client` in mono.toml or pass --client",
                self.client
            ),
        }
    }

    /// Install with inherited stdio, failing with the client's exit code.
    pub fn install(&self, root_dir: &Path) -> Result<()> {
        let program = self.program()?;
        tracing::debug!("installing in {}", root_dir.display());

        ProcessBuilder::new(program).cwd(root_dir).exec_inherited()
    }
}
