//! Subprocess execution utilities.
//!
//! Every child is run to completion before the caller moves on; nothing in
//! mono runs two children at once. Two modes are offered:
//!
//! - [`ProcessBuilder::exec_inherited`]: the child shares our stdio.
//! - [`ProcessBuilder::exec_streamed`]: stdout/stderr are read line by line
//!   and re-emitted through a [`Logger`] so every line carries a prefix.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;

use anyhow::{anyhow, Context, Result};

use crate::util::errors::MonoError;
use crate::util::logger::Logger;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, OsString>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Build a process running `script` through the platform shell.
    pub fn shell(script: impl Into<String>) -> Self {
        let script = script.into();
        if cfg!(windows) {
            ProcessBuilder::new("cmd").args(["/C", script.as_str()])
        } else {
            ProcessBuilder::new("sh").args(["-c", script.as_str()])
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_os_string());
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and collect its output.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("running `{}`", self.display_command());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        child
            .wait_with_output()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))
    }

    /// Execute with inherited stdio and return the exit status.
    pub fn status(&self) -> Result<ExitStatus> {
        tracing::debug!("running `{}` (inherited stdio)", self.display_command());

        self.build_command()
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }

    /// Execute with inherited stdio and require success.
    pub fn exec_inherited(&self) -> Result<()> {
        let status = self.status()?;
        self.check(status)
    }

    /// Execute, forwarding stdout lines to `logger.log` and stderr lines to
    /// `logger.error` as they arrive, then require success.
    ///
    /// Both pipes are drained before the child is waited on, so a chatty
    /// child cannot fill a pipe buffer and block.
    pub fn exec_streamed(&self, logger: &Logger) -> Result<()> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("running `{}` (streamed)", self.display_command());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let drained = thread::scope(|scope| {
            let errors = scope.spawn(move || forward_lines(stderr, |line| logger.error(line)));
            let out = forward_lines(stdout, |line| logger.log(line));
            let err = errors
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
            out.and(err)
        });

        let status = child
            .wait()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        drained.with_context(|| {
            format!("failed to read output of `{}`", self.display_command())
        })?;

        self.check(status)
    }

    fn check(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        Err(anyhow!(MonoError::ProcessFailed {
            command: self.display_command(),
            code: status.code(),
        }))
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Read `reader` line by line, handing each line (newline included) to `emit`.
fn forward_lines<R: Read>(reader: Option<R>, mut emit: impl FnMut(&str)) -> io::Result<()> {
    let Some(reader) = reader else {
        return Ok(());
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        emit(&String::from_utf8_lossy(&buf));
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Prepend directories to the current `PATH`.
pub fn prepend_path(dirs: &[PathBuf]) -> Result<OsString> {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let paths = dirs
        .iter()
        .cloned()
        .chain(std::env::split_paths(&current));
    std::env::join_paths(paths).context("failed to build PATH")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("yarn").args(["run", "build", "--watch"]);

        assert_eq!(pb.display_command(), "yarn run build --watch");
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_collects_output() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_inherited_runs_in_cwd() {
        let tmp = TempDir::new().unwrap();

        ProcessBuilder::shell("touch 1.txt")
            .cwd(tmp.path())
            .exec_inherited()
            .unwrap();

        assert!(tmp.path().join("1.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_inherited_failure_carries_exit_code() {
        let err = ProcessBuilder::shell("exit 3").exec_inherited().unwrap_err();

        assert_eq!(crate::util::errors::exit_code_of(&err), Some(3));
    }

    #[test]
    fn test_spawn_failure_is_an_error() {
        let err = ProcessBuilder::new("definitely-not-a-real-program-xyz")
            .exec_inherited()
            .unwrap_err();

        assert!(err.to_string().contains("definitely-not-a-real-program-xyz"));
        assert_eq!(crate::util::errors::exit_code_of(&err), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_streamed_success_and_failure() {
        let tmp = TempDir::new().unwrap();
        let logger = Logger::with_prefix("[test]", false);

        ProcessBuilder::shell("echo out; echo err 1>&2; touch done.txt")
            .cwd(tmp.path())
            .exec_streamed(&logger)
            .unwrap();
        assert!(tmp.path().join("done.txt").exists());

        let err = ProcessBuilder::shell("exit 1")
            .exec_streamed(&logger)
            .unwrap_err();
        assert_eq!(crate::util::errors::exit_code_of(&err), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_streamed_drains_large_output() {
        let logger = Logger::with_prefix("[test]", false);

        // Well past a pipe buffer on both streams.
        ProcessBuilder::shell("i=0; while [ $i -lt 5000 ]; do echo line $i; echo line $i 1>&2; i=$((i+1)); done")
            .exec_streamed(&logger)
            .unwrap();
    }

    #[test]
    fn test_forward_lines_splits_on_newline() {
        let mut lines = Vec::new();
        forward_lines(Some("a\nb\nc".as_bytes()), |l| lines.push(l.to_string())).unwrap();

        assert_eq!(lines, vec!["a\n", "b\n", "c"]);
    }

    #[test]
    fn test_prepend_path_puts_dirs_first() {
        let joined = prepend_path(&[PathBuf::from("/first")]).unwrap();
        let first = std::env::split_paths(&joined).next().unwrap();

        assert_eq!(first, PathBuf::from("/first"));
    }
}
