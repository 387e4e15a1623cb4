//! Domain error types.
//!
//! Plumbing failures (I/O, spawn) travel as `anyhow::Error` with context.
//! The errors here are the ones callers need to match on, most importantly
//! [`MonoError::ProcessFailed`], whose exit code becomes the exit code of
//! the `mono` binary.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by mono operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MonoError {
    /// An install target could be found neither locally nor in the registry.
    #[error("package '{name}' does not exist")]
    #[diagnostic(
        code(mono::package_not_found),
        help("check the spelling, or pin a version with `<name>@<version>`")
    )]
    PackageNotFound { name: String },

    /// A child process exited unsuccessfully.
    #[error("`{command}` exited with {}", describe_code(.code))]
    #[diagnostic(code(mono::process_failed))]
    ProcessFailed { command: String, code: Option<i32> },

    /// A manifest file was readable but not a valid package descriptor.
    #[error("invalid manifest {}: {reason}", .path.display())]
    #[diagnostic(code(mono::invalid_manifest))]
    InvalidManifest { path: PathBuf, reason: String },

    /// Two packages in one workspace declare the same name.
    #[error("duplicate package name `{name}` in {} and {}", .first.display(), .second.display())]
    #[diagnostic(
        code(mono::duplicate_package),
        help("every package in a workspace must have a unique `name`")
    )]
    DuplicatePackageName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A configuration file could not be parsed or holds an invalid value.
    #[error("invalid configuration in {}: {reason}", .path.display())]
    #[diagnostic(code(mono::invalid_config))]
    InvalidConfig { path: PathBuf, reason: String },
}

impl MonoError {
    /// The exit code a failing child reported, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            MonoError::ProcessFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Find the exit code carried anywhere in an error chain.
pub fn exit_code_of(err: &anyhow::Error) -> Option<i32> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<MonoError>())
        .find_map(MonoError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_package_not_found_names_package() {
        let err = MonoError::PackageNotFound {
            name: "left-pad".to_string(),
        };
        assert_eq!(err.to_string(), "package 'left-pad' does not exist");
    }

    #[test]
    fn test_process_failed_message() {
        let err = MonoError::ProcessFailed {
            command: "yarn run build".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "`yarn run build` exited with code 2");

        let err = MonoError::ProcessFailed {
            command: "yarn".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn test_exit_code_survives_context() {
        let err: anyhow::Error = MonoError::ProcessFailed {
            command: "yarn".to_string(),
            code: Some(3),
        }
        .into();
        let err = Err::<(), _>(err).context("install failed").unwrap_err();

        assert_eq!(exit_code_of(&err), Some(3));
    }

    #[test]
    fn test_exit_code_absent_for_other_errors() {
        let err: anyhow::Error = MonoError::PackageNotFound {
            name: "x".to_string(),
        }
        .into();
        assert_eq!(exit_code_of(&err), None);
    }
}
