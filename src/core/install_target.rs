//! Install targets: `name`, `name@version`, `@scope/name@version`.
//!
//! The leading `@` of a scoped name is part of the name; only a later `@`
//! separates the version.

use std::fmt;

use anyhow::{Context, Result};

use crate::core::package::Package;
use crate::sources::registry::Registry;
use crate::util::errors::MonoError;

/// Modifier applied to versions mono picks itself.
pub const DEFAULT_MODIFIER: &str = "^";

/// Split an install target into its name and (possibly empty) version.
fn split(input: &str) -> (&str, Option<&str>) {
    let offset = usize::from(input.starts_with('@'));
    match input[offset..].split_once('@') {
        Some((name, version)) => (&input[..offset + name.len()], Some(version)),
        None => (input, None),
    }
}

/// Extract the package name, keeping any `@scope/` prefix.
pub fn parse_name(input: &str) -> &str {
    split(input).0
}

/// Extract the version part, if one was given.
pub fn parse_version(input: &str) -> Option<&str> {
    split(input).1.filter(|v| !v.is_empty())
}

/// A version requirement split into its range modifier and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    /// `""`, `^`, `~`, `>=`, ...
    pub modifier: String,
    /// `1.2.3`, or a dist-tag such as `latest`
    pub version: String,
}

impl VersionSpec {
    pub fn new(modifier: impl Into<String>, version: impl Into<String>) -> Self {
        VersionSpec {
            modifier: modifier.into(),
            version: version.into(),
        }
    }

    /// A caret requirement on `version`.
    pub fn caret(version: impl Into<String>) -> Self {
        VersionSpec::new(DEFAULT_MODIFIER, version)
    }

    /// Split a user supplied version into modifier and version.
    ///
    /// Everything before the first digit is the modifier. A string with no
    /// digit at all (a dist-tag) is kept whole as the version.
    pub fn parse(raw: &str) -> Self {
        match raw.find(|c: char| c.is_ascii_digit()) {
            Some(index) => VersionSpec::new(&raw[..index], &raw[index..]),
            None => VersionSpec::new("", raw),
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifier, self.version)
    }
}

/// Work out the version requirement to write for an install target.
///
/// An explicit version wins. Otherwise a workspace package of that name
/// supplies its own version, and failing that the registry's latest
/// release is used; both get a `^` modifier.
pub fn resolve_version(
    input: &str,
    local_packages: &[Package],
    registry: &dyn Registry,
) -> Result<VersionSpec> {
    if let Some(version) = parse_version(input) {
        return Ok(VersionSpec::parse(version));
    }

    let name = parse_name(input);

    if let Some(local) = local_packages.iter().find(|p| p.name() == name) {
        if local.version().is_empty() {
            return Ok(VersionSpec::new("", "*"));
        }
        return Ok(VersionSpec::caret(local.version()));
    }

    tracing::debug!("looking up latest version of `{}`", name);
    let latest = registry
        .latest_version(name)
        .with_context(|| format!("failed to look up package '{}'", name))?;

    match latest {
        Some(version) => Ok(VersionSpec::caret(version.trim())),
        None => Err(MonoError::PackageNotFound {
            name: name.to_string(),
        }
        .into()),
    }
}

/// A parsed and resolved install target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub name: String,
    pub version: VersionSpec,
    /// Whether the name refers to a workspace package
    pub local: bool,
}

impl InstallTarget {
    /// Parse `input` and resolve its version against the workspace and
    /// registry.
    pub fn resolve(
        input: &str,
        local_packages: &[Package],
        registry: &dyn Registry,
    ) -> Result<Self> {
        let name = parse_name(input);
        Ok(InstallTarget {
            name: name.to_string(),
            version: resolve_version(input, local_packages, registry)?,
            local: local_packages.iter().any(|p| p.name() == name),
        })
    }

    /// The requirement string written into a manifest.
    pub fn requirement(&self) -> String {
        self.version.to_string()
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::registry::NpmRegistry;
    use crate::test_support::StaticRegistry;

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("test"), "test");
        assert_eq!(parse_name("test@1"), "test");
        assert_eq!(parse_name("test@1.0"), "test");
        assert_eq!(parse_name("pkg@^1.0.0"), "pkg");
        assert_eq!(parse_name("@test/one"), "@test/one");
        assert_eq!(parse_name("@scope/pkg@1.2.3"), "@scope/pkg");
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("test@1"), Some("1"));
        assert_eq!(parse_version("pkg@1.0.0"), Some("1.0.0"));
        assert_eq!(parse_version("test@^1.0.0"), Some("^1.0.0"));
        assert_eq!(parse_version("@test/one@1.0.0"), Some("1.0.0"));
    }

    #[test]
    fn test_parse_version_absent() {
        assert_eq!(parse_version("pkg"), None);
        assert_eq!(parse_version("@test/one"), None);
        assert_eq!(parse_version("pkg@"), None);
        assert_eq!(parse_version("@"), None);
    }

    #[test]
    fn test_version_spec_parse() {
        assert_eq!(VersionSpec::parse("1.2.3"), VersionSpec::new("", "1.2.3"));
        assert_eq!(VersionSpec::parse("^1.2.3"), VersionSpec::new("^", "1.2.3"));
        assert_eq!(VersionSpec::parse("~0.1"), VersionSpec::new("~", "0.1"));
        assert_eq!(VersionSpec::parse(">=2.0.0"), VersionSpec::new(">=", "2.0.0"));
        assert_eq!(VersionSpec::parse("latest"), VersionSpec::new("", "latest"));
        assert_eq!(VersionSpec::parse(">=2.0.0").to_string(), ">=2.0.0");
    }

    #[test]
    fn test_resolve_explicit_version() {
        let registry = StaticRegistry::new();

        assert_eq!(
            resolve_version("pkg@^1.2.3", &[], &registry).unwrap(),
            VersionSpec::new("^", "1.2.3")
        );
        assert_eq!(
            resolve_version("pkg@1.2.3", &[], &registry).unwrap(),
            VersionSpec::new("", "1.2.3")
        );
    }

    #[test]
    fn test_explicit_version_beats_local_package() {
        let registry = StaticRegistry::new();
        let local = vec![Package::new("local-pkg", "2.0.0", "packages/local")];

        assert_eq!(
            resolve_version("local-pkg@~1.0.0", &local, &registry).unwrap(),
            VersionSpec::new("~", "1.0.0")
        );
    }

    #[test]
    fn test_resolve_local_package() {
        let registry = StaticRegistry::new().with("local-pkg", "9.9.9");
        let local = vec![Package::new("local-pkg", "2.0.0", "packages/local")];

        assert_eq!(
            resolve_version("local-pkg", &local, &registry).unwrap(),
            VersionSpec::new("^", "2.0.0")
        );
    }

    #[test]
    fn test_resolve_local_package_without_version() {
        let registry = StaticRegistry::new();
        let local = vec![Package::new("unversioned", "", "packages/u")];

        assert_eq!(
            resolve_version("unversioned", &local, &registry).unwrap(),
            VersionSpec::new("", "*")
        );
    }

    #[test]
    fn test_resolve_from_registry() {
        let registry = StaticRegistry::new().with("@enzsft/npm-fixture", " 1.0.1\n");

        assert_eq!(
            resolve_version("@enzsft/npm-fixture", &[], &registry).unwrap(),
            VersionSpec::new("^", "1.0.1")
        );
    }

    #[test]
    fn test_unresolvable_names_the_package() {
        let registry = StaticRegistry::new();

        let err = resolve_version("no-such-package", &[], &registry).unwrap_err();
        assert_eq!(err.to_string(), "package 'no-such-package' does not exist");
    }

    #[test]
    fn test_failed_lookup_names_the_package() {
        let registry = NpmRegistry::new("definitely-not-npm-xyz");

        let err = resolve_version("some-ext-pkg", &[], &registry).unwrap_err();
        assert_eq!(err.to_string(), "failed to look up package 'some-ext-pkg'");
    }

    #[test]
    fn test_install_target_resolve() {
        let registry = StaticRegistry::new();
        let local = vec![Package::new("@acme/a", "1.0.0", "packages/a")];

        let target = InstallTarget::resolve("@acme/a", &local, &registry).unwrap();
        assert!(target.local);
        assert_eq!(target.requirement(), "^1.0.0");
        assert_eq!(target.to_string(), "@acme/a@^1.0.0");

        let target = InstallTarget::resolve("ext@1.0.0", &local, &registry).unwrap();
        assert!(!target.local);
        assert_eq!(target.requirement(), "1.0.0");
    }
}
