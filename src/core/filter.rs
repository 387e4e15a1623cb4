//! Package filtering by `--include` expressions.
//!
//! An expression is a comma separated list of tokens:
//!
//! - `*` selects every package, whatever else is listed
//! - `prefix*` selects packages whose name starts with `prefix`
//! - anything else must equal a package name exactly
//!
//! Only a single trailing `*` is a wildcard. A token with `*` anywhere else
//! (`a*b`, `**`) is taken literally and, since package names cannot contain
//! `*`, matches nothing.

use std::fmt;
use std::str::FromStr;

use crate::core::package::Package;

/// Filter that selects everything.
pub const MATCH_ALL: &str = "*";

/// One token of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken {
    /// `*`
    All,
    /// `prefix*`
    Prefix(String),
    /// `name`
    Exact(String),
}

impl FilterToken {
    fn parse(token: &str) -> Self {
        let token = token.trim();
        if token == MATCH_ALL {
            return FilterToken::All;
        }

        match token.strip_suffix('*') {
            Some(prefix) if !prefix.contains('*') => FilterToken::Prefix(prefix.to_string()),
            _ => {
                if token.contains('*') {
                    tracing::warn!(
                        "filter `{}` only supports a trailing `*`; matching it literally",
                        token
                    );
                }
                FilterToken::Exact(token.to_string())
            }
        }
    }

    /// Check whether a package name satisfies this token.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            FilterToken::All => true,
            FilterToken::Prefix(prefix) => name.starts_with(prefix.as_str()),
            FilterToken::Exact(exact) => !exact.is_empty() && name == exact,
        }
    }
}

/// A parsed `--include` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFilter {
    tokens: Vec<FilterToken>,
}

impl PackageFilter {
    /// Parse a comma separated filter expression.
    pub fn parse(expr: &str) -> Self {
        PackageFilter {
            tokens: expr.split(',').map(FilterToken::parse).collect(),
        }
    }

    /// A filter that selects every package.
    pub fn all() -> Self {
        PackageFilter {
            tokens: vec![FilterToken::All],
        }
    }

    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// Check whether the filter selects everything.
    pub fn is_all(&self) -> bool {
        self.tokens.contains(&FilterToken::All)
    }

    /// Check whether a package name is selected.
    pub fn matches(&self, name: &str) -> bool {
        self.tokens.iter().any(|t| t.matches(name))
    }

    /// Select packages, keeping their original order. Each package appears
    /// at most once however many tokens match it.
    pub fn apply<'a>(&self, packages: &'a [Package]) -> Vec<&'a Package> {
        if self.is_all() {
            return packages.iter().collect();
        }
        packages.iter().filter(|p| self.matches(p.name())).collect()
    }
}

impl Default for PackageFilter {
    fn default() -> Self {
        PackageFilter::all()
    }
}

impl FromStr for PackageFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PackageFilter::parse(s))
    }
}

impl fmt::Display for PackageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .tokens
            .iter()
            .map(|t| match t {
                FilterToken::All => MATCH_ALL.to_string(),
                FilterToken::Prefix(prefix) => format!("{}*", prefix),
                FilterToken::Exact(exact) => exact.clone(),
            })
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Select `packages` matching the filter expression `expr`.
pub fn filter_packages<'a>(packages: &'a [Package], expr: &str) -> Vec<&'a Package> {
    PackageFilter::parse(expr).apply(packages)
}
