//! External package sources.

pub mod registry;

pub use registry::{registry_from_config, HttpRegistry, NpmRegistry, Registry};
