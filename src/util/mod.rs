//! Shared utilities

pub mod colors;
pub mod config;
pub mod context;
pub mod errors;
pub mod fs;
pub mod logger;
pub mod process;

pub use colors::ColorCycle;
pub use config::Config;
pub use context::GlobalContext;
pub use errors::{exit_code_of, MonoError};
pub use logger::{ColorChoice, Logger};
pub use process::ProcessBuilder;
