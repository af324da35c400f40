//! taskrelay - top-level task runner
//!
//! Expands named actions (`all`, `clean`, `data`, `search`) into delegations
//! to collaborator directories, runs them one at a time through the build
//! tool, and provides a case-insensitive search over Python sources.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::config::{Config, ConfigSource};
pub use crate::core::{
    data::{Action, Delegation, Plan, SearchMatch},
    dispatcher::{DispatchReport, Dispatcher, Failure},
    interrupt::Interrupt,
    runner::ProcessRunner,
    search::{SearchEngine, SearchOptions, SearchOutcome},
    traits::{Delegate, Outcome},
};
pub use crate::utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
