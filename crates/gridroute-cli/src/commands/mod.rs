// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gridroute_lib::{load_level, CornerPolicy, Level};

use crate::output::OutputFormat;

pub mod costs;
pub mod route;
pub mod show;

pub use costs::handle_costs;
pub use route::handle_route;
pub use show::handle_show;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub level_path: PathBuf,
    pub format: OutputFormat,
    pub corner_policy: CornerPolicy,
}

impl CommandContext {
    /// Load the level named by this context.
    pub fn load_level(&self) -> Result<Level> {
        load_level(&self.level_path)
            .with_context(|| format!("failed to load level from {}", self.level_path.display()))
    }
}
