//! gridroute CLI library.
//!
//! This crate provides the command handlers, terminal styling and output
//! formatting behind the `gridroute` binary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use gridroute_lib::CornerPolicy;

pub mod commands;
pub mod output;
pub mod terminal;

/// Environment variable consulted when `--level` is not given.
pub const LEVEL_ENV_VAR: &str = "GRIDROUTE_LEVEL";

/// Level file used when neither the flag nor the environment names one.
pub const DEFAULT_LEVEL_FILE: &str = "example.txt";

/// Corner-cutting rule selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CornerArg {
    /// Diagonal moves only need a walkable target.
    #[default]
    Allow,
    /// Reject diagonals squeezing between two walls.
    BothWalled,
    /// Reject diagonals touching any wall corner.
    EitherWalled,
}

impl From<CornerArg> for CornerPolicy {
    fn from(value: CornerArg) -> Self {
        match value {
            CornerArg::Allow => CornerPolicy::Allow,
            CornerArg::BothWalled => CornerPolicy::BlockWhenBothWalled,
            CornerArg::EitherWalled => CornerPolicy::BlockWhenEitherWalled,
        }
    }
}

/// Arguments for the `route` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting waypoint label.
    #[arg(long = "from")]
    pub from: String,
    /// Destination waypoint label.
    #[arg(long = "to")]
    pub to: String,
}

/// Arguments for the `costs` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CostsArgs {
    /// Waypoint label the costs are measured from.
    #[arg(long = "from")]
    pub from: String,
    /// Write the per-cell cost grid to this CSV file.
    #[arg(long = "output")]
    pub output: Option<PathBuf>,
}

/// Resolve the level file from the CLI flag, then the environment, then the
/// working directory default.
pub fn resolve_level_path(explicit: Option<&Path>) -> PathBuf {
    level_path_from(explicit, std::env::var_os(LEVEL_ENV_VAR))
}

fn level_path_from(explicit: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_LEVEL_FILE),
    }
}
