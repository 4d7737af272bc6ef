use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridroute_cli::commands::{handle_costs, handle_route, handle_show, CommandContext};
use gridroute_cli::output::OutputFormat;
use gridroute_cli::{resolve_level_path, CornerArg, CostsArgs, RouteArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Weighted grid level pathfinding utilities")]
struct Cli {
    /// Level file to load (defaults to $GRIDROUTE_LEVEL, then ./example.txt).
    #[arg(long, global = true)]
    level: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// How diagonal moves treat wall corners.
    #[arg(long, value_enum, default_value_t = CornerArg::Allow, global = true)]
    corner_policy: CornerArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the lowest-cost route between two waypoints.
    Route(RouteArgs),
    /// Compute the cost from one waypoint to every waypoint.
    Costs(CostsArgs),
    /// Render the level.
    Show,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = CommandContext {
        level_path: resolve_level_path(cli.level.as_deref()),
        format: cli.format,
        corner_policy: cli.corner_policy.into(),
    };

    match cli.command {
        Command::Route(args) => handle_route(&context, &args),
        Command::Costs(args) => handle_costs(&context, &args),
        Command::Show => handle_show(&context),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
