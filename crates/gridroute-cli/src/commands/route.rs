//! Route subcommand handler.

use anyhow::Result;
use gridroute_lib::{plan_route, RouteRequest, RouteSummary};

use crate::commands::CommandContext;
use crate::output::{format_route_text, OutputFormat};
use crate::terminal::ColorPalette;
use crate::RouteArgs;

/// Handle the `route` subcommand.
///
/// Computes the lowest-cost route between two waypoints of the loaded level.
pub fn handle_route(context: &CommandContext, args: &RouteArgs) -> Result<()> {
    let level = context.load_level()?;
    let request =
        RouteRequest::new(&args.from, &args.to).with_corner_policy(context.corner_policy);
    let plan = plan_route(&level, &request)?;
    let summary = RouteSummary::from_plan(&level, &plan)?;

    match context.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            let palette = ColorPalette::detect();
            print!("{}", format_route_text(&summary, &level, &palette));
        }
    }

    Ok(())
}
