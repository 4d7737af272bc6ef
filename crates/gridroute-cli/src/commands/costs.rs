//! Costs subcommand handler.

use anyhow::{Context, Result};
use gridroute_lib::{plan_costs, save_level_costs, CostRequest};

use crate::commands::CommandContext;
use crate::output::{format_costs_text, CostsView, OutputFormat};
use crate::terminal::ColorPalette;
use crate::CostsArgs;

/// Handle the `costs` subcommand.
///
/// Prints the cost from one waypoint to every waypoint and optionally saves
/// the per-cell cost grid as CSV.
pub fn handle_costs(context: &CommandContext, args: &CostsArgs) -> Result<()> {
    let level = context.load_level()?;
    let request = CostRequest::new(&args.from).with_corner_policy(context.corner_policy);
    let report = plan_costs(&level, &request)?;

    if let Some(path) = args.output.as_deref() {
        save_level_costs(&level, &report.distances, path)
            .with_context(|| format!("failed to write cost grid to {}", path.display()))?;
    }

    match context.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&CostsView::from(&report))?);
        }
        OutputFormat::Text => {
            let palette = ColorPalette::detect();
            print!("{}", format_costs_text(&report, &palette));
        }
    }

    Ok(())
}
