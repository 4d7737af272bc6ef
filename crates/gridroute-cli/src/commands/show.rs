//! Show subcommand handler.

use anyhow::Result;
use gridroute_lib::render_level;

use crate::commands::CommandContext;
use crate::output::{colorize_level, LevelView, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the `show` subcommand.
pub fn handle_show(context: &CommandContext) -> Result<()> {
    let level = context.load_level()?;

    match context.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&LevelView::new(&level))?);
        }
        OutputFormat::Text => {
            let palette = ColorPalette::detect();
            print!("{}", colorize_level(&render_level(&level, None), &palette));
        }
    }

    Ok(())
}
