//! Output formatting for levels, routes and cost tables.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use gridroute_lib::output::{PATH_GLYPH, WALL_GLYPH};
use gridroute_lib::{render_level, Cell, CostReport, Level, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing with the rendered level.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Apply `palette` to a rendered level, glyph by glyph.
pub fn colorize_level(rendered: &str, palette: &ColorPalette) -> String {
    if palette.is_plain() {
        return rendered.to_string();
    }

    let mut out = String::with_capacity(rendered.len() * 2);
    for glyph in rendered.chars() {
        let color = match glyph {
            PATH_GLYPH => palette.path,
            WALL_GLYPH => palette.wall,
            c if c.is_ascii_lowercase() => palette.waypoint,
            _ => "",
        };
        if color.is_empty() {
            out.push(glyph);
        } else {
            let _ = write!(out, "{color}{glyph}{}", palette.reset);
        }
    }
    out
}

/// Render a route summary followed by the level with the route drawn on it.
pub fn format_route_text(summary: &RouteSummary, level: &Level, palette: &ColorPalette) -> String {
    let mut out = format!(
        "Route from {} to {} ({} moves):\n",
        summary.from, summary.to, summary.hops
    );
    for step in &summary.steps {
        let name = step.label.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{:>4} {:<10} {}{:>8.3}{}",
            step.index,
            format!("{} {}", step.cell, name).trim_end(),
            palette.cost,
            step.cumulative_cost,
            palette.reset
        );
    }
    let _ = writeln!(out, "\nTotal cost: {:.3}\n", summary.total_cost);

    let cells: Vec<Cell> = summary.steps.iter().map(|step| step.cell).collect();
    out.push_str(&colorize_level(&render_level(level, Some(&cells)), palette));
    out
}

/// Render the cost table of a [`CostReport`], one waypoint per line.
pub fn format_costs_text(report: &CostReport, palette: &ColorPalette) -> String {
    let mut out = format!("Costs from {} {}:\n", report.from, report.source);
    for (label, cost) in &report.costs {
        if cost.is_finite() {
            let _ = writeln!(out, "  {label:<8} {}{cost:.3}{}", palette.cost, palette.reset);
        } else {
            let _ = writeln!(out, "  {label:<8} {}inf{}", palette.unreachable, palette.reset);
        }
    }
    out
}

/// Serializable view of a level for `show --format json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LevelView {
    pub min: Option<Cell>,
    pub max: Option<Cell>,
    pub spaces: usize,
    pub walls: usize,
    pub waypoints: BTreeMap<String, Cell>,
    pub rows: Vec<String>,
}

impl LevelView {
    pub fn new(level: &Level) -> Self {
        let bounds = level.bounds();
        Self {
            min: bounds.map(|(min, _)| min),
            max: bounds.map(|(_, max)| max),
            spaces: level.spaces.len(),
            walls: level.walls.len(),
            waypoints: level.waypoints.clone(),
            rows: render_level(level, None).lines().map(str::to_string).collect(),
        }
    }
}

/// Serializable cost table for `costs --format json`.
///
/// Unreachable waypoints are listed separately since JSON has no infinity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostsView {
    pub from: String,
    pub source: Cell,
    pub costs: BTreeMap<String, f64>,
    pub unreachable: Vec<String>,
}

impl From<&CostReport> for CostsView {
    fn from(report: &CostReport) -> Self {
        Self {
            from: report.from.clone(),
            source: report.source,
            costs: report
                .costs
                .iter()
                .filter(|(_, cost)| cost.is_finite())
                .map(|(label, cost)| (label.clone(), *cost))
                .collect(),
            unreachable: report.unreachable().into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridroute_lib::{parse_level, plan_costs, plan_route, CostRequest, RouteRequest};

    fn level() -> Level {
        parse_level("XXXXX\nXa11X\nX1X1X\nX11bX\nXXXXX\nXc1X\nXXXX\n").unwrap()
    }

    #[test]
    fn plain_palette_leaves_render_untouched() {
        let rendered = "Xa*1\n";
        assert_eq!(colorize_level(rendered, &ColorPalette::plain()), rendered);
    }

    #[test]
    fn colored_palette_wraps_path_glyphs() {
        let palette = ColorPalette::colored();
        let out = colorize_level("1*", &palette);
        assert_eq!(out, format!("1{}*{}", palette.path, palette.reset));
    }

    #[test]
    fn route_text_lists_steps_and_total() {
        let level = level();
        let plan = plan_route(&level, &RouteRequest::new("a", "b")).unwrap();
        let summary = RouteSummary::from_plan(&level, &plan).unwrap();
        let text = format_route_text(&summary, &level, &ColorPalette::plain());

        assert!(text.starts_with("Route from a to b (3 moves):\n"));
        assert!(text.contains("(1, 1) a"));
        assert!(text.contains("Total cost: 3.414"));
        assert_eq!(text.matches(PATH_GLYPH).count(), 2);
    }

    #[test]
    fn cost_text_marks_unreachable_waypoints() {
        let level = level();
        let report = plan_costs(&level, &CostRequest::new("a")).unwrap();
        let text = format_costs_text(&report, &ColorPalette::plain());

        assert!(text.starts_with("Costs from a (1, 1):\n"));
        assert!(text.contains("  a        0.000\n"));
        assert!(text.contains("  c        inf\n"));
    }

    #[test]
    fn costs_view_splits_out_unreachable_labels() {
        let level = level();
        let report = plan_costs(&level, &CostRequest::new("a")).unwrap();
        let view = CostsView::from(&report);
        assert_eq!(view.unreachable, vec!["c".to_string()]);
        assert!(!view.costs.contains_key("c"));
        assert!(serde_json::to_string(&view).unwrap().contains("\"unreachable\":[\"c\"]"));
    }

    #[test]
    fn level_view_reports_bounds_and_rows() {
        let view = LevelView::new(&level());
        assert_eq!(view.min, Some(Cell::new(0, 0)));
        assert_eq!(view.max, Some(Cell::new(4, 6)));
        assert_eq!(view.rows[1], "Xa11X");
        assert_eq!(view.rows[5], "Xc1X ");
    }
}
