use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::edges::EdgeModel;
use crate::error::{Error, Result};
use crate::level::{Cell, Level};
use crate::path::DistanceMap;
use crate::routing::RoutePlan;

/// Glyph used for path cells that are not waypoints.
pub const PATH_GLYPH: char = '*';
/// Glyph used for walls.
pub const WALL_GLYPH: char = 'X';

/// Render `level` as text, one line per grid row, marking `path` cells.
///
/// Waypoints keep their label, path cells show [`PATH_GLYPH`], walls show
/// [`WALL_GLYPH`], and spaces show their cost digit (or `.` when the cost
/// is not a whole number between 1 and 9).
pub fn render_level(level: &Level, path: Option<&[Cell]>) -> String {
    let Some((min, max)) = level.bounds() else {
        return String::new();
    };
    let on_path: HashSet<Cell> = path.unwrap_or(&[]).iter().copied().collect();

    let mut out = String::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            out.push(glyph(level, &on_path, Cell::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn glyph(level: &Level, on_path: &HashSet<Cell>, cell: Cell) -> char {
    if let Some(label) = level.labels_at(cell).next() {
        return label.chars().next().unwrap_or('?');
    }
    if on_path.contains(&cell) {
        return PATH_GLYPH;
    }
    match level.cost(cell) {
        Some(cost) if cost.fract() == 0.0 && (1.0..=9.0).contains(&cost) => {
            char::from_digit(cost as u32, 10).unwrap_or('.')
        }
        Some(_) => '.',
        None if level.walls.contains(&cell) => WALL_GLYPH,
        None => ' ',
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub cell: Cell,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub edge_cost: f64,
    pub cumulative_cost: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub from: String,
    pub to: String,
    pub hops: usize,
    pub total_cost: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with per-step costs.
    pub fn from_plan(level: &Level, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let edges = plan.edges();
        let mut cumulative = 0.0;
        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, &cell) in plan.steps.iter().enumerate() {
            let edge_cost = match index.checked_sub(1) {
                Some(previous) => edges
                    .edges(level, plan.steps[previous])
                    .iter()
                    .find(|edge| edge.target == cell)
                    .map(|edge| edge.cost)
                    .ok_or(Error::InvalidCell { cell })?,
                None => 0.0,
            };
            cumulative += edge_cost;
            steps.push(RouteStep {
                index,
                cell,
                label: level.labels_at(cell).next().map(str::to_string),
                edge_cost,
                cumulative_cost: cumulative,
            });
        }

        Ok(Self {
            from: plan.from.clone(),
            to: plan.to.clone(),
            hops: plan.hop_count(),
            total_cost: cumulative,
            steps,
        })
    }
}

/// Write the cost of every cell in `distances` as a CSV grid.
///
/// Each record is one level row. Reachable cells hold their cost,
/// walkable cells that were never reached hold `inf`, and walls or gaps
/// are empty.
pub fn write_level_costs<W: Write>(
    level: &Level,
    distances: &DistanceMap,
    writer: W,
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    if let Some((min, max)) = level.bounds() {
        for y in min.y..=max.y {
            let record: Vec<String> = (min.x..=max.x)
                .map(|x| {
                    let cell = Cell::new(x, y);
                    if distances.is_reachable(cell) {
                        distances.cost(cell).to_string()
                    } else if level.is_walkable(cell) {
                        "inf".to_string()
                    } else {
                        String::new()
                    }
                })
                .collect();
            csv_writer.write_record(&record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save the cost grid for `distances` to a CSV file at `path`.
pub fn save_level_costs(level: &Level, distances: &DistanceMap, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_level_costs(level, distances, file)?;
    info!(
        path = %path.display(),
        reachable = distances.len(),
        "saved level costs"
    );
    Ok(())
}
