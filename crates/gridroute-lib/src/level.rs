use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a label to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Integer grid coordinate. `x` is the column index, `y` the line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the cell shifted by `(dx, dy)`, or `None` past the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// In-memory representation of a grid level.
///
/// `spaces` is the single source of truth for walkability: a cell missing
/// from it is a wall or out of bounds. `walls` only remembers which cells the
/// loader saw as walls so the level can be rendered faithfully.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub spaces: HashMap<Cell, f64>,
    pub walls: HashSet<Cell>,
    pub waypoints: BTreeMap<String, Cell>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `width` x `height` level where every cell is walkable at `cost`.
    pub fn uniform(width: i32, height: i32, cost: f64) -> Self {
        let mut level = Self::new();
        for y in 0..height {
            for x in 0..width {
                level.spaces.insert(Cell::new(x, y), cost);
            }
        }
        level
    }

    pub fn with_space(mut self, cell: impl Into<Cell>, cost: f64) -> Self {
        let cell = cell.into();
        self.walls.remove(&cell);
        self.spaces.insert(cell, cost);
        self
    }

    pub fn with_wall(mut self, cell: impl Into<Cell>) -> Self {
        let cell = cell.into();
        self.spaces.remove(&cell);
        self.walls.insert(cell);
        self
    }

    pub fn with_waypoint(mut self, label: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.waypoints.insert(label.into(), cell.into());
        self
    }

    /// Movement cost of `cell`, or `None` when it is not walkable.
    pub fn cost(&self, cell: Cell) -> Option<f64> {
        self.spaces.get(&cell).copied()
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.spaces.contains_key(&cell)
    }

    /// Return the cost of `cell` or [`Error::InvalidCell`] when it is a wall.
    pub fn require_walkable(&self, cell: Cell) -> Result<f64> {
        self.cost(cell).ok_or(Error::InvalidCell { cell })
    }

    /// Look up a waypoint without validating its cell.
    pub fn waypoint(&self, label: &str) -> Option<Cell> {
        self.waypoints.get(label).copied()
    }

    /// Resolve a waypoint label to a walkable cell.
    pub fn waypoint_cell(&self, label: &str) -> Result<Cell> {
        let cell = self
            .waypoint(label)
            .ok_or_else(|| Error::UnknownWaypoint {
                label: label.to_string(),
                suggestions: self.fuzzy_waypoint_matches(label, 3),
            })?;
        if !self.is_walkable(cell) {
            return Err(Error::MalformedLevel {
                label: label.to_string(),
                cell,
            });
        }
        Ok(cell)
    }

    /// Labels located on `cell`, in label order.
    pub fn labels_at(&self, cell: Cell) -> impl Iterator<Item = &str> {
        self.waypoints
            .iter()
            .filter(move |(_, at)| **at == cell)
            .map(|(label, _)| label.as_str())
    }

    /// Waypoint labels similar to `label`, best match first.
    pub fn fuzzy_waypoint_matches(&self, label: &str, limit: usize) -> Vec<String> {
        let needle = label.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .waypoints
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }

    /// Inclusive `(min, max)` corners covering every known space and wall.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut cells = self.spaces.keys().chain(self.walls.iter());
        let first = *cells.next()?;
        let (min, max) = cells.fold((first, first), |(min, max), cell| {
            (
                Cell::new(min.x.min(cell.x), min.y.min(cell.y)),
                Cell::new(max.x.max(cell.x), max.y.max(cell.y)),
            )
        });
        Some((min, max))
    }

    /// Check that every cost is positive and finite and that every waypoint
    /// sits on a walkable cell.
    pub fn validate(&self) -> Result<()> {
        let mut spaces: Vec<(&Cell, &f64)> = self.spaces.iter().collect();
        spaces.sort_by_key(|(cell, _)| **cell);
        for (&cell, &cost) in spaces {
            if !(cost.is_finite() && cost > 0.0) {
                return Err(Error::InvalidCost { cell, cost });
            }
        }

        for (label, &cell) in &self.waypoints {
            if !self.is_walkable(cell) {
                return Err(Error::MalformedLevel {
                    label: label.clone(),
                    cell,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_overrides_space() {
        let level = Level::new().with_space((1, 1), 2.0).with_wall((1, 1));
        assert!(!level.is_walkable(Cell::new(1, 1)));
        assert!(level.walls.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn require_walkable_reports_invalid_cell() {
        let level = Level::uniform(2, 2, 1.0);
        assert_eq!(level.require_walkable(Cell::new(1, 0)).unwrap(), 1.0);
        let err = level.require_walkable(Cell::new(5, 5)).unwrap_err();
        assert!(matches!(err, Error::InvalidCell { cell } if cell == Cell::new(5, 5)));
    }

    #[test]
    fn waypoint_on_wall_is_malformed() {
        let level = Level::uniform(2, 1, 1.0)
            .with_wall((1, 0))
            .with_waypoint("b", (1, 0));
        let err = level.waypoint_cell("b").unwrap_err();
        assert!(matches!(err, Error::MalformedLevel { ref label, .. } if label == "b"));
        assert!(level.validate().is_err());
    }

    #[test]
    fn unknown_waypoint_suggests_case_insensitive_match() {
        let level = Level::uniform(2, 1, 1.0)
            .with_waypoint("gate", (0, 0))
            .with_waypoint("exit", (1, 0));
        let err = level.waypoint_cell("Gate").unwrap_err();
        match err {
            Error::UnknownWaypoint { suggestions, .. } => {
                assert_eq!(suggestions, vec!["gate".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bounds_cover_spaces_and_walls() {
        let level = Level::new()
            .with_space((2, 3), 1.0)
            .with_wall((-1, 0))
            .with_space((4, 1), 1.0);
        assert_eq!(level.bounds(), Some((Cell::new(-1, 0), Cell::new(4, 3))));
        assert_eq!(Level::new().bounds(), None);
    }

    #[test]
    fn validate_rejects_non_positive_cost() {
        let level = Level::uniform(2, 1, 1.0).with_space((1, 0), 0.0);
        let err = level.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidCost { cell, .. } if cell == Cell::new(1, 0)));
    }

    #[test]
    fn labels_at_returns_every_label_on_cell() {
        let level = Level::uniform(1, 1, 1.0)
            .with_waypoint("a", (0, 0))
            .with_waypoint("z", (0, 0));
        let labels: Vec<&str> = level.labels_at(Cell::new(0, 0)).collect();
        assert_eq!(labels, vec!["a", "z"]);
    }
}
