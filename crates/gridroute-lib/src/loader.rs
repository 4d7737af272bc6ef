//! Level text loading.
//!
//! A level file describes one grid row per line. The character at column
//! `x` of line `y` defines cell `(x, y)`:
//!
//! - `1`..=`9`: walkable, movement cost equal to the digit
//! - `a`..=`z`: walkable waypoint of cost 1 labelled by the letter
//! - `0`: rejected, costs must be positive
//! - anything else: wall

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::level::{Cell, Level};

/// Cost assigned to waypoint cells.
const WAYPOINT_COST: f64 = 1.0;

/// Load a level from a text file.
pub fn load_level(path: &Path) -> Result<Level> {
    debug!(path = %path.display(), "loading level");
    let text = fs::read_to_string(path)?;
    let level = parse_level(&text)?;
    info!(
        path = %path.display(),
        spaces = level.spaces.len(),
        walls = level.walls.len(),
        waypoints = level.waypoints.len(),
        "level loaded"
    );
    Ok(level)
}

impl Level {
    /// Load a level from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        parse_level(&text)
    }
}

/// Parse level text into a validated [`Level`].
pub fn parse_level(text: &str) -> Result<Level> {
    let mut level = Level::new();

    for (row, line) in text.lines().enumerate() {
        let y = coordinate(row, row, 0)?;
        for (column, ch) in line.chars().enumerate() {
            let cell = Cell::new(coordinate(column, row, column)?, y);
            match ch {
                '0' => {
                    return Err(Error::InvalidCost { cell, cost: 0.0 });
                }
                '1'..='9' => {
                    let cost = f64::from(ch as u8 - b'0');
                    level.spaces.insert(cell, cost);
                }
                'a'..='z' => {
                    let label = ch.to_string();
                    if level.waypoints.contains_key(&label) {
                        return Err(Error::DuplicateWaypoint { label });
                    }
                    level.spaces.insert(cell, WAYPOINT_COST);
                    level.waypoints.insert(label, cell);
                }
                _ => {
                    level.walls.insert(cell);
                }
            }
        }
    }

    level.validate()?;
    Ok(level)
}

fn coordinate(value: usize, line: usize, column: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::LevelParse {
        line: line + 1,
        column: column + 1,
        message: "level is too large".to_string(),
    })
}
