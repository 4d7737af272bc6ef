use thiserror::Error;

use crate::level::Cell;

/// Convenient result alias for the gridroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search endpoint is a wall or lies outside the level.
    #[error("cell {cell} is not a walkable space")]
    InvalidCell { cell: Cell },

    /// Raised when a waypoint sits on a cell with no movement cost.
    #[error("waypoint '{label}' at {cell} is not on a walkable space")]
    MalformedLevel { label: String, cell: Cell },

    /// Raised when a waypoint label could not be found in the level.
    #[error("unknown waypoint: {label}{}", format_suggestions(.suggestions))]
    UnknownWaypoint {
        label: String,
        suggestions: Vec<String>,
    },

    /// Raised when a cell cost is zero, negative, or not finite.
    #[error("invalid movement cost {cost} at {cell}; costs must be positive and finite")]
    InvalidCost { cell: Cell, cost: f64 },

    /// Raised when level text cannot be interpreted.
    #[error("failed to parse level at line {line}, column {column}: {message}")]
    LevelParse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Raised when the same waypoint label appears more than once in a level.
    #[error("duplicate waypoint label encountered: {label}")]
    DuplicateWaypoint { label: String },

    /// Raised when no route could be found between two waypoints.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a computed route plan lacks any cells.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
