//! Label-level route planning.
//!
//! These helpers resolve waypoint labels, run the searches in [`crate::path`]
//! with the built-in [`NavigationEdges`] model, and turn "no path" into a
//! reportable error for callers that need a route.

use serde::Serialize;
use tracing::debug;

use crate::edges::{CornerPolicy, NavigationEdges};
use crate::error::{Error, Result};
use crate::level::{Cell, Level};
use crate::path::{distance_map, shortest_path_with_cost, CostTable, DistanceMap};

/// High-level route planning request between two waypoint labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub corner_policy: CornerPolicy,
}

impl RouteRequest {
    /// Convenience constructor using the default corner policy.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            corner_policy: CornerPolicy::default(),
        }
    }

    pub fn with_corner_policy(mut self, corner_policy: CornerPolicy) -> Self {
        self.corner_policy = corner_policy;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub from: String,
    pub to: String,
    pub start: Cell,
    pub goal: Cell,
    pub steps: Vec<Cell>,
    pub cost: f64,
    #[serde(skip)]
    pub corner_policy: CornerPolicy,
}

impl RoutePlan {
    /// Number of moves in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn edges(&self) -> NavigationEdges {
        NavigationEdges::new(self.corner_policy)
    }
}

/// Request for the cost from one waypoint to every other waypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRequest {
    pub from: String,
    pub corner_policy: CornerPolicy,
}

impl CostRequest {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            corner_policy: CornerPolicy::default(),
        }
    }

    pub fn with_corner_policy(mut self, corner_policy: CornerPolicy) -> Self {
        self.corner_policy = corner_policy;
        self
    }
}

/// Costs from a single waypoint, computed in one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub from: String,
    pub source: Cell,
    pub costs: CostTable,
    #[serde(skip)]
    pub distances: DistanceMap,
}

impl CostReport {
    /// Labels whose waypoint cannot be reached from the source.
    pub fn unreachable(&self) -> Vec<&str> {
        self.costs
            .iter()
            .filter(|(_, cost)| cost.is_infinite())
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

/// Compute the lowest-cost route between the requested waypoints.
pub fn plan_route(level: &Level, request: &RouteRequest) -> Result<RoutePlan> {
    let start = level.waypoint_cell(&request.from)?;
    let goal = level.waypoint_cell(&request.to)?;
    let edges = NavigationEdges::new(request.corner_policy);

    let Some((steps, cost)) = shortest_path_with_cost(start, goal, level, &edges)? else {
        debug!(from = %request.from, to = %request.to, "no route between waypoints");
        return Err(Error::RouteNotFound {
            start: request.from.clone(),
            goal: request.to.clone(),
        });
    };

    debug!(
        from = %request.from,
        to = %request.to,
        hops = steps.len().saturating_sub(1),
        cost,
        "route planned"
    );

    Ok(RoutePlan {
        from: request.from.clone(),
        to: request.to.clone(),
        start,
        goal,
        steps,
        cost,
        corner_policy: request.corner_policy,
    })
}

/// Compute the cost from the requested waypoint to every waypoint.
pub fn plan_costs(level: &Level, request: &CostRequest) -> Result<CostReport> {
    let source = level.waypoint_cell(&request.from)?;
    let edges = NavigationEdges::new(request.corner_policy);
    let distances = distance_map(source, level, &edges)?;

    let costs = distances.waypoint_costs(level)?;

    debug!(
        from = %request.from,
        reachable_cells = distances.len(),
        waypoints = costs.len(),
        "waypoint costs computed"
    );

    Ok(CostReport {
        from: request.from.clone(),
        source,
        costs,
        distances,
    })
}
