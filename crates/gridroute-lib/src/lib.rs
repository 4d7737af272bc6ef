//! gridroute library entry points.
//!
//! This crate exposes helpers to load a grid level into memory, enumerate the
//! weighted 8-directional moves between its cells, and run Dijkstra searches
//! over it. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod edges;
pub mod error;
pub mod level;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;

pub use edges::{
    navigation_edges, CornerPolicy, Direction, Edge, EdgeKind, EdgeModel, NavigationEdges,
};
pub use error::{Error, Result};
pub use level::{Cell, Level};
pub use loader::{load_level, parse_level};
pub use output::{render_level, save_level_costs, write_level_costs, RouteStep, RouteSummary};
pub use path::{
    distance_map, path_cost, shortest_path, shortest_path_to_all, shortest_path_with_cost,
    CostTable, DistanceMap, Path,
};
pub use routing::{plan_costs, plan_route, CostReport, CostRequest, RoutePlan, RouteRequest};
