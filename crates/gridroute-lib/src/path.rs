use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::edges::EdgeModel;
use crate::error::{Error, Result};
use crate::level::{Cell, Level};

/// Ordered cells from source (first) to destination (last).
pub type Path = Vec<Cell>;

/// Minimal cost from a fixed source to each waypoint label.
///
/// Unreachable waypoints report `f64::INFINITY`.
pub type CostTable = BTreeMap<String, f64>;

/// Settled costs from one Dijkstra run over every reachable cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    pub source: Cell,
    costs: HashMap<Cell, f64>,
}

impl DistanceMap {
    /// Cost of reaching `cell`, or `f64::INFINITY` when it was never settled.
    pub fn cost(&self, cell: Cell) -> f64 {
        self.costs.get(&cell).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, cell: Cell) -> bool {
        self.costs.contains_key(&cell)
    }

    /// Number of settled cells, the source included.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Look up every waypoint of `level` in this map.
    ///
    /// Waypoints that were never settled report `f64::INFINITY`.
    pub fn waypoint_costs(&self, level: &Level) -> Result<CostTable> {
        let mut table = CostTable::new();
        for (label, &cell) in &level.waypoints {
            if !level.is_walkable(cell) {
                return Err(Error::MalformedLevel {
                    label: label.clone(),
                    cell,
                });
            }
            table.insert(label.clone(), self.cost(cell));
        }
        Ok(table)
    }
}

/// Find the lowest-cost path from `source` to `destination`.
///
/// Returns `Ok(None)` when the destination cannot be reached and
/// [`Error::InvalidCell`] when either endpoint is not walkable.
pub fn shortest_path<E: EdgeModel + ?Sized>(
    source: Cell,
    destination: Cell,
    level: &Level,
    edges: &E,
) -> Result<Option<Path>> {
    Ok(shortest_path_with_cost(source, destination, level, edges)?.map(|(path, _)| path))
}

/// Same as [`shortest_path`], also returning the settled cost of the destination.
pub fn shortest_path_with_cost<E: EdgeModel + ?Sized>(
    source: Cell,
    destination: Cell,
    level: &Level,
    edges: &E,
) -> Result<Option<(Path, f64)>> {
    level.require_walkable(source)?;
    level.require_walkable(destination)?;

    let search = dijkstra(source, Some(destination), level, edges);
    debug!(
        %source,
        %destination,
        settled = search.settled.len(),
        found = search.reached_target,
        "single-target search finished"
    );

    if !search.reached_target {
        return Ok(None);
    }
    let Some(&cost) = search.distances.get(&destination) else {
        return Ok(None);
    };
    Ok(Some((
        reconstruct_path(&search.parents, source, destination),
        cost,
    )))
}

/// Compute the minimal cost from `source` to every waypoint in one search.
///
/// A waypoint whose cell is not walkable yields [`Error::MalformedLevel`].
pub fn shortest_path_to_all<E: EdgeModel + ?Sized>(
    source: Cell,
    level: &Level,
    edges: &E,
) -> Result<CostTable> {
    distance_map(source, level, edges)?.waypoint_costs(level)
}

/// Run Dijkstra from `source` until the queue is exhausted.
pub fn distance_map<E: EdgeModel + ?Sized>(
    source: Cell,
    level: &Level,
    edges: &E,
) -> Result<DistanceMap> {
    level.require_walkable(source)?;

    let search = dijkstra(source, None, level, edges);
    debug!(%source, settled = search.settled.len(), "distance map computed");

    let costs = search
        .settled
        .into_iter()
        .filter_map(|cell| search.distances.get(&cell).map(|cost| (cell, *cost)))
        .collect();
    Ok(DistanceMap { source, costs })
}

/// Sum the edge costs along `path`.
///
/// Returns `None` when two consecutive cells are not connected by an edge.
pub fn path_cost<E: EdgeModel + ?Sized>(level: &Level, edges: &E, path: &[Cell]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        edges
            .edges(level, pair[0])
            .iter()
            .find(|edge| edge.target == pair[1])
            .map(|edge| total + edge.cost)
    })
}

struct Search {
    distances: HashMap<Cell, f64>,
    parents: HashMap<Cell, Option<Cell>>,
    settled: HashSet<Cell>,
    reached_target: bool,
}

fn dijkstra<E: EdgeModel + ?Sized>(
    source: Cell,
    target: Option<Cell>,
    level: &Level,
    edges: &E,
) -> Search {
    let mut distances: HashMap<Cell, f64> = HashMap::new();
    let mut parents: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut settled: HashSet<Cell> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    parents.insert(source, None);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        // Stale entry left behind by a later improvement.
        if !settled.insert(entry.node) {
            continue;
        }

        if Some(entry.node) == target {
            return Search {
                distances,
                parents,
                settled,
                reached_target: true,
            };
        }

        let current_cost = entry.cost.0;
        for edge in edges.edges(level, entry.node) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let next_cost = current_cost + edge.cost;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    Search {
        distances,
        parents,
        settled,
        reached_target: false,
    }
}

fn reconstruct_path(
    parents: &HashMap<Cell, Option<Cell>>,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: Cell,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: Cell, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
