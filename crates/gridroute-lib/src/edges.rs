use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::level::{Cell, Level};

/// Compass directions in the order neighbours are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Unit `(dx, dy)` step for this direction. North is `+y`.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
            Direction::NorthWest => (-1, 1),
        }
    }

    pub const fn kind(self) -> EdgeKind {
        match self {
            Direction::North | Direction::East | Direction::South | Direction::West => {
                EdgeKind::Orthogonal
            }
            _ => EdgeKind::Diagonal,
        }
    }
}

/// Classification for a move between adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Orthogonal,
    Diagonal,
}

impl EdgeKind {
    /// Length of the move relative to an orthogonal step.
    pub fn distance(self) -> f64 {
        match self {
            EdgeKind::Orthogonal => 1.0,
            EdgeKind::Diagonal => SQRT_2,
        }
    }

    /// Cost of moving between cells of cost `from` and `to`: half a step on
    /// each cell, scaled by the move length.
    pub fn cost(self, from: f64, to: f64) -> f64 {
        let half = 0.5 * self.distance();
        half * from + half * to
    }
}

/// Edge leaving a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: Cell,
    pub kind: EdgeKind,
    pub cost: f64,
}

/// Whether a diagonal move may pass between two orthogonal corner cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerPolicy {
    /// Diagonal moves only require the target cell to be walkable.
    #[default]
    Allow,
    /// Disallow the diagonal when both corner cells are walls.
    BlockWhenBothWalled,
    /// Disallow the diagonal when either corner cell is a wall.
    BlockWhenEitherWalled,
}

impl CornerPolicy {
    fn permits(self, level: &Level, cell: Cell, (dx, dy): (i32, i32)) -> bool {
        let walkable = |corner: Option<Cell>| corner.is_some_and(|c| level.is_walkable(c));
        let horizontal = walkable(cell.offset(dx, 0));
        let vertical = walkable(cell.offset(0, dy));
        match self {
            CornerPolicy::Allow => true,
            CornerPolicy::BlockWhenBothWalled => horizontal || vertical,
            CornerPolicy::BlockWhenEitherWalled => horizontal && vertical,
        }
    }
}

/// Adjacency function consumed by the search algorithms.
///
/// Implemented for any `Fn(&Level, Cell) -> Vec<Edge>`, so plain functions
/// such as [`navigation_edges`] can be passed directly.
pub trait EdgeModel {
    /// Walkable neighbours of `cell` with the cost of reaching each.
    fn edges(&self, level: &Level, cell: Cell) -> Vec<Edge>;
}

impl<F> EdgeModel for F
where
    F: Fn(&Level, Cell) -> Vec<Edge>,
{
    fn edges(&self, level: &Level, cell: Cell) -> Vec<Edge> {
        self(level, cell)
    }
}

/// Built-in 8-directional adjacency with a configurable corner policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationEdges {
    pub corner_policy: CornerPolicy,
}

impl NavigationEdges {
    pub fn new(corner_policy: CornerPolicy) -> Self {
        Self { corner_policy }
    }
}

impl EdgeModel for NavigationEdges {
    fn edges(&self, level: &Level, cell: Cell) -> Vec<Edge> {
        let Some(origin_cost) = level.cost(cell) else {
            return Vec::new();
        };

        let mut edges = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let Some(target) = cell.offset(dx, dy) else {
                continue;
            };
            let Some(target_cost) = level.cost(target) else {
                continue;
            };
            let kind = direction.kind();
            if kind == EdgeKind::Diagonal && !self.corner_policy.permits(level, cell, (dx, dy)) {
                continue;
            }
            edges.push(Edge {
                target,
                kind,
                cost: kind.cost(origin_cost, target_cost),
            });
        }
        edges
    }
}

/// Walkable 8-directional neighbours of `cell` with corner cutting allowed.
///
/// Returns an empty list when `cell` itself is not walkable.
pub fn navigation_edges(level: &Level, cell: Cell) -> Vec<Edge> {
    NavigationEdges::default().edges(level, cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(edges: &[Edge]) -> Vec<Cell> {
        edges.iter().map(|edge| edge.target).collect()
    }

    #[test]
    fn centre_of_open_grid_has_eight_neighbours() {
        let level = Level::uniform(3, 3, 1.0);
        let edges = navigation_edges(&level, Cell::new(1, 1));
        assert_eq!(edges.len(), 8);
        assert_eq!(edges[0].target, Cell::new(1, 2));
        assert_eq!(edges[4].target, Cell::new(2, 2));
    }

    #[test]
    fn walls_and_bounds_are_skipped() {
        let level = Level::uniform(2, 2, 1.0).with_wall((1, 0));
        let edges = navigation_edges(&level, Cell::new(0, 0));
        assert_eq!(targets(&edges), vec![Cell::new(0, 1), Cell::new(1, 1)]);
    }

    #[test]
    fn costs_average_both_endpoints() {
        let level = Level::new()
            .with_space((0, 0), 1.0)
            .with_space((1, 0), 3.0)
            .with_space((1, 1), 5.0);
        let edges = navigation_edges(&level, Cell::new(0, 0));

        let east = edges.iter().find(|e| e.target == Cell::new(1, 0)).unwrap();
        assert_eq!(east.kind, EdgeKind::Orthogonal);
        assert!((east.cost - 2.0).abs() < 1e-12);

        let diagonal = edges.iter().find(|e| e.target == Cell::new(1, 1)).unwrap();
        assert_eq!(diagonal.kind, EdgeKind::Diagonal);
        assert!((diagonal.cost - 3.0 * SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn cells_at_the_coordinate_limits_skip_out_of_range_neighbours() {
        let level = Level::new()
            .with_space((i32::MAX - 1, i32::MIN), 1.0)
            .with_space((i32::MAX, i32::MIN), 1.0)
            .with_space((i32::MAX, i32::MIN + 1), 1.0);
        for policy in [
            CornerPolicy::Allow,
            CornerPolicy::BlockWhenBothWalled,
            CornerPolicy::BlockWhenEitherWalled,
        ] {
            let edges = NavigationEdges::new(policy).edges(&level, Cell::new(i32::MAX, i32::MIN));
            assert_eq!(
                targets(&edges),
                vec![
                    Cell::new(i32::MAX, i32::MIN + 1),
                    Cell::new(i32::MAX - 1, i32::MIN),
                ]
            );
        }
    }

    #[test]
    fn wall_cell_has_no_edges() {
        let level = Level::uniform(2, 2, 1.0).with_wall((0, 0));
        assert!(navigation_edges(&level, Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn corner_policies_prune_diagonals() {
        // (0,0) -> (1,1) with corner (1,0) walled and corner (0,1) open.
        let one_walled = Level::uniform(2, 2, 1.0).with_wall((1, 0));
        // Both corners walled.
        let both_walled = Level::uniform(2, 2, 1.0)
            .with_wall((1, 0))
            .with_wall((0, 1));
        let diagonal = Cell::new(1, 1);
        let has_diagonal = |policy: CornerPolicy, level: &Level| {
            NavigationEdges::new(policy)
                .edges(level, Cell::new(0, 0))
                .iter()
                .any(|edge| edge.target == diagonal)
        };

        assert!(has_diagonal(CornerPolicy::Allow, &one_walled));
        assert!(has_diagonal(CornerPolicy::Allow, &both_walled));
        assert!(has_diagonal(CornerPolicy::BlockWhenBothWalled, &one_walled));
        assert!(!has_diagonal(CornerPolicy::BlockWhenBothWalled, &both_walled));
        assert!(!has_diagonal(CornerPolicy::BlockWhenEitherWalled, &one_walled));
        assert!(!has_diagonal(CornerPolicy::BlockWhenEitherWalled, &both_walled));
    }

    #[test]
    fn closures_act_as_edge_models() {
        let level = Level::uniform(2, 1, 1.0);
        let orthogonal_only = |level: &Level, cell: Cell| {
            navigation_edges(level, cell)
                .into_iter()
                .filter(|edge| edge.kind == EdgeKind::Orthogonal)
                .collect::<Vec<_>>()
        };
        let edges = orthogonal_only.edges(&level, Cell::new(0, 0));
        assert_eq!(targets(&edges), vec![Cell::new(1, 0)]);
    }
}
