use crate::algorithms::common::{best_first, Exploration, SearchAlgorithm};
use crate::grid::{manhattan, Grid, Position};

/// Implements A* with the Manhattan distance heuristic.
///
/// Identical to uniform-cost search except that the heap is keyed by
/// `cost + manhattan(cell, goal)`. The heuristic is consistent on a
/// 4-connected unit-cost grid, so returned paths are shortest.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl SearchAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn explore(&self, grid: &Grid, start: Position, goal: Position) -> Exploration {
        best_first(grid, start, goal, |p| manhattan(p, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::ucs::Ucs;

    #[test]
    fn straight_corridor_expands_only_the_path() {
        let grid = Grid::parse(".......").unwrap();
        let result = AStar::new()
            .search(&grid, Position::new(0, 0), Position::new(6, 0))
            .unwrap();
        assert_eq!(result.edge_count(), 6);
        assert_eq!(result.stats.expanded_nodes, 7);
    }

    #[test]
    fn expands_no_more_than_ucs_behind_a_wall() {
        // The wall makes Manhattan distance a strict underestimate.
        let grid = Grid::parse(
            "\
.........
.........
....#....
....#....
....#....
.........
.........",
        )
        .unwrap();
        let start = Position::new(0, 3);
        let goal = Position::new(8, 3);
        let a_star = AStar.search(&grid, start, goal).unwrap();
        let ucs = Ucs.search(&grid, start, goal).unwrap();
        assert_eq!(a_star.edge_count(), ucs.edge_count());
        assert!(a_star.stats.expanded_nodes <= ucs.stats.expanded_nodes);
        assert!(manhattan(start, goal) < a_star.edge_count());
    }
}
