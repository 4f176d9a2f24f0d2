use crate::algorithms::common::{best_first, Exploration, SearchAlgorithm};
use crate::grid::{Grid, Position};

/// Uniform-cost search: a min-heap keyed by accumulated path cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ucs;

impl SearchAlgorithm for Ucs {
    fn name(&self) -> &'static str {
        "UCS"
    }

    fn explore(&self, grid: &Grid, start: Position, goal: Position) -> Exploration {
        best_first(grid, start, goal, |_| 0)
    }
}
