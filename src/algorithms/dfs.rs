use crate::algorithms::common::{reconstruct_path, Exploration, SearchAlgorithm};
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};

/// Depth-first search over a LIFO stack.
///
/// Neighbours are pushed in Up, Right, Down, Left order, so the last one
/// pushed (Left) is the first explored. Cells are marked visited on push and
/// the goal is only recognised when popped. Paths are not necessarily
/// shortest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dfs;

impl SearchAlgorithm for Dfs {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn explore(&self, grid: &Grid, start: Position, goal: Position) -> Exploration {
        let mut stack = vec![start];
        let mut visited: FxHashSet<Position> = FxHashSet::default();
        let mut parents: FxHashMap<Position, Position> = FxHashMap::default();
        let mut expanded_nodes = 0;
        let mut reached = false;
        visited.insert(start);

        while let Some(current) = stack.pop() {
            expanded_nodes += 1;
            if current == goal {
                reached = true;
                break;
            }

            for neighbor in grid.neighbors(current) {
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    stack.push(neighbor);
                }
            }
        }

        Exploration {
            path: if reached {
                reconstruct_path(&parents, start, goal)
            } else {
                Vec::new()
            },
            expanded_nodes,
        }
    }
}
