use crate::algorithms::common::{reconstruct_path, Exploration, SearchAlgorithm};
use crate::grid::{Grid, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Breadth-first search. Cells are marked visited when enqueued, so each one
/// enters the FIFO frontier at most once.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bfs;

impl SearchAlgorithm for Bfs {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn explore(&self, grid: &Grid, start: Position, goal: Position) -> Exploration {
        let mut queue = VecDeque::from([start]);
        let mut visited: FxHashSet<Position> = FxHashSet::default();
        let mut parents: FxHashMap<Position, Position> = FxHashMap::default();
        let mut expanded_nodes = 0;
        let mut reached = false;
        visited.insert(start);

        while let Some(current) = queue.pop_front() {
            expanded_nodes += 1;
            if current == goal {
                reached = true;
                break;
            }

            for neighbor in grid.neighbors(current) {
                if visited.insert(neighbor) {
                    parents.insert(neighbor, current);
                    queue.push_back(neighbor);
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
