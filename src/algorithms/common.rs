use crate::error::{EndpointFault, SearchError};
use crate::grid::{Grid, Position};
use crate::statistics::{resident_memory_mb, SearchStats};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Raw outcome of a strategy's exploration loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exploration {
    pub path: Vec<Position>,
    pub expanded_nodes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `path[0]` is the start and the last element the goal. Empty when the
    /// goal is unreachable.
    pub path: Vec<Position>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path.
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

pub trait SearchAlgorithm {
    fn name(&self) -> &'static str;

    /// Runs the frontier loop from `start` until `goal` is popped or the
    /// frontier empties. Endpoints are already validated.
    fn explore(&self, grid: &Grid, start: Position, goal: Position) -> Exploration;

    /// Finds a path from `start` to `goal`, measuring the work done.
    ///
    /// An unreachable goal yields an empty path and valid stats. Endpoints
    /// outside the grid or on a wall are rejected before any work.
    fn search(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<SearchResult, SearchError> {
        validate_endpoint(grid, start)?;
        validate_endpoint(grid, goal)?;

        let start_memory = resident_memory_mb();
        let started = Instant::now();
        let exploration = self.explore(grid, start, goal);
        let search_time = started.elapsed().as_secs_f64();
        let memory_usage = resident_memory_mb() - start_memory;

        log::debug!(
            "{} {} -> {}: {} steps, {} expanded",
            self.name(),
            start,
            goal,
            exploration.path.len().saturating_sub(1),
            exploration.expanded_nodes
        );

        Ok(SearchResult {
            path: exploration.path,
            stats: SearchStats {
                expanded_nodes: exploration.expanded_nodes,
                search_time,
                memory_usage,
            },
        })
    }
}

/// Rejects positions outside the grid or on a wall.
pub fn validate_endpoint(grid: &Grid, position: Position) -> Result<(), SearchError> {
    let fault = if !grid.in_bounds(position) {
        EndpointFault::OutOfBounds
    } else if !grid.is_walkable(position) {
        EndpointFault::Wall
    } else {
        return Ok(());
    };
    Err(SearchError::InvalidEndpoint { position, fault })
}

/// Walks the parent map back from `goal` and returns the path in forward
/// order. Callers only invoke this once `goal` has been reached.
pub fn reconstruct_path(
    parents: &FxHashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Priority queue entry for the cost-ordered strategies. `Ord` is reversed so
/// that `BinaryHeap` pops the smallest `(priority, cost, position)` first.
#[derive(Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    priority: usize,
    cost: usize,
    position: Position,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.priority, other.cost, other.position).cmp(&(self.priority, self.cost, self.position))
    }
}

/// Best-first search with unit edge weights and lazy deletion: nodes are
/// re-pushed whenever a cheaper cost is found and stale entries are skipped
/// at pop time. A zero heuristic gives uniform-cost search.
pub(crate) fn best_first<H>(grid: &Grid, start: Position, goal: Position, heuristic: H) -> Exploration
where
    H: Fn(Position) -> usize,
{
    let mut frontier = BinaryHeap::new();
    let mut costs: FxHashMap<Position, usize> = FxHashMap::default();
    let mut parents: FxHashMap<Position, Position> = FxHashMap::default();
    let mut closed: FxHashSet<Position> = FxHashSet::default();
    let mut expanded_nodes = 0;
    let mut reached = false;

    costs.insert(start, 0);
    frontier.push(QueueEntry {
        priority: heuristic(start),
        cost: 0,
        position: start,
    });

    while let Some(QueueEntry { cost, position, .. }) = frontier.pop() {
        if !closed.insert(position) {
            continue;
        }
        expanded_nodes += 1;

        if position == goal {
            reached = true;
            break;
        }

        for neighbor in grid.neighbors(position) {
            if closed.contains(&neighbor) {
                continue;
            }
            let next_cost = cost + 1;
            let improved = costs.get(&neighbor).map_or(true, |&known| next_cost < known);
            if improved {
                costs.insert(neighbor, next_cost);
                parents.insert(neighbor, position);
                frontier.push(QueueEntry {
                    priority: next_cost + heuristic(neighbor),
                    cost: next_cost,
                    position: neighbor,
                });
            }
        }
    }

    let path = if reached {
        reconstruct_path(&parents, start, goal)
    } else {
        Vec::new()
    };

    Exploration {
        path,
        expanded_nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_lowest_priority_then_cost_then_position() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { priority: 3, cost: 1, position: Position::new(0, 0) });
        heap.push(QueueEntry { priority: 2, cost: 2, position: Position::new(5, 5) });
        heap.push(QueueEntry { priority: 2, cost: 1, position: Position::new(4, 0) });
        heap.push(QueueEntry { priority: 2, cost: 1, position: Position::new(1, 9) });

        let order: Vec<Position> = std::iter::from_fn(|| heap.pop().map(|e| e.position)).collect();
        assert_eq!(
            order,
            vec![
                Position::new(1, 9),
                Position::new(4, 0),
                Position::new(5, 5),
                Position::new(0, 0),
            ]
        );
    }

    #[test]
    fn reconstruct_walks_parents_in_forward_order() {
        let mut parents = FxHashMap::default();
        parents.insert(Position::new(1, 0), Position::new(0, 0));
        parents.insert(Position::new(2, 0), Position::new(1, 0));
        assert_eq!(
            reconstruct_path(&parents, Position::new(0, 0), Position::new(2, 0)),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        assert_eq!(
            reconstruct_path(&parents, Position::new(0, 0), Position::new(0, 0)),
            vec![Position::new(0, 0)]
        );
    }

    #[test]
    fn reconstruct_without_chain_is_empty() {
        let parents = FxHashMap::default();
        assert!(reconstruct_path(&parents, Position::new(0, 0), Position::new(3, 3)).is_empty());
    }

    #[test]
    fn invalid_endpoints_are_classified() {
        let grid = Grid::parse(".#").unwrap();
        assert_eq!(validate_endpoint(&grid, Position::new(0, 0)), Ok(()));
        assert_eq!(
            validate_endpoint(&grid, Position::new(1, 0)),
            Err(SearchError::InvalidEndpoint {
                position: Position::new(1, 0),
                fault: EndpointFault::Wall
            })
        );
        assert_eq!(
            validate_endpoint(&grid, Position::new(0, 4)),
            Err(SearchError::InvalidEndpoint {
                position: Position::new(0, 4),
                fault: EndpointFault::OutOfBounds
            })
        );
    }
}
