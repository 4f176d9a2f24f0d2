use crate::algorithms::Strategy;
use crate::error::SearchError;
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum GhostId {
    Blue,
    Pink,
    Orange,
    Red,
}

/// Fixed per-ghost attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostTraits {
    pub name: &'static str,
    pub strategy: Strategy,
    pub color: (u8, u8, u8),
}

static TRAITS: [GhostTraits; 4] = [
    GhostTraits {
        name: "blue",
        strategy: Strategy::Bfs,
        color: (0, 255, 255),
    },
    GhostTraits {
        name: "pink",
        strategy: Strategy::Dfs,
        color: (255, 184, 255),
    },
    GhostTraits {
        name: "orange",
        strategy: Strategy::Ucs,
        color: (255, 184, 82),
    },
    GhostTraits {
        name: "red",
        strategy: Strategy::AStar,
        color: (255, 0, 0),
    },
];

impl GhostId {
    /// Arbitration order: earlier ghosts win contested cells. Also the order
    /// in which spawn cells are handed out.
    pub const PRECEDENCE: [GhostId; 4] = [GhostId::Blue, GhostId::Pink, GhostId::Orange, GhostId::Red];

    pub fn traits(self) -> &'static GhostTraits {
        &TRAITS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.traits().name
    }

    pub fn default_strategy(self) -> Strategy {
        self.traits().strategy
    }

    pub fn color(self) -> (u8, u8, u8) {
        self.traits().color
    }

    pub fn precedence(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GhostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A chasing agent and its cached route.
///
/// When `cached_path` is non-empty its head is the ghost's own position.
#[derive(Debug, Clone)]
pub struct Ghost {
    pub id: GhostId,
    pub strategy: Strategy,
    pub position: Position,
    pub cached_path: VecDeque<Position>,
    pub last_stats: Option<SearchStats>,
}

impl Ghost {
    pub fn new(id: GhostId, position: Position) -> Self {
        Ghost::with_strategy(id, id.default_strategy(), position)
    }

    pub fn with_strategy(id: GhostId, strategy: Strategy, position: Position) -> Self {
        Ghost {
            id,
            strategy,
            position,
            cached_path: VecDeque::new(),
            last_stats: None,
        }
    }

    /// No further steps are left on the cached path.
    pub fn needs_replan(&self) -> bool {
        self.cached_path.len() <= 1
    }

    /// Searches from the current position to `target` and caches the result.
    pub fn replan(&mut self, grid: &Grid, target: Position) -> Result<SearchStats, SearchError> {
        let result = self.strategy.search(grid, self.position, target)?;
        self.cached_path = result.path.into();
        self.last_stats = Some(result.stats);
        Ok(result.stats)
    }

    pub fn next_step(&self) -> Option<Position> {
        if self.needs_replan() {
            return None;
        }
        self.cached_path.get(1).copied()
    }

    /// Drops the consumed head and moves onto the next cell.
    pub fn advance(&mut self) -> Option<Position> {
        let next = self.next_step()?;
        self.cached_path.pop_front();
        self.move_to(next);
        Some(next)
    }

    pub fn move_to(&mut self, new_pos: Position) {
        self.position = new_pos;
    }

    pub fn clear_path(&mut self) {
        self.cached_path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_table_is_fixed() {
        assert_eq!(GhostId::Blue.default_strategy(), Strategy::Bfs);
        assert_eq!(GhostId::Pink.default_strategy(), Strategy::Dfs);
        assert_eq!(GhostId::Orange.default_strategy(), Strategy::Ucs);
        assert_eq!(GhostId::Red.default_strategy(), Strategy::AStar);
        assert_eq!(GhostId::Red.color(), (255, 0, 0));
        for (rank, ghost) in GhostId::PRECEDENCE.iter().enumerate() {
            assert_eq!(ghost.precedence(), rank);
        }
    }

    #[test]
    fn advance_consumes_path_head() {
        let grid = Grid::parse("....").unwrap();
        let mut ghost = Ghost::new(GhostId::Red, Position::new(0, 0));
        assert!(ghost.needs_replan());
        ghost.replan(&grid, Position::new(3, 0)).unwrap();
        assert_eq!(ghost.cached_path.len(), 4);

        assert_eq!(ghost.advance(), Some(Position::new(1, 0)));
        assert_eq!(ghost.position, Position::new(1, 0));
        assert_eq!(ghost.cached_path.front(), Some(&ghost.position));
        assert_eq!(ghost.cached_path.len(), 3);
    }

    #[test]
    fn path_at_goal_has_no_next_step() {
        let grid = Grid::parse("..").unwrap();
        let mut ghost = Ghost::new(GhostId::Blue, Position::new(1, 0));
        ghost.replan(&grid, Position::new(1, 0)).unwrap();
        assert_eq!(ghost.cached_path.len(), 1);
        assert!(ghost.needs_replan());
        assert_eq!(ghost.next_step(), None);
        assert_eq!(ghost.advance(), None);
        assert_eq!(ghost.position, Position::new(1, 0));
    }
}
