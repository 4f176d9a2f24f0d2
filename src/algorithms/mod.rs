pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dfs;
pub mod ucs;

use crate::error::SearchError;
use crate::grid::{Grid, Position};
use a_star::AStar;
use bfs::Bfs;
use common::{SearchAlgorithm, SearchResult};
use dfs::Dfs;
use std::fmt;
use std::str::FromStr;
use ucs::Ucs;

/// The four interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    #[value(name = "a_star")]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Bfs, Strategy::Dfs, Strategy::Ucs, Strategy::AStar];

    pub fn algorithm(self) -> Box<dyn SearchAlgorithm> {
        match self {
            Strategy::Bfs => Box::new(Bfs),
            Strategy::Dfs => Box::new(Dfs),
            Strategy::Ucs => Box::new(Ucs),
            Strategy::AStar => Box::new(AStar::new()),
        }
    }

    pub fn search(
        self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<SearchResult, SearchError> {
        match self {
            Strategy::Bfs => Bfs.search(grid, start, goal),
            Strategy::Dfs => Dfs.search(grid, start, goal),
            Strategy::Ucs => Ucs.search(grid, start, goal),
            Strategy::AStar => AStar.search(grid, start, goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ucs => "UCS",
            Strategy::AStar => "A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ucs" => Ok(Strategy::Ucs),
            "a_star" | "astar" | "a*" => Ok(Strategy::AStar),
            other => Err(format!(
                "unknown strategy '{}', select 'bfs', 'dfs', 'ucs' or 'a_star'",
                other
            )),
        }
    }
}
