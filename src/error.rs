use crate::grid::Position;
use thiserror::Error;

/// Errors raised while reading a maze layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("maze layout is empty")]
    Empty,

    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell '{ch}' at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },

    #[error("maze has no Pac-Man spawn")]
    MissingPacmanSpawn,
}

/// Why an endpoint handed to a search was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Wall,
}

impl std::fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointFault::OutOfBounds => write!(f, "outside the maze"),
            EndpointFault::Wall => write!(f, "on a wall"),
        }
    }
}

/// Errors raised by a search. An unreachable goal is not one of them: it is
/// reported as an empty path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid endpoint {position}: {fault}")]
    InvalidEndpoint {
        position: Position,
        fault: EndpointFault,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("maze has {available} ghost spawn(s) but {requested} ghost(s) were requested")]
    NotEnoughSpawns { requested: usize, available: usize },

    #[error("could not read maze file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),
}
