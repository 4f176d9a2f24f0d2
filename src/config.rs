use crate::agent::GhostId;
use crate::algorithms::Strategy;
use crate::error::{ConfigError, GridError};
use crate::grid::Grid;
use crate::scheduler::{GHOST_MOVE_DELAY, PACMAN_MOVE_DELAY};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Maze layout file. The built-in maze is used when omitted.
    #[arg(long)]
    pub maze: Option<PathBuf>,

    /// Use a random open grid with this many walls instead of a maze.
    #[arg(long, conflicts_with = "maze")]
    pub random_walls: Option<usize>,

    /// Side length of the random grid.
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    /// Ghosts in play.
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = GhostId::PRECEDENCE)]
    pub ghosts: Vec<GhostId>,

    /// Use this strategy for every ghost instead of each ghost's own.
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 20_000)]
    pub ticks: usize,

    /// Seconds of game time per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    #[arg(long, default_value_t = GHOST_MOVE_DELAY)]
    pub ghost_delay: f64,

    #[arg(long, default_value_t = PACMAN_MOVE_DELAY)]
    pub pacman_delay: f64,

    /// Seed for the random grid and Pac-Man's walk.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Compare every strategy from every ghost spawn instead of simulating.
    #[arg(long, default_value_t = false)]
    pub compare: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            maze: None,
            random_walls: None,
            grid_size: 20,
            ghosts: GhostId::PRECEDENCE.to_vec(),
            strategy: None,
            ticks: 20_000,
            dt: 1.0 / 60.0,
            ghost_delay: GHOST_MOVE_DELAY,
            pacman_delay: PACMAN_MOVE_DELAY,
            seed: None,
            compare: false,
            quiet: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("dt", self.dt),
            ("ghost-delay", self.ghost_delay),
            ("pacman-delay", self.pacman_delay),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.grid_size == 0 {
            return Err(ConfigError::NonPositive {
                name: "grid-size",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// The seed for this run: `--seed` when given, otherwise a fresh draw.
    /// Call once and hand the result to everything that needs randomness.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Builds the grid this run plays on. `seed` only matters for random
    /// grids.
    pub fn load_grid(&self, seed: u64) -> Result<Grid, ConfigError> {
        let grid = if let Some(path) = &self.maze {
            Grid::parse(&std::fs::read_to_string(path)?)?
        } else if let Some(walls) = self.random_walls {
            Grid::random(self.grid_size, self.grid_size, walls, seed)
        } else {
            Grid::classic()
        };

        if grid.pacman_spawn().is_none() {
            return Err(GridError::MissingPacmanSpawn.into());
        }
        Ok(grid)
    }
}
