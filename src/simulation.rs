use crate::agent::GhostId;
use crate::algorithms::Strategy;
use crate::config::Config;
use crate::error::{ConfigError, GridError, SearchError};
use crate::grid::{Direction, Grid, Position};
use crate::scheduler::{MoveTimer, Scheduler};
use crate::statistics::{SearchStats, TimingData};
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A scripted Pac-Man: a random walk that never turns back unless it hits a
/// dead end.
#[derive(Debug, Clone)]
pub struct ScriptedPacman {
    pub position: Position,
    heading: Option<Direction>,
    timer: MoveTimer,
    rng: StdRng,
}

impl ScriptedPacman {
    pub fn new(position: Position, delay: f64, seed: u64) -> Self {
        ScriptedPacman {
            position,
            heading: None,
            timer: MoveTimer::new(delay),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advances the walk by `dt` seconds. Returns the new cell when a step
    /// was taken.
    pub fn update(&mut self, grid: &Grid, dt: f64) -> Option<Position> {
        if !self.timer.advance(dt) {
            return None;
        }

        let open: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| grid.step(self.position, dir).is_some_and(|p| grid.is_walkable(p)))
            .collect();
        let forward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|&dir| Some(dir.opposite()) != self.heading)
            .collect();
        let choices = if forward.is_empty() { &open } else { &forward };

        let dir = *choices.choose(&mut self.rng)?;
        self.position = grid.step(self.position, dir)?;
        self.heading = Some(dir);
        Some(self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Captured { by: GhostId, tick: usize },
    Cleared { tick: usize },
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub outcome: Outcome,
    pub ticks: usize,
    pub ghost_steps: usize,
    pub food_eaten: usize,
    pub timing: TimingData,
}

pub struct Simulation {
    grid: Grid,
    scheduler: Scheduler,
    pacman: ScriptedPacman,
    dt: f64,
    max_ticks: usize,
    seed: u64,
}

impl Simulation {
    /// Builds a run from `config`. The grid and Pac-Man's walk share one
    /// seed, so a run can be replayed from [`Simulation::seed`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.resolve_seed();
        log::info!("using seed {}", seed);
        let grid = config.load_grid(seed)?;
        let mut scheduler = Scheduler::from_spawns(&grid, &config.ghosts, config.ghost_delay)?;
        if let Some(strategy) = config.strategy {
            for &id in &config.ghosts {
                if let Some(ghost) = scheduler.ghost_mut(id) {
                    ghost.strategy = strategy;
                }
            }
        }
        let spawn = grid.pacman_spawn().ok_or(GridError::MissingPacmanSpawn)?;
        let pacman = ScriptedPacman::new(spawn, config.pacman_delay, seed);

        Ok(Simulation {
            grid,
            scheduler,
            pacman,
            dt: config.dt,
            max_ticks: config.ticks,
            seed,
        })
    }

    /// Assembles a run from prebuilt pieces. [`Simulation::seed`] reports 0.
    pub fn from_parts(grid: Grid, scheduler: Scheduler, pacman: ScriptedPacman, dt: f64, max_ticks: usize) -> Self {
        Simulation {
            grid,
            scheduler,
            pacman,
            dt,
            max_ticks,
            seed: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs until a ghost catches Pac-Man, the food runs out or the tick
    /// budget is spent.
    pub fn run(&mut self) -> Result<SimulationReport, SearchError> {
        let mut timing = TimingData::new();
        let mut ghost_steps = 0;
        let mut food_eaten = 0;

        for tick in 1..=self.max_ticks {
            if let Some(pos) = self.pacman.update(&self.grid, self.dt) {
                if self.grid.eat_food(pos) {
                    food_eaten += 1;
                }
                if let Some(by) = self.scheduler.ghost_at(pos) {
                    log::info!("Pac-Man walked into {} at {} on tick {}", by, pos, tick);
                    return Ok(self.report(Outcome::Captured { by, tick }, tick, ghost_steps, food_eaten, timing));
                }
                if !self.grid.has_food_left() {
                    log::info!("all food eaten on tick {}", tick);
                    return Ok(self.report(Outcome::Cleared { tick }, tick, ghost_steps, food_eaten, timing));
                }
            }

            let report = self.scheduler.tick(&self.grid, self.dt, self.pacman.position)?;
            if report.stepped {
                ghost_steps += 1;
            }
            for (id, stats) in report.searches {
                timing.record(id, stats);
            }
            if let Some(by) = report.capture {
                return Ok(self.report(Outcome::Captured { by, tick }, tick, ghost_steps, food_eaten, timing));
            }
        }

        log::info!("no capture after {} ticks", self.max_ticks);
        Ok(self.report(Outcome::TimedOut, self.max_ticks, ghost_steps, food_eaten, timing))
    }

    fn report(
        &self,
        outcome: Outcome,
        ticks: usize,
        ghost_steps: usize,
        food_eaten: usize,
        timing: TimingData,
    ) -> SimulationReport {
        SimulationReport {
            outcome,
            ticks,
            ghost_steps,
            food_eaten,
            timing,
        }
    }
}

/// One strategy run from one start cell.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub strategy: Strategy,
    pub start: Position,
    pub path_length: Option<usize>,
    pub optimal_path_length: Option<usize>,
    pub stats: SearchStats,
}

/// Runs every strategy from every start to `goal`. The optimal length is
/// computed independently of the strategies under test.
pub fn compare_strategies(
    grid: &Grid,
    starts: &[Position],
    goal: Position,
) -> Result<Vec<ComparisonRow>, SearchError> {
    let mut rows = Vec::with_capacity(starts.len() * Strategy::ALL.len());
    for &start in starts {
        let optimal_path_length = bfs(&start, |p| grid.neighbors(*p), |p| *p == goal)
            .map(|path| path.len().saturating_sub(1));

        for strategy in Strategy::ALL {
            let result = strategy.search(grid, start, goal)?;
            rows.push(ComparisonRow {
                strategy,
                start,
                path_length: result.found().then(|| result.edge_count()),
                optimal_path_length,
                stats: result.stats,
            });
        }
    }
    Ok(rows)
}

pub fn print_comparison(rows: &[ComparisonRow]) {
    println!("\n=== STRATEGY COMPARISON ===");
    println!();
    println!(
        "{:<10} {:<10} {:<8} {:<8} {:<10} {:<14} {:<12}",
        "Strategy", "Start", "Length", "Optimal", "Expanded", "Time", "Memory (MB)"
    );
    println!("{}", "-".repeat(78));

    let show = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    for row in rows {
        println!(
            "{:<10} {:<10} {:<8} {:<8} {:<10} {:<14} {:<12.2}",
            row.strategy.name(),
            row.start.to_string(),
            show(row.path_length),
            show(row.optimal_path_length),
            row.stats.expanded_nodes,
            format!("{:.6}s", row.stats.search_time),
            row.stats.memory_usage
        );
    }

    println!();
    for strategy in Strategy::ALL {
        let expanded: usize = rows
            .iter()
            .filter(|row| row.strategy == strategy)
            .map(|row| row.stats.expanded_nodes)
            .sum();
        println!("{:<4} total expanded nodes: {}", strategy.name(), expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Ghost;

    #[test]
    fn ghost_catches_stationary_pacman() {
        let grid = Grid::parse("G...P").unwrap();
        let scheduler = Scheduler::new(vec![Ghost::new(GhostId::Blue, Position::new(0, 0))], 0.2);
        let pacman = ScriptedPacman::new(Position::new(4, 0), 1e9, 0);
        let mut simulation = Simulation::from_parts(grid, scheduler, pacman, 0.2, 100);

        let report = simulation.run().unwrap();
        assert_eq!(report.outcome, Outcome::Captured { by: GhostId::Blue, tick: 4 });
        assert_eq!(report.ghost_steps, 4);
        assert_eq!(report.timing.calls_for(GhostId::Blue), 1);
    }

    #[test]
    fn pacman_walking_into_a_ghost_is_a_capture() {
        // Pac-Man's only exit is the ghost's cell and the ghost never moves.
        let grid = Grid::parse("GP").unwrap();
        let scheduler = Scheduler::new(vec![Ghost::new(GhostId::Blue, Position::new(0, 0))], 1e9);
        let pacman = ScriptedPacman::new(Position::new(1, 0), 0.15, 0);
        let mut simulation = Simulation::from_parts(grid, scheduler, pacman, 0.15, 10);

        let report = simulation.run().unwrap();
        assert_eq!(report.outcome, Outcome::Captured { by: GhostId::Blue, tick: 1 });
        assert_eq!(report.ticks, 1);
        assert_eq!(report.ghost_steps, 0);
        assert_eq!(report.timing.total_calls(), 0);
        assert_eq!(simulation.scheduler().ghosts()[0].position, Position::new(0, 0));
    }

    #[test]
    fn eating_last_food_clears_the_maze() {
        let grid = Grid::parse("P.").unwrap();
        let scheduler = Scheduler::new(Vec::new(), 0.2);
        let pacman = ScriptedPacman::new(Position::new(0, 0), 0.15, 0);
        let mut simulation = Simulation::from_parts(grid, scheduler, pacman, 0.15, 10);

        let report = simulation.run().unwrap();
        assert_eq!(report.outcome, Outcome::Cleared { tick: 1 });
        assert_eq!(report.food_eaten, 1);
    }

    #[test]
    fn walk_never_reverses_outside_dead_ends() {
        let grid = Grid::classic();
        let mut pacman = ScriptedPacman::new(grid.pacman_spawn().unwrap(), 0.15, 11);
        let mut previous = pacman.position;
        let mut before_previous = None;
        for _ in 0..500 {
            let Some(next) = pacman.update(&grid, 0.15) else {
                panic!("timer should fire every update");
            };
            assert_eq!(crate::grid::manhattan(previous, next), 1);
            if Some(next) == before_previous {
                // Turning back is only allowed with a single exit.
                assert_eq!(grid.neighbors(previous).len(), 1);
            }
            before_previous = Some(previous);
            previous = next;
        }
    }

    #[test]
    fn classic_run_ends_in_capture() {
        let config = Config {
            seed: Some(42),
            ..Config::default()
        };
        let mut simulation = Simulation::new(&config).unwrap();
        let report = simulation.run().unwrap();
        assert!(matches!(report.outcome, Outcome::Captured { .. }));
        assert!(report.ghost_steps > 0);
    }

    #[test]
    fn strategy_override_applies_to_every_ghost() {
        let config = Config {
            strategy: Some(Strategy::Ucs),
            seed: Some(1),
            ..Config::default()
        };
        let simulation = Simulation::new(&config).unwrap();
        assert!(simulation
            .scheduler()
            .ghosts()
            .iter()
            .all(|g| g.strategy == Strategy::Ucs));
    }

    fn walk(simulation: &mut Simulation, steps: usize) -> Vec<Position> {
        let dt = simulation.pacman.timer.delay();
        let mut route = Vec::with_capacity(steps);
        for _ in 0..steps {
            route.extend(simulation.pacman.update(&simulation.grid, dt));
        }
        route
    }

    #[test]
    fn one_seed_drives_grid_and_walk() {
        let config = Config {
            random_walls: Some(60),
            grid_size: 14,
            ..Config::default()
        };
        let mut first = Simulation::new(&config).unwrap();
        let replay_config = Config {
            seed: Some(first.seed()),
            ..config.clone()
        };
        let mut replay = Simulation::new(&replay_config).unwrap();

        assert_eq!(replay.seed(), first.seed());
        assert_eq!(replay.grid(), first.grid());
        assert_eq!(first.grid(), &Grid::random(14, 14, 60, first.seed()));
        let route = walk(&mut first, 40);
        assert_eq!(route.len(), 40);
        assert_eq!(walk(&mut replay, 40), route);
    }

    #[test]
    fn comparison_matches_independent_optimum() {
        let grid = Grid::classic();
        let goal = grid.pacman_spawn().unwrap();
        let rows = compare_strategies(&grid, &grid.ghost_spawns(), goal).unwrap();
        assert_eq!(rows.len(), 16);
        for row in &rows {
            let optimal = row.optimal_path_length.unwrap();
            let length = row.path_length.unwrap();
            match row.strategy {
                Strategy::Dfs => assert!(length >= optimal),
                _ => assert_eq!(length, optimal),
            }
        }
    }
}
