use clap::Parser;

use ghost_pathfinding::config::Config;
use ghost_pathfinding::simulation::{compare_strategies, print_comparison, Outcome, Simulation};

fn main() {
    env_logger::init();
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    if config.compare {
        let seed = config.resolve_seed();
        let grid = match config.load_grid(seed) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Could not load maze: {}", e);
                std::process::exit(1);
            }
        };
        let Some(goal) = grid.pacman_spawn() else {
            eprintln!("Maze has no Pac-Man spawn");
            std::process::exit(1);
        };

        if !config.quiet {
            println!("Maze: {}x{}", grid.width(), grid.height());
            println!("Seed: {}", seed);
            println!("Goal: {}", goal);
        }

        match compare_strategies(&grid, &grid.ghost_spawns(), goal) {
            Ok(rows) => print_comparison(&rows),
            Err(e) => {
                eprintln!("Comparison failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut simulation = match Simulation::new(&config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Failed to create simulation: {}", e);
            std::process::exit(1);
        }
    };

    if !config.quiet {
        println!("Starting ghost chase...");
        println!("Maze: {}x{}", simulation.grid().width(), simulation.grid().height());
        println!("Seed: {}", simulation.seed());
        for ghost in simulation.scheduler().ghosts() {
            println!("  {:<7} {:<4} from {}", ghost.id.name(), ghost.strategy, ghost.position);
        }
        println!();
    }

    let report = match simulation.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== FINAL RESULTS ===");
    match report.outcome {
        Outcome::Captured { by, tick } => println!("Pac-Man caught by {} on tick {}", by, tick),
        Outcome::Cleared { tick } => println!("Pac-Man cleared the maze on tick {}", tick),
        Outcome::TimedOut => println!("No capture within {} ticks", report.ticks),
    }
    println!("Ghost steps: {}", report.ghost_steps);
    println!("Food eaten: {}", report.food_eaten);

    if !config.quiet {
        println!("\n=== TIMING ANALYSIS ===");
        print!("{}", report.timing);
        for ghost in simulation.scheduler().ghosts() {
            if let Some(stats) = &ghost.last_stats {
                println!("\nLast search by {}:", ghost.id);
                print!("{}", stats);
            }
        }
    }
}
