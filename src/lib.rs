//! Grid pathfinding with four interchangeable strategies and a tick
//! scheduler that drives ghosts towards a moving target.

pub mod agent;
pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod scheduler;
pub mod simulation;
pub mod statistics;
