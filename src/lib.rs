#![warn(clippy::all)]

mod engine;
mod error;
mod grid;
mod pattern;
mod simulation;

pub use engine::{
    count_alive_neighbors, next_cell_state, next_generation, random_grid, random_grid_seeded,
    DEFAULT_ALIVE_PROBABILITY,
};
pub use error::GridError;
pub use grid::{Grid, Position, MAX_CELLS};
pub use pattern::GridFormat;
pub use simulation::Simulation;

pub const VERSION: &str = "0.1.0";
