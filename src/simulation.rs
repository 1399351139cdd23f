use crate::{next_generation, random_grid_seeded, Grid, GridError};

/// Host for a running board: owns the current [`Grid`] and counts the
/// generations it went through.
///
/// Every step replaces the grid wholesale with the engine's output; previous
/// generations are not kept.
///
/// # Example
///
/// ```rust
/// use gol_board::{Grid, Simulation};
///
/// // A 2x2 block never changes
/// let block = Grid::with_alive(4, 4, [(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
/// let mut simulation = Simulation::new(block.clone());
///
/// let steps = simulation.advance(100).unwrap();
/// assert_eq!(steps, 0);
/// assert_eq!(simulation.grid(), &block);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    /// Starts from a random board, see [`random_grid_seeded`].
    pub fn random(
        height: usize,
        width: usize,
        alive_probability: f64,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        random_grid_seeded(height, width, alive_probability, seed).map(Self::new)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Number of steps taken since the simulation was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Advances the board by one generation.
    ///
    /// Returns `false` if the board is a still life, i.e. the step didn't
    /// change anything. The generation counter is incremented either way.
    pub fn step(&mut self) -> Result<bool, GridError> {
        let next = next_generation(&self.grid)?;
        let changed = next != self.grid;
        self.grid = next;
        self.generation += 1;
        Ok(changed)
    }

    /// Advances the board by up to `generations` steps.
    ///
    /// Stops early once the board stops changing, since no further step
    /// could change it either.
    ///
    /// # Returns
    ///
    /// The number of steps that changed the board. A value less than
    /// `generations` means a still life was reached.
    pub fn advance(&mut self, generations: u64) -> Result<u64, GridError> {
        for i in 0..generations {
            if !self.step()? {
                log::info!(
                    "Reached a still life at generation {} (population {})",
                    self.generation,
                    self.population()
                );
                return Ok(i);
            }
        }
        log::debug!(
            "Advanced by {} generations to generation {}",
            generations,
            self.generation
        );
        Ok(generations)
    }
}

impl From<Grid> for Simulation {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
