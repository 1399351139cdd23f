use crate::{Grid, GridError, Position};
use rand::{Rng, SeedableRng};

/// Probability of a cell being alive on a freshly generated random board.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.5;

/// Offsets of the Moore neighborhood.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Counts the alive cells among the 8 neighbors of `pos`.
///
/// The board has hard edges: neighbors falling outside of it are skipped,
/// which is the same as treating them as permanently dead. The result is
/// therefore at most 3 for a corner and at most 5 for an edge cell.
///
/// # Errors
///
/// Returns [`GridError::OutOfBounds`] if `pos` itself is not on the grid.
pub fn count_alive_neighbors(grid: &Grid, pos: Position) -> Result<u8, GridError> {
    if !grid.contains(pos) {
        return Err(GridError::OutOfBounds {
            position: pos,
            height: grid.height(),
            width: grid.width(),
        });
    }
    Ok(count_unchecked(grid, pos.row, pos.col))
}

fn count_unchecked(grid: &Grid, row: usize, col: usize) -> u8 {
    let (h, w) = grid.dimensions();
    let mut count = 0;
    for (dy, dx) in NEIGHBOR_OFFSETS {
        let (Some(y), Some(x)) = (row.checked_add_signed(dy), col.checked_add_signed(dx)) else {
            continue;
        };
        if y < h && x < w && grid.cell(y, x) {
            count += 1;
        }
    }
    count
}

/// Applies the B3/S23 rule to a single cell.
///
/// An alive cell survives with 2 or 3 alive neighbors and dies otherwise;
/// a dead cell becomes alive with exactly 3.
#[inline]
pub fn next_cell_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2 | 3) | (false, 3))
}

/// Computes the next generation of the whole board.
///
/// All cells are updated simultaneously: every neighbor count is taken from
/// `grid` as it was passed in, and the result is written to a freshly
/// allocated grid of the same dimensions. `grid` is left untouched.
///
/// # Errors
///
/// Returns [`GridError::InvalidGrid`] for a degenerate grid.
pub fn next_generation(grid: &Grid) -> Result<Grid, GridError> {
    grid.validate()?;
    let (h, w) = grid.dimensions();
    let mut cells = Vec::with_capacity(h * w);
    for y in 0..h {
        for x in 0..w {
            let neighbors = count_unchecked(grid, y, x);
            cells.push(next_cell_state(grid.cell(y, x), neighbors));
        }
    }
    Grid::from_cells(h, w, cells)
}

/// Creates a random `height x width` board where every cell is alive
/// independently with probability `alive_probability`.
///
/// Randomness is drawn from `rng`, so a seeded generator makes the result
/// reproducible.
///
/// # Errors
///
/// * [`GridError::InvalidGrid`] if either dimension is zero
/// * [`GridError::InvalidProbability`] if `alive_probability` is not within `[0, 1]`
pub fn random_grid<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    alive_probability: f64,
    rng: &mut R,
) -> Result<Grid, GridError> {
    if !(0.0..=1.0).contains(&alive_probability) {
        return Err(GridError::InvalidProbability(alive_probability));
    }
    // validates the shape before any entropy is consumed
    let blank = Grid::blank(height, width)?;
    let (h, w) = blank.dimensions();
    let cells = (0..h * w)
        .map(|_| rng.random_bool(alive_probability))
        .collect();
    Grid::from_cells(h, w, cells)
}

/// Same as [`random_grid`] with a private ChaCha8 generator.
///
/// # Arguments
///
/// * `seed` - Seed for the random number generator. If `None`, seeds from the OS.
pub fn random_grid_seeded(
    height: usize,
    width: usize,
    alive_probability: f64,
    seed: Option<u64>,
) -> Result<Grid, GridError> {
    let mut rng = if let Some(x) = seed {
        rand_chacha::ChaCha8Rng::seed_from_u64(x)
    } else {
        rand_chacha::ChaCha8Rng::from_os_rng()
    };
    random_grid(height, width, alive_probability, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    const SEED: u64 = 42;

    fn grid_of(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.bytes().map(|b| b == b'O').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_next_cell_state_table() {
        for neighbors in 0..=8 {
            assert_eq!(next_cell_state(true, neighbors), neighbors == 2 || neighbors == 3);
            assert_eq!(next_cell_state(false, neighbors), neighbors == 3);
        }
    }

    #[test]
    fn test_count_interior() {
        let grid = grid_of(&["OOO", "O.O", "OOO"]);
        assert_eq!(count_alive_neighbors(&grid, Position::new(1, 1)).unwrap(), 8);
        assert_eq!(count_alive_neighbors(&grid, Position::new(0, 0)).unwrap(), 2);
    }

    #[test]
    fn test_count_corners_are_clipped() {
        let grid = Grid::from_cells(4, 5, vec![true; 20]).unwrap();
        for (row, col) in [(0, 0), (0, 4), (3, 0), (3, 4)] {
            assert_eq!(count_alive_neighbors(&grid, Position::new(row, col)).unwrap(), 3);
        }
        assert_eq!(count_alive_neighbors(&grid, Position::new(0, 2)).unwrap(), 5);
        assert_eq!(count_alive_neighbors(&grid, Position::new(2, 0)).unwrap(), 5);
        assert_eq!(count_alive_neighbors(&grid, Position::new(1, 1)).unwrap(), 8);
    }

    #[test]
    fn test_count_ignores_self() {
        let grid = grid_of(&["O"]);
        assert_eq!(count_alive_neighbors(&grid, Position::new(0, 0)).unwrap(), 0);
    }

    #[test]
    fn test_count_out_of_bounds() {
        let grid = Grid::blank(3, 3).unwrap();
        assert_eq!(
            count_alive_neighbors(&grid, Position::new(3, 0)),
            Err(GridError::OutOfBounds {
                position: Position::new(3, 0),
                height: 3,
                width: 3
            })
        );
        assert!(count_alive_neighbors(&grid, Position::new(0, 7)).is_err());
    }

    #[test]
    fn test_count_bounds_on_random_grid() {
        let grid = random_grid_seeded(17, 23, 0.6, Some(SEED)).unwrap();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let n = count_alive_neighbors(&grid, Position::new(row, col)).unwrap();
                assert!(n <= 8);
            }
        }
    }

    #[test]
    fn test_dead_board_stays_dead() {
        let grid = Grid::blank(3, 3).unwrap();
        assert_eq!(next_generation(&grid).unwrap(), grid);
    }

    #[test]
    fn test_birth_from_top_row() {
        let grid = grid_of(&["OOO", "...", "..."]);
        assert_eq!(count_alive_neighbors(&grid, Position::new(1, 1)).unwrap(), 3);
        let next = next_generation(&grid).unwrap();
        assert!(next.get(Position::new(1, 1)).unwrap());
        // the ends of the row have a single neighbor each
        assert_eq!(next, grid_of(&[".O.", ".O.", "..."]));
    }

    #[test]
    fn test_survival_and_death() {
        // center has 2 alive neighbors
        let grid = grid_of(&["O..", ".O.", "..O"]);
        let next = next_generation(&grid).unwrap();
        assert!(next.get(Position::new(1, 1)).unwrap());

        // dead center with 2 alive neighbors stays dead
        let grid = grid_of(&["O..", "...", "..O"]);
        let next = next_generation(&grid).unwrap();
        assert!(!next.get(Position::new(1, 1)).unwrap());

        // alive center with 4 alive neighbors dies
        let grid = grid_of(&["O.O", ".O.", "O.O"]);
        let next = next_generation(&grid).unwrap();
        assert!(!next.get(Position::new(1, 1)).unwrap());
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_of(&[".....", ".....", ".OOO.", ".....", "....."]);
        let vertical = grid_of(&[".....", "..O..", "..O..", "..O..", "....."]);
        let next = next_generation(&horizontal).unwrap();
        assert_eq!(next, vertical);
        assert_eq!(next_generation(&next).unwrap(), horizontal);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let grid = random_grid_seeded(32, 20, DEFAULT_ALIVE_PROBABILITY, Some(SEED)).unwrap();
        let before = grid.clone();
        let first = next_generation(&grid).unwrap();
        assert_eq!(grid, before);
        assert_eq!(first.dimensions(), grid.dimensions());
        // pure function of the input
        assert_eq!(next_generation(&grid).unwrap(), first);
    }

    #[test]
    fn test_random_grid_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);
        for (h, w) in [(1, 1), (1, 9), (7, 1), (40, 40)] {
            let grid = random_grid(h, w, DEFAULT_ALIVE_PROBABILITY, &mut rng).unwrap();
            assert_eq!(grid.dimensions(), (h, w));
            assert_eq!(grid.rows().len(), h);
            assert!(grid.rows().all(|row| row.len() == w));
        }
    }

    #[test]
    fn test_random_grid_probability_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);
        let dead = random_grid(10, 12, 0.0, &mut rng).unwrap();
        assert_eq!(dead.population(), 0);
        let alive = random_grid(10, 12, 1.0, &mut rng).unwrap();
        assert_eq!(alive.population(), 120);
    }

    #[test]
    fn test_random_grid_fill_rate() {
        let grid = random_grid_seeded(100, 100, DEFAULT_ALIVE_PROBABILITY, Some(SEED)).unwrap();
        let population = grid.population();
        assert!((4_000..=6_000).contains(&population), "population {}", population);
    }

    #[test]
    fn test_random_grid_is_reproducible() {
        let a = random_grid_seeded(16, 16, 0.3, Some(SEED)).unwrap();
        let b = random_grid_seeded(16, 16, 0.3, Some(SEED)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_grid_errors() {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);
        assert!(matches!(
            random_grid(0, 5, 0.5, &mut rng),
            Err(GridError::InvalidGrid { .. })
        ));
        assert!(matches!(
            random_grid(5, 0, 0.5, &mut rng),
            Err(GridError::InvalidGrid { .. })
        ));
        assert_eq!(
            random_grid(5, 5, 1.5, &mut rng),
            Err(GridError::InvalidProbability(1.5))
        );
        assert_eq!(
            random_grid(5, 5, -0.1, &mut rng),
            Err(GridError::InvalidProbability(-0.1))
        );
        assert!(matches!(
            random_grid(5, 5, f64::NAN, &mut rng),
            Err(GridError::InvalidProbability(_))
        ));
    }
}
