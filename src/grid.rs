use crate::GridError;
use std::fmt;

/// Zero-based `(row, col)` address of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Largest number of cells a [`Grid`] may hold (1 GiB of cell storage).
pub const MAX_CELLS: usize = 1 << 30;

/// A finite, rectangular board of boolean cells (`true` is alive).
///
/// Cells are stored row-major in a single buffer. Both dimensions are at
/// least 1 and never change after construction; the only way to obtain a
/// grid of a different shape is to build a new one.
///
/// # Example
///
/// ```rust
/// use gol_board::{next_generation, Grid, Position};
///
/// // A horizontal blinker
/// let grid = Grid::from_rows(vec![
///     vec![false, false, false],
///     vec![true, true, true],
///     vec![false, false, false],
/// ])
/// .unwrap();
///
/// let next = next_generation(&grid).unwrap();
/// assert!(next.get(Position::new(0, 1)).unwrap());
/// assert!(!next.get(Position::new(1, 0)).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid filled with dead cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidGrid`] if either dimension is zero or the
    /// grid would have more than [`MAX_CELLS`] cells.
    pub fn blank(height: usize, width: usize) -> Result<Self, GridError> {
        Self::check_dimensions(height, width)?;
        Ok(Self {
            height,
            width,
            cells: vec![false; height * width],
        })
    }

    /// Creates a grid from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidGrid`] if there are no rows, the rows are
    /// empty or their lengths differ.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Self::check_dimensions(height, width)?;
        if let Some(i) = rows.iter().position(|row| row.len() != width) {
            return Err(GridError::invalid_grid(format!(
                "row {} has {} cells, expected {}",
                i,
                rows[i].len(),
                width
            )));
        }
        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates a grid from a row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidGrid`] if either dimension is zero or
    /// `cells.len() != height * width`.
    pub fn from_cells(height: usize, width: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        Self::check_dimensions(height, width)?;
        if cells.len() != height * width {
            return Err(GridError::invalid_grid(format!(
                "{} cells don't fill a {}x{} grid",
                cells.len(),
                height,
                width
            )));
        }
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Creates a blank grid and marks the given `(row, col)` positions alive.
    ///
    /// # Errors
    ///
    /// Fails on zero dimensions or if any position is out of bounds.
    pub fn with_alive<I>(height: usize, width: usize, alive: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::blank(height, width)?;
        for pos in alive {
            grid.set(pos.into(), true)?;
        }
        Ok(grid)
    }

    fn check_dimensions(height: usize, width: usize) -> Result<(), GridError> {
        if height == 0 {
            return Err(GridError::invalid_grid("grid has no rows"));
        }
        if width == 0 {
            return Err(GridError::invalid_grid("grid has no columns"));
        }
        if !matches!(height.checked_mul(width), Some(cells) if cells <= MAX_CELLS) {
            return Err(GridError::invalid_grid(format!(
                "{}x{} grid exceeds {} cells",
                height, width, MAX_CELLS
            )));
        }
        Ok(())
    }

    /// Re-validates the shape invariant. Every constructor enforces it, so
    /// this only fails if a grid was corrupted from inside the crate.
    pub(crate) fn validate(&self) -> Result<(), GridError> {
        Self::check_dimensions(self.height, self.width)?;
        if self.cells.len() != self.height * self.width {
            return Err(GridError::invalid_grid("cell buffer doesn't match dimensions"));
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index_of(&self, pos: Position) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                position: pos,
                height: self.height,
                width: self.width,
            });
        }
        Ok(pos.row * self.width + pos.col)
    }

    /// Returns the state of the cell at `pos`.
    pub fn get(&self, pos: Position) -> Result<bool, GridError> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    /// Unchecked access for callers that have already bounds-checked.
    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    /// Sets the state of the cell at `pos`.
    ///
    /// Used to build boards by hand; the engine itself never mutates a grid.
    pub fn set(&mut self, pos: Position, alive: bool) -> Result<(), GridError> {
        let i = self.index_of(pos)?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Iterates over the positions of alive cells in row-major order.
    pub fn alive_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| Position::new(i / width, i % width))
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Computes a 64-bit fingerprint of the board. Intended for fast
    /// probabilistic comparison; equal grids always have equal fingerprints.
    ///
    /// Cells are packed into 64-bit words which are then mixed together
    /// along with the dimensions.
    pub fn hash(&self) -> u64 {
        let combine = |x: u64, y: u64| -> u64 {
            x ^ y
                .wrapping_add(0x9e3779b9)
                .wrapping_add(x << 6)
                .wrapping_add(x >> 2)
        };

        let mut result = combine(self.height as u64, self.width as u64);
        for chunk in self.cells.chunks(64) {
            let word = chunk
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, &alive)| acc | ((alive as u64) << i));
            result = combine(result, word);
        }
        result
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.height, self.width)?;
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "O" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
