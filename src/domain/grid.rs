use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::{Cell, Coordinates};
use crate::error::{LifeError, LifeResult};

/// Grid is the bounded 2D board of cells.
/// Dimensions are fixed at construction; cells beyond the edges are
/// treated as Dead rather than wrapping around.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn dead(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::Dead; columns * rows],
        }
    }

    /// Seed a grid where each cell is independently alive with `alive_probability`.
    /// The probability must lie in [0, 1].
    pub fn random<R: Rng>(
        columns: usize,
        rows: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Self {
        let cells = (0..columns * rows)
            .map(|_| {
                if rng.random_bool(alive_probability) {
                    Cell::Alive
                } else {
                    Cell::Dead
                }
            })
            .collect();

        Self { columns, rows, cells }
    }

    /// Build a grid from rows of cells. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> LifeResult<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();

        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != columns)
        {
            return Err(LifeError::RaggedGrid {
                row,
                expected: columns,
                actual,
            });
        }

        Ok(Self {
            columns,
            rows: row_count,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Get grid dimensions as (columns, rows)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn contains(&self, at: Coordinates) -> bool {
        at.x < self.columns && at.y < self.rows
    }

    /// Convert 2D coordinates to 1D index (row-major)
    fn index(&self, at: Coordinates) -> Option<usize> {
        self.contains(at).then(|| at.y * self.columns + at.x)
    }

    /// Get cell at position, None outside the board
    pub fn get(&self, at: Coordinates) -> Option<Cell> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Set cell at position. Out-of-range writes are ignored.
    pub fn set(&mut self, at: Coordinates, cell: Cell) {
        if let Some(idx) = self.index(at) {
            self.cells[idx] = cell;
        }
    }

    /// Flip one cell. Returns false (and leaves the grid untouched) when
    /// the coordinates are outside the board.
    pub fn toggle(&mut self, at: Coordinates) -> bool {
        match self.index(at) {
            Some(idx) => {
                self.cells[idx] = self.cells[idx].toggle();
                true
            }
            None => false,
        }
    }

    /// Count live cells among the 8 surrounding positions.
    /// Positions outside the board contribute nothing.
    pub fn count_alive_neighbors(&self, at: Coordinates) -> u8 {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(|(dx, dy)| at.offset(dx, dy))
            .filter_map(|neighbor| self.get(neighbor))
            .filter(|cell| cell.is_alive())
            .count() as u8
    }

    /// Same dimensions, every cell dead
    pub fn cleared(&self) -> Self {
        Self::dead(self.columns, self.rows)
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions, row by row
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coordinates, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(idx, &cell)| {
            (Coordinates::new(idx % self.columns, idx / self.columns), cell)
        })
    }

    /// Iterate over rows as slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks() rejects a zero size; a zero-column grid has no rows to show
        self.cells.chunks(self.columns.max(1))
    }

    /// Build a grid of the same shape from a per-cell function
    pub(crate) fn map_cells<F>(&self, f: F) -> Self
    where
        F: Fn(Coordinates) -> Cell,
    {
        let cells = (0..self.rows)
            .flat_map(|y| (0..self.columns).map(move |x| Coordinates::new(x, y)))
            .map(f)
            .collect();

        Self {
            columns: self.columns,
            rows: self.rows,
            cells,
        }
    }

    pub(crate) fn from_cells(columns: usize, rows: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), columns * rows);
        Self { columns, rows, cells }
    }
}

/// Parses text like:
///
/// ```text
/// .#.
/// .#.
/// .#.
/// ```
///
/// `#`, `O` and `*` are alive; `.` and `_` are dead. Blank lines and
/// surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .map(|c| match c {
                        '#' | 'O' | '*' => Ok(Cell::Alive),
                        '.' | '_' => Ok(Cell::Dead),
                        found => Err(LifeError::InvalidGlyph { row, found }),
                    })
                    .collect::<LifeResult<Vec<_>>>()
            })
            .collect::<LifeResult<Vec<_>>>()?;

        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices().take(self.rows) {
            let line: String = row.iter().map(|cell| cell.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.columns, self.rows)?;
        fmt::Display::fmt(self, f)
    }
}
