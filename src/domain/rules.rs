//! Conway's rules applied to a grid.
//!
//! Every function here is pure: a generation is always computed from an
//! immutable snapshot of the previous one, so the per-cell evaluation order
//! can never leak into the result.

use rayon::prelude::*;

use super::{Cell, Coordinates, Grid};

/// Grids with at least this many cells are advanced on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 128 * 128;

/// Next state of one cell given the current grid.
/// Coordinates outside the board evaluate as Dead.
pub fn next_cell_state(grid: &Grid, at: Coordinates) -> Cell {
    grid.get(at)
        .map_or(Cell::Dead, |current| current.evolve(grid.count_alive_neighbors(at)))
}

/// Pure functional evolution - returns new grid (serial)
pub fn next_generation(grid: &Grid) -> Grid {
    grid.map_cells(|at| next_cell_state(grid, at))
}

/// Parallel evolution using rayon, one task per row.
/// Produces exactly the same grid as [`next_generation`].
pub fn next_generation_parallel(grid: &Grid) -> Grid {
    let (columns, rows) = grid.dimensions();
    let cells: Vec<Cell> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|y| (0..columns).map(move |x| next_cell_state(grid, Coordinates::new(x, y))))
        .collect();

    Grid::from_cells(columns, rows, cells)
}

/// Advance one generation, picking the strategy by board size
pub fn advance(grid: &Grid) -> Grid {
    let (columns, rows) = grid.dimensions();
    if columns * rows >= PARALLEL_THRESHOLD {
        next_generation_parallel(grid)
    } else {
        next_generation(grid)
    }
}
