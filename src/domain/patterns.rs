use super::{Cell, Coordinates, Grid};

/// A named arrangement of live cells that can be stamped onto a grid
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    cells: &'static [(usize, usize)], // Relative (x, y) of alive cells
}

impl Pattern {
    const fn new(name: &'static str, description: &'static str, cells: &'static [(usize, usize)]) -> Self {
        let mut width = 0;
        let mut height = 0;
        let mut i = 0;
        while i < cells.len() {
            let (x, y) = cells[i];
            if x + 1 > width {
                width = x + 1;
            }
            if y + 1 > height {
                height = y + 1;
            }
            i += 1;
        }
        Self { name, description, width, height, cells }
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = Coordinates> + '_ {
        self.cells.iter().map(|&offset| Coordinates::from(offset))
    }

    /// Stamp the pattern with its top-left corner at `origin`.
    /// Cells falling outside the grid are clipped.
    pub fn place_on(&self, grid: &mut Grid, origin: Coordinates) {
        for offset in self.alive_cells() {
            grid.set(
                Coordinates::new(origin.x + offset.x, origin.y + offset.y),
                Cell::Alive,
            );
        }
    }

    /// A dead grid of the given size with this pattern centered on it
    pub fn centered(&self, columns: usize, rows: usize) -> Grid {
        let mut grid = Grid::dead(columns, rows);
        let origin = Coordinates::new(
            columns.saturating_sub(self.width) / 2,
            rows.saturating_sub(self.height) / 2,
        );
        self.place_on(&mut grid, origin);
        grid
    }
}

/// Classic Game of Life patterns
pub mod presets {
    use super::Pattern;

    pub const GLIDER: Pattern = Pattern::new(
        "Glider",
        "Moves diagonally (period 4)",
        &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    );

    pub const BLINKER: Pattern = Pattern::new(
        "Blinker",
        "Oscillator (period 2)",
        &[(0, 1), (1, 1), (2, 1)],
    );

    pub const TOAD: Pattern = Pattern::new(
        "Toad",
        "Oscillator (period 2)",
        &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    );

    pub const BEACON: Pattern = Pattern::new(
        "Beacon",
        "Oscillator (period 2)",
        &[(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)],
    );

    pub const LWSS: Pattern = Pattern::new(
        "LWSS",
        "Lightweight spaceship (period 4)",
        &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    );

    pub const R_PENTOMINO: Pattern = Pattern::new(
        "R-pentomino",
        "Methuselah, settles after 1103 generations",
        &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    );

    pub const ACORN: Pattern = Pattern::new(
        "Acorn",
        "Methuselah, settles after 5206 generations",
        &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
    );

    pub const BLOCK: Pattern = Pattern::new(
        "Block",
        "Still life",
        &[(0, 0), (1, 0), (0, 1), (1, 1)],
    );

    pub const ALL: &[Pattern] = &[GLIDER, BLINKER, TOAD, BEACON, LWSS, R_PENTOMINO, ACORN, BLOCK];

    /// Look a preset up by name, ignoring case
    pub fn find(name: &str) -> Option<&'static Pattern> {
        ALL.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }
}
