/// Address of one cell: `x` is the column, `y` is the row.
/// Only ever used as a request value; it does not own anything.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Coordinates {
    pub x: usize,
    pub y: usize,
}

impl Coordinates {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbor at a signed offset, or None when it would fall below zero.
    /// Upper bounds are checked by the grid.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for Coordinates {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_below_zero_is_none() {
        let origin = Coordinates::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Coordinates::new(1, 1)));
    }
}
