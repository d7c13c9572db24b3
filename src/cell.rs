use std::collections::{HashMap, HashSet};

/// Coordinates of a live cell. Any `i64` pair is a valid position.
///
/// The derived ordering is by `x`, then by `y`; every sorted structure in the
/// crate relies on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

/// Set of live cells.
pub type CellSet = HashSet<Cell, ahash::RandomState>;

/// Number of live neighbours per coordinate.
pub type CellCountMap = HashMap<Cell, u8, ahash::RandomState>;

impl Cell {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// A cell on the edge of the `i64` range has neighbours that cannot be
    /// represented. Such cells never contribute to neighbour counts.
    #[inline]
    pub const fn would_overflow(&self) -> bool {
        self.x == i64::MIN || self.x == i64::MAX || self.y == i64::MIN || self.y == i64::MAX
    }

    /// The 8 surrounding coordinates, row by row.
    ///
    /// Caller must ensure `!self.would_overflow()`.
    #[inline]
    pub const fn neighbors(&self) -> [Cell; 8] {
        let (x, y) = (self.x, self.y);
        [
            Cell::new(x - 1, y - 1),
            Cell::new(x, y - 1),
            Cell::new(x + 1, y - 1),
            Cell::new(x - 1, y),
            Cell::new(x + 1, y),
            Cell::new(x - 1, y + 1),
            Cell::new(x, y + 1),
            Cell::new(x + 1, y + 1),
        ]
    }

    /// Neighbours that exist in the `i64` plane; usable on edge cells too.
    pub fn checked_neighbors(&self) -> impl Iterator<Item = Cell> + '_ {
        (-1i64..=1)
            .flat_map(|dy| (-1i64..=1).map(move |dx| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .filter_map(|(dx, dy)| {
                Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
            })
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// B3/S23 for a cell whose neighbourhood is fully representable.
#[inline]
pub const fn life_rule(neighbors: u32, alive: bool) -> bool {
    neighbors == 3 || (neighbors == 2 && alive)
}

/// B3/S23 with the edge restriction: nothing is born on the edge of the
/// `i64` range, live edge cells survive as usual.
#[inline]
pub const fn next_state(cell: Cell, neighbors: u32, alive: bool) -> bool {
    life_rule(neighbors, alive) && (alive || !cell.would_overflow())
}

/// Builds a [`CellSet`] out of coordinate pairs.
pub fn cell_set<I, C>(cells: I) -> CellSet
where
    I: IntoIterator<Item = C>,
    C: Into<Cell>,
{
    cells.into_iter().map(Into::into).collect()
}
