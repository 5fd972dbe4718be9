use ndarray::Array2;

/// Single coordinate axis used for grid size and cell positions.
pub type Coord = u8;

/// Count type used for cell counts and waypoint numbers.
pub type CellCount = u16;

/// Two-dimensional cell coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Seed driving every generator draw.
pub type Seed = u64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether two cells share an edge.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}

/// Axis-aligned step between orthogonally adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Applies the step to `coords`, returning a value only when it remains inside a
    /// `size x size` grid.
    pub fn step(self, coords: Coord2, size: Coord) -> Option<Coord2> {
        let (dr, dc) = self.delta();
        let row = coords.0.checked_add_signed(dr)?;
        let col = coords.1.checked_add_signed(dc)?;
        (row < size && col < size).then_some((row, col))
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, _) = self.dim();
        NeighborIter::new(index, Coord::try_from(rows).unwrap_or(Coord::MAX))
    }
}

/// Iterates over the in-bounds orthogonal neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = direction.step(self.center, self.size) {
                return Some(next_item);
            }
        }
    }
}

/// Iterates every cell of a `size x size` grid in row-major order.
pub fn iter_cells(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}
