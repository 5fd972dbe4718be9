use core::ops::Index;
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

pub mod rng;

mod config;
mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod types;

/// Smallest supported grid edge.
pub const MIN_GRID_SIZE: Coord = 2;

/// Largest supported grid edge; keeps cell counts inside [`CellCount`].
pub const MAX_GRID_SIZE: Coord = 64;

/// Numbered cell that must be entered in increasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub number: CellCount,
    pub coords: Coord2,
}

/// Immutable square grid of cell kinds plus the ordered waypoints placed on it.
///
/// Deserialization goes through [`LayoutRecord`] and is checked like
/// [`PuzzleLayout::from_parts`]; a serialized `obstacle_count` is ignored and recounted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutRecord")]
pub struct PuzzleLayout {
    cells: Array2<CellKind>,
    waypoints: Vec<Waypoint>,
    obstacle_count: CellCount,
}

/// Serialized form of a [`PuzzleLayout`] before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct LayoutRecord {
    pub cells: Array2<CellKind>,
    pub waypoints: Vec<Waypoint>,
}

impl TryFrom<LayoutRecord> for PuzzleLayout {
    type Error = GameError;

    fn try_from(record: LayoutRecord) -> Result<Self> {
        let LayoutRecord { cells, waypoints } = record;
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(GameError::InvalidLayout("grid is not square"));
        }
        let size = Coord::try_from(rows).map_err(|_| GameError::GridTooLarge(Coord::MAX))?;
        validate_grid_size(size)?;
        if waypoints.is_empty() {
            return Err(GameError::InvalidLayout("at least one waypoint is required"));
        }

        for (waypoint, number) in waypoints.iter().zip(1..) {
            if waypoint.number != number {
                return Err(GameError::InvalidLayout("waypoints are not numbered 1 to K"));
            }
            if waypoint.coords.0 >= size || waypoint.coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            if cells[waypoint.coords.to_nd_index()] != CellKind::Waypoint(number) {
                return Err(GameError::InvalidLayout("waypoint list disagrees with the grid"));
            }
        }
        let marked = cells
            .iter()
            .filter(|kind| kind.waypoint_number().is_some())
            .count();
        if marked != waypoints.len() {
            return Err(GameError::InvalidLayout("waypoint list disagrees with the grid"));
        }

        Ok(Self::from_cells(cells, waypoints))
    }
}

impl PuzzleLayout {
    /// Builds a layout from explicit positions. Waypoints are numbered in the order given,
    /// starting at 1.
    pub fn from_parts(size: Coord, waypoints: &[Coord2], obstacles: &[Coord2]) -> Result<Self> {
        validate_grid_size(size)?;
        if waypoints.is_empty() {
            return Err(GameError::InvalidLayout("at least one waypoint is required"));
        }

        let mut cells: Array2<CellKind> = Array2::default((size, size).to_nd_index());
        let mut placed = Vec::with_capacity(waypoints.len());

        for (i, &coords) in waypoints.iter().enumerate() {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut cells[coords.to_nd_index()];
            if *cell != CellKind::Empty {
                return Err(GameError::InvalidLayout("two waypoints share a cell"));
            }
            let number = CellCount::try_from(i + 1)
                .map_err(|_| GameError::InvalidLayout("too many waypoints"))?;
            *cell = CellKind::Waypoint(number);
            placed.push(Waypoint { number, coords });
        }

        for &coords in obstacles {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            let cell = &mut cells[coords.to_nd_index()];
            if cell.waypoint_number().is_some() {
                return Err(GameError::InvalidLayout("obstacle placed on a waypoint"));
            }
            *cell = CellKind::Obstacle;
        }

        Ok(Self::from_cells(cells, placed))
    }

    /// Wraps an already consistent grid; `waypoints` must be sorted by number.
    pub(crate) fn from_cells(cells: Array2<CellKind>, waypoints: Vec<Waypoint>) -> Self {
        let obstacle_count = cells
            .iter()
            .filter(|kind| kind.is_obstacle())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            cells,
            waypoints,
            obstacle_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        let (rows, _) = self.cells.dim();
        Coord::try_from(rows).unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn kind_at(&self, coords: Coord2) -> CellKind {
        self[coords]
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint_count(&self) -> CellCount {
        self.waypoints.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn waypoint(&self, number: CellCount) -> Option<Waypoint> {
        let index = usize::from(number).checked_sub(1)?;
        self.waypoints.get(index).copied()
    }

    /// Cell holding waypoint 1.
    pub fn start(&self) -> Coord2 {
        self.waypoints[0].coords
    }

    /// Cell holding the last waypoint.
    pub fn goal(&self) -> Coord2 {
        self.waypoints[self.waypoints.len() - 1].coords
    }

    pub fn obstacle_count(&self) -> CellCount {
        self.obstacle_count
    }

    pub fn is_obstacle(&self, coords: Coord2) -> bool {
        self[coords].is_obstacle()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_cells(self.size()).filter(|&coords| self.is_obstacle(coords))
    }

    /// Cells a trace is allowed to cover.
    pub fn playable_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.obstacle_count)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for PuzzleLayout {
    type Output = CellKind;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

pub(crate) fn validate_grid_size(size: Coord) -> Result<()> {
    if size < MIN_GRID_SIZE {
        Err(GameError::GridTooSmall(size))
    } else if size > MAX_GRID_SIZE {
        Err(GameError::GridTooLarge(size))
    } else {
        Ok(())
    }
}

/// Summary handed out when a trace succeeds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    pub moves: u32,
    pub elapsed: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Extended(Coord2),
    Undone(Coord2),
    Succeeded(SolveStats),
    HitHazard(Coord2),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Extended(_) => true,
            Undone(_) => true,
            Succeeded(_) => true,
            HitHazard(_) => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::HitHazard(_))
    }
}
