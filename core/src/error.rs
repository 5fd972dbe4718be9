use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid size {0} is too small, at least {min} is required", min = crate::MIN_GRID_SIZE)]
    GridTooSmall(Coord),
    #[error("Grid size {0} is too large, at most {max} is supported", max = crate::MAX_GRID_SIZE)]
    GridTooLarge(Coord),
    #[error("At least 2 waypoints are required, got {0}")]
    TooFewWaypoints(CellCount),
    #[error("Too many waypoints, requested {requested} but the grid only fits {capacity}")]
    TooManyWaypoints {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("At least one life is required")]
    NoLives,
    #[error("Layout is inconsistent: {0}")]
    InvalidLayout(&'static str),
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
