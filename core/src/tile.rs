use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Fixed content of a cell, decided at generation time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Waypoint(CellCount),
    Obstacle,
}

impl CellKind {
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Obstacle)
    }

    pub const fn waypoint_number(self) -> Option<CellCount> {
        match self {
            Self::Waypoint(number) => Some(number),
            _ => None,
        }
    }
}

/// Player-visible state of a cell as reported by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub kind: CellKind,
    pub visited: bool,
}
