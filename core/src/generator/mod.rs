use crate::*;
pub use coverage::*;
pub use hamiltonian::*;
pub use hazard::*;
pub use placement::*;
pub use route::*;

mod coverage;
mod hamiltonian;
mod hazard;
mod placement;
mod route;

pub trait PuzzleGenerator {
    type Config;

    fn generate(self, config: &Self::Config) -> Result<GeneratedPuzzle>;
}

/// Generator output: the layout handed to the engine, plus the path it was derived from.
///
/// The engine never sees `solution`; it is kept so callers can check generation invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub layout: PuzzleLayout,
    pub solution: Vec<Coord2>,
}

/// Fresh `size x size` grid holding only `waypoints`.
fn layout_with_waypoints(size: Coord, waypoints: &[Waypoint]) -> Array2<CellKind> {
    let mut cells: Array2<CellKind> = Array2::default((size, size).to_nd_index());
    for waypoint in waypoints {
        cells[waypoint.coords.to_nd_index()] = CellKind::Waypoint(waypoint.number);
    }
    cells
}
