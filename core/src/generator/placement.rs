use log::debug;

use super::*;
use crate::rng;

/// Seed offset of the obstacle shuffle, kept clear of the per-waypoint jitter draws.
const OBSTACLE_SEED_OFFSET: u64 = 1000;

/// Picks `count` strictly increasing indices into a path of length `len`.
///
/// The first index is always 0 and the last `len - 1`. Intermediate ones sit near
/// `i * len / count` with a seeded jitter of one step either way; a jitter that would collide
/// with a neighbour is clamped to the next free increasing index.
pub fn waypoint_indices(len: usize, count: CellCount, seed: Seed) -> Result<Vec<usize>> {
    let count_usize = usize::from(count);
    if count < 2 {
        return Err(GameError::TooFewWaypoints(count));
    }
    if count_usize > len {
        return Err(GameError::TooManyWaypoints {
            requested: count,
            capacity: len.try_into().unwrap_or(CellCount::MAX),
        });
    }

    let mut indices = Vec::with_capacity(count_usize);
    indices.push(0);

    for i in 1..count_usize - 1 {
        let base = (i * len / count_usize) as i64;
        let jitter = rng::next_int(-1, 1, rng::offset(seed, i as u64));
        let lowest = indices[i - 1] + 1;
        let highest = len - count_usize + i;
        let index = (base + jitter).clamp(lowest as i64, highest as i64) as usize;
        indices.push(index);
    }

    indices.push(len - 1);
    Ok(indices)
}

/// Places `count` waypoints along `path`, numbered from 1.
pub fn place_waypoints(path: &[Coord2], count: CellCount, seed: Seed) -> Result<Vec<Waypoint>> {
    let indices = waypoint_indices(path.len(), count, seed)?;
    Ok(indices
        .into_iter()
        .zip(1..)
        .map(|(index, number)| Waypoint {
            number,
            coords: path[index],
        })
        .collect())
}

/// Marks up to `count` empty cells that are not on `protected` as obstacles.
///
/// Returns how many were placed, which is less than requested when too few cells are eligible.
pub fn place_obstacles(
    cells: &mut Array2<CellKind>,
    protected: &[Coord2],
    count: CellCount,
    seed: Seed,
) -> CellCount {
    let mut on_path: Array2<bool> = Array2::default(cells.dim());
    for &coords in protected {
        on_path[coords.to_nd_index()] = true;
    }

    let (rows, _) = cells.dim();
    let size = Coord::try_from(rows).unwrap_or(Coord::MAX);
    let mut eligible: Vec<Coord2> = iter_cells(size)
        .filter(|&coords| {
            !on_path[coords.to_nd_index()] && cells[coords.to_nd_index()] == CellKind::Empty
        })
        .collect();
    rng::shuffle(&mut eligible, rng::offset(seed, OBSTACLE_SEED_OFFSET));

    let placed = eligible.len().min(usize::from(count));
    for &coords in &eligible[..placed] {
        cells[coords.to_nd_index()] = CellKind::Obstacle;
    }

    let placed = placed as CellCount;
    if placed < count {
        debug!("Placed {placed} obstacles out of {count} requested");
    }
    placed
}
