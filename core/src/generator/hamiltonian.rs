use log::debug;

use super::*;
use crate::rng;

/// Randomized searches tried before falling back to the snake path.
pub const MAX_ATTEMPTS: u64 = 10;

/// Cells pushed during one randomized search before it is abandoned.
pub const MAX_STEPS_PER_ATTEMPT: usize = 50_000;

/// Search frame: a cell on the path and the directions still to try from it.
#[derive(Debug)]
struct Frame {
    coords: Coord2,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new(coords: Coord2, seed: Seed) -> Self {
        let mut directions = Direction::ALL;
        rng::shuffle(&mut directions, seed);
        Self {
            coords,
            directions,
            next: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.next).copied();
        self.next += 1;
        direction
    }
}

/// Builds a path visiting every cell of a `size x size` grid exactly once.
///
/// Tries up to [`MAX_ATTEMPTS`] randomized depth-first searches, perturbing the seed by the
/// attempt index, and falls back to [`snake_path`] when none completes. Both results are valid
/// full covers.
pub fn build_hamiltonian_path(size: Coord, seed: Seed) -> Vec<Coord2> {
    for attempt in 0..MAX_ATTEMPTS {
        if let Some(path) = search_path(size, rng::offset(seed, attempt)) {
            debug!("Hamiltonian path found on attempt {attempt} for seed {seed}");
            return path;
        }
    }

    debug!(
        "No Hamiltonian path found for {size}x{size} grid with seed {seed} after {MAX_ATTEMPTS} attempts, using snake path"
    );
    snake_path(size)
}

/// One randomized depth-first search using an explicit stack.
fn search_path(size: Coord, seed: Seed) -> Option<Vec<Coord2>> {
    let total = usize::from(size) * usize::from(size);
    let max_coord = i64::from(size) - 1;
    let start = (
        rng::next_int(0, max_coord, seed) as Coord,
        rng::next_int(0, max_coord, rng::offset(seed, 1)) as Coord,
    );

    let mut on_path: Array2<bool> = Array2::default((size, size).to_nd_index());
    let mut path = Vec::with_capacity(total);
    let mut stack = Vec::with_capacity(total);

    path.push(start);
    on_path[start.to_nd_index()] = true;
    stack.push(Frame::new(start, rng::offset(seed, 1)));

    let mut steps = 0;
    while let Some(frame) = stack.last_mut() {
        if path.len() == total {
            return Some(path);
        }

        let Some(direction) = frame.next_direction() else {
            // dead end
            stack.pop();
            if let Some(coords) = path.pop() {
                on_path[coords.to_nd_index()] = false;
            }
            continue;
        };

        let Some(next) = direction.step(frame.coords, size) else {
            continue;
        };
        if on_path[next.to_nd_index()] {
            continue;
        }

        steps += 1;
        if steps > MAX_STEPS_PER_ATTEMPT {
            return None;
        }

        path.push(next);
        on_path[next.to_nd_index()] = true;
        stack.push(Frame::new(next, rng::offset(seed, path.len() as u64)));
    }

    None
}

/// Boustrophedon cover: row 0 left to right, row 1 right to left, and so on.
pub fn snake_path(size: Coord) -> Vec<Coord2> {
    (0..size)
        .flat_map(|row| {
            let cols: Box<dyn Iterator<Item = Coord>> = if row % 2 == 0 {
                Box::new(0..size)
            } else {
                Box::new((0..size).rev())
            };
            cols.map(move |col| (row, col))
        })
        .collect()
}

/// Whether `path` covers each cell of a `size x size` grid exactly once with orthogonal steps.
pub fn is_hamiltonian(path: &[Coord2], size: Coord) -> bool {
    let total = usize::from(size) * usize::from(size);
    if path.len() != total {
        return false;
    }

    let mut seen: Array2<bool> = Array2::default((size, size).to_nd_index());
    for &coords in path {
        if coords.0 >= size || coords.1 >= size {
            return false;
        }
        let cell = &mut seen[coords.to_nd_index()];
        if *cell {
            return false;
        }
        *cell = true;
    }

    path.windows(2).all(|pair| is_adjacent(pair[0], pair[1]))
}
