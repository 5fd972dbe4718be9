use core::iter;

use super::*;
use crate::rng;

/// Builds a monotone staircase route from `start` to `goal`.
///
/// The row and column steps needed to reach the goal are shuffled with `seed`, so the route is
/// always simple and orthogonally connected, and takes the Manhattan distance in steps.
pub fn build_route(start: Coord2, goal: Coord2, seed: Seed) -> Vec<Coord2> {
    let vertical = if goal.0 >= start.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    let horizontal = if goal.1 >= start.1 {
        Direction::Right
    } else {
        Direction::Left
    };

    let rows = usize::from(start.0.abs_diff(goal.0));
    let cols = usize::from(start.1.abs_diff(goal.1));
    let mut steps: Vec<Direction> = iter::repeat_n(vertical, rows)
        .chain(iter::repeat_n(horizontal, cols))
        .collect();
    rng::shuffle(&mut steps, seed);

    let mut route = Vec::with_capacity(steps.len() + 1);
    let mut current = start;
    route.push(current);
    for direction in steps {
        // moving toward the goal never leaves the grid spanned by start and goal
        if let Some(next) = direction.step(current, Coord::MAX) {
            current = next;
            route.push(current);
        }
    }
    route
}
