use super::*;
use crate::rng;

/// Hazard-avoidance generator: start in the top-left quadrant, goal in the bottom-right one,
/// hazards scattered off a guaranteed route between them.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardPuzzleGenerator {
    seed: Seed,
}

impl HazardPuzzleGenerator {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    fn draw(&self, min: Coord, max: Coord, k: u64) -> Coord {
        rng::next_int(i64::from(min), i64::from(max), rng::offset(self.seed, k)) as Coord
    }
}

impl PuzzleGenerator for HazardPuzzleGenerator {
    type Config = HazardConfig;

    fn generate(self, config: &HazardConfig) -> Result<GeneratedPuzzle> {
        config.validate()?;

        let size = config.grid_size;
        // the two quadrant ranges never share a row or column index
        let near_half = (size - 1) / 2;
        let far_half = size.div_ceil(2);
        let start = (self.draw(0, near_half, 0), self.draw(0, near_half, 1));
        let goal = (
            self.draw(far_half, size - 1, 2),
            self.draw(far_half, size - 1, 3),
        );

        let solution = build_route(start, goal, rng::offset(self.seed, 4));
        let waypoints = vec![
            Waypoint {
                number: 1,
                coords: start,
            },
            Waypoint {
                number: 2,
                coords: goal,
            },
        ];
        let mut cells = layout_with_waypoints(size, &waypoints);
        let hazards = place_obstacles(&mut cells, &solution, config.hazard_count, self.seed);

        log::debug!(
            "Generated {size}x{size} hazard puzzle with seed {}: start {start:?}, goal {goal:?}, {hazards} hazards",
            self.seed
        );

        Ok(GeneratedPuzzle {
            layout: PuzzleLayout::from_cells(cells, waypoints),
            solution,
        })
    }
}
