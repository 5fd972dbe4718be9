use super::*;

/// Numbered-coverage generator: a Hamiltonian path with waypoints spread along it and obstacles
/// kept off it.
#[derive(Clone, Debug, PartialEq)]
pub struct CoveragePuzzleGenerator {
    seed: Seed,
}

impl CoveragePuzzleGenerator {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }
}

impl PuzzleGenerator for CoveragePuzzleGenerator {
    type Config = CoverageConfig;

    fn generate(self, config: &CoverageConfig) -> Result<GeneratedPuzzle> {
        config.validate()?;

        let solution = build_hamiltonian_path(config.grid_size, self.seed);
        let waypoints = place_waypoints(&solution, config.waypoint_count, self.seed)?;
        let mut cells = layout_with_waypoints(config.grid_size, &waypoints);
        let obstacles = place_obstacles(&mut cells, &solution, config.obstacle_count, self.seed);

        log::debug!(
            "Generated {0}x{0} coverage puzzle with seed {1}: {2} waypoints, {obstacles} obstacles",
            config.grid_size,
            self.seed,
            waypoints.len(),
        );

        Ok(GeneratedPuzzle {
            layout: PuzzleLayout::from_cells(cells, waypoints),
            solution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: CoverageConfig, seed: Seed) -> GeneratedPuzzle {
        CoveragePuzzleGenerator::new(seed).generate(&config).unwrap()
    }

    #[test]
    fn generated_layout_matches_config() {
        let puzzle = generate(CoverageConfig::medium(), 2024);

        assert_eq!(puzzle.layout.size(), 6);
        assert_eq!(puzzle.layout.waypoint_count(), 5);
        assert!(is_hamiltonian(&puzzle.solution, 6));
        assert_eq!(puzzle.layout.start(), puzzle.solution[0]);
        assert_eq!(puzzle.layout.goal(), puzzle.solution[35]);
    }

    #[test]
    fn waypoints_are_numbered_along_the_solution() {
        for seed in 0..20 {
            let puzzle = generate(CoverageConfig::new(5, 6, 0).unwrap(), seed);
            let numbers: Vec<_> = puzzle.layout.waypoints().iter().map(|w| w.number).collect();
            assert_eq!(numbers, (1..=6).collect::<Vec<_>>());

            let positions: Vec<_> = puzzle
                .layout
                .waypoints()
                .iter()
                .map(|w| puzzle.solution.iter().position(|&c| c == w.coords).unwrap())
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

            for waypoint in puzzle.layout.waypoints() {
                assert_eq!(
                    puzzle.layout.kind_at(waypoint.coords),
                    CellKind::Waypoint(waypoint.number)
                );
            }
        }
    }

    #[test]
    fn obstacles_never_touch_the_solution() {
        for seed in 0..20 {
            let puzzle = generate(CoverageConfig::expert(), seed);
            for &coords in &puzzle.solution {
                assert!(!puzzle.layout.is_obstacle(coords));
            }
        }
    }

    #[test]
    fn full_cover_leaves_no_room_for_obstacles() {
        let puzzle = generate(CoverageConfig::expert(), 5);
        assert_eq!(puzzle.layout.obstacle_count(), 0);
        assert_eq!(puzzle.layout.playable_cell_count(), 36);
    }

    #[test]
    fn same_inputs_give_identical_layouts() {
        let a = generate(CoverageConfig::hard(), 99);
        let b = generate(CoverageConfig::hard(), 99);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.layout).unwrap(),
            serde_json::to_string(&b.layout).unwrap()
        );
    }

    #[test]
    fn malformed_config_is_reported() {
        let config = CoverageConfig {
            grid_size: 3,
            waypoint_count: 12,
            obstacle_count: 0,
        };
        assert_eq!(
            CoveragePuzzleGenerator::new(1).generate(&config),
            Err(GameError::TooManyWaypoints {
                requested: 12,
                capacity: 9
            })
        );
    }
}
