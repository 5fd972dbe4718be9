use threadline_core::{
    CellKind, CoverageConfig, CoveragePuzzleGenerator, EngineState, HazardConfig,
    HazardPuzzleGenerator, HazardSession, MoveOutcome, PlayEngine, PuzzleGenerator, PuzzleLayout,
    SessionEvent, SessionPhase, Variant, build_hamiltonian_path, is_adjacent, is_hamiltonian,
};

const SNAKE_3X3: [(u8, u8); 9] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (1, 1),
    (1, 0),
    (2, 0),
    (2, 1),
    (2, 2),
];

fn snake_layout() -> PuzzleLayout {
    PuzzleLayout::from_parts(3, &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)], &[]).unwrap()
}

fn trace(engine: &mut PlayEngine, cells: &[(u8, u8)]) -> Vec<MoveOutcome> {
    cells.iter().map(|&c| engine.attempt_move(c)).collect()
}

#[test]
fn full_snake_completes_coverage() {
    let mut engine = PlayEngine::new(snake_layout(), Variant::FullCoverage);
    let outcomes = trace(&mut engine, &SNAKE_3X3);

    let (last, rest) = outcomes.split_last().unwrap();
    assert!(rest.iter().all(|o| matches!(o, MoveOutcome::Extended(_))));
    match last {
        MoveOutcome::Succeeded(stats) => assert_eq!(stats.moves, 9),
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(engine.state(), EngineState::Succeeded);
    assert_eq!(engine.remaining_cells(), 0);
}

#[test]
fn reaching_goal_with_cells_left_is_not_success() {
    let mut engine = PlayEngine::new(snake_layout(), Variant::FullCoverage);
    let outcomes = trace(
        &mut engine,
        &[(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (2, 1), (2, 2)],
    );

    assert_eq!(outcomes.last(), Some(&MoveOutcome::Extended((2, 2))));
    assert_eq!(engine.state(), EngineState::Tracing);
    assert_eq!(engine.tail(), Some((2, 2)));
    assert_eq!(engine.remaining_cells(), 2);

    assert_eq!(engine.undo(), MoveOutcome::Undone((2, 2)));
    assert_eq!(engine.undo(), MoveOutcome::Undone((2, 1)));
    assert_eq!(engine.next_waypoint(), 5);
    let outcomes = trace(&mut engine, &[(1, 0), (2, 0), (2, 1), (2, 2)]);
    assert!(matches!(outcomes.last(), Some(MoveOutcome::Succeeded(_))));
}

#[test]
fn hazard_route_reaches_goal() {
    let layout = PuzzleLayout::from_parts(3, &[(0, 0), (2, 2)], &[(1, 1)]).unwrap();
    let mut session = HazardSession::with_layout(vec![hazard_set(3)], 1, layout).unwrap();
    session.begin_memorization();
    session.end_memorization();

    let mut last = SessionEvent::NoChange;
    for coords in [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)] {
        last = session.attempt_move(coords);
    }
    assert!(matches!(last, SessionEvent::SetCleared(_)), "{last:?}");
    assert_eq!(session.phase(), SessionPhase::SetCleared);
    assert_eq!(session.lives(), 3);
}

#[test]
fn stepping_on_hazard_costs_a_life() {
    let layout = PuzzleLayout::from_parts(3, &[(0, 0), (2, 2)], &[(1, 1)]).unwrap();
    let mut session = HazardSession::with_layout(vec![hazard_set(3)], 1, layout).unwrap();
    session.begin_memorization();
    session.end_memorization();

    assert_eq!(session.attempt_move((0, 0)), SessionEvent::Extended((0, 0)));
    assert_eq!(session.attempt_move((1, 0)), SessionEvent::Extended((1, 0)));
    assert_eq!(
        session.attempt_move((1, 1)),
        SessionEvent::Failed { lives_remaining: 2 }
    );
    assert_eq!(session.phase(), SessionPhase::Failed);
    assert_eq!(session.lives(), 2);
    assert_eq!(session.engine().state(), EngineState::Failed);
    assert_eq!(session.cell_view((3, 0)), None);
    assert_eq!(session.cell_view((1, 1)).unwrap().kind, CellKind::Obstacle);
}

#[test]
fn custom_layout_must_match_first_set() {
    let layout = PuzzleLayout::from_parts(4, &[(0, 0), (3, 3)], &[]).unwrap();
    assert!(HazardSession::with_layout(vec![hazard_set(3)], 1, layout).is_err());
}

fn hazard_set(grid_size: u8) -> HazardConfig {
    HazardConfig {
        grid_size,
        hazard_count: 1,
        hazard_reveal_duration_ms: 500,
        lives_total: 3,
    }
}

#[test]
fn hamiltonian_paths_cover_every_grid() {
    for size in 2..=9 {
        for seed in 0..8 {
            let path = build_hamiltonian_path(size, seed);
            assert!(is_hamiltonian(&path, size), "size {size}, seed {seed}");
            assert!(path.windows(2).all(|pair| is_adjacent(pair[0], pair[1])));
        }
    }
}

#[test]
fn generated_coverage_puzzles_are_solvable() {
    for (size, waypoints) in [(4, 3), (5, 5), (6, 5), (7, 8)] {
        for seed in 0..10 {
            let config = CoverageConfig::new(size, waypoints, 3).unwrap();
            let puzzle = CoveragePuzzleGenerator::new(seed)
                .generate(&config)
                .unwrap();
            let again = CoveragePuzzleGenerator::new(seed)
                .generate(&config)
                .unwrap();
            assert_eq!(puzzle, again);

            let mut engine = PlayEngine::new(puzzle.layout, Variant::FullCoverage);
            let outcomes = trace(&mut engine, &puzzle.solution);
            assert!(
                matches!(outcomes.last(), Some(MoveOutcome::Succeeded(_))),
                "size {size}, seed {seed}"
            );
        }
    }
}

#[test]
fn generated_hazard_routes_are_solvable() {
    for set in 1..=5 {
        for seed in 0..200 {
            let puzzle = HazardPuzzleGenerator::new(seed)
                .generate(&HazardConfig::for_set(set))
                .unwrap();
            let mut engine = PlayEngine::new(puzzle.layout, Variant::ReachGoal);
            let outcomes = trace(&mut engine, &puzzle.solution);
            assert!(
                matches!(outcomes.last(), Some(MoveOutcome::Succeeded(_))),
                "set {set}, seed {seed}"
            );
        }
    }
}

#[test]
fn accepted_moves_form_a_simple_path() {
    let puzzle = CoveragePuzzleGenerator::new(77)
        .generate(&CoverageConfig::medium())
        .unwrap();
    let mut engine = PlayEngine::new(puzzle.layout, Variant::FullCoverage);

    // Scribble across the grid; whatever the engine keeps must stay a simple adjacent path.
    let size = engine.size();
    let start = engine.layout().start();
    engine.attempt_move(start);
    for i in 0..200u32 {
        let coords = ((i * 7 % u32::from(size)) as u8, (i * 3 % u32::from(size)) as u8);
        engine.attempt_move(coords);
        if let Some(tail) = engine.tail() {
            for next in [(tail.0, tail.1 + 1), (tail.0 + 1, tail.1)] {
                if next.0 < size && next.1 < size {
                    engine.attempt_move(next);
                }
            }
        }
        if engine.is_finished() {
            break;
        }

        let path = engine.traced_path();
        assert!(path.windows(2).all(|pair| is_adjacent(pair[0], pair[1])));
        let mut seen = path.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len());
        assert_eq!(usize::from(engine.visited_count()), path.len());
    }
}
