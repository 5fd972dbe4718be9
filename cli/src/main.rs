use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use threadline_core::{
    CellCount, Coord, Coord2, CoverageConfig, CoveragePuzzleGenerator, Difficulty,
    GeneratedPuzzle, HazardConfig, HazardPuzzleGenerator, HazardSession, MoveOutcome, PlayEngine,
    PuzzleGenerator, Seed, SessionEvent, Variant, daily_seed,
};

mod render;

#[derive(Parser)]
#[command(
    name = "threadline",
    version,
    about = "Generate and replay seeded path-tracing puzzles"
)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a generated puzzle.
    Generate {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Also print the path the puzzle was generated from.
        #[arg(long)]
        solution: bool,
        #[arg(long)]
        json: bool,
    },
    /// Trace a move list on a generated puzzle and print every outcome.
    Replay {
        #[command(flatten)]
        puzzle: PuzzleArgs,
        /// Cells as `row,col`, in order.
        #[arg(required = true, value_parser = parse_coords)]
        moves: Vec<Coord2>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    /// Visit every cell, waypoints in order.
    Coverage,
    /// Reach the goal without stepping on a hidden hazard.
    Hazard,
}

#[derive(Args)]
struct PuzzleArgs {
    #[arg(long, value_enum, default_value_t = Mode::Coverage)]
    mode: Mode,
    #[arg(long, conflicts_with = "daily")]
    seed: Option<Seed>,
    /// Use today's date as the seed.
    #[arg(long)]
    daily: bool,
    /// Coverage preset: easy, medium, hard or expert.
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Hazard set, 1 to 5.
    #[arg(long)]
    set: Option<u8>,
    #[arg(long)]
    size: Option<Coord>,
    #[arg(long)]
    waypoints: Option<CellCount>,
    /// Obstacles in coverage mode, hazards in hazard mode.
    #[arg(long)]
    obstacles: Option<CellCount>,
    /// TOML file with the whole config; other size flags are ignored.
    #[arg(long, short)]
    config: Option<PathBuf>,
}

impl PuzzleArgs {
    fn seed(&self) -> Seed {
        if let Some(seed) = self.seed {
            return seed;
        }
        if self.daily {
            let today = chrono::Local::now().date_naive();
            let seed = daily_seed(today);
            log::info!("Daily puzzle for {today}: seed {seed}");
            return seed;
        }
        let seed = rand::random();
        log::info!("Random seed {seed}");
        seed
    }

    fn coverage_config(&self) -> anyhow::Result<CoverageConfig> {
        if let Some(path) = &self.config {
            return load_config(path);
        }
        let preset = self.difficulty.unwrap_or_default().config();
        let config = CoverageConfig {
            grid_size: self.size.unwrap_or(preset.grid_size),
            waypoint_count: self.waypoints.unwrap_or(preset.waypoint_count),
            obstacle_count: self.obstacles.unwrap_or(preset.obstacle_count),
        };
        config.validate().context("invalid coverage settings")?;
        Ok(config)
    }

    fn hazard_config(&self) -> anyhow::Result<HazardConfig> {
        if let Some(path) = &self.config {
            return load_config(path);
        }
        let mut config = HazardConfig::for_set(self.set.unwrap_or(1));
        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(hazards) = self.obstacles {
            config.hazard_count = hazards;
        }
        config.validate().context("invalid hazard settings")?;
        Ok(config)
    }
}

fn load_config<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn parse_coords(raw: &str) -> Result<Coord2, String> {
    let (row, col) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{raw}`"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row in `{raw}`: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column in `{raw}`: {e}"))?;
    Ok((row, col))
}

#[derive(Serialize)]
struct GenerateReport {
    mode: Mode,
    seed: Seed,
    #[serde(flatten)]
    puzzle: GeneratedPuzzle,
}

#[derive(Serialize)]
struct ReplayStep<T> {
    coords: Coord2,
    outcome: T,
}

fn generate(
    args: &PuzzleArgs,
) -> anyhow::Result<(Seed, GeneratedPuzzle, Option<HazardConfig>)> {
    let seed = args.seed();
    match args.mode {
        Mode::Coverage => {
            let config = args.coverage_config()?;
            let puzzle = CoveragePuzzleGenerator::new(seed)
                .generate(&config)
                .context("coverage generation failed")?;
            Ok((seed, puzzle, None))
        }
        Mode::Hazard => {
            let config = args.hazard_config()?;
            let puzzle = HazardPuzzleGenerator::new(seed)
                .generate(&config)
                .context("hazard generation failed")?;
            Ok((seed, puzzle, Some(config)))
        }
    }
}

fn run_generate(args: &PuzzleArgs, show_solution: bool, json: bool) -> anyhow::Result<()> {
    let (seed, puzzle, _) = generate(args)?;

    if json {
        let report = GenerateReport {
            mode: args.mode,
            seed,
            puzzle,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("seed: {seed}");
    print!("{}", render::layout(&puzzle.layout));
    if show_solution {
        println!("solution: {}", render::route(&puzzle.solution));
    }
    Ok(())
}

fn run_replay(args: &PuzzleArgs, moves: &[Coord2], json: bool) -> anyhow::Result<()> {
    let (seed, puzzle, hazard) = generate(args)?;

    match hazard {
        None => {
            let mut engine = PlayEngine::new(puzzle.layout, Variant::FullCoverage);
            let steps = replay_coverage(&mut engine, moves);
            report_replay(seed, &steps, &render::trace(&engine), json)
        }
        Some(config) => {
            let mut session = HazardSession::with_layout(vec![config], seed, puzzle.layout)
                .context("failed to start hazard session")?;
            let steps = replay_hazard(&mut session, moves);
            log::info!("Lives left: {}", session.lives());
            report_replay(seed, &steps, &render::trace(session.engine()), json)
        }
    }
}

fn report_replay<T: Serialize + fmt::Debug>(
    seed: Seed,
    steps: &[ReplayStep<T>],
    board: &str,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(steps)?);
        return Ok(());
    }

    println!("seed: {seed}");
    for step in steps {
        println!("{:?} -> {:?}", step.coords, step.outcome);
    }
    print!("{board}");
    Ok(())
}

fn replay_coverage(engine: &mut PlayEngine, moves: &[Coord2]) -> Vec<ReplayStep<MoveOutcome>> {
    let mut steps = Vec::with_capacity(moves.len());
    for &coords in moves {
        let outcome = engine.attempt_move(coords);
        steps.push(ReplayStep { coords, outcome });
        if outcome.is_terminal() {
            break;
        }
    }
    steps
}

fn replay_hazard(session: &mut HazardSession, moves: &[Coord2]) -> Vec<ReplayStep<SessionEvent>> {
    session.begin_memorization();
    session.end_memorization();

    let mut steps = Vec::with_capacity(moves.len());
    for &coords in moves {
        let outcome = session.attempt_move(coords);
        steps.push(ReplayStep { coords, outcome });
        if matches!(
            outcome,
            SessionEvent::SetCleared(_) | SessionEvent::Failed { .. }
        ) {
            break;
        }
    }
    steps
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .init();

    match &cli.command {
        Command::Generate {
            puzzle,
            solution,
            json,
        } => run_generate(puzzle, *solution, *json),
        Command::Replay {
            puzzle,
            moves,
            json,
        } => run_replay(puzzle, moves, *json),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn puzzle_args(args: &[&str]) -> PuzzleArgs {
        let argv = ["threadline", "generate"].iter().chain(args);
        match Cli::parse_from(argv).command {
            Command::Generate { puzzle, .. } => puzzle,
            Command::Replay { .. } => unreachable!(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn coords_parse_from_row_and_column() {
        assert_eq!(parse_coords("2,3"), Ok((2, 3)));
        assert_eq!(parse_coords(" 0 , 5 "), Ok((0, 5)));
        assert!(parse_coords("23").is_err());
        assert!(parse_coords("-1,0").is_err());
    }

    #[test]
    fn explicit_sizes_override_the_preset() {
        let args = puzzle_args(&["--difficulty", "hard", "--size", "5", "--waypoints", "4"]);
        let config = args.coverage_config().unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.waypoint_count, 4);
        assert_eq!(config.obstacle_count, CoverageConfig::hard().obstacle_count);
    }

    #[test]
    fn invalid_sizes_are_reported() {
        let args = puzzle_args(&["--size", "2", "--waypoints", "9"]);
        assert!(args.coverage_config().is_err());
    }

    #[test]
    fn hazard_set_flag_selects_the_set() {
        let args = puzzle_args(&["--mode", "hazard", "--set", "5", "--seed", "4"]);
        assert_eq!(args.hazard_config().unwrap(), HazardConfig::for_set(5));
        assert_eq!(args.seed(), 4);
    }

    #[test]
    fn replaying_the_solution_clears_the_puzzle() {
        let args = puzzle_args(&["--seed", "12", "--difficulty", "easy"]);
        let (_, puzzle, _) = generate(&args).unwrap();
        let mut engine = PlayEngine::new(puzzle.layout, Variant::FullCoverage);
        let steps = replay_coverage(&mut engine, &puzzle.solution);
        assert_eq!(steps.len(), puzzle.solution.len());
        assert!(matches!(
            steps.last().map(|s| s.outcome),
            Some(MoveOutcome::Succeeded(_))
        ));
    }

    #[test]
    fn hazard_replay_stops_at_the_goal() {
        let args = puzzle_args(&["--mode", "hazard", "--seed", "3"]);
        let (seed, puzzle, config) = generate(&args).unwrap();
        let route = puzzle.solution.clone();
        let mut session =
            HazardSession::with_layout(vec![config.unwrap()], seed, puzzle.layout).unwrap();
        let steps = replay_hazard(&mut session, &route);
        assert!(matches!(
            steps.last().map(|s| s.outcome),
            Some(SessionEvent::SetCleared(_))
        ));
    }
}
