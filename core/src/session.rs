use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Layout generated, hazards not shown yet.
    #[default]
    Ready,
    /// Hazards visible, moves are ignored.
    Memorizing,
    /// Hazards hidden, the trace is being drawn.
    Tracing,
    /// Goal reached; [`HazardSession::next_set`] moves on.
    SetCleared,
    /// Hazard hit with lives left; [`HazardSession::retry`] deals a fresh layout.
    Failed,
    /// Hazard hit with no lives left.
    GameOver,
    /// Every set cleared.
    LevelCleared,
}

impl SessionPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::LevelCleared)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    NoChange,
    Extended(Coord2),
    Undone(Coord2),
    SetCleared(SolveStats),
    Failed { lives_remaining: u8 },
}

/// Round loop of the hazard-avoidance game.
///
/// The caller owns all timing: it waits out [`HazardSession::begin_memorization`]'s duration
/// before calling [`HazardSession::end_memorization`], and pauses as it likes before
/// [`HazardSession::retry`] after a failure.
#[derive(Clone, Debug)]
pub struct HazardSession {
    sets: Vec<HazardConfig>,
    seed: Seed,
    set_index: usize,
    round: u64,
    lives: u8,
    phase: SessionPhase,
    engine: PlayEngine,
}

impl HazardSession {
    pub fn new(sets: Vec<HazardConfig>, seed: Seed) -> Result<Self> {
        let Some(first) = sets.first().copied() else {
            return Err(GameError::InvalidLayout("a session needs at least one set"));
        };
        for set in &sets {
            set.validate()?;
        }

        let layout = Self::deal(&first, seed, 0, 0)?;
        Ok(Self {
            sets,
            seed,
            set_index: 0,
            round: 0,
            lives: first.lives_total,
            phase: SessionPhase::Ready,
            engine: PlayEngine::new(layout, Variant::ReachGoal),
        })
    }

    /// Starts on `layout` instead of a generated first layout. Later rounds are generated as
    /// usual.
    pub fn with_layout(
        sets: Vec<HazardConfig>,
        seed: Seed,
        layout: PuzzleLayout,
    ) -> Result<Self> {
        let mut session = Self::new(sets, seed)?;
        if layout.size() != session.config().grid_size {
            return Err(GameError::InvalidLayout("layout size differs from the first set"));
        }
        if layout.waypoint_count() != 2 {
            return Err(GameError::InvalidLayout("expected exactly a start and a goal"));
        }
        session.engine = PlayEngine::new(layout, Variant::ReachGoal);
        Ok(session)
    }

    /// Session over [`HazardConfig::standard_sets`].
    pub fn standard(seed: Seed) -> Result<Self> {
        Self::new(HazardConfig::standard_sets(), seed)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// One-based number of the current set.
    pub fn set_number(&self) -> usize {
        self.set_index + 1
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn config(&self) -> &HazardConfig {
        &self.sets[self.set_index]
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn layout(&self) -> &PuzzleLayout {
        self.engine.layout()
    }

    /// What the player may see at `coords`: hazards only while memorizing, plus the one that
    /// was hit. `None` outside the grid.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellState> {
        let mut state = self.engine.cell_at(coords)?;
        let revealed = matches!(self.phase, SessionPhase::Memorizing)
            || self.engine.hit_hazard() == Some(coords);
        if state.kind.is_obstacle() && !revealed {
            state.kind = CellKind::Empty;
        }
        Some(state)
    }

    /// Shows the hazards. Returns how long they should stay visible.
    pub fn begin_memorization(&mut self) -> Option<Duration> {
        if !matches!(self.phase, SessionPhase::Ready) {
            return None;
        }
        self.phase = SessionPhase::Memorizing;
        Some(self.config().reveal_duration())
    }

    /// Hides the hazards and accepts moves.
    pub fn end_memorization(&mut self) -> bool {
        if !matches!(self.phase, SessionPhase::Memorizing) {
            return false;
        }
        self.phase = SessionPhase::Tracing;
        true
    }

    pub fn attempt_move(&mut self, coords: Coord2) -> SessionEvent {
        if !matches!(self.phase, SessionPhase::Tracing) {
            return SessionEvent::NoChange;
        }
        let outcome = self.engine.attempt_move(coords);
        self.apply(outcome)
    }

    pub fn press(&mut self, coords: Coord2) -> SessionEvent {
        if !matches!(self.phase, SessionPhase::Tracing) {
            return SessionEvent::NoChange;
        }
        let outcome = self.engine.press(coords);
        self.apply(outcome)
    }

    pub fn drag_to(&mut self, coords: Coord2) -> SessionEvent {
        if !matches!(self.phase, SessionPhase::Tracing) {
            return SessionEvent::NoChange;
        }
        let outcome = self.engine.drag_to(coords);
        self.apply(outcome)
    }

    pub fn release(&mut self) {
        self.engine.release();
    }

    pub fn undo(&mut self) -> SessionEvent {
        if !matches!(self.phase, SessionPhase::Tracing) {
            return SessionEvent::NoChange;
        }
        let outcome = self.engine.undo();
        self.apply(outcome)
    }

    /// Clears the trace on the current layout.
    pub fn reset_path(&mut self) {
        if matches!(self.phase, SessionPhase::Tracing) {
            self.engine.reset();
        }
    }

    /// Deals a fresh layout for the same set after a failure.
    pub fn retry(&mut self) -> Result<bool> {
        if !matches!(self.phase, SessionPhase::Failed) {
            return Ok(false);
        }
        self.redeal()?;
        Ok(true)
    }

    /// Moves past a cleared set. Returns `false` once the last set is done.
    pub fn next_set(&mut self) -> Result<bool> {
        if !matches!(self.phase, SessionPhase::SetCleared) {
            return Ok(false);
        }
        if self.set_index + 1 >= self.sets.len() {
            self.phase = SessionPhase::LevelCleared;
            return Ok(false);
        }
        self.set_index += 1;
        self.redeal()?;
        Ok(true)
    }

    /// Back to the first set with full lives.
    pub fn restart(&mut self) -> Result<()> {
        self.set_index = 0;
        self.lives = self.sets[0].lives_total;
        self.redeal()
    }

    fn apply(&mut self, outcome: MoveOutcome) -> SessionEvent {
        match outcome {
            MoveOutcome::NoChange => SessionEvent::NoChange,
            MoveOutcome::Extended(coords) => SessionEvent::Extended(coords),
            MoveOutcome::Undone(coords) => SessionEvent::Undone(coords),
            MoveOutcome::Succeeded(stats) => {
                self.phase = SessionPhase::SetCleared;
                SessionEvent::SetCleared(stats)
            }
            MoveOutcome::HitHazard(coords) => {
                self.lives = self.lives.saturating_sub(1);
                self.phase = if self.lives == 0 {
                    SessionPhase::GameOver
                } else {
                    SessionPhase::Failed
                };
                log::debug!(
                    "Hazard hit at {coords:?} in set {}, {} lives left",
                    self.set_number(),
                    self.lives
                );
                SessionEvent::Failed {
                    lives_remaining: self.lives,
                }
            }
        }
    }

    fn redeal(&mut self) -> Result<()> {
        self.round += 1;
        let layout = Self::deal(self.config(), self.seed, self.set_index, self.round)?;
        self.engine = PlayEngine::new(layout, Variant::ReachGoal);
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    /// Generator seed for attempt `round` of set `set_index`.
    fn deal_seed(seed: Seed, set_index: usize, round: u64) -> Seed {
        rng::offset(seed, (set_index as u64 + 1) * 100 + round * 1000)
    }

    fn deal(
        config: &HazardConfig,
        seed: Seed,
        set_index: usize,
        round: u64,
    ) -> Result<PuzzleLayout> {
        let seed = Self::deal_seed(seed, set_index, round);
        let puzzle = HazardPuzzleGenerator::new(seed).generate(config)?;
        Ok(puzzle.layout)
    }
}
