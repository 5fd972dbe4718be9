use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Rule set the engine enforces.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Visit every non-obstacle cell, waypoints in order. Obstacles cannot be entered.
    #[default]
    FullCoverage,
    /// Reach the last waypoint. Entering an obstacle (hazard) ends the round as a failure.
    ReachGoal,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    AwaitingStart,
    Tracing,
    Succeeded,
    Failed,
}

impl EngineState {
    pub const fn is_awaiting_start(self) -> bool {
        matches!(self, Self::AwaitingStart)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Path-tracing state machine over one immutable layout.
///
/// Illegal moves are rejected silently with [`MoveOutcome::NoChange`].
#[derive(Clone, Debug)]
pub struct PlayEngine {
    layout: PuzzleLayout,
    variant: Variant,
    visited: Array2<bool>,
    path: Vec<Coord2>,
    next_waypoint: CellCount,
    visited_count: CellCount,
    moves: u32,
    state: EngineState,
    extending: bool,
    hit_hazard: Option<Coord2>,
    started_at: Instant,
}

impl PlayEngine {
    pub fn new(layout: PuzzleLayout, variant: Variant) -> Self {
        let size = layout.size();
        Self {
            layout,
            variant,
            visited: Array2::default((size, size).to_nd_index()),
            path: Vec::new(),
            next_waypoint: 1,
            visited_count: 0,
            moves: 0,
            state: Default::default(),
            extending: false,
            hit_hazard: None,
            started_at: Instant::now(),
        }
    }

    pub fn layout(&self) -> &PuzzleLayout {
        &self.layout
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    /// Snapshot of one cell; `None` outside the grid.
    pub fn cell_at(&self, coords: Coord2) -> Option<CellState> {
        let coords = self.layout.validate_coords(coords).ok()?;
        Some(CellState {
            kind: self.layout[coords],
            visited: self.visited[coords.to_nd_index()],
        })
    }

    /// Out-of-grid cells are never visited.
    pub fn is_visited(&self, coords: Coord2) -> bool {
        self.layout.validate_coords(coords).is_ok() && self.visited[coords.to_nd_index()]
    }

    pub fn traced_path(&self) -> &[Coord2] {
        &self.path
    }

    pub fn tail(&self) -> Option<Coord2> {
        self.path.last().copied()
    }

    /// Number of the waypoint the trace must reach next; `waypoint_count + 1` once all are in.
    pub fn next_waypoint(&self) -> CellCount {
        self.next_waypoint
    }

    /// Cell of the next waypoint, if any remain.
    pub fn current_target(&self) -> Option<Coord2> {
        self.layout
            .waypoint(self.next_waypoint)
            .map(|waypoint| waypoint.coords)
    }

    pub fn visited_count(&self) -> CellCount {
        self.visited_count
    }

    pub fn playable_cell_count(&self) -> CellCount {
        self.layout.playable_cell_count()
    }

    pub fn remaining_cells(&self) -> CellCount {
        self.playable_cell_count().saturating_sub(self.visited_count)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn is_extending(&self) -> bool {
        self.extending
    }

    pub fn hit_hazard(&self) -> Option<Coord2> {
        self.hit_hazard
    }

    /// Pointer down. Starts the trace on waypoint 1, or grabs the current tail to continue.
    pub fn press(&mut self, coords: Coord2) -> MoveOutcome {
        match self.state {
            EngineState::AwaitingStart => {
                let outcome = self.attempt_move(coords);
                if matches!(outcome, MoveOutcome::Extended(_)) {
                    self.extending = true;
                }
                outcome
            }
            EngineState::Tracing => {
                if self.tail() == Some(coords) {
                    self.extending = true;
                }
                MoveOutcome::NoChange
            }
            EngineState::Succeeded | EngineState::Failed => MoveOutcome::NoChange,
        }
    }

    /// Pointer moved onto `coords`; only acts while a press is held.
    pub fn drag_to(&mut self, coords: Coord2) -> MoveOutcome {
        if !self.extending || self.tail() == Some(coords) {
            return MoveOutcome::NoChange;
        }
        self.attempt_move(coords)
    }

    /// Pointer up.
    pub fn release(&mut self) {
        self.extending = false;
    }

    /// Applies one move intent: starts the trace, retreats onto the previous cell, or extends.
    pub fn attempt_move(&mut self, coords: Coord2) -> MoveOutcome {
        if self.layout.validate_coords(coords).is_err() {
            log::trace!("{coords:?} rejected: out of bounds");
            return MoveOutcome::NoChange;
        }

        match self.state {
            EngineState::AwaitingStart => {
                if self.layout[coords] == CellKind::Waypoint(1) {
                    self.state = EngineState::Tracing;
                    self.extend(coords)
                } else {
                    log::trace!("{coords:?} rejected: trace must start on waypoint 1");
                    MoveOutcome::NoChange
                }
            }
            EngineState::Tracing => {
                if self.previous() == Some(coords) {
                    self.retreat()
                } else if self.can_extend_to(coords) {
                    self.extend(coords)
                } else {
                    log::trace!("{coords:?} rejected from tail {:?}", self.tail());
                    MoveOutcome::NoChange
                }
            }
            EngineState::Succeeded | EngineState::Failed => MoveOutcome::NoChange,
        }
    }

    /// Removes the tail of the trace. The first cell is never removed.
    pub fn undo(&mut self) -> MoveOutcome {
        if matches!(self.state, EngineState::Tracing) {
            self.retreat()
        } else {
            MoveOutcome::NoChange
        }
    }

    /// Clears the trace and all visited flags without touching the layout.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.path.clear();
        self.next_waypoint = 1;
        self.visited_count = 0;
        self.moves = 0;
        self.state = EngineState::AwaitingStart;
        self.extending = false;
        self.hit_hazard = None;
        self.started_at = Instant::now();
    }

    fn previous(&self) -> Option<Coord2> {
        self.path.len().checked_sub(2).map(|i| self.path[i])
    }

    fn can_extend_to(&self, coords: Coord2) -> bool {
        let Some(tail) = self.tail() else {
            return false;
        };
        if !is_adjacent(tail, coords) {
            return false;
        }

        let kind = self.layout[coords];
        if kind.is_obstacle() && matches!(self.variant, Variant::FullCoverage) {
            return false;
        }

        match kind.waypoint_number() {
            Some(number) => number == self.next_waypoint,
            None => !self.visited[coords.to_nd_index()],
        }
    }

    fn extend(&mut self, coords: Coord2) -> MoveOutcome {
        self.path.push(coords);
        let visited = &mut self.visited[coords.to_nd_index()];
        if !*visited {
            *visited = true;
            self.visited_count += 1;
        }
        self.moves = self.moves.saturating_add(1);

        let kind = self.layout[coords];
        if kind.waypoint_number() == Some(self.next_waypoint) {
            self.next_waypoint += 1;
        }

        if kind.is_obstacle() {
            self.hit_hazard = Some(coords);
            self.end_round(false);
            return MoveOutcome::HitHazard(coords);
        }

        if self.is_complete() {
            self.end_round(true);
            return MoveOutcome::Succeeded(self.stats());
        }

        MoveOutcome::Extended(coords)
    }

    fn retreat(&mut self) -> MoveOutcome {
        if self.path.len() <= 1 {
            return MoveOutcome::NoChange;
        }
        let Some(coords) = self.path.pop() else {
            return MoveOutcome::NoChange;
        };

        self.visited[coords.to_nd_index()] = false;
        self.visited_count -= 1;
        if let Some(number) = self.layout[coords].waypoint_number() {
            self.next_waypoint = number;
        }
        self.moves = self.moves.saturating_add(1);

        MoveOutcome::Undone(coords)
    }

    fn is_complete(&self) -> bool {
        let all_waypoints = self.next_waypoint > self.layout.waypoint_count();
        match self.variant {
            Variant::FullCoverage => {
                all_waypoints && self.visited_count == self.layout.playable_cell_count()
            }
            Variant::ReachGoal => all_waypoints,
        }
    }

    fn stats(&self) -> SolveStats {
        SolveStats {
            moves: self.moves,
            elapsed: self.elapsed(),
        }
    }

    fn end_round(&mut self, won: bool) {
        self.state = if won {
            EngineState::Succeeded
        } else {
            EngineState::Failed
        };
        self.extending = false;
    }
}
