use alloc::vec::Vec;
use core::fmt;
use core::num::Saturating;
use serde::Serialize;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
struct MoveRecord {
    outcome: MoveOutcome,
    facing_before: Direction,
}

/// Puzzle state for one level: grid, entity positions, coverage and move history.
///
/// `request_move` is the only way play mutates it; `undo` and `restart` rewind it. It serializes
/// for inspection only: a fresh engine is always built from a validated [`Level`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PuzzleEngine {
    level: Level,
    entities: EntityState,
    coverage: CoverageTracker,
    config: EngineConfig,
    in_flight: bool,
    history: Vec<MoveRecord>,
    push_count: Saturating<u32>,
}

impl PuzzleEngine {
    pub fn new(level: Level) -> Self {
        Self::with_config(level, EngineConfig::default())
    }

    pub fn with_config(level: Level, config: EngineConfig) -> Self {
        let entities = level.entity_state();
        let coverage = CoverageTracker::new(level.grid(), &entities);
        Self {
            level,
            entities,
            coverage,
            config,
            in_flight: false,
            history: Vec::new(),
            push_count: Saturating(0),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        self.level.grid()
    }

    pub fn entities(&self) -> &EntityState {
        &self.entities
    }

    pub fn player_position(&self) -> Coord2 {
        self.entities.player_position()
    }

    pub fn player_facing(&self) -> Direction {
        self.entities.player_facing()
    }

    pub fn boxes(&self) -> &[PushBox] {
        self.entities.boxes()
    }

    pub fn box_at(&self, coords: Coord2) -> Option<&PushBox> {
        self.entities.box_at(coords)
    }

    pub fn is_move_in_progress(&self) -> bool {
        self.in_flight
    }

    /// Called by the presentation layer once the last move's animation came to rest.
    ///
    /// Returns whether a move was in flight.
    pub fn settle(&mut self) -> bool {
        core::mem::replace(&mut self.in_flight, false)
    }

    /// What `request_move` would do right now, without doing it.
    pub fn preview_move(&self, direction: Direction) -> MoveOutcome {
        if self.in_flight {
            MoveOutcome::Rejected(RejectReason::AlreadyMoving)
        } else {
            resolver::plan(self.level.grid(), &self.entities, direction)
        }
    }

    pub fn request_move(&mut self, direction: Direction) -> MoveOutcome {
        let facing_before = self.entities.player_facing();
        let was_solved = self.is_solved();

        let outcome = resolver::resolve(
            self.level.grid(),
            &mut self.entities,
            direction,
            self.in_flight,
        );
        if let Some(reason) = outcome.rejection() {
            log::trace!("move {:?} rejected: {:?}", direction, reason);
            return outcome;
        }

        self.track_box_move(outcome);
        if outcome.is_push() {
            self.push_count += 1;
        }
        self.history.push(MoveRecord {
            outcome,
            facing_before,
        });
        self.begin_motion();
        log::debug!("move {:?}: {:?}", direction, outcome);

        if !was_solved && self.is_solved() {
            log::info!(
                "Puzzle solved in {} moves and {} pushes",
                self.move_count(),
                self.push_count()
            );
        }
        outcome
    }

    /// Plays the last accepted move backwards.
    ///
    /// Returns `None` when there is nothing to undo. Like a move, an undo is refused while the
    /// previous motion is still in flight.
    pub fn undo(&mut self) -> Option<MoveOutcome> {
        if self.in_flight {
            return Some(MoveOutcome::Rejected(RejectReason::AlreadyMoving));
        }

        let record = self.history.pop()?;
        let reversed = record.outcome.reversed();
        resolver::apply(&mut self.entities, reversed);
        self.entities.set_facing(record.facing_before);
        self.track_box_move(reversed);
        if reversed.is_push() {
            self.push_count -= 1;
        }
        self.begin_motion();
        log::debug!("undo: {:?}", reversed);
        Some(reversed)
    }

    /// Puts every entity back at its initial placement and forgets the history.
    pub fn restart(&mut self) {
        self.entities = self.level.entity_state();
        self.coverage = CoverageTracker::new(self.level.grid(), &self.entities);
        self.history.clear();
        self.push_count = Saturating(0);
        self.in_flight = false;
        log::debug!("level restarted");
    }

    pub fn move_count(&self) -> u32 {
        self.history.len().try_into().unwrap_or(u32::MAX)
    }

    pub fn push_count(&self) -> u32 {
        self.push_count.0
    }

    pub fn coverage_count(&self, color: Color) -> CellCount {
        self.coverage.count(color)
    }

    pub fn total_satisfied(&self) -> CellCount {
        self.coverage.total_satisfied()
    }

    pub fn coverage_snapshot(&self) -> ColorMap<CellCount> {
        self.coverage.snapshot()
    }

    pub fn target_counts(&self) -> ColorMap<CellCount> {
        self.level.grid().target_counts()
    }

    /// Every target is covered by a box of its own color.
    pub fn is_solved(&self) -> bool {
        self.coverage.is_complete(self.level.grid())
    }

    fn track_box_move(&mut self, outcome: MoveOutcome) {
        if let MoveOutcome::PlayerAndBoxMoved {
            box_id,
            box_from,
            box_to,
            ..
        } = outcome
        {
            if let Some(pushed) = self.entities.box_by_id(box_id) {
                let color = pushed.color;
                self.coverage
                    .on_box_moved(self.level.grid(), color, box_from, box_to);
            }
        }

        debug_assert_eq!(
            self.coverage.snapshot(),
            CoverageTracker::rescan(self.level.grid(), &self.entities),
            "incremental coverage diverged from a full rescan"
        );
    }

    fn begin_motion(&mut self) {
        self.in_flight = matches!(self.config.move_guard, MoveGuard::UntilSettled);
    }
}

impl fmt::Display for PuzzleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(
            f,
            self.level.grid(),
            self.entities.player_position(),
            self.entities
                .boxes()
                .iter()
                .map(|pushed| (pushed.color, pushed.position)),
        )
    }
}
