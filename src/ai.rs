// Hunt/target shot selection against the opponent board.
// Works on the opponent model only: a Board recording what our own shots and
// the enemy's replies have revealed.

use alloc::vec;
use alloc::vec::Vec;

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::{CellState, GameError, Position, ShipLayout, ShotOutcome};

/// A maximal stretch of unexplored cells along one row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRun {
    /// Cell probed when this run is chosen.
    pub midpoint: Position,
    pub length: usize,
}

/// Exportable targeting state, see [`Targeting::state`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingState {
    pub model: Board,
    pub last_shot_position: Option<Position>,
    pub last_damage_position: Option<Position>,
    pub pending_shot_index: Option<usize>,
}

/// Chooses where to shoot next and learns from the replies.
///
/// With no damaged ship on record it hunts: it fires at the middle of one of
/// the longest unexplored runs. After a hit that did not sink anything it
/// switches to target mode and walks along the damaged ship until the enemy
/// reports a kill.
#[derive(Debug, Clone)]
pub struct Targeting {
    model: Board,
    last_shot: Option<Position>,
    last_damage: Option<Position>,
    pending_shot: Option<usize>,
}

impl Targeting {
    /// Fresh engine for a `size × size` opponent board.
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            model: Board::new(size)?,
            last_shot: None,
            last_damage: None,
            pending_shot: None,
        })
    }

    /// Restore an engine from a previously exported state.
    pub fn from_state(state: TargetingState) -> Self {
        Self {
            model: state.model,
            last_shot: state.last_shot_position,
            last_damage: state.last_damage_position,
            pending_shot: state.pending_shot_index,
        }
    }

    pub fn state(&self) -> TargetingState {
        TargetingState {
            model: self.model.clone(),
            last_shot_position: self.last_shot,
            last_damage_position: self.last_damage,
            pending_shot_index: self.pending_shot,
        }
    }

    /// What we know about the opponent's board.
    pub fn model(&self) -> &Board {
        &self.model
    }

    pub fn last_shot_position(&self) -> Option<Position> {
        self.last_shot
    }

    /// Most recent hit on a ship that is not sunk yet.
    pub fn last_damage_position(&self) -> Option<Position> {
        self.last_damage
    }

    pub fn pending_shot_index(&self) -> Option<usize> {
        self.pending_shot
    }

    /// Forget the last shot, so a late reply is ignored.
    pub fn reset_last_shot(&mut self) {
        self.last_shot = None;
    }

    /// Pick the next cell to fire at and remember it as the last shot.
    pub fn choose_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Position, GameError> {
        let pos = match self.pending_shot.take() {
            Some(index) => self.model.from_linear_index(index)?,
            None => self.hunt(rng)?,
        };
        self.last_shot = Some(pos);
        debug!("firing at {:?}", pos);
        Ok(pos)
    }

    /// Fold the enemy's reply to our last shot into the model.
    ///
    /// Returns `true` when the reply reports a ship sunk by this shot. A
    /// `Kill` repeated for a shot already recorded as a deck is not counted
    /// again.
    pub fn process_enemy_reply(&mut self, outcome: ShotOutcome) -> Result<bool, GameError> {
        let Some(pos) = self.last_shot else {
            warn!("reply {} received with no shot pending, ignoring", outcome);
            return Ok(false);
        };
        let (x, y) = pos;
        if outcome == ShotOutcome::Kill && self.model.get(x, y)? == CellState::Ship {
            debug!("kill at {:?} already recorded, ignoring repeat", pos);
            return Ok(false);
        }
        match outcome {
            ShotOutcome::Hit => {
                self.model.set(x, y, CellState::Ship)?;
                self.last_damage = Some(pos);
                self.detect_next_ship_cell()?;
            }
            ShotOutcome::Kill => {
                self.model.set(x, y, CellState::Ship)?;
                self.last_damage = None;
                self.pending_shot = None;
                self.mark_sunk_surroundings(pos)?;
            }
            ShotOutcome::Miss => {
                self.model.set(x, y, CellState::Miss)?;
                if self.last_damage.is_some() {
                    self.detect_next_ship_cell()?;
                }
            }
        }
        Ok(outcome == ShotOutcome::Kill)
    }

    /// Every maximal run of `Empty` cells, rows first, then columns.
    pub fn open_runs(&self) -> Vec<OpenRun> {
        let size = self.model.size();
        let mut runs = Vec::new();
        for line in 1..=size {
            self.collect_runs(&mut runs, |i| (i, line));
        }
        for line in 1..=size {
            self.collect_runs(&mut runs, |i| (line, i));
        }
        runs
    }

    fn collect_runs(&self, runs: &mut Vec<OpenRun>, pos_at: impl Fn(usize) -> Position) {
        let size = self.model.size();
        let mut start = None;
        for i in 1..=size + 1 {
            let open = i <= size && self.model.at(pos_at(i)) == Some(CellState::Empty);
            match (open, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    let end = i - 1;
                    runs.push(OpenRun {
                        midpoint: pos_at(end - (end - s) / 2),
                        length: end - s + 1,
                    });
                    start = None;
                }
                _ => {}
            }
        }
    }

    /// Midpoint of a random longest open run, or any open cell if no run exists.
    fn hunt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position, GameError> {
        let runs = self.open_runs();
        if let Some(longest) = runs.iter().map(|r| r.length).max() {
            let best: Vec<&OpenRun> = runs.iter().filter(|r| r.length == longest).collect();
            if let Some(run) = best.choose(rng) {
                debug!(
                    "hunting: {} run(s) of length {}, picked {:?}",
                    best.len(),
                    longest,
                    run.midpoint
                );
                return Ok(run.midpoint);
            }
        }
        let open: Vec<Position> = self
            .model
            .iter()
            .filter(|&(_, c)| c == CellState::Empty)
            .map(|(p, _)| p)
            .collect();
        open.choose(rng).copied().ok_or(GameError::NoTargetsLeft)
    }

    /// Which way the damaged ship at `pos` runs, judged by its known decks.
    pub fn ship_layout(&self, pos: Position) -> ShipLayout {
        let deck = |dx, dy| {
            self.model
                .step(pos, dx, dy)
                .and_then(|p| self.model.at(p))
                == Some(CellState::Ship)
        };
        if deck(0, -1) || deck(0, 1) {
            ShipLayout::Vertical
        } else if deck(-1, 0) || deck(1, 0) {
            ShipLayout::Horizontal
        } else {
            ShipLayout::Unknown
        }
    }

    /// Queue the next probe around the last damaged ship.
    ///
    /// Returns the queued cell, or `None` if every direction is a dead end, in
    /// which case the next shot falls back to hunting.
    pub fn detect_next_ship_cell(&mut self) -> Result<Option<Position>, GameError> {
        self.pending_shot = None;
        let Some(from) = self.last_damage else {
            return Ok(None);
        };
        let axes: &[(isize, isize)] = match self.ship_layout(from) {
            ShipLayout::Vertical => &[(0, 1)],
            ShipLayout::Horizontal => &[(1, 0)],
            ShipLayout::Unknown => &[(0, 1), (1, 0)],
        };
        for &(dx, dy) in axes {
            let found = self
                .probe_line(from, dx, dy)
                .or_else(|| self.probe_line(from, -dx, -dy));
            if let Some(pos) = found {
                self.pending_shot = Some(self.model.to_linear_index(pos)?);
                debug!("targeting {:?} next, damaged deck at {:?}", pos, from);
                return Ok(Some(pos));
            }
        }
        Ok(None)
    }

    /// First open cell past the known decks in direction `(dx, dy)`.
    fn probe_line(&self, from: Position, dx: isize, dy: isize) -> Option<Position> {
        let mut pos = self.model.step(from, dx, dy)?;
        loop {
            match self.model.at(pos)? {
                CellState::Empty => return Some(pos),
                CellState::Skip | CellState::Miss => return None,
                _ => pos = self.model.step(pos, dx, dy)?,
            }
        }
    }

    /// Rule out every cell touching the ship sunk at `pos`.
    pub fn mark_sunk_surroundings(&mut self, pos: Position) -> Result<(), GameError> {
        let mut visited = vec![false; self.model.cells().len()];
        let mut stack = vec![pos];
        visited[self.model.to_linear_index(pos)?] = true;
        while let Some(deck) = stack.pop() {
            let around: Vec<Position> = self.model.neighbours(deck).collect();
            for n in around {
                let idx = self.model.to_linear_index(n)?;
                match self.model.at(n) {
                    Some(CellState::Empty) => self.model.set(n.0, n.1, CellState::Skip)?,
                    Some(CellState::Ship) if !visited[idx] && is_orthogonal(deck, n) => {
                        visited[idx] = true;
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

fn is_orthogonal(a: Position, b: Position) -> bool {
    a.0 == b.0 || a.1 == b.1
}
