//! Resolution of enemy shots against our own board.
//!
//! Ships are not stored as objects; a ship is whatever maximal straight run of
//! `Ship`/`Hit` cells contains the shot. Because ships never touch, scanning
//! the row and the column through a cell is enough to decide whether that
//! ship still has a live deck.

use alloc::vec;
use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{CellState, GameError, Position, ShotOutcome};

/// Outcome of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    /// Set only when this very shot destroyed the ship's last live deck, so a
    /// fleet counter can be decremented exactly once per ship.
    pub newly_sunk: bool,
}

/// Apply a shot at `pos` to `board`.
///
/// Re-shooting a damaged or sunk ship reports its current state again without
/// touching the board. Shooting open water leaves the cell as it is.
pub fn resolve_shot(board: &mut Board, pos: Position) -> Result<ShotReport, GameError> {
    let (x, y) = pos;
    let report = match board.get(x, y)? {
        CellState::Ship => {
            board.set(x, y, CellState::Hit)?;
            let sunk = is_ship_sunk(board, pos)?;
            ShotReport {
                outcome: if sunk { ShotOutcome::Kill } else { ShotOutcome::Hit },
                newly_sunk: sunk,
            }
        }
        CellState::Hit => ShotReport {
            outcome: if is_ship_sunk(board, pos)? {
                ShotOutcome::Kill
            } else {
                ShotOutcome::Hit
            },
            newly_sunk: false,
        },
        _ => ShotReport {
            outcome: ShotOutcome::Miss,
            newly_sunk: false,
        },
    };
    Ok(report)
}

/// Returns `true` if the ship through `pos` has no live (`Ship`) deck left.
pub fn is_ship_sunk(board: &Board, pos: Position) -> Result<bool, GameError> {
    board.to_linear_index(pos)?;
    Ok(axis_is_clear(board, pos, 1, 0) && axis_is_clear(board, pos, 0, 1))
}

fn axis_is_clear(board: &Board, pos: Position, dx: isize, dy: isize) -> bool {
    tail_is_clear(board, pos, dx, dy) && tail_is_clear(board, pos, -dx, -dy)
}

/// Walk from `pos` (inclusive) until the edge or the first cell that is not a
/// hit deck. `false` if that cell is a live deck.
fn tail_is_clear(board: &Board, pos: Position, dx: isize, dy: isize) -> bool {
    let mut cursor = Some(pos);
    while let Some(p) = cursor {
        match board.at(p) {
            Some(CellState::Hit) => cursor = board.step(p, dx, dy),
            Some(CellState::Ship) => return false,
            _ => return true,
        }
    }
    true
}

/// Count ships whose every deck has been hit, recomputed from the grid.
pub fn count_sunk_ships(board: &Board) -> usize {
    let mut seen = vec![false; board.cells().len()];
    let mut sunk = 0;
    for (start, state) in board.iter() {
        if !is_deck(state) {
            continue;
        }
        let Ok(idx) = board.to_linear_index(start) else {
            continue;
        };
        if seen[idx] {
            continue;
        }
        seen[idx] = true;
        let mut stack: Vec<Position> = vec![start];
        let mut alive = false;
        while let Some(p) = stack.pop() {
            if board.at(p) == Some(CellState::Ship) {
                alive = true;
            }
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let Some(n) = board.step(p, dx, dy) else {
                    continue;
                };
                let Ok(ni) = board.to_linear_index(n) else {
                    continue;
                };
                if !seen[ni] && board.at(n).is_some_and(is_deck) {
                    seen[ni] = true;
                    stack.push(n);
                }
            }
        }
        if !alive {
            sunk += 1;
        }
    }
    sunk
}

fn is_deck(state: CellState) -> bool {
    matches!(state, CellState::Ship | CellState::Hit)
}
