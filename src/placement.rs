//! Random fleet layout.
//!
//! Ships are dropped one at a time by rejection sampling. Every accepted ship
//! reserves the ring of cells around it as `Blocked` so that later ships can
//! neither overlap nor touch it, not even at a corner. Reservations are wiped
//! once the whole fleet is down.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::common::{CellState, GameError, Orientation, Position};
use crate::config::MAX_PLACEMENT_ATTEMPTS;

/// Build a `size × size` board holding every ship in `ships`.
pub fn generate_field<R: Rng + ?Sized>(
    size: usize,
    ships: &[usize],
    rng: &mut R,
) -> Result<Board, GameError> {
    let mut board = Board::new(size)?;
    for &length in ships {
        place_ship(&mut board, length, rng)?;
    }
    board.replace_all(CellState::Blocked, CellState::Empty);
    Ok(board)
}

/// Place a single ship of `length` decks at a random free spot.
///
/// Leaves the `Blocked` ring around the new ship in place; callers laying out
/// a whole fleet clear them at the end (see [`generate_field`]).
pub fn place_ship<R: Rng + ?Sized>(
    board: &mut Board,
    length: usize,
    rng: &mut R,
) -> Result<(), GameError> {
    if length == 0 {
        return Err(GameError::InvalidShipLength(length));
    }
    if length > board.size() {
        return Err(GameError::PlacementInfeasible {
            length,
            attempts: 0,
        });
    }
    let size = board.size();
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let origin = (rng.random_range(1..=size), rng.random_range(1..=size));
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        if let Some(run) = free_run(board, origin, orientation, length) {
            claim(board, &run)?;
            debug!(
                "placed {}-deck ship at {:?} {:?} after {} attempt(s)",
                length, origin, orientation, attempt
            );
            return Ok(());
        }
    }
    Err(GameError::PlacementInfeasible {
        length,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Cells covered by a ship at `origin`, or `None` if it would leave the board
/// or cover anything but open water.
fn free_run(
    board: &Board,
    origin: Position,
    orientation: Orientation,
    length: usize,
) -> Option<Vec<Position>> {
    let (dx, dy) = match orientation {
        Orientation::Horizontal => (1, 0),
        Orientation::Vertical => (0, 1),
    };
    let mut run = Vec::with_capacity(length);
    let mut pos = origin;
    for i in 0..length {
        if i > 0 {
            pos = board.step(pos, dx, dy)?;
        }
        if board.at(pos)? != CellState::Empty {
            return None;
        }
        run.push(pos);
    }
    Some(run)
}

fn claim(board: &mut Board, run: &[Position]) -> Result<(), GameError> {
    for &(x, y) in run {
        board.set(x, y, CellState::Ship)?;
    }
    for &pos in run {
        let ring: Vec<Position> = board
            .neighbours(pos)
            .filter(|&n| board.at(n) == Some(CellState::Empty))
            .collect();
        for (x, y) in ring {
            board.set(x, y, CellState::Blocked)?;
        }
    }
    Ok(())
}
