//! Common types for Sea Battle: cell states, shot outcomes and errors.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// A 1-based `(x, y)` board coordinate; `x` is the column, `y` the row.
pub type Position = (usize, usize);

/// State of a single grid cell.
///
/// The own board only ever holds `Empty`, `Ship` and `Hit` during play.
/// `Blocked` is a placement-time reservation and `Skip` belongs to the
/// opponent model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Ship,
    Blocked,
    Hit,
    Miss,
    Skip,
}

impl CellState {
    /// Decode the compact numeric form (`0..=5`, declaration order).
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => CellState::Empty,
            1 => CellState::Ship,
            2 => CellState::Blocked,
            3 => CellState::Hit,
            4 => CellState::Miss,
            5 => CellState::Skip,
            _ => return None,
        })
    }

    /// Numeric form of this state.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Glyph used by the text dump of a board.
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty | CellState::Blocked => '.',
            CellState::Ship => '1',
            CellState::Hit => 'X',
            CellState::Miss | CellState::Skip => 'x',
        }
    }
}

/// Result of a shot, as reported by whoever owns the targeted board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShotOutcome {
    /// Shot hit a ship that still has undamaged decks.
    Hit,
    /// Shot finished off a ship.
    Kill,
    /// Shot landed in open water.
    Miss,
}

impl ShotOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotOutcome::Hit => "hit",
            ShotOutcome::Kill => "kill",
            ShotOutcome::Miss => "miss",
        }
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotOutcome {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hit" => Ok(ShotOutcome::Hit),
            "kill" => Ok(ShotOutcome::Kill),
            "miss" => Ok(ShotOutcome::Miss),
            _ => Err(GameError::UnknownOutcome),
        }
    }
}

/// Axis along which a damaged opponent ship lies, as far as we can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipLayout {
    Vertical,
    Horizontal,
    /// Only one deck has been found so far.
    Unknown,
}

/// Orientation used when laying out our own fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Errors returned by the board, placement, targeting and game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Coordinate outside `[1, size]` on either axis.
    #[error("position ({x}, {y}) is outside the board")]
    OutOfRange { x: usize, y: usize },
    /// Linear index past the last cell.
    #[error("cell index {0} is outside the board")]
    IndexOutOfRange(usize),
    #[error("board size {0} is not supported")]
    InvalidBoardSize(usize),
    #[error("field has {actual} cells, expected {expected}")]
    FieldSizeMismatch { expected: usize, actual: usize },
    /// Supplied field holds a state that cannot exist during play.
    #[error("field cell {index} holds {state:?}, which is not a playable state")]
    InvalidFieldCell { index: usize, state: CellState },
    /// Restored snapshot pairs an own board and an opponent model of different sizes.
    #[error("own board is {own}x{own} but the opponent model is {opponent}x{opponent}")]
    BoardSizeMismatch { own: usize, opponent: usize },
    #[error("{remaining} ships remaining out of a fleet of {fleet}")]
    CounterOutOfRange { remaining: usize, fleet: usize },
    #[error("field already holds {sunk} sunk ships but the fleet has {fleet}")]
    TooManySunkShips { sunk: usize, fleet: usize },
    #[error("ship length {0} is not valid")]
    InvalidShipLength(usize),
    #[error("unable to place ship of length {length} after {attempts} attempts")]
    PlacementInfeasible { length: usize, attempts: usize },
    /// The opponent model has no open cell left to shoot at.
    #[error("no cells left to shoot at")]
    NoTargetsLeft,
    #[error("unknown shot outcome")]
    UnknownOutcome,
    #[cfg(feature = "std")]
    #[error(transparent)]
    Parse(#[from] crate::coords::ParseError),
}
