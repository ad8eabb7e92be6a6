//! Square grid of cell states with 1-based coordinate arithmetic.
//!
//! The same type backs both our own fleet (ground truth) and the opponent
//! model (what we have inferred about the enemy fleet).

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{CellState, GameError, Position};
use crate::config::MAX_BOARD_SIZE;

/// Offsets of the eight cells surrounding a cell.
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBoard")
)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

/// Unchecked wire form of [`Board`]; deserialized boards go through
/// [`Board::from_cells`].
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<CellState>,
}

#[cfg(feature = "std")]
impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        Board::from_cells(raw.size, raw.cells)
    }
}

impl Board {
    /// Create a board of `size × size` empty cells.
    pub fn new(size: usize) -> Result<Self, GameError> {
        check_size(size)?;
        Ok(Board {
            size,
            cells: vec![CellState::Empty; size * size],
        })
    }

    /// Wrap an existing row-major field. The field must hold exactly `size²` cells.
    pub fn from_cells(size: usize, cells: Vec<CellState>) -> Result<Self, GameError> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(GameError::FieldSizeMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Board { size, cells })
    }

    /// Build a board from numeric cell codes (see [`CellState::from_code`]).
    /// Unknown codes are reported as [`GameError::InvalidFieldCell`] with an
    /// `Empty` placeholder state.
    pub fn from_codes(size: usize, codes: &[u8]) -> Result<Self, GameError> {
        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                CellState::from_code(code).ok_or(GameError::InvalidFieldCell {
                    index,
                    state: CellState::Empty,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(size, cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Returns `true` if `(x, y)` lies on the board.
    pub fn contains(&self, (x, y): Position) -> bool {
        x >= 1 && y >= 1 && x <= self.size && y <= self.size
    }

    /// Linear index of `(x, y)`: `(y - 1) * size + (x - 1)`.
    pub fn to_linear_index(&self, (x, y): Position) -> Result<usize, GameError> {
        if !self.contains((x, y)) {
            return Err(GameError::OutOfRange { x, y });
        }
        Ok((y - 1) * self.size + (x - 1))
    }

    /// Inverse of [`Board::to_linear_index`].
    pub fn from_linear_index(&self, index: usize) -> Result<Position, GameError> {
        if index >= self.cells.len() {
            return Err(GameError::IndexOutOfRange(index));
        }
        Ok((index % self.size + 1, index / self.size + 1))
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState, GameError> {
        let idx = self.to_linear_index((x, y))?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GameError> {
        let idx = self.to_linear_index((x, y))?;
        self.cells[idx] = state;
        Ok(())
    }

    /// State at `pos`, or `None` when `pos` is off the board.
    pub fn at(&self, pos: Position) -> Option<CellState> {
        self.to_linear_index(pos).ok().map(|idx| self.cells[idx])
    }

    /// Position one step from `pos` along `(dx, dy)`, if still on the board.
    pub fn step(&self, (x, y): Position, dx: isize, dy: isize) -> Option<Position> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.contains((nx, ny)).then_some((nx, ny))
    }

    /// The up-to-eight cells around `pos` that lie on the board.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.step(pos, dx, dy))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Rewrite every cell in state `from` to `to`.
    pub fn replace_all(&mut self, from: CellState, to: CellState) {
        for cell in self.cells.iter_mut().filter(|c| **c == from) {
            *cell = to;
        }
    }

    /// Iterator over `(position, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i % size + 1, i / size + 1), c))
    }
}

fn check_size(size: usize) -> Result<(), GameError> {
    if size == 0 || size > MAX_BOARD_SIZE {
        Err(GameError::InvalidBoardSize(size))
    } else {
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = self.size + 2;
        for _ in 0..border {
            f.write_str("-")?;
        }
        writeln!(f)?;
        for row in self.cells.chunks(self.size) {
            f.write_str("|")?;
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..border {
            f.write_str("-")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {} }}", self.size)?;
        write!(f, "{}", self)
    }
}
