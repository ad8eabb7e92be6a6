//! Commonly used types and utilities for ease of import.

pub use crate::{Board, CellState, Game, GameError, GameStatus, Position, ShotOutcome};

#[cfg(feature = "std")]
pub use crate::{format_position, init_logging, init_logging_with, parse_position, ParseError};
