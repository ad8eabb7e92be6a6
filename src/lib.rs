#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ai;
pub mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod coords;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod prelude;
pub mod shot;

pub use ai::{OpenRun, Targeting, TargetingState};
pub use board::Board;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use coords::{format_position, parse_position, ParseError};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LogSpec};
pub use placement::{generate_field, place_ship};
pub use shot::{count_sunk_ships, is_ship_sunk, resolve_shot, ShotReport};
