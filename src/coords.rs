//! Coordinate parsing and formatting for the text front end.
//!
//! Players name a cell as `a1`, `a 1`, `8 4` or `eight four`. Speech
//! recognisers regularly mishear some of these, so a small substitution table
//! is applied to each token before it is interpreted.

use std::string::{String, ToString};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::common::Position;

/// Column letters, left to right.
const LETTERS: [&str; 10] = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
const NUMBER_WORDS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];
/// Known speech misrecognitions and what the player most likely said.
const MISHEARD: [(&str, &str); 6] = [
    ("won", "1"),
    ("to", "2"),
    ("too", "2"),
    ("tree", "3"),
    ("for", "4"),
    ("ate", "8"),
];

static POSITION_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        // a1
        Regex::new(r"^([a-z]+)(\d+)$").expect("valid pattern"),
        // a 1; a one; 7 10; seven ten
        Regex::new(r"^(\w+)\s+(\w+)$").expect("valid pattern"),
    ]
});

/// Errors raised while turning text into a board coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("can't parse position: {0}")]
    Unrecognized(String),
    #[error("can't parse X point: {0}")]
    InvalidX(String),
    #[error("can't parse Y point: {0}")]
    InvalidY(String),
    #[error("position ({x}, {y}) is outside a {size}x{size} board")]
    OutOfRange { x: usize, y: usize, size: usize },
}

/// Parse a spoken or typed cell name into a 1-based `(x, y)` on a
/// `size × size` board.
pub fn parse_position(input: &str, size: usize) -> Result<Position, ParseError> {
    let input = input.trim().to_lowercase();
    let caps = POSITION_PATTERNS
        .iter()
        .find_map(|re| re.captures(&input))
        .ok_or_else(|| ParseError::Unrecognized(input.clone()))?;
    let x_bit = caps[1].trim();
    let y_bit = caps[2].trim();

    let x = parse_number(x_bit)
        .or_else(|| parse_letter(x_bit))
        .ok_or_else(|| ParseError::InvalidX(x_bit.to_string()))?;
    let y = parse_number(y_bit).ok_or_else(|| ParseError::InvalidY(y_bit.to_string()))?;

    if x < 1 || y < 1 || x > size || y > size {
        return Err(ParseError::OutOfRange { x, y, size });
    }
    Ok((x, y))
}

/// Render `(x, y)` for the player, either as `"6, 5"` or as `"f, 5"`.
pub fn format_position((x, y): Position, numbers: bool) -> String {
    match LETTERS.get(x.wrapping_sub(1)) {
        Some(letter) if !numbers => std::format!("{}, {}", letter, y),
        _ => std::format!("{}, {}", x, y),
    }
}

fn unmishear(bit: &str) -> &str {
    MISHEARD
        .iter()
        .find(|(heard, _)| *heard == bit)
        .map_or(bit, |&(_, meant)| meant)
}

fn parse_number(bit: &str) -> Option<usize> {
    let bit = unmishear(bit);
    if !bit.is_empty() && bit.chars().all(|c| c.is_ascii_digit()) {
        return bit.parse().ok();
    }
    NUMBER_WORDS.iter().position(|w| *w == bit).map(|i| i + 1)
}

fn parse_letter(bit: &str) -> Option<usize> {
    LETTERS.iter().position(|l| *l == bit).map(|i| i + 1)
}
