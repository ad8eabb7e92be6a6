//! Fleet and board constants.

/// Side length used when the caller does not ask for a specific one.
pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Largest supported side length.
pub const MAX_BOARD_SIZE: usize = 10;

/// Standard fleet: one 4-deck, two 3-deck, three 2-deck and four 1-deck ships.
pub const DEFAULT_SHIPS: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Number of random origins tried for a single ship before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 5_000;

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < DEFAULT_SHIPS.len() {
        total += DEFAULT_SHIPS[i];
        i += 1;
    }
    total
};
