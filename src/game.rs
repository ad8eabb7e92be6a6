use alloc::vec::Vec;

use log::{debug, info};
use rand::Rng;

use crate::{
    ai::{Targeting, TargetingState},
    board::Board,
    common::{CellState, GameError, GameStatus, Position, ShotOutcome},
    config::DEFAULT_SHIPS,
    placement::generate_field,
    shot::{count_sunk_ships, resolve_shot},
};

/// Serializable overall game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub ships: Vec<usize>,
    pub field: Board,
    pub targeting: TargetingState,
    pub ships_remaining: usize,
    pub enemy_ships_remaining: usize,
    pub last_enemy_shot_position: Option<Position>,
}

/// One game session: our fleet, our picture of the enemy fleet and the
/// fleet counters that decide the end of the game.
#[derive(Debug, Clone)]
pub struct Game {
    ships: Vec<usize>,
    field: Board,
    targeting: Targeting,
    ships_remaining: usize,
    enemy_ships_remaining: usize,
    last_enemy_shot: Option<Position>,
}

impl Game {
    /// Start a game on a `size × size` board.
    ///
    /// `ships` defaults to [`DEFAULT_SHIPS`]. Without an explicit `field` the
    /// fleet is laid out at random; a supplied field must have `size²` cells
    /// and may only hold open water, ships or hits. Ships already sunk on a
    /// supplied field are taken off `ships_remaining`.
    pub fn start_new_game<R: Rng + ?Sized>(
        size: usize,
        ships: Option<&[usize]>,
        field: Option<Vec<CellState>>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let ships = ships.unwrap_or(&DEFAULT_SHIPS[..]).to_vec();
        let field = match field {
            Some(cells) => {
                let board = Board::from_cells(size, cells)?;
                if let Some((index, &state)) = board
                    .cells()
                    .iter()
                    .enumerate()
                    .find(|(_, c)| matches!(c, CellState::Blocked | CellState::Skip))
                {
                    return Err(GameError::InvalidFieldCell { index, state });
                }
                board
            }
            None => generate_field(size, &ships, rng)?,
        };
        let targeting = Targeting::new(size)?;
        let already_sunk = count_sunk_ships(&field);
        if already_sunk > ships.len() {
            return Err(GameError::TooManySunkShips {
                sunk: already_sunk,
                fleet: ships.len(),
            });
        }
        info!("new game on {0}x{0} board with {1} ships", size, ships.len());
        Ok(Self {
            ships_remaining: ships.len() - already_sunk,
            enemy_ships_remaining: ships.len(),
            ships,
            field,
            targeting,
            last_enemy_shot: None,
        })
    }

    /// Standard 10×10 game with the default fleet placed at random.
    pub fn with_defaults<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        Self::start_new_game(crate::config::DEFAULT_BOARD_SIZE, None, None, rng)
    }

    /// Restore a game from a previously saved state.
    ///
    /// Both boards must have the same size and neither counter may exceed
    /// the fleet size.
    pub fn from_state(state: GameState) -> Result<Self, GameError> {
        let own = state.field.size();
        let opponent = state.targeting.model.size();
        if own != opponent {
            return Err(GameError::BoardSizeMismatch { own, opponent });
        }
        let fleet = state.ships.len();
        for remaining in [state.ships_remaining, state.enemy_ships_remaining] {
            if remaining > fleet {
                return Err(GameError::CounterOutOfRange { remaining, fleet });
            }
        }
        Ok(Self {
            ships: state.ships,
            field: state.field,
            targeting: Targeting::from_state(state.targeting),
            ships_remaining: state.ships_remaining,
            enemy_ships_remaining: state.enemy_ships_remaining,
            last_enemy_shot: state.last_enemy_shot_position,
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            ships: self.ships.clone(),
            field: self.field.clone(),
            targeting: self.targeting.state(),
            ships_remaining: self.ships_remaining,
            enemy_ships_remaining: self.enemy_ships_remaining,
            last_enemy_shot_position: self.last_enemy_shot,
        }
    }

    pub fn size(&self) -> usize {
        self.field.size()
    }

    /// Fleet lengths this game was started with.
    pub fn ships(&self) -> &[usize] {
        &self.ships
    }

    /// Our own fleet.
    pub fn own_board(&self) -> &Board {
        &self.field
    }

    /// Everything learnt about the enemy fleet so far.
    pub fn opponent_board(&self) -> &Board {
        self.targeting.model()
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    pub fn ships_remaining(&self) -> usize {
        self.ships_remaining
    }

    pub fn enemy_ships_remaining(&self) -> usize {
        self.enemy_ships_remaining
    }

    pub fn last_enemy_shot_position(&self) -> Option<Position> {
        self.last_enemy_shot
    }

    /// Number of our ships found sunk by scanning the board. Always equals
    /// `ships().len() - ships_remaining()`.
    pub fn sunk_ship_count(&self) -> usize {
        count_sunk_ships(&self.field)
    }

    /// Handle an enemy shot at our board.
    pub fn handle_enemy_shot(&mut self, pos: Position) -> Result<ShotOutcome, GameError> {
        let report = resolve_shot(&mut self.field, pos)?;
        self.last_enemy_shot = Some(pos);
        if report.newly_sunk {
            self.ships_remaining = self.ships_remaining.saturating_sub(1);
        }
        debug!(
            "enemy shot at {:?}: {}, {} ship(s) left",
            pos, report.outcome, self.ships_remaining
        );
        Ok(report.outcome)
    }

    /// Handle an enemy shot named in text, e.g. `"b 7"` or `"eight four"`.
    ///
    /// Unparseable input comes back as [`GameError::Parse`] and leaves the
    /// game untouched.
    #[cfg(feature = "std")]
    pub fn handle_enemy_utterance(&mut self, input: &str) -> Result<ShotOutcome, GameError> {
        let pos = crate::coords::parse_position(input, self.size())?;
        self.handle_enemy_shot(pos)
    }

    /// Decide where to shoot next.
    pub fn choose_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Position, GameError> {
        self.targeting.choose_shot(rng)
    }

    /// Record the enemy's reply to our last shot.
    pub fn process_enemy_reply(&mut self, outcome: ShotOutcome) -> Result<(), GameError> {
        if self.targeting.process_enemy_reply(outcome)? {
            self.enemy_ships_remaining = self.enemy_ships_remaining.saturating_sub(1);
        }
        self.log_enemy_field();
        Ok(())
    }

    /// Our last shot, for repeating it to the opponent.
    pub fn repeat(&self) -> Option<Position> {
        self.targeting.last_shot_position()
    }

    pub fn reset_last_shot(&mut self) {
        self.targeting.reset_last_shot();
    }

    pub fn is_victory(&self) -> bool {
        self.enemy_ships_remaining == 0
    }

    pub fn is_defeat(&self) -> bool {
        self.ships_remaining == 0
    }

    pub fn is_end_game(&self) -> bool {
        self.is_victory() || self.is_defeat()
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        if self.is_defeat() {
            GameStatus::Lost
        } else if self.is_victory() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// Dump both grids at `info` level.
    pub fn log_fields(&self) {
        info!("own field:\n{}", self.field);
        self.log_enemy_field();
    }

    fn log_enemy_field(&self) {
        info!("enemy field:\n{}", self.targeting.model());
    }
}
