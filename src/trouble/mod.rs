mod color;
pub use color::Color;

mod dice;
pub use dice::DiceMode;
pub use dice::MAX_ROLL;

mod board;
pub use board::Action;
pub use board::Board;
pub use board::HOME_LEN;
pub use board::MoveResult;

mod player;
pub use player::{Eater, FirstMover, LastMover, Player, RandomMover, Strategy, StrategyKind};
pub use player::{first_mover, seat_players};

mod game;
pub use game::{Game, GameError, GameState, Turn, run_game};

/// Number of seats at the table.
pub const PLAYERS: usize = 4;

/// Pieces per color.
pub const PIECES: u8 = 4;

/// Cells on the shared circular track.
pub const TRACK_LEN: usize = PLAYERS * color::SEGMENT_LEN;
