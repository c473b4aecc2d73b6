mod board;
mod difficulty;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::Board;
pub use difficulty::{DIFFICULTIES, Difficulty};
pub use error::{GameError, GameResult};
pub use game_state::{
    GRAVITY_FLIP_INTERVAL, GameSnapshot, GravityFourGame, NewGameRequest, UNKNOWN_PLAYER_NAME,
};
pub use types::{Cell, GameStatus, Gravity, Player, Position, WinningLine};
pub use win_detector::{WIN_LENGTH, check_win, check_win_with_line};
