use thiserror::Error;

pub type GameResult<T> = std::result::Result<T, GameError>;

/// Reasons a game cannot be created or a move cannot be applied.
/// A rejected move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Column {column} is out of range (board has {columns} columns)")]
    InvalidColumn { column: i64, columns: usize },

    #[error("Column {0} is full")]
    ColumnFull(usize),

    #[error("Unknown difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("Game is already over")]
    MoveAfterTerminal,
}
