use serde::{Serialize, Serializer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn id(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(&self) -> Cell {
        match self {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }
}

impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// Numeric owner as exposed to clients: 0 for empty, otherwise the player id.
    pub fn owner_id(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "player", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Direction pieces fall toward. Normal gravity stacks from the last row up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    #[default]
    Normal,
    Inverted,
}

impl Gravity {
    pub fn toggled(&self) -> Gravity {
        match self {
            Gravity::Normal => Gravity::Inverted,
            Gravity::Inverted => Gravity::Normal,
        }
    }

    pub fn is_inverted(&self) -> bool {
        *self == Gravity::Inverted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    pub player: Player,
    pub start: Position,
    pub end: Position,
    pub length: usize,
}

impl WinningLine {
    pub fn new(player: Player, start: Position, end: Position, length: usize) -> Self {
        Self { player, start, end, length }
    }
}
