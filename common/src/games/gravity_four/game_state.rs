use serde::Serialize;

use super::board::Board;
use super::difficulty::Difficulty;
use super::error::{GameError, GameResult};
use super::types::{GameStatus, Gravity, Player, Position, WinningLine};
use super::win_detector::check_win_with_line;

/// Number of placed pieces between two gravity flips.
pub const GRAVITY_FLIP_INTERVAL: u32 = 5;

pub const UNKNOWN_PLAYER_NAME: &str = "?";

#[derive(Debug, Clone)]
pub struct NewGameRequest {
    pub player1_name: String,
    pub player2_name: String,
    pub difficulty: String,
    pub player1_photo: Option<String>,
    pub player2_photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GravityFourGame {
    board: Board,
    difficulty: Difficulty,
    current_player: Player,
    status: GameStatus,
    turn_count: u32,
    gravity: Gravity,
    player1_name: String,
    player2_name: String,
    player1_photo: Option<String>,
    player2_photo: Option<String>,
    last_move: Option<Position>,
    winning_line: Option<WinningLine>,
}

impl GravityFourGame {
    pub fn new(request: NewGameRequest) -> GameResult<Self> {
        let difficulty = Difficulty::from_key(&request.difficulty)?;

        Ok(Self {
            board: Board::new(difficulty.rows, difficulty.columns),
            difficulty,
            current_player: Player::One,
            status: GameStatus::InProgress,
            turn_count: 0,
            gravity: Gravity::Normal,
            player1_name: request.player1_name,
            player2_name: request.player2_name,
            player1_photo: request.player1_photo,
            player2_photo: request.player2_photo,
            last_move: None,
            winning_line: None,
        })
    }

    /// Drops the current player's piece into `column` and returns where it landed.
    ///
    /// A win or a draw freezes the game: the turn does not pass and gravity does not flip.
    /// Any error leaves the game untouched.
    pub fn apply_move(&mut self, column: i64) -> GameResult<Position> {
        if self.status.is_terminal() {
            return Err(GameError::MoveAfterTerminal);
        }

        let columns = self.board.columns();
        let column = usize::try_from(column)
            .ok()
            .filter(|&c| c < columns)
            .ok_or(GameError::InvalidColumn { column, columns })?;

        let row = self
            .board
            .landing_row(column, self.gravity)
            .ok_or(GameError::ColumnFull(column))?;

        let position = Position::new(row, column);
        self.board.set(position, self.current_player.cell());
        self.turn_count += 1;
        self.last_move = Some(position);

        if let Some(line) = check_win_with_line(&self.board, position) {
            self.status = GameStatus::Won(self.current_player);
            self.winning_line = Some(line);
            return Ok(position);
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            return Ok(position);
        }

        self.current_player = self.current_player.opponent();

        if self.turn_count % GRAVITY_FLIP_INTERVAL == 0 {
            self.gravity = self.gravity.toggled();
        }

        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.status == GameStatus::Draw
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn gravity_inverted(&self) -> bool {
        self.gravity.is_inverted()
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn player_name(&self, player_id: u8) -> &str {
        match Player::from_id(player_id) {
            Some(Player::One) => &self.player1_name,
            Some(Player::Two) => &self.player2_name,
            None => UNKNOWN_PLAYER_NAME,
        }
    }

    pub fn player_photo(&self, player_id: u8) -> Option<&str> {
        match Player::from_id(player_id) {
            Some(Player::One) => self.player1_photo.as_deref(),
            Some(Player::Two) => self.player2_photo.as_deref(),
            None => None,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_owner_ids(),
            rows: self.rows(),
            columns: self.columns(),
            difficulty: self.difficulty.key.to_string(),
            current_player: self.current_player,
            status: self.status,
            winner: self.winner(),
            is_draw: self.is_draw(),
            turn_count: self.turn_count,
            gravity_inverted: self.gravity_inverted(),
            player1_name: self.player1_name.clone(),
            player2_name: self.player2_name.clone(),
            last_move: self.last_move,
            winning_line: self.winning_line,
        }
    }
}

/// Plain-data view of a game for rendering or JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: Vec<Vec<u8>>,
    pub rows: usize,
    pub columns: usize,
    pub difficulty: String,
    pub current_player: Player,
    pub status: GameStatus,
    pub winner: Option<Player>,
    pub is_draw: bool,
    pub turn_count: u32,
    pub gravity_inverted: bool,
    pub player1_name: String,
    pub player2_name: String,
    pub last_move: Option<Position>,
    pub winning_line: Option<WinningLine>,
}
