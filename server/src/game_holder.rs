use std::sync::Arc;

use common::games::gravity_four::{
    GameError, GameSnapshot, GravityFourGame, NewGameRequest, Position,
};
use common::log;
use thiserror::Error;
use tokio::sync::RwLock;

pub type SharedGame = Arc<RwLock<GravityFourGame>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayError {
    #[error("No game in progress")]
    NoActiveGame,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Result of an accepted move, read inside the same critical section as the move itself.
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub position: Position,
    pub snapshot: GameSnapshot,
    pub message: String,
}

/// Holds the single live game. Starting a game or restarting replaces it.
#[derive(Debug, Clone, Default)]
pub struct GameHolder {
    current: Arc<RwLock<Option<SharedGame>>>,
}

impl GameHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start_game(&self, request: NewGameRequest) -> Result<SharedGame, GameError> {
        let game = GravityFourGame::new(request)?;
        log!(
            "New game: {} vs {} on {} ({}x{})",
            game.player_name(1),
            game.player_name(2),
            game.difficulty().name,
            game.rows(),
            game.columns()
        );

        let shared = Arc::new(RwLock::new(game));
        let mut current = self.current.write().await;
        if current.is_some() {
            log!("Previous game abandoned");
        }
        *current = Some(shared.clone());
        Ok(shared)
    }

    pub async fn current(&self) -> Option<SharedGame> {
        self.current.read().await.clone()
    }

    pub async fn restart(&self) {
        let mut current = self.current.write().await;
        if current.take().is_some() {
            log!("Game discarded");
        }
    }

    pub async fn play(&self, column: i64) -> Result<MoveReport, PlayError> {
        let shared = self.current().await.ok_or(PlayError::NoActiveGame)?;
        let mut game = shared.write().await;
        let mover = game.current_player();

        match game.apply_move(column) {
            Ok(position) => {
                log!(
                    "Move {}: player {} -> ({}, {})",
                    game.turn_count(),
                    mover.id(),
                    position.row,
                    position.column
                );
                Ok(MoveReport {
                    position,
                    snapshot: game.snapshot(),
                    message: status_message(&game),
                })
            }
            Err(e) => {
                log!("Move rejected for column {}: {}", column, e);
                Err(PlayError::Game(e))
            }
        }
    }

    pub async fn snapshot(&self) -> Option<GameSnapshot> {
        let shared = self.current().await?;
        let game = shared.read().await;
        Some(game.snapshot())
    }
}

pub fn status_message(game: &GravityFourGame) -> String {
    if let Some(winner) = game.winner() {
        format!("{} wins", game.player_name(winner.id()))
    } else if game.is_draw() {
        "Draw".to_string()
    } else {
        format!("{} to play", game.player_name(game.current_player().id()))
    }
}
