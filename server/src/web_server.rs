use std::path::PathBuf;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, FromRequest, Query, Request, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::games::gravity_four::{Difficulty, GameStatus, NewGameRequest, Player};
use common::log;

use crate::game_holder::{GameHolder, MoveReport, PlayError};
use crate::pages;
use crate::server_config::ServerConfig;

/// Two base64 photos travel inside the create-game JSON body.
pub const CREATE_GAME_BODY_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct WebServerState {
    pub games: GameHolder,
    pub default_difficulty: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSetup {
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    #[serde(default)]
    pub difficulty: String,
}

impl PlayerSetup {
    fn is_complete(&self) -> bool {
        !self.player1.is_empty() && !self.player2.is_empty() && !self.difficulty.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: String,
    #[serde(default)]
    pub difficulty: String,
    pub photo1: Option<String>,
    pub photo2: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub col: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlayForm {
    pub column: String,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub board: Vec<Vec<u8>>,
    pub last_row: usize,
    pub last_column: usize,
    pub game_over: bool,
    pub current_player: Player,
    pub gravity_inverted: bool,
    pub turn_count: u32,
    pub winner: Option<Player>,
    pub is_draw: bool,
    pub message: String,
}

impl From<MoveReport> for PlayResponse {
    fn from(report: MoveReport) -> Self {
        let snapshot = report.snapshot;
        Self {
            game_over: snapshot.status.is_terminal(),
            board: snapshot.board,
            last_row: report.position.row,
            last_column: report.position.column,
            current_player: snapshot.current_player,
            gravity_inverted: snapshot.gravity_inverted,
            turn_count: snapshot.turn_count,
            winner: snapshot.winner,
            is_draw: snapshot.is_draw,
            message: report.message,
        }
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub fn build_router(state: WebServerState, static_files_path: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(splash))
        .route("/menu", get(menu).post(submit_menu))
        .route("/photo", get(photo))
        .route(
            "/create-game",
            post(create_game).layer(DefaultBodyLimit::max(CREATE_GAME_BODY_LIMIT)),
        )
        .route("/game", get(game))
        .route("/play", post(play))
        .route("/state", get(game_state))
        .route("/difficulties", get(difficulties))
        .route("/win", get(win))
        .route("/draw", get(draw))
        .route("/restart", get(restart).post(restart))
        .nest_service("/static", ServeDir::new(static_files_path))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(config: &ServerConfig, games: GameHolder) -> Result<(), String> {
    let addr = config.socket_addr()?;
    let state = WebServerState {
        games,
        default_difficulty: config.default_difficulty.clone(),
    };
    let app = build_router(state, PathBuf::from(&config.static_files_path));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind web server address {}: {}", addr, e))?;
    log!("Gravity Four server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

async fn splash() -> Html<String> {
    Html(pages::splash_page())
}

async fn menu(State(state): State<WebServerState>) -> Html<String> {
    Html(pages::menu_page(Difficulty::all(), &state.default_difficulty))
}

async fn submit_menu(Form(setup): Form<PlayerSetup>) -> Response {
    if !setup.is_complete() {
        return Redirect::to("/menu").into_response();
    }
    Html(pages::photo_page(&setup.player1, &setup.player2, &setup.difficulty)).into_response()
}

async fn photo(Query(setup): Query<PlayerSetup>) -> Response {
    if !setup.is_complete() {
        return Redirect::to("/menu").into_response();
    }
    Html(pages::photo_page(&setup.player1, &setup.player2, &setup.difficulty)).into_response()
}

async fn create_game(
    State(state): State<WebServerState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            log!("Create-game payload rejected: {}", rejection);
            return json_error(StatusCode::PAYLOAD_TOO_LARGE, "Photos are too large");
        }
        Err(rejection) => {
            log!("Invalid create-game payload: {}", rejection);
            return json_error(StatusCode::BAD_REQUEST, "Invalid JSON payload");
        }
    };

    log!(
        "Create game request: {} vs {} ({}), photo sizes {} / {}",
        request.player1,
        request.player2,
        request.difficulty,
        request.photo1.as_ref().map_or(0, String::len),
        request.photo2.as_ref().map_or(0, String::len)
    );

    if request.player1.is_empty() || request.player2.is_empty() || request.difficulty.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Missing player names or difficulty");
    }

    let new_game = NewGameRequest {
        player1_name: request.player1,
        player2_name: request.player2,
        difficulty: request.difficulty,
        player1_photo: request.photo1.filter(|p| !p.is_empty()),
        player2_photo: request.photo2.filter(|p| !p.is_empty()),
    };

    match state.games.start_game(new_game).await {
        Ok(_) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn game(State(state): State<WebServerState>) -> Response {
    let Some(shared) = state.games.current().await else {
        return Redirect::to("/menu").into_response();
    };
    let game = shared.read().await;
    Html(pages::game_page(&game)).into_response()
}

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

async fn play(State(state): State<WebServerState>, request: Request) -> Response {
    if is_json(&request) {
        play_json(state, request).await
    } else {
        play_form(state, request).await
    }
}

async fn play_json(state: WebServerState, request: Request) -> Response {
    let Json(payload) = match Json::<PlayRequest>::from_request(request, &state).await {
        Ok(payload) => payload,
        Err(rejection) => {
            log!("Invalid play payload: {}", rejection);
            return json_error(StatusCode::BAD_REQUEST, "Invalid JSON payload");
        }
    };

    match state.games.play(payload.col).await {
        Ok(report) => Json(PlayResponse::from(report)).into_response(),
        Err(PlayError::NoActiveGame) => {
            json_error(StatusCode::CONFLICT, PlayError::NoActiveGame.to_string())
        }
        Err(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn play_form(state: WebServerState, request: Request) -> Response {
    let column = match Form::<PlayForm>::from_request(request, &state).await {
        Ok(Form(form)) => form.column.trim().parse::<i64>().ok(),
        Err(_) => None,
    };
    let Some(column) = column else {
        return Redirect::to("/game").into_response();
    };

    match state.games.play(column).await {
        Ok(report) => match report.snapshot.status {
            GameStatus::Won(_) => Redirect::to("/win").into_response(),
            GameStatus::Draw => Redirect::to("/draw").into_response(),
            GameStatus::InProgress => Redirect::to("/game").into_response(),
        },
        Err(PlayError::NoActiveGame) => Redirect::to("/menu").into_response(),
        Err(_) => Redirect::to("/game").into_response(),
    }
}

async fn game_state(State(state): State<WebServerState>) -> Response {
    match state.games.snapshot().await {
        Some(snapshot) => Json(snapshot).into_response(),
        None => json_error(StatusCode::NOT_FOUND, PlayError::NoActiveGame.to_string()),
    }
}

async fn difficulties() -> Json<&'static [Difficulty]> {
    Json(Difficulty::all())
}

async fn win(State(state): State<WebServerState>) -> Response {
    let Some(shared) = state.games.current().await else {
        return Redirect::to("/menu").into_response();
    };
    let game = shared.read().await;
    match game.winner() {
        Some(winner) => Html(pages::win_page(&game, winner)).into_response(),
        None => Redirect::to("/game").into_response(),
    }
}

async fn draw(State(state): State<WebServerState>) -> Response {
    let Some(shared) = state.games.current().await else {
        return Redirect::to("/menu").into_response();
    };
    let game = shared.read().await;
    if game.is_draw() {
        Html(pages::draw_page(&game)).into_response()
    } else {
        Redirect::to("/game").into_response()
    }
}

async fn restart(State(state): State<WebServerState>) -> Redirect {
    state.games.restart().await;
    Redirect::to("/menu")
}
