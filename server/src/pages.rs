use common::games::gravity_four::{Difficulty, GravityFourGame, Player};

use crate::game_holder::status_message;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Gravity Four</title>
<link rel="stylesheet" href="/static/style.css">
<script src="/static/fullscreen.js" defer></script>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

/// Only inline image data is embedded; anything else could point the page elsewhere.
fn photo_tag(photo: Option<&str>, alt: &str) -> String {
    match photo {
        Some(uri) if uri.starts_with("data:image/") => format!(
            r#"<img class="avatar" src="{}" alt="{}">"#,
            escape_html(uri),
            escape_html(alt)
        ),
        _ => String::new(),
    }
}

pub fn splash_page() -> String {
    layout(
        "Welcome",
        r#"<main class="splash">
<h1>Gravity Four</h1>
<p>Line up four pieces. Every fifth piece turns gravity upside down.</p>
<a class="button" href="/menu">Play</a>
</main>"#,
    )
}

pub fn menu_page(difficulties: &[Difficulty], default_difficulty: &str) -> String {
    let options: String = difficulties
        .iter()
        .map(|d| {
            let selected = if d.key == default_difficulty { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{} ({}x{})</option>"#,
                d.key, selected, d.name, d.rows, d.columns
            )
        })
        .collect();

    layout(
        "New game",
        &format!(
            r#"<main class="menu">
<h1>New game</h1>
<form method="post" action="/menu">
<label>Player 1 <input name="player1" required></label>
<label>Player 2 <input name="player2" required></label>
<label>Difficulty <select name="difficulty">{options}</select></label>
<button type="submit">Continue</button>
</form>
</main>"#
        ),
    )
}

pub fn photo_page(player1: &str, player2: &str, difficulty: &str) -> String {
    layout(
        "Photos",
        &format!(
            r#"<main class="photo">
<h1>Photos</h1>
<form id="photo-form" data-player1="{p1}" data-player2="{p2}" data-difficulty="{diff}">
<label>{p1} <input type="file" accept="image/*" name="photo1"></label>
<label>{p2} <input type="file" accept="image/*" name="photo2"></label>
<button type="submit">Start</button>
</form>
<p class="error" id="photo-error"></p>
</main>
<script src="/static/photo.js"></script>"#,
            p1 = escape_html(player1),
            p2 = escape_html(player2),
            diff = escape_html(difficulty)
        ),
    )
}

fn board_table(game: &GravityFourGame) -> String {
    let snapshot = game.snapshot();
    let winning_cells: Vec<(usize, usize)> = game
        .winning_line()
        .map(|line| {
            let length = line.length as isize;
            let row_step = (line.end.row as isize - line.start.row as isize).signum();
            let column_step = (line.end.column as isize - line.start.column as isize).signum();
            (0..length)
                .map(|i| {
                    (
                        (line.start.row as isize + row_step * i) as usize,
                        (line.start.column as isize + column_step * i) as usize,
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let mut html = String::from(r#"<table class="board"><tr>"#);
    for column in 0..snapshot.columns {
        let disabled = if game.is_over() { " disabled" } else { "" };
        html.push_str(&format!(
            r#"<th><form method="post" action="/play"><button class="col-btn" name="column" value="{column}" data-col="{column}"{disabled}>&#8595;</button></form></th>"#
        ));
    }
    html.push_str("</tr>");

    for (row, cells) in snapshot.board.iter().enumerate() {
        html.push_str("<tr>");
        for (column, owner) in cells.iter().enumerate() {
            let highlight = if winning_cells.contains(&(row, column)) { " winning" } else { "" };
            html.push_str(&format!(
                r#"<td class="cell p{owner}{highlight}" data-row="{row}" data-col="{column}"></td>"#
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn player_badge(game: &GravityFourGame, player: Player) -> String {
    let name = game.player_name(player.id());
    let active = if !game.is_over() && game.current_player() == player { " active" } else { "" };
    format!(
        r#"<div class="player p{id}{active}" id="player{id}">{photo}<span>{name}</span></div>"#,
        id = player.id(),
        photo = photo_tag(game.player_photo(player.id()), name),
        name = escape_html(name)
    )
}

pub fn game_page(game: &GravityFourGame) -> String {
    let gravity = if game.gravity_inverted() { "inverted" } else { "normal" };
    layout(
        "Game",
        &format!(
            r#"<main class="game" data-gravity="{gravity}">
<header>
{p1}
<div class="status"><p id="message">{message}</p><p>Turn <span id="turn">{turn}</span>, gravity <span id="gravity">{gravity}</span></p></div>
{p2}
</header>
{board}
<div id="overlay-end" hidden><p class="end-text"></p><a href="/restart">New game</a></div>
<a class="restart" href="/restart">Restart</a>
</main>
<script src="/static/game.js"></script>"#,
            p1 = player_badge(game, Player::One),
            p2 = player_badge(game, Player::Two),
            message = escape_html(&status_message(game)),
            turn = game.turn_count(),
            board = board_table(game)
        ),
    )
}

pub fn win_page(game: &GravityFourGame, winner: Player) -> String {
    let name = game.player_name(winner.id());
    layout(
        "Victory",
        &format!(
            r#"<main class="result win">
<h1>{name} wins!</h1>
{photo}
<p>Finished after {turns} pieces.</p>
{board}
<a class="button" href="/restart">Play again</a>
</main>"#,
            name = escape_html(name),
            photo = photo_tag(game.player_photo(winner.id()), name),
            turns = game.turn_count(),
            board = board_table(game)
        ),
    )
}

pub fn draw_page(game: &GravityFourGame) -> String {
    layout(
        "Draw",
        &format!(
            r#"<main class="result draw">
<h1>Draw</h1>
<p>{p1} and {p2} filled the board without a winner.</p>
{board}
<a class="button" href="/restart">Play again</a>
</main>"#,
            p1 = escape_html(game.player_name(1)),
            p2 = escape_html(game.player_name(2)),
            board = board_table(game)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::gravity_four::{DIFFICULTIES, NewGameRequest};

    fn game_with_names(player1: &str, player2: &str) -> GravityFourGame {
        GravityFourGame::new(NewGameRequest {
            player1_name: player1.to_string(),
            player2_name: player2.to_string(),
            difficulty: "easy".to_string(),
            player1_photo: Some("javascript:alert(1)".to_string()),
            player2_photo: Some("data:image/png;base64,iVBOR".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_every_page_loads_fullscreen_toggle() {
        let game = game_with_names("Alice", "Bob");
        for html in [
            splash_page(),
            menu_page(&DIFFICULTIES, "easy"),
            photo_page("Alice", "Bob", "easy"),
            game_page(&game),
            draw_page(&game),
        ] {
            assert!(html.contains(r#"<script src="/static/fullscreen.js" defer></script>"#));
        }
    }

    #[test]
    fn test_menu_lists_every_difficulty() {
        let html = menu_page(&DIFFICULTIES, "normal");
        for difficulty in DIFFICULTIES.iter() {
            assert!(html.contains(&format!(r#"value="{}""#, difficulty.key)));
        }
        assert!(html.contains(r#"value="normal" selected"#));
    }

    #[test]
    fn test_game_page_escapes_names_and_filters_photos() {
        let game = game_with_names("<script>", "Bob");
        let html = game_page(&game);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("data:image/png;base64,iVBOR"));
        assert!(html.contains("&lt;script&gt; to play"));
    }

    #[test]
    fn test_game_page_renders_board_cells() {
        let mut game = game_with_names("Alice", "Bob");
        game.apply_move(2).unwrap();
        let html = game_page(&game);
        assert_eq!(html.matches(r#"class="col-btn""#).count(), 7);
        assert_eq!(html.matches("<td ").count(), 42);
        assert!(html.contains(r#"class="cell p1" data-row="5" data-col="2""#));
    }

    #[test]
    fn test_win_page_highlights_line() {
        let mut game = game_with_names("Alice", "Bob");
        for column in [4, 1, 2, 1, 5, 1, 6, 3, 2, 0, 3] {
            game.apply_move(column).unwrap();
        }
        let html = win_page(&game, Player::One);
        assert!(html.contains("Alice wins!"));
        assert_eq!(html.matches(" winning\"").count(), 4);
        assert!(html.contains("disabled"));
    }
}
