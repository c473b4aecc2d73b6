use super::board::Board;
use super::types::{Cell, Position, WinningLine};

pub const WIN_LENGTH: usize = 4;

/// Line directions as (row step, column step): horizontal, vertical, and the two diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Checks the four lines through the piece at `anchor`. Only lines through the
/// most recently placed piece can hold a new run, so the rest of the board is not scanned.
pub fn check_win(board: &Board, anchor: Position) -> bool {
    check_win_with_line(board, anchor).is_some()
}

pub fn check_win_with_line(board: &Board, anchor: Position) -> Option<WinningLine> {
    let player = board.get(anchor.row, anchor.column)?.owner()?;
    let target = player.cell();

    for (row_step, column_step) in DIRECTIONS {
        let backward = count_run(board, anchor, -row_step, -column_step, target);
        let forward = count_run(board, anchor, row_step, column_step, target);
        let length = backward + 1 + forward;

        if length >= WIN_LENGTH {
            let start = offset(anchor, -row_step, -column_step, backward)?;
            let end = offset(anchor, row_step, column_step, forward)?;
            return Some(WinningLine::new(player, start, end, length));
        }
    }

    None
}

fn count_run(
    board: &Board,
    anchor: Position,
    row_step: isize,
    column_step: isize,
    target: Cell,
) -> usize {
    let mut count = 0;
    while let Some(next) = offset(anchor, row_step, column_step, count + 1) {
        if board.get(next.row, next.column) != Some(target) {
            break;
        }
        count += 1;
    }
    count
}

fn offset(anchor: Position, row_step: isize, column_step: isize, distance: usize) -> Option<Position> {
    let distance = distance as isize;
    let row = anchor.row as isize + row_step * distance;
    let column = anchor.column as isize + column_step * distance;
    if row < 0 || column < 0 {
        return None;
    }
    Some(Position::new(row as usize, column as usize))
}
