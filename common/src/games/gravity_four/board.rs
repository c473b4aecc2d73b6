use super::types::{Cell, Gravity, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    columns: usize,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Empty; columns]; rows],
            rows,
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Row a piece dropped into `column` comes to rest in, or `None` when the
    /// column has no empty cell. Normal gravity fills from the last row upward,
    /// inverted gravity from row 0 downward.
    pub fn landing_row(&self, column: usize, gravity: Gravity) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        let is_free = |row: &usize| self.cells[*row][column].is_empty();
        match gravity {
            Gravity::Normal => (0..self.rows).rev().find(is_free),
            Gravity::Inverted => (0..self.rows).find(is_free),
        }
    }

    pub(super) fn set(&mut self, position: Position, cell: Cell) {
        self.cells[position.row][position.column] = cell;
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| !cell.is_empty()).count())
            .sum()
    }

    pub fn to_owner_ids(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(Cell::owner_id).collect())
            .collect()
    }
}
