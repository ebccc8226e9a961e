use serde::Serialize;
use uuid::Uuid;

use crate::model::UserAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
    pub revealed: bool,
    pub mine: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    fn at(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            ..Self::default()
        }
    }

    /// A safe cell with no mine around it; revealing one starts a flood fill.
    pub fn is_empty(&self) -> bool {
        !self.mine && self.adjacent_mines == 0
    }
}

/// Row-major grid of cells; `cells[row * cols + col]` always has that row and col.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: u8,
    cols: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: u8, cols: u8) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::at(row, col)))
            .collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index_of(&self, row: u8, col: u8) -> Option<usize> {
        (row < self.rows && col < self.cols)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.cols).max(1))
    }

    pub fn flagged_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.flagged).count()
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.mine).count()
    }
}

impl std::ops::Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl std::ops::IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }
}

/// One game lifecycle. A Reset replaces the whole value, including `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: Uuid,
    pub phase: Phase,
    pub num_mines: u16,
    pub seconds_left: u16,
    pub board: Board,
}

impl Game {
    pub fn rows(&self) -> u8 {
        self.board.rows()
    }

    pub fn cols(&self) -> u8 {
        self.board.cols()
    }

    /// Flag budget: mines minus flags currently placed.
    pub fn flags_left(&self) -> u16 {
        let flagged = u16::try_from(self.board.flagged_count()).unwrap_or(u16::MAX);
        self.num_mines.saturating_sub(flagged)
    }

    pub fn remaining_hidden_non_mine_cells(&self) -> u16 {
        let hidden = self
            .board
            .cells()
            .iter()
            .filter(|cell| !cell.revealed && !cell.mine)
            .count();
        u16::try_from(hidden).unwrap_or(u16::MAX)
    }

    /// No flag budget left and nothing safe left hidden. Only the flag count
    /// is checked, not where the flags sit.
    pub fn is_won(&self) -> bool {
        self.flags_left() == 0 && self.remaining_hidden_non_mine_cells() == 0
    }

    /// What the single start/reset control does in the current phase.
    pub fn primary_control(&self) -> UserAction {
        match self.phase {
            Phase::Idle => UserAction::Start,
            Phase::Running | Phase::Won | Phase::Lost => UserAction::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(board: Board, num_mines: u16) -> Game {
        Game {
            id: Uuid::nil(),
            phase: Phase::Running,
            num_mines,
            seconds_left: 10,
            board,
        }
    }

    #[test]
    fn board_stamps_positions_row_major() {
        let board = Board::new(3, 4);
        assert_eq!(board.len(), 12);
        for (index, cell) in board.cells().iter().enumerate() {
            assert_eq!(board.index_of(cell.row, cell.col), Some(index));
        }
        assert_eq!(board[5].row, 1);
        assert_eq!(board[5].col, 1);
    }

    #[test]
    fn index_of_rejects_out_of_range() {
        let board = Board::new(2, 3);
        assert_eq!(board.index_of(1, 2), Some(5));
        assert_eq!(board.index_of(2, 0), None);
        assert_eq!(board.index_of(0, 3), None);
    }

    #[test]
    fn empty_means_safe_with_no_adjacent_mines() {
        let mut cell = Cell::default();
        assert!(cell.is_empty());
        cell.adjacent_mines = 2;
        assert!(!cell.is_empty());
        cell.adjacent_mines = 0;
        cell.mine = true;
        assert!(!cell.is_empty());
    }

    #[test]
    fn selectors_scan_the_board() {
        let mut board = Board::new(2, 2);
        board[0].mine = true;
        board[1].flagged = true;
        board[2].revealed = true;
        let game = game_with(board, 1);

        assert_eq!(game.flags_left(), 0);
        assert_eq!(game.remaining_hidden_non_mine_cells(), 2);
        assert!(!game.is_won());
    }

    #[test]
    fn win_needs_spent_flag_budget() {
        let mut board = Board::new(1, 3);
        board[0].mine = true;
        board[1].revealed = true;
        board[2].revealed = true;
        board[0].flagged = true;
        assert!(game_with(board.clone(), 1).is_won());

        board[0].flagged = false;
        assert!(!game_with(board, 1).is_won());
    }

    #[test]
    fn primary_control_starts_only_from_idle() {
        let mut game = game_with(Board::new(1, 1), 0);
        game.phase = Phase::Idle;
        assert_eq!(game.primary_control(), UserAction::Start);
        for phase in [Phase::Running, Phase::Won, Phase::Lost] {
            game.phase = phase;
            assert_eq!(game.primary_control(), UserAction::Reset);
        }
    }
}
