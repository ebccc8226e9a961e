use smallvec::SmallVec;

use crate::data::Board;

pub type Neighbors = SmallVec<[usize; 8]>;

/// Indices of the cells around `index`, in the order top, top-left,
/// top-right, left, right, bottom, bottom-left, bottom-right. Positions
/// past a grid edge are skipped.
pub fn neighbors(board: &Board, index: usize) -> Neighbors {
    let mut result = Neighbors::new();
    let Some(cell) = board.get(index) else {
        return result;
    };

    let (row, col) = (cell.row, cell.col);
    let last_row = board.rows() - 1;
    let last_col = board.cols() - 1;
    let mut push = |row: u8, col: u8| {
        if let Some(index) = board.index_of(row, col) {
            result.push(index);
        }
    };

    if row != 0 {
        push(row - 1, col);
        if col != 0 {
            push(row - 1, col - 1);
        }
        if col != last_col {
            push(row - 1, col + 1);
        }
    }

    if col != 0 {
        push(row, col - 1);
    }
    if col != last_col {
        push(row, col + 1);
    }

    if row != last_row {
        push(row + 1, col);
        if col != 0 {
            push(row + 1, col - 1);
        }
        if col != last_col {
            push(row + 1, col + 1);
        }
    }

    result
}
