use std::collections::{HashSet, VecDeque};

use tracing::trace;

use super::neighbors::neighbors;
use crate::data::Board;

/// Breadth-first reveal from an empty cell at `root`.
///
/// Hidden, unflagged, non-mine neighbors are revealed; only the empty ones
/// are expanded further, so the fill stops at the first ring of numbered
/// cells. Returns how many cells were newly revealed (the root excluded).
pub fn flood_reveal(board: &mut Board, root: usize) -> usize {
    let mut queue = VecDeque::from([root]);
    let mut visited = HashSet::from([root]);
    let mut revealed = 0;

    while let Some(current) = queue.pop_front() {
        for next in neighbors(board, current) {
            let cell = board[next];
            if visited.contains(&next) || cell.revealed || cell.mine || cell.flagged {
                continue;
            }

            visited.insert(next);
            board[next].revealed = true;
            revealed += 1;

            if cell.is_empty() {
                queue.push_back(next);
            }
        }
    }

    trace!("Flood fill from {} revealed {} cells", root, revealed);
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a board from rows of `.` (safe), `*` (mine) and `F` (flagged safe cell).
    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows.len() as u8, rows[0].len() as u8);
        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let index = row * line.len() + col;
                match symbol {
                    '*' => board[index].mine = true,
                    'F' => board[index].flagged = true,
                    _ => {}
                }
            }
        }
        for index in 0..board.len() {
            let count = neighbors(&board, index)
                .iter()
                .filter(|&&n| board[n].mine)
                .count();
            if !board[index].mine {
                board[index].adjacent_mines = count as u8;
            }
        }
        board
    }

    fn revealed(board: &Board) -> Vec<usize> {
        (0..board.len()).filter(|&i| board[i].revealed).collect()
    }

    #[test]
    fn stops_at_numbered_border() {
        let mut board = board_from(&["...", "...", "..*"]);
        board[0].revealed = true;

        let count = flood_reveal(&mut board, 0);

        assert_eq!(count, 7);
        assert_eq!(revealed(&board), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(!board[8].revealed);
    }

    #[test]
    fn does_not_leak_through_a_wall_of_numbers() {
        let mut board = board_from(&["..*..", "..*..", "..*.."]);
        board[0].revealed = true;

        flood_reveal(&mut board, 0);

        assert_eq!(revealed(&board), vec![0, 1, 5, 6, 10, 11]);
    }

    #[test]
    fn never_reveals_flagged_cells() {
        let mut board = board_from(&["..F", "...", "..."]);
        board[6].revealed = true;

        flood_reveal(&mut board, 6);

        assert!(!board[2].revealed);
        assert!(board[2].flagged);
        assert_eq!(revealed(&board).len(), 8);
    }

    #[test]
    fn skips_already_revealed_cells() {
        let mut board = board_from(&["...."]);
        board[0].revealed = true;
        board[3].revealed = true;

        let count = flood_reveal(&mut board, 0);

        assert_eq!(count, 2);
        assert_eq!(revealed(&board), vec![0, 1, 2, 3]);
    }
}
