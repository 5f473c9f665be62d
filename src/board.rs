//! Game board representation and row clearing

use crate::score::points_for_rows;
use crate::settings::GameConfig;
use ratatui::style::Color;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Result of a single row-clearing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Number of full rows removed
    pub rows: usize,
    /// Score delta for removing them together
    pub points: u32,
}

/// The settled cells of the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: usize,
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Create a new empty board sized from the config
    pub fn new(config: &GameConfig) -> Self {
        Self {
            columns: config.columns,
            cells: vec![vec![Cell::Empty; config.columns]; config.rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Translate signed coordinates into grid indices, None if off the board
    fn index(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col).ok()?;
        let row = usize::try_from(row).ok()?;
        (col < self.columns && row < self.rows()).then_some((col, row))
    }

    /// Get the cell at (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|(c, r)| self.cells[r][c])
    }

    /// Whether (col, row) blocks a piece.
    ///
    /// Columns outside the board and rows at or below the floor always block.
    /// Rows above the top (negative) never do, so a piece may overhang the top edge.
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        if col < 0 || col >= self.columns as i32 || row >= self.rows() as i32 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.cells[row as usize][col as usize].is_filled()
    }

    /// Write a color into each (col, row).
    /// Coordinates off the board are skipped; returns false if any were.
    pub fn place(&mut self, positions: &[(i32, i32)], color: Color) -> bool {
        let mut all_placed = true;
        for &(col, row) in positions {
            match self.index(col, row) {
                Some((c, r)) => self.cells[r][c] = Cell::Filled(color),
                None => all_placed = false,
            }
        }
        all_placed
    }

    /// Remove every full row at once and drop the rows above into place
    pub fn clear_full_rows(&mut self) -> LineClear {
        let before = self.rows();
        self.cells.retain(|row| !row.iter().all(Cell::is_filled));
        let cleared = before - self.cells.len();

        // Refill the top with empty rows
        let mut cells = vec![vec![Cell::Empty; self.columns]; cleared];
        cells.append(&mut self.cells);
        self.cells = cells;

        LineClear {
            rows: cleared,
            points: points_for_rows(cleared),
        }
    }

    /// Whether anything has settled in the top row (the game-over signal)
    pub fn top_row_occupied(&self) -> bool {
        self.cells
            .first()
            .is_some_and(|row| row.iter().any(Cell::is_filled))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }

    /// Rows from top to bottom, for drawing
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(&GameConfig::default())
    }

    fn fill_row(board: &mut Board, row: i32, color: Color) {
        let positions: Vec<_> = (0..board.columns() as i32).map(|c| (c, row)).collect();
        assert!(board.place(&positions, color));
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board();
        assert!(board.is_empty());
        assert_eq!(board.columns(), 10);
        assert_eq!(board.rows(), 20);
        assert!(!board.top_row_occupied());
    }

    #[test]
    fn test_place_and_get() {
        let mut board = board();
        assert!(board.place(&[(5, 5)], Color::Red));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(Color::Red)));
        assert!(board.is_occupied(5, 5));
        assert!(!board.is_occupied(4, 5));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = board();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(10, 0), None);
        assert_eq!(board.get(0, 20), None);
    }

    #[test]
    fn test_walls_and_floor_are_occupied() {
        let board = board();
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(3, 20));
        assert!(board.is_occupied(3, 100));
    }

    #[test]
    fn test_rows_above_top_are_free() {
        let board = board();
        assert!(!board.is_occupied(3, -1));
        assert!(!board.is_occupied(0, -5));
        // Walls still apply above the top
        assert!(board.is_occupied(-1, -1));
    }

    #[test]
    fn test_place_skips_out_of_bounds() {
        let mut board = board();
        assert!(!board.place(&[(0, 0), (10, 0), (0, -1), (0, 20)], Color::Blue));
        assert_eq!(board.get(0, 0), Some(Cell::Filled(Color::Blue)));
        // Nothing wrapped onto the next row or column
        assert_eq!(board.get(0, 1), Some(Cell::Empty));
        assert_eq!(board.get(9, 0), Some(Cell::Empty));
        assert_eq!(board.get(0, 19), Some(Cell::Empty));
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = board();
        board.place(&[(0, 19), (1, 19)], Color::Red);
        let snapshot = board.clone();
        assert_eq!(board.clear_full_rows(), LineClear { rows: 0, points: 0 });
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_clear_single_row() {
        let mut board = board();
        fill_row(&mut board, 19, Color::Green);
        board.place(&[(0, 18)], Color::Red);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, LineClear { rows: 1, points: 100 });
        // The block from row 18 drops onto row 19
        assert_eq!(board.get(0, 19), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.get(0, 18), Some(Cell::Empty));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = board();
        fill_row(&mut board, 2, Color::Green);
        fill_row(&mut board, 5, Color::Green);
        // Partial rows: above both, between them and below them
        board.place(&[(1, 1)], Color::Red);
        board.place(&[(2, 3)], Color::Blue);
        board.place(&[(3, 4)], Color::Yellow);
        board.place(&[(4, 7)], Color::Magenta);

        let cleared = board.clear_full_rows();
        assert_eq!(cleared, LineClear { rows: 2, points: 300 });

        // Row 1 was above both cleared rows: down by two
        assert_eq!(board.get(1, 3), Some(Cell::Filled(Color::Red)));
        // Rows 3 and 4 were between them: down by one
        assert_eq!(board.get(2, 4), Some(Cell::Filled(Color::Blue)));
        assert_eq!(board.get(3, 5), Some(Cell::Filled(Color::Yellow)));
        // Row 7 was below both: unchanged
        assert_eq!(board.get(4, 7), Some(Cell::Filled(Color::Magenta)));
        // Two fresh empty rows on top
        assert!(board.rows_iter().take(2).all(|row| row.iter().all(Cell::is_empty)));
        assert_eq!(board.rows(), 20);
        assert_eq!(board.rows_iter().filter(|row| row.iter().any(Cell::is_filled)).count(), 4);
    }

    #[test]
    fn test_clear_four_rows() {
        let mut board = board();
        for row in 16..20 {
            fill_row(&mut board, row, Color::Cyan);
        }
        assert_eq!(board.clear_full_rows(), LineClear { rows: 4, points: 800 });
        assert!(board.is_empty());
    }

    #[test]
    fn test_top_row_occupied() {
        let mut board = board();
        board.place(&[(9, 1)], Color::Red);
        assert!(!board.top_row_occupied());
        board.place(&[(9, 0)], Color::Red);
        assert!(board.top_row_occupied());
    }
}
