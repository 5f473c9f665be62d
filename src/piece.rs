//! Active falling piece logic

use crate::board::Board;
use crate::settings::GameConfig;
use crate::tetromino::{Shape, TetrominoType, occupied, rotate_cw, shape_width};
use ratatui::style::Color;

/// What a gravity step did to the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fell one row
    Moved,
    /// Could not fall and locked into the board
    Locked,
    /// Already landed; nothing happened
    Idle,
}

/// An active falling piece.
///
/// Falls until it lands, then locks into the board exactly once. A landed piece
/// ignores every further command.
#[derive(Debug, Clone)]
pub struct ActivePiece {
    kind: TetrominoType,
    shape: Shape,
    color: Color,
    /// Origin (top-left of the shape) in board coordinates, row 0 at the top
    col: i32,
    row: i32,
    landed: bool,
}

impl ActivePiece {
    /// Create a piece horizontally centred on the top row
    pub fn spawn(kind: TetrominoType, color: Color, config: &GameConfig) -> Self {
        let shape = kind.shape();
        let col = (config.columns / 2) as i32 - (shape_width(&shape) / 2) as i32;
        Self::at(kind, color, col, 0)
    }

    /// Create a piece at an explicit origin
    pub fn at(kind: TetrominoType, color: Color, col: i32, row: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color,
            col,
            row,
            landed: false,
        }
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    /// Absolute (col, row) of every occupied cell
    pub fn cells(&self) -> Vec<(i32, i32)> {
        occupied(&self.shape)
            .map(|(c, r)| (self.col + c, self.row + r))
            .collect()
    }

    /// Whether `shape` placed with its origin at (col, row) hits a wall, the floor
    /// or a settled cell. Cells above the top edge never collide.
    pub fn collides(col: i32, row: i32, shape: &Shape, board: &Board) -> bool {
        occupied(shape).any(|(c, r)| board.is_occupied(col + c, row + r))
    }

    /// Rotate clockwise in place, returns true if successful
    pub fn rotate(&mut self, board: &Board) -> bool {
        if self.landed {
            return false;
        }

        let rotated = rotate_cw(&self.shape);
        if self.row + rotated.len() as i32 > board.rows() as i32 {
            return false;
        }
        if Self::collides(self.col, self.row, &rotated, board) {
            return false;
        }

        self.shape = rotated;
        true
    }

    /// Try to shift by (d_col, d_row), returns true if successful
    pub fn move_by(&mut self, d_col: i32, d_row: i32, board: &Board) -> bool {
        if self.landed {
            return false;
        }

        let (col, row) = (self.col + d_col, self.row + d_row);
        if Self::collides(col, row, &self.shape, board) {
            return false;
        }

        self.col = col;
        self.row = row;
        true
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.move_by(-1, 0, board)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.move_by(1, 0, board)
    }

    pub fn soft_drop(&mut self, board: &Board) -> bool {
        self.move_by(0, 1, board)
    }

    /// Fall as far as possible and lock. Returns the distance dropped,
    /// or None if the piece had already landed.
    pub fn hard_drop(&mut self, board: &mut Board) -> Option<u32> {
        if self.landed {
            return None;
        }

        let mut distance = 0;
        while self.soft_drop(board) {
            distance += 1;
        }
        self.lock(board);
        Some(distance)
    }

    /// Gravity step: fall one row, or lock if the row below is blocked
    pub fn tick(&mut self, board: &mut Board) -> TickOutcome {
        if self.landed {
            TickOutcome::Idle
        } else if self.soft_drop(board) {
            TickOutcome::Moved
        } else {
            self.lock(board);
            TickOutcome::Locked
        }
    }

    /// Write the piece into the board. Only the first call has any effect.
    pub fn lock(&mut self, board: &mut Board) -> bool {
        if self.landed {
            return false;
        }
        self.landed = true;

        if !board.place(&self.cells(), self.color) {
            tracing::warn!(
                "{} piece locked partly off the board at ({}, {})",
                self.kind.name(),
                self.col,
                self.row
            );
        }
        true
    }

    /// Origin row a hard drop would land on
    pub fn ghost_row(&self, board: &Board) -> i32 {
        let mut row = self.row;
        while !Self::collides(self.col, row + 1, &self.shape, board) {
            row += 1;
        }
        row
    }
}
