//! Tetromino definitions: shape matrices, rotation and the colour palette

use ratatui::style::Color;

/// Occupied cells of a piece relative to its top-left origin, stored row by row.
pub type Shape = Vec<Vec<bool>>;

/// The colours a piece can be drawn in
pub const PALETTE: [Color; 5] = [
    Color::Rgb(255, 0, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(0, 0, 255),
    Color::Rgb(255, 255, 0),
    Color::Rgb(255, 165, 0),
];

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    Z,
    S,
    T,
    L,
    J,
}

impl TetrominoType {
    /// Get all tetromino types, in spawn table order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::Z,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::L,
            TetrominoType::J,
        ]
    }

    /// Get the spawn orientation of this tetromino
    pub fn shape(&self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoType::I => &[&[1, 1, 1, 1]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoType::S => &[&[0, 1, 1], &[1, 1, 0]],
            TetrominoType::T => &[&[1, 1, 1], &[0, 1, 0]],
            TetrominoType::L => &[&[1, 1, 1], &[1, 0, 0]],
            TetrominoType::J => &[&[1, 1, 1], &[0, 0, 1]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&cell| cell == 1).collect())
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::Z => "Z",
            TetrominoType::S => "S",
            TetrominoType::T => "T",
            TetrominoType::L => "L",
            TetrominoType::J => "J",
        }
    }
}

/// Rotate a shape 90 degrees clockwise.
///
/// Reverses the row order, then transposes: a `h x w` shape becomes `w x h`
/// with `rotated[i][j] == shape[h - 1 - j][i]`.
pub fn rotate_cw(shape: &Shape) -> Shape {
    let height = shape.len();
    let width = shape_width(shape);
    (0..width)
        .map(|i| (0..height).map(|j| shape[height - 1 - j][i]).collect())
        .collect()
}

/// Width of a shape (length of its widest row)
pub fn shape_width(shape: &Shape) -> usize {
    shape.iter().map(Vec::len).max().unwrap_or(0)
}

/// Iterate the occupied cells of a shape as (local_col, local_row)
pub fn occupied(shape: &Shape) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(c, _)| (c as i32, r as i32))
    })
}
