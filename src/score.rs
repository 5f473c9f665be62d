//! Scoring: the fixed line-clear table and the session score

use crate::board::LineClear;

/// Points for clearing `rows` rows in one lock: 0, 100, 300, 500, then 800 for four or more
pub fn points_for_rows(rows: usize) -> u32 {
    match rows {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 500,
        _ => 800,
    }
}

/// Running totals for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows cleared
    pub rows: u32,
    /// Pieces locked so far
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result of a row clear
    pub fn add_clear(&mut self, clear: &LineClear) {
        self.points += u64::from(clear.points);
        self.rows += clear.rows as u32;
    }

    /// Count a locked piece
    pub fn add_piece(&mut self) {
        self.pieces += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(points_for_rows(0), 0);
        assert_eq!(points_for_rows(1), 100);
        assert_eq!(points_for_rows(2), 300);
        assert_eq!(points_for_rows(3), 500);
        assert_eq!(points_for_rows(4), 800);
        assert_eq!(points_for_rows(6), 800);
    }

    #[test]
    fn test_accumulate() {
        let mut score = Score::new();
        score.add_clear(&LineClear { rows: 1, points: 100 });
        score.add_clear(&LineClear { rows: 4, points: 800 });
        score.add_clear(&LineClear::default());
        assert_eq!(score.points, 900);
        assert_eq!(score.rows, 5);
    }

    #[test]
    fn test_piece_count() {
        let mut score = Score::new();
        score.add_piece();
        score.add_piece();
        assert_eq!(score.pieces, 2);
        assert_eq!(score.points, 0);
    }
}
