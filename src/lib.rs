//! BLOCKFALL - a falling-block puzzle game
//!
//! The simulation core ([`board`], [`piece`], [`score`], [`game`]) has no
//! terminal dependencies beyond colour values; [`ui`] and [`input`] adapt it to
//! a ratatui/crossterm front end.

pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod ui;
