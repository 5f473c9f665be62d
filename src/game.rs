//! Core game state and logic

use crate::board::Board;
use crate::piece::{ActivePiece, TickOutcome};
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::settings::GameConfig;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Pause,
}

/// What happened the last time a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    /// The piece settled and the next one spawned
    Settled { rows_cleared: usize, points: u32 },
    /// The stack reached the top; the session is over
    GameOver,
}

/// The main game struct
pub struct Game {
    config: GameConfig,
    seed: u64,
    /// The settled cells
    pub board: Board,
    /// Current falling piece, None once the game is over
    pub current_piece: Option<ActivePiece>,
    /// Score tracking
    pub score: Score,
    /// Current game state
    pub state: GameState,
    /// Outcome of the most recent lock
    pub last_lock: Option<LockEvent>,
    randomizer: Randomizer,
    /// Frames counted towards the next gravity step
    fall_frames: u32,
}

impl Game {
    /// Create a new game with a random seed
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Create a new game whose pieces are determined by `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut randomizer = Randomizer::with_seed(seed);
        let first_piece = randomizer.next_piece(&config);
        info!(
            "New {}x{} game, seed={:016x}",
            config.columns, config.rows, seed
        );

        Self {
            config,
            seed,
            board: Board::new(&config),
            current_piece: Some(first_piece),
            score: Score::new(),
            state: GameState::Playing,
            last_lock: None,
            randomizer,
            fall_frames: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Start over with a fresh board and score, keeping the config
    pub fn restart(&mut self) {
        *self = Self::new(self.config);
    }

    /// Process an action. Returns whether it changed anything.
    pub fn process_action(&mut self, action: Action) -> bool {
        match self.state {
            GameState::Paused => {
                if action == Action::Pause {
                    self.state = GameState::Playing;
                    return true;
                }
                false
            }
            GameState::Playing => match action {
                Action::MoveLeft => self.with_piece(|piece, board| piece.move_left(board)),
                Action::MoveRight => self.with_piece(|piece, board| piece.move_right(board)),
                Action::Rotate => self.with_piece(|piece, board| piece.rotate(board)),
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => self.hard_drop(),
                Action::Pause => {
                    self.state = GameState::Paused;
                    true
                }
            },
            GameState::GameOver => false,
        }
    }

    /// Advance one host frame; applies gravity every `fall_speed` frames
    pub fn update(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        self.fall_frames += 1;
        if self.fall_frames >= self.config.fall_speed {
            self.fall_frames = 0;
            self.gravity_tick();
        }
    }

    /// One gravity step for the current piece
    pub fn gravity_tick(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };

        if piece.tick(&mut self.board) == TickOutcome::Locked {
            self.settle_piece();
        }
    }

    fn with_piece(&mut self, apply: impl FnOnce(&mut ActivePiece, &Board) -> bool) -> bool {
        match &mut self.current_piece {
            Some(piece) => apply(piece, &self.board),
            None => false,
        }
    }

    fn soft_drop(&mut self) -> bool {
        let moved = self.with_piece(|piece, board| piece.soft_drop(board));
        if moved {
            // Restart the gravity interval after a manual step down
            self.fall_frames = 0;
        }
        moved
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = &mut self.current_piece else {
            return false;
        };

        match piece.hard_drop(&mut self.board) {
            Some(distance) => {
                debug!("Hard drop of {} rows", distance);
                self.settle_piece();
                true
            }
            None => false,
        }
    }

    /// Score a lock, then either end the game or spawn the next piece
    fn settle_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };
        debug!(
            "Locked {} piece at ({}, {})",
            piece.kind().name(),
            piece.col(),
            piece.row()
        );
        self.score.add_piece();

        // Game over is decided by the lock itself, before any row is cleared
        let topped_out = self.board.top_row_occupied();

        let clear = self.board.clear_full_rows();
        if clear.rows > 0 {
            info!("Cleared {} rows for {} points", clear.rows, clear.points);
        }
        self.score.add_clear(&clear);

        if topped_out {
            self.game_over();
            return;
        }

        self.last_lock = Some(LockEvent::Settled {
            rows_cleared: clear.rows,
            points: clear.points,
        });
        let next = self.randomizer.next_piece(&self.config);
        self.spawn(next);
    }

    /// Put `next` into play, or end the game if it has no room
    fn spawn(&mut self, next: ActivePiece) {
        // The stack can block the spawn area without reaching row 0
        if ActivePiece::collides(next.col(), next.row(), next.shape(), &self.board) {
            self.game_over();
            return;
        }

        debug!("Spawned {} piece", next.kind().name());
        self.current_piece = Some(next);
        self.fall_frames = 0;
    }

    fn game_over(&mut self) {
        info!(
            "Game over: score={} rows={} pieces={}",
            self.score.points, self.score.rows, self.score.pieces
        );
        self.current_piece = None;
        self.state = GameState::GameOver;
        self.last_lock = Some(LockEvent::GameOver);
    }
}
