//! Core game state and logic
//!
//! The engine never looks at the wall clock. It keeps its own clock, advanced
//! by [`Game::tick`], and schedules its delayed work (line clear resolution,
//! hard drop settling) as values with a due time on that clock.

use crate::board::Board;
use crate::line_clear::PendingClear;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::theme::{Theme, ThemeSelector, ThemeStats};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Period the driver is expected to call [`Game::tick`] at
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
/// Pause between a hard drop and placing the piece
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
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
    Start,
    /// Pause while running, resume while paused
    Pause,
}

/// Hard-dropped piece waiting to be placed
#[derive(Debug, Clone, Copy)]
struct PendingSettle {
    /// Serial of the piece the drop was for
    piece: u64,
    due: Duration,
}

/// The main game struct
pub struct Game {
    board: Board,
    current_piece: Option<Piece>,
    /// Incremented on every spawn
    piece_serial: u64,
    randomizer: Randomizer,
    theme_selector: ThemeSelector,
    score: Score,
    stats: ThemeStats,
    state: GameState,
    /// Engine time
    clock: Duration,
    /// Engine time of the last gravity step
    last_fall: Duration,
    pending_clear: Option<PendingClear>,
    pending_settle: Option<PendingSettle>,
}

impl Game {
    /// Create a new game with a random seed
    pub fn new(theme_selector: ThemeSelector) -> Self {
        Self::with_seed(theme_selector, rand::random())
    }

    /// Create a new game with a fixed seed
    pub fn with_seed(theme_selector: ThemeSelector, seed: u64) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            piece_serial: 0,
            randomizer: Randomizer::with_seed(seed),
            theme_selector,
            score: Score::new(),
            stats: ThemeStats::new(),
            state: GameState::NotStarted,
            clock: Duration::ZERO,
            last_fall: Duration::ZERO,
            pending_clear: None,
            pending_settle: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    /// Rows currently flashing before removal
    pub fn animating_rows(&self) -> &[usize] {
        match &self.pending_clear {
            Some(pending) => pending.rows(),
            None => &[],
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn stats(&self) -> &ThemeStats {
        &self.stats
    }

    pub fn drop_interval(&self) -> Duration {
        self.score.drop_interval()
    }

    pub fn theme_selector(&self) -> ThemeSelector {
        self.theme_selector
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match self.state {
            GameState::Running => match action {
                Action::MoveLeft => {
                    self.move_piece(-1, 0);
                }
                Action::MoveRight => {
                    self.move_piece(1, 0);
                }
                Action::SoftDrop => {
                    self.move_piece(0, 1);
                }
                Action::HardDrop => self.drop_piece(),
                Action::Rotate => {
                    self.rotate_piece();
                }
                Action::Pause => self.pause(),
                Action::Start => {}
            },
            GameState::Paused => {
                if matches!(action, Action::Pause | Action::Start) {
                    self.start();
                }
            }
            GameState::NotStarted | GameState::GameOver => {
                if action == Action::Start {
                    self.start();
                }
            }
        }
    }

    /// Start a fresh game, or resume a paused one
    pub fn start(&mut self) {
        match self.state {
            GameState::NotStarted | GameState::GameOver => self.begin(),
            GameState::Paused => {
                debug!("resumed");
                self.state = GameState::Running;
                self.last_fall = self.clock;
            }
            GameState::Running => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            debug!("paused");
            self.state = GameState::Paused;
        }
    }

    /// Throw away the current game and begin a fresh one
    pub fn reset(&mut self) {
        self.begin();
    }

    /// Theme resolution for future spawns
    pub fn set_theme_selector(&mut self, selector: ThemeSelector) {
        self.theme_selector = selector;
    }

    /// Retag the active piece only
    pub fn set_piece_theme(&mut self, theme: Theme) {
        if let Some(piece) = &mut self.current_piece {
            piece.theme = theme;
        }
    }

    /// Move the active piece by (dx, dy)
    ///
    /// A blocked downward move lands the piece. Returns whether it moved.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };

        if self.board.is_valid_move(piece, dx, dy, None) {
            piece.x += dx;
            piece.y += dy;
            return true;
        }

        if dy > 0 {
            self.place_current();
        }
        false
    }

    /// Rotate the active piece clockwise in place, no kicks
    pub fn rotate_piece(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };

        let rotated = piece.shape.rotated();
        if !self.board.is_valid_move(piece, 0, 0, Some(&rotated)) {
            return false;
        }
        piece.shape = rotated;
        true
    }

    /// Drop the active piece to its resting row and place it shortly after
    pub fn drop_piece(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return;
        };

        let distance = self.board.drop_distance(piece);
        if distance == 0 {
            return;
        }
        piece.y += distance;
        self.pending_settle = Some(PendingSettle {
            piece: self.piece_serial,
            due: self.clock + SETTLE_DELAY,
        });
    }

    /// Advance engine time by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) {
        match self.state {
            GameState::Running => self.clock += elapsed,
            // the last clear still gets scored
            GameState::GameOver if self.pending_clear.is_some() => self.clock += elapsed,
            _ => return,
        }

        self.resolve_due_clear();
        if self.state != GameState::Running {
            return;
        }

        self.settle_if_due();
        if self.state != GameState::Running {
            return;
        }

        if self.clock - self.last_fall > self.drop_interval() {
            self.move_piece(0, 1);
            self.last_fall = self.clock;
        }
    }

    /// Reset everything and spawn the first piece
    fn begin(&mut self) {
        info!(selector = ?self.theme_selector, "new game");
        self.board = Board::new();
        self.score = Score::new();
        self.stats = ThemeStats::new();
        self.pending_clear = None;
        self.pending_settle = None;
        self.state = GameState::Running;
        self.last_fall = self.clock;
        self.spawn_next();
    }

    /// Merge the active piece into the board and spawn the next one
    fn place_current(&mut self) {
        if self.pending_clear.is_some() {
            trace!("landing held until the pending clear resolves");
            return;
        }
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board.merge(&piece);
        self.stats.record_used(piece.theme, piece.cell_count());
        self.pending_settle = None;
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, theme = ?piece.theme, "placed");

        let rows = self.board.full_rows();
        if !rows.is_empty() {
            debug!(?rows, "rows marked for clear");
            self.pending_clear = Some(PendingClear::mark(rows, self.board.clone(), self.clock));
        }

        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let piece = self.randomizer.spawn(self.theme_selector);
        self.piece_serial += 1;

        if !self.board.fits(&piece.shape, piece.x, piece.y) {
            info!(
                score = self.score.points,
                lines = self.score.lines,
                level = self.score.level,
                "game over"
            );
            self.state = GameState::GameOver;
            self.current_piece = None;
            self.pending_settle = None;
            return;
        }

        trace!(kind = ?piece.kind, theme = ?piece.theme, "spawned");
        self.current_piece = Some(piece);
    }

    fn resolve_due_clear(&mut self) {
        if !self.pending_clear.as_ref().is_some_and(|p| p.is_due(self.clock)) {
            return;
        }
        let Some(pending) = self.pending_clear.take() else {
            return;
        };

        let outcome = pending.resolve();
        self.board = outcome.board;
        self.stats.record_completed(&outcome.tally);
        let awarded = self.score.add_clear(outcome.lines);
        debug!(
            lines = outcome.lines,
            awarded,
            level = self.score.level,
            "clear resolved"
        );

        // rows above may have collapsed into the active piece
        if let Some(piece) = self.current_piece.as_mut() {
            while !self.board.fits(&piece.shape, piece.x, piece.y) {
                piece.y -= 1;
            }
        }
    }

    fn settle_if_due(&mut self) {
        let Some(settle) = self.pending_settle else {
            return;
        };
        if self.clock < settle.due {
            return;
        }
        if settle.piece != self.piece_serial {
            self.pending_settle = None;
            return;
        }
        if let Some(pending) = &self.pending_clear {
            self.pending_settle = Some(PendingSettle {
                due: pending.due(),
                ..settle
            });
            return;
        }

        self.pending_settle = None;
        if let Some(piece) = self.current_piece.as_mut() {
            piece.y += self.board.drop_distance(piece);
        }
        self.place_current();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(ThemeSelector::default())
    }
}
