//! GLIZZTRIS engine
//!
//! Board truth, piece movement, line clears and scoring for a falling-block
//! game whose pieces are hot dogs. Rendering, input and persistence live in
//! the binary; this crate only exposes commands and read-only state.

pub mod board;
pub mod game;
pub mod line_clear;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod tetromino;
pub mod theme;

pub use board::{Board, SettledCell, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Action, Game, GameState, TICK_INTERVAL};
pub use piece::Piece;
pub use score::Score;
pub use tetromino::{Orientation, PieceKind, Polyomino, Segment, Texture};
pub use theme::{Theme, ThemeSelector, ThemeStats};
