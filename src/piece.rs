//! Active falling piece

use crate::tetromino::{PieceKind, Polyomino};
use crate::theme::Theme;

/// Column the top-left corner of a new piece spawns at
pub const SPAWN_COL: i32 = 4;
/// Row the top-left corner of a new piece spawns at
pub const SPAWN_ROW: i32 = 0;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of piece
    pub kind: PieceKind,
    /// Current shape, including segment artwork
    pub shape: Polyomino,
    /// Top-left corner on the board, y grows downward and may be negative
    pub x: i32,
    pub y: i32,
    /// Theme written into the board when this piece is placed
    pub theme: Theme,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn new(kind: PieceKind, theme: Theme) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x: SPAWN_COL,
            y: SPAWN_ROW,
            theme,
        }
    }

    /// Absolute board positions (x, y) of all occupied cells
    pub fn block_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(|(col, row, _)| (self.x + col as i32, self.y + row as i32))
    }

    pub fn cell_count(&self) -> u32 {
        self.shape.cell_count() as u32
    }
}
