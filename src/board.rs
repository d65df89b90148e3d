//! Settled board, collision detection and row collapse

use crate::piece::Piece;
use crate::tetromino::{Orientation, PieceKind, Polyomino, Texture};
use crate::theme::Theme;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A settled block and everything needed to draw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledCell {
    pub kind: PieceKind,
    pub texture: Texture,
    pub orientation: Orientation,
    pub theme: Theme,
}

type Row = [Option<SettledCell>; BOARD_WIDTH];

const EMPTY_ROW: Row = [None; BOARD_WIDTH];

/// The game board
///
/// Row 0 is the top, y grows downward. Coordinates above the board (y < 0)
/// are not part of the grid but may be occupied by a spawning piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds or empty
    pub fn get(&self, x: i32, y: i32) -> Option<&SettledCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .and_then(Option::as_ref)
    }

    /// Set a cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Option<SettledCell>) -> bool {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    /// Whether `shape` fits with its top-left corner at (x, y)
    ///
    /// Every occupied cell must be inside the side walls and above the floor.
    /// Cells above the top edge are never blocked by settled cells.
    pub fn fits(&self, shape: &Polyomino, x: i32, y: i32) -> bool {
        shape.occupied().all(|(col, row, _)| {
            let bx = x + col as i32;
            let by = y + row as i32;
            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                return false;
            }
            by < 0 || self.cells[by as usize][bx as usize].is_none()
        })
    }

    /// Whether `piece` could move by (dx, dy), optionally as `candidate` shape
    pub fn is_valid_move(&self, piece: &Piece, dx: i32, dy: i32, candidate: Option<&Polyomino>) -> bool {
        let shape = candidate.unwrap_or(&piece.shape);
        self.fits(shape, piece.x + dx, piece.y + dy)
    }

    /// Largest downward offset at which `piece` still fits
    pub fn drop_distance(&self, piece: &Piece) -> i32 {
        let mut distance = 0;
        while self.is_valid_move(piece, 0, distance + 1, None) {
            distance += 1;
        }
        distance
    }

    /// Write a piece into the board; cells above the top edge are dropped
    pub fn merge(&mut self, piece: &Piece) {
        for (col, row, segment) in piece.shape.occupied() {
            let cell = SettledCell {
                kind: piece.kind,
                texture: segment.texture,
                orientation: segment.orientation,
                theme: piece.theme,
            };
            self.set(piece.x + col as i32, piece.y + row as i32, Some(cell));
        }
    }

    /// Indices of completely filled rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT).filter(|&row| self.is_row_full(row)).collect()
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(Option::is_some)
    }

    /// A copy with `rows` removed and as many empty rows added on top
    ///
    /// Surviving rows keep their relative order.
    pub fn without_rows(&self, rows: &[usize]) -> Board {
        let mut result = Board::new();
        let mut write_row = BOARD_HEIGHT;

        for read_row in (0..BOARD_HEIGHT).rev() {
            if !rows.contains(&read_row) {
                write_row -= 1;
                result.cells[write_row] = self.cells[read_row];
            }
        }

        result
    }

    /// Settled cells of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<&SettledCell>> + '_ {
        self.cells[row].iter().map(Option::as_ref)
    }

    /// Type id of every cell
    pub fn type_ids(&self) -> [[Option<u8>; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.map(|c| c.kind.type_id())))
    }

    /// Texture of every cell
    pub fn textures(&self) -> [[Option<Texture>; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.map(|c| c.texture)))
    }

    /// Orientation of every cell
    pub fn orientations(&self) -> [[Option<Orientation>; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.map(|c| c.orientation)))
    }

    /// Theme of every cell
    pub fn themes(&self) -> [[Option<Theme>; BOARD_WIDTH]; BOARD_HEIGHT] {
        self.cells.map(|row| row.map(|cell| cell.map(|c| c.theme)))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(Option::is_none))
    }

    /// Number of settled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn block(theme: Theme) -> SettledCell {
        SettledCell {
            kind: PieceKind::I,
            texture: Texture::Block,
            orientation: Orientation::Deg0,
            theme,
        }
    }

    pub(crate) fn fill_row_except(board: &mut Board, row: i32, gaps: &[i32], theme: Theme) {
        for x in 0..BOARD_WIDTH as i32 {
            if !gaps.contains(&x) {
                board.set(x, row, Some(block(theme)));
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(board.full_rows().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Some(block(Theme::Ketchup))));
        assert_eq!(board.get(5, 5), Some(&block(Theme::Ketchup)));
        assert!(board.set(5, 5, None));
        assert_eq!(board.get(5, 5), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(0, -1, Some(block(Theme::Mustard))));
        assert!(!board.set(BOARD_WIDTH as i32, 0, Some(block(Theme::Mustard))));
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::O, Theme::Mustard);
        piece.x = 0;
        assert!(!board.is_valid_move(&piece, -1, 0, None));
        piece.x = BOARD_WIDTH as i32 - 2;
        assert!(!board.is_valid_move(&piece, 1, 0, None));
        piece.y = BOARD_HEIGHT as i32 - 2;
        assert!(board.is_valid_move(&piece, 0, 0, None));
        assert!(!board.is_valid_move(&piece, 0, 1, None));
    }

    #[test]
    fn test_cells_above_board_skip_occupancy() {
        let mut board = Board::new();
        fill_row_except(&mut board, 0, &[], Theme::Mustard);
        let mut piece = Piece::new(PieceKind::O, Theme::Mustard);
        piece.y = -2;
        // fully above the board: only the side walls matter
        assert!(board.is_valid_move(&piece, 0, 0, None));
        assert!(!board.is_valid_move(&piece, 0, 1, None));
        piece.x = -1;
        assert!(!board.is_valid_move(&piece, 0, 0, None));
    }

    #[test]
    fn test_candidate_shape_is_checked() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::I, Theme::Mustard);
        piece.y = BOARD_HEIGHT as i32 - 1;
        let upright = piece.shape.rotated();
        assert!(board.is_valid_move(&piece, 0, 0, None));
        assert!(!board.is_valid_move(&piece, 0, 0, Some(&upright)));
    }

    #[test]
    fn test_drop_distance() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::O, Theme::Mustard);
        assert_eq!(board.drop_distance(&piece), BOARD_HEIGHT as i32 - 2);
        board.set(4, 10, Some(block(Theme::Mustard)));
        assert_eq!(board.drop_distance(&piece), 8);
    }

    #[test]
    fn test_merge_skips_cells_above_board() {
        let mut board = Board::new();
        let mut piece = Piece::new(PieceKind::O, Theme::Relish);
        piece.y = -1;
        board.merge(&piece);
        assert_eq!(board.filled_count(), 2);
        let cell = board.get(4, 0).unwrap();
        assert_eq!(cell.texture, Texture::BottomLeft);
        assert_eq!(cell.theme, Theme::Relish);
        assert_eq!(cell.kind, PieceKind::O);
    }

    #[test]
    fn test_full_rows_ascending() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[], Theme::Mustard);
        fill_row_except(&mut board, 17, &[], Theme::Mustard);
        fill_row_except(&mut board, 18, &[3], Theme::Mustard);
        assert_eq!(board.full_rows(), vec![17, 19]);
    }

    #[test]
    fn test_without_bottom_row_shifts_down() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[], Theme::Mustard);
        board.set(0, 18, Some(block(Theme::Ketchup)));
        board.set(9, 5, Some(block(Theme::Relish)));

        let collapsed = board.without_rows(&[19]);
        assert_eq!(collapsed.get(0, 19).map(|c| c.theme), Some(Theme::Ketchup));
        assert_eq!(collapsed.get(9, 6).map(|c| c.theme), Some(Theme::Relish));
        assert!(collapsed.row(0).all(|cell| cell.is_none()));
        assert_eq!(collapsed.filled_count(), 2);
    }

    #[test]
    fn test_without_split_rows_preserves_order() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[], Theme::Mustard);
        fill_row_except(&mut board, 17, &[], Theme::Mustard);
        board.set(1, 18, Some(block(Theme::Ketchup)));
        board.set(2, 16, Some(block(Theme::Relish)));

        // order of the removed indices does not matter
        let collapsed = board.without_rows(&[19, 17]);
        assert_eq!(collapsed, board.without_rows(&[17, 19]));
        assert_eq!(collapsed.get(1, 19).map(|c| c.theme), Some(Theme::Ketchup));
        assert_eq!(collapsed.get(2, 18).map(|c| c.theme), Some(Theme::Relish));
        assert!(collapsed.row(0).all(|cell| cell.is_none()));
        assert!(collapsed.row(1).all(|cell| cell.is_none()));
        // source board untouched
        assert_eq!(board.full_rows(), vec![17, 19]);
    }

    #[test]
    fn test_layer_projections_agree() {
        let mut board = Board::new();
        let piece = Piece::new(PieceKind::T, Theme::Ketchup);
        board.merge(&piece);
        let ids = board.type_ids();
        let textures = board.textures();
        let orientations = board.orientations();
        let themes = board.themes();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let filled = ids[y][x].is_some();
                assert_eq!(textures[y][x].is_some(), filled);
                assert_eq!(orientations[y][x].is_some(), filled);
                assert_eq!(themes[y][x].is_some(), filled);
            }
        }
        assert_eq!(ids[1][5], Some(PieceKind::T.type_id()));
        assert_eq!(textures[1][5], Some(Texture::TCenter));
        assert_eq!(orientations[0][5], Some(Orientation::Deg270));
    }
}
