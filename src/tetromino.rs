//! Piece catalog: the seven hot dog shapes and their segment artwork
//!
//! Every occupied cell of a shape carries a [`Segment`]: which piece of hot dog
//! art to draw there and how far it is turned, so that neighbouring cells join
//! up into one continuous sausage (or bun) on screen.

use serde::{Deserialize, Serialize};

/// The 7 piece types, numbered with their settled-cell type ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I, // Long hot dog
    T, // Hot dog with mustard
    S, // Wavy hot dog
    O, // Bun
    Z, // Zigzag hot dog
    J, // Curved hot dog
    L, // L-shaped hot dog
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Identifier written into the settled board
    pub fn type_id(&self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::S => 2,
            PieceKind::O => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Fresh copy of this kind's canonical shape
    pub fn shape(&self) -> Polyomino {
        let (cells, textures, orientations) = self.layers();
        Polyomino::from_layers(cells, textures, orientations)
    }

    /// Canonical occupancy, texture and orientation tables
    fn layers(&self) -> (&'static [&'static [u8]], &'static [&'static [Tex]], &'static [&'static [u16]]) {
        use Texture::*;
        match self {
            PieceKind::I => (
                &[&[1, 1, 1, 1]],
                &[&[Some(Block), Some(Block), Some(Block), Some(Block)]],
                &[&[0, 0, 0, 0]],
            ),
            PieceKind::O => (
                &[&[3, 3], &[3, 3]],
                &[
                    &[Some(TopLeft), Some(TopRight)],
                    &[Some(BottomLeft), Some(BottomRight)],
                ],
                &[&[0, 0], &[0, 0]],
            ),
            PieceKind::T => (
                &[&[0, 1, 0], &[1, 1, 1]],
                &[
                    &[None, Some(Block), None],
                    &[Some(Block), Some(TCenter), Some(Block)],
                ],
                &[&[0, 270, 0], &[0, 180, 0]],
            ),
            PieceKind::S => (
                &[&[0, 2, 2], &[2, 2, 0]],
                &[
                    &[None, Some(ElbowLeft), Some(Block)],
                    &[Some(Block), Some(ElbowRight), None],
                ],
                &[&[0, 0, 0], &[0, 180, 0]],
            ),
            PieceKind::Z => (
                &[&[4, 4, 0], &[0, 4, 4]],
                &[
                    &[Some(Block), Some(ElbowRight), None],
                    &[None, Some(ElbowLeft), Some(Block)],
                ],
                &[&[180, 90, 0], &[0, 270, 180]],
            ),
            PieceKind::J => (
                &[&[5, 0, 0], &[5, 5, 5]],
                &[
                    &[Some(Block), None, None],
                    &[Some(ElbowLeft), Some(Block), Some(Block)],
                ],
                &[&[90, 0, 0], &[270, 0, 0]],
            ),
            PieceKind::L => (
                &[&[0, 0, 6], &[6, 6, 6]],
                &[
                    &[None, None, Some(Block)],
                    &[Some(Block), Some(Block), Some(ElbowRight)],
                ],
                &[&[0, 0, 270], &[0, 0, 180]],
            ),
        }
    }
}

type Tex = Option<Texture>;

/// Which slice of hot dog art a cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Texture {
    /// Straight sausage segment
    Block,
    ElbowLeft,
    ElbowRight,
    /// Three-way junction
    TCenter,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Clockwise turn of a segment, in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    /// Panics on anything but a multiple of 90 in `0..360`
    pub fn from_degrees(degrees: u16) -> Self {
        match degrees {
            0 => Orientation::Deg0,
            90 => Orientation::Deg90,
            180 => Orientation::Deg180,
            270 => Orientation::Deg270,
            other => panic!("orientation must be 0, 90, 180 or 270, got {other}"),
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// `(degrees + 90) mod 360`
    pub fn cw(&self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }
}

/// Artwork of one occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub texture: Texture,
    pub orientation: Orientation,
}

/// An oriented polyomino: occupancy, texture and orientation as one value
///
/// Rows run top to bottom. An empty cell is `None`, so a cell can never be
/// occupied without artwork or carry artwork while empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyomino {
    cells: Vec<Vec<Option<Segment>>>,
}

impl Polyomino {
    /// Build from parallel occupancy/texture/orientation tables
    ///
    /// Panics if the tables disagree on dimensions, rows are ragged, or an
    /// occupied cell has no texture.
    pub fn from_layers(cells: &[&[u8]], textures: &[&[Option<Texture>]], orientations: &[&[u16]]) -> Self {
        assert!(!cells.is_empty(), "shape must have at least one row");
        assert_eq!(cells.len(), textures.len(), "texture table row count mismatch");
        assert_eq!(cells.len(), orientations.len(), "orientation table row count mismatch");
        let width = cells[0].len();

        let rows = cells
            .iter()
            .zip(textures)
            .zip(orientations)
            .map(|((row, tex_row), rot_row)| {
                assert_eq!(row.len(), width, "ragged shape row");
                assert_eq!(tex_row.len(), width, "texture table column count mismatch");
                assert_eq!(rot_row.len(), width, "orientation table column count mismatch");
                row.iter()
                    .zip(tex_row.iter())
                    .zip(rot_row.iter())
                    .map(|((&occupied, &texture), &degrees)| {
                        if occupied == 0 {
                            return None;
                        }
                        let texture = texture.expect("occupied cell without a texture");
                        Some(Segment {
                            texture,
                            orientation: Orientation::from_degrees(degrees),
                        })
                    })
                    .collect()
            })
            .collect();

        Self { cells: rows }
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Segment at (row, col), `None` when empty or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Segment> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Occupied cells as (col, row, segment), row-major
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Segment)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|segment| (col, row, segment)))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.occupied().count()
    }

    /// Quarter turn clockwise
    ///
    /// Transposes then reverses each new row, carrying every segment along and
    /// turning its orientation by 90 degrees in the same step.
    pub fn rotated(&self) -> Self {
        let height = self.height();
        let cells = (0..self.width())
            .map(|col| {
                (0..height)
                    .rev()
                    .map(|row| {
                        self.cells[row][col].map(|segment| Segment {
                            texture: segment.texture,
                            orientation: segment.orientation.cw(),
                        })
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }
}
