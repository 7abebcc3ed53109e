//! Common value types for the game core: cells, colors, shot outcomes and
//! board errors.

use core::fmt;

/// Index of a placed sequence on a board, in placement order.
pub type SequenceId = usize;

/// A `(row, col)` coordinate on an N×N grid.
///
/// On the wire a cell is a two-element `[row, col]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "(usize, usize)", into = "(usize, usize)")
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the cell lies inside a grid of side `grid_size`.
    pub fn within(&self, grid_size: usize) -> bool {
        self.row < grid_size && self.col < grid_size
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// RGB rendering hint attached to each sequence. Serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[u8; 3]", into = "[u8; 3]")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Result of registering a shot on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The cell belongs to a placed sequence.
    Hit,
    /// The cell is empty water.
    Miss,
    /// The cell was targeted before; nothing changed.
    AlreadyShot,
}

/// Errors returned by board and placement operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Cell lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// A sequence of length zero was requested.
    EmptySequence,
    /// Sequence does not fit in the grid in any orientation.
    SequenceTooLong { length: usize, grid_size: usize },
    /// Fewer palette colors than sequences.
    PaletteExhausted { sequences: usize, colors: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
            BoardError::EmptySequence => write!(f, "Sequence length must be at least 1"),
            BoardError::SequenceTooLong { length, grid_size } => write!(
                f,
                "Sequence of length {} does not fit a {}x{} grid",
                length, grid_size, grid_size
            ),
            BoardError::PaletteExhausted { sequences, colors } => write!(
                f,
                "{} sequences requested but only {} colors available",
                sequences, colors
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
