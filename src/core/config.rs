use super::common::Color;

/// Default side length of the square grid.
pub const GRID_SIZE: usize = 10;
/// Number of sequences placed on each board.
pub const NUM_SEQUENCES: usize = 3;
/// Lengths of the sequences placed on each board, in placement order.
pub const SEQUENCE_LENGTHS: [usize; NUM_SEQUENCES] = [2, 3, 5];
/// Rendering colors for each sequence, indexed by sequence id.
pub const SEQUENCE_COLORS: [Color; NUM_SEQUENCES] = [
    Color::new(189, 226, 255),
    Color::new(255, 235, 205),
    Color::new(221, 197, 255),
];

/// Total number of occupied cells in the standard configuration.
pub const TOTAL_SEQUENCE_CELLS: usize = 2 + 3 + 5;

/// Random placement attempts per sequence before the origin fallback kicks in.
pub const PLACEMENT_ATTEMPTS: usize = 500;

/// Pixel size of one grid cell, used by the click-to-cell transform.
pub const CELL_SIZE: i32 = 48;

/// Default server port.
pub const DEFAULT_PORT: u16 = 5555;

/// Board layout parameters shared by every board of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub grid_size: usize,
    pub lengths: alloc::vec::Vec<usize>,
    pub palette: alloc::vec::Vec<Color>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            lengths: SEQUENCE_LENGTHS.to_vec(),
            palette: SEQUENCE_COLORS.to_vec(),
        }
    }
}

impl BoardConfig {
    /// Sum of all sequence lengths.
    pub fn total_cells(&self) -> usize {
        self.lengths.iter().sum()
    }
}
