//! One player's grid: sequence occupancy plus accumulated hits and misses.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use super::common::{BoardError, Cell, Color, SequenceId, ShotOutcome};
use super::config::{BoardConfig, CELL_SIZE};
use super::placement;

/// Main board state: occupied cells, hits, misses.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid_size: usize,
    occupied: BTreeMap<Cell, SequenceId>,
    palette: Vec<Color>,
    hits: BTreeSet<Cell>,
    misses: BTreeSet<Cell>,
    total_cells: usize,
    fallbacks: usize,
}

impl Board {
    /// Create an empty board (no sequences placed).
    pub fn new(grid_size: usize, palette: Vec<Color>) -> Self {
        Self::with_layout(grid_size, BTreeMap::new(), palette)
    }

    /// Create a board with an explicit occupancy map.
    pub fn with_layout(
        grid_size: usize,
        occupied: BTreeMap<Cell, SequenceId>,
        palette: Vec<Color>,
    ) -> Self {
        let total_cells = occupied.len();
        Board {
            grid_size,
            occupied,
            palette,
            hits: BTreeSet::new(),
            misses: BTreeSet::new(),
            total_cells,
            fallbacks: 0,
        }
    }

    /// Create a board populated by the random placement generator.
    pub fn random<R: Rng>(rng: &mut R, config: &BoardConfig) -> Result<Self, BoardError> {
        let placement =
            placement::generate(rng, config.grid_size, &config.lengths, &config.palette)?;
        let mut board = Self::with_layout(config.grid_size, placement.cells, config.palette.clone());
        board.fallbacks = placement.fallbacks;
        Ok(board)
    }

    /// Record a shot at `cell`.
    ///
    /// Re-targeting a cell changes nothing and reports
    /// [`ShotOutcome::AlreadyShot`].
    pub fn register_shot(&mut self, cell: Cell) -> Result<ShotOutcome, BoardError> {
        if !cell.within(self.grid_size) {
            return Err(BoardError::OutOfBounds {
                row: cell.row,
                col: cell.col,
            });
        }
        if self.hits.contains(&cell) || self.misses.contains(&cell) {
            return Ok(ShotOutcome::AlreadyShot);
        }
        if self.occupied.contains_key(&cell) {
            self.hits.insert(cell);
            Ok(ShotOutcome::Hit)
        } else {
            self.misses.insert(cell);
            Ok(ShotOutcome::Miss)
        }
    }

    /// Returns `true` once every occupied cell has been hit. An empty board
    /// is never sunk.
    pub fn all_sunk(&self) -> bool {
        self.total_cells > 0 && self.hits.len() >= self.total_cells
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn occupied(&self) -> &BTreeMap<Cell, SequenceId> {
        &self.occupied
    }

    pub fn hits(&self) -> &BTreeSet<Cell> {
        &self.hits
    }

    pub fn misses(&self) -> &BTreeSet<Cell> {
        &self.misses
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Number of occupied cells, fixed when the layout was assigned.
    pub fn total_sequence_cells(&self) -> usize {
        self.total_cells
    }

    /// How many sequences needed the origin fallback during placement.
    pub fn placement_fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Rendering color of the sequence covering `cell`, if any.
    pub fn color_at(&self, cell: Cell) -> Option<Color> {
        self.occupied
            .get(&cell)
            .and_then(|&id| self.palette.get(id).copied())
    }

    /// Returns `true` if `cell` was already targeted.
    pub fn is_targeted(&self, cell: Cell) -> bool {
        self.hits.contains(&cell) || self.misses.contains(&cell)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board {{\n  grid_size: {},\n  occupied: {:?},\n  hits: {:?},\n  misses: {:?}\n}}",
            self.grid_size, self.occupied, self.hits, self.misses
        )
    }
}

/// Pixel placement of a grid on screen. Opaque to the engine; only the
/// click-to-cell transform uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub origin: (i32, i32),
    pub cell_size: i32,
}

impl GridGeometry {
    pub const fn new(origin: (i32, i32)) -> Self {
        Self {
            origin,
            cell_size: CELL_SIZE,
        }
    }

    /// Map a pixel position to the cell under it, or `None` when the
    /// position is outside the grid's pixel extent.
    pub fn cell_from_position(&self, grid_size: usize, pos: (i32, i32)) -> Option<Cell> {
        if self.cell_size <= 0 {
            return None;
        }
        let extent = self.cell_size.checked_mul(i32::try_from(grid_size).ok()?)?;
        let gx = pos.0.checked_sub(self.origin.0)?;
        let gy = pos.1.checked_sub(self.origin.1)?;
        if !(0..extent).contains(&gx) || !(0..extent).contains(&gy) {
            return None;
        }
        Some(Cell::new(
            (gy / self.cell_size) as usize,
            (gx / self.cell_size) as usize,
        ))
    }
}
