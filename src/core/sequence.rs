//! Axis-aligned sequences ("ships") and their cell runs.

use alloc::vec::Vec;
use core::fmt;

use super::common::{BoardError, Cell, SequenceId};

/// Orientation of a sequence on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A contiguous run of `length` cells starting at `origin`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    id: SequenceId,
    length: usize,
    orientation: Orientation,
    origin: Cell,
}

impl Sequence {
    /// Place sequence `id` at `origin` with `orientation`, checked against a
    /// grid of side `grid_size`.
    pub fn new(
        id: SequenceId,
        length: usize,
        orientation: Orientation,
        origin: Cell,
        grid_size: usize,
    ) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::EmptySequence);
        }
        if length > grid_size {
            return Err(BoardError::SequenceTooLong { length, grid_size });
        }
        let (end_row, end_col) = match orientation {
            Orientation::Horizontal => (origin.row, origin.col + length - 1),
            Orientation::Vertical => (origin.row + length - 1, origin.col),
        };
        if end_row >= grid_size || end_col >= grid_size {
            return Err(BoardError::OutOfBounds {
                row: end_row,
                col: end_col,
            });
        }
        Ok(Sequence {
            id,
            length,
            orientation,
            origin,
        })
    }

    /// Cells covered by this sequence, from the origin outwards.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Cell::new(self.origin.row, self.origin.col + i),
            Orientation::Vertical => Cell::new(self.origin.row + i, self.origin.col),
        })
    }

    pub fn to_cells(&self) -> Vec<Cell> {
        self.cells().collect()
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sequence {{ id: {}, length: {}, origin: {}, orientation: {:?} }}",
            self.id, self.length, self.origin, self.orientation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_cells_run_along_the_row() {
        let seq = Sequence::new(0, 3, Orientation::Horizontal, Cell::new(4, 2), 10).unwrap();
        assert_eq!(
            seq.to_cells(),
            alloc::vec![Cell::new(4, 2), Cell::new(4, 3), Cell::new(4, 4)]
        );
    }

    #[test]
    fn vertical_overflow_is_rejected() {
        let err = Sequence::new(1, 5, Orientation::Vertical, Cell::new(7, 0), 10).unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { row: 11, col: 0 });
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = Sequence::new(0, 0, Orientation::Vertical, Cell::new(0, 0), 10).unwrap_err();
        assert_eq!(err, BoardError::EmptySequence);
    }
}
