//! Random placement of sequences on a fresh board.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use rand::Rng;

use super::common::{BoardError, Cell, Color, SequenceId};
use super::config::PLACEMENT_ATTEMPTS;
use super::sequence::{Orientation, Sequence};

/// Output of [`generate`]: the occupancy map plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Every covered cell mapped to the sequence that owns it.
    pub cells: BTreeMap<Cell, SequenceId>,
    /// Sequences in placement order.
    pub sequences: Vec<Sequence>,
    /// Number of sequences that fell back to the origin placement.
    pub fallbacks: usize,
}

/// Place one sequence per entry of `lengths` on a `grid_size` grid.
///
/// Each sequence gets up to [`PLACEMENT_ATTEMPTS`] random tries. When all of
/// them collide, the sequence is laid along row 0 or column 0 (matching the
/// last tried orientation), which may overlap an earlier sequence; the
/// overlapped cells are then owned by the later sequence.
pub fn generate<R: Rng>(
    rng: &mut R,
    grid_size: usize,
    lengths: &[usize],
    palette: &[Color],
) -> Result<Placement, BoardError> {
    generate_with_attempts(rng, grid_size, lengths, palette, PLACEMENT_ATTEMPTS)
}

/// [`generate`] with an explicit attempt budget per sequence.
pub fn generate_with_attempts<R: Rng>(
    rng: &mut R,
    grid_size: usize,
    lengths: &[usize],
    palette: &[Color],
    attempts: usize,
) -> Result<Placement, BoardError> {
    if palette.len() < lengths.len() {
        return Err(BoardError::PaletteExhausted {
            sequences: lengths.len(),
            colors: palette.len(),
        });
    }

    let mut cells = BTreeMap::new();
    let mut sequences = Vec::with_capacity(lengths.len());
    let mut fallbacks = 0;

    for (id, &length) in lengths.iter().enumerate() {
        if length == 0 {
            return Err(BoardError::EmptySequence);
        }
        if length > grid_size {
            return Err(BoardError::SequenceTooLong { length, grid_size });
        }

        let mut orientation = Orientation::Horizontal;
        let mut placed = None;
        for _ in 0..attempts {
            orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (grid_size - 1, grid_size - length),
                Orientation::Vertical => (grid_size - length, grid_size - 1),
            };
            let origin = Cell::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            let candidate = Sequence::new(id, length, orientation, origin, grid_size)?;
            if candidate.cells().all(|c| !cells.contains_key(&c)) {
                placed = Some(candidate);
                break;
            }
        }

        let sequence = match placed {
            Some(seq) => seq,
            None => {
                log::warn!(
                    "placement of sequence {} (length {}) exhausted {} attempts, using origin fallback",
                    id,
                    length,
                    attempts
                );
                fallbacks += 1;
                Sequence::new(id, length, orientation, Cell::new(0, 0), grid_size)?
            }
        };
        for cell in sequence.cells() {
            cells.insert(cell, id);
        }
        sequences.push(sequence);
    }

    Ok(Placement {
        cells,
        sequences,
        fallbacks,
    })
}
