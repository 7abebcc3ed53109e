use std::collections::{BTreeMap, BTreeSet};

use crate::core::{Board, Cell, Color, SequenceId};

/// Board state as carried on the wire.
///
/// `ships` is present only when the recipient owns the board; its keys are
/// `"row,col"` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub hits: Vec<Cell>,
    #[serde(default)]
    pub misses: Vec<Cell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships: Option<BTreeMap<String, Color>>,
}

impl BoardSnapshot {
    /// Snapshot `board`, exposing the sequence layout only if `show_ships`.
    pub fn of(board: &Board, show_ships: bool) -> Self {
        let ships = show_ships.then(|| {
            board
                .occupied()
                .keys()
                .filter_map(|&cell| board.color_at(cell).map(|color| (cell_key(cell), color)))
                .collect()
        });
        BoardSnapshot {
            hits: board.hits().iter().copied().collect(),
            misses: board.misses().iter().copied().collect(),
            ships,
        }
    }
}

/// `"row,col"` key used in the `ships` map.
pub fn cell_key(cell: Cell) -> String {
    format!("{},{}", cell.row, cell.col)
}

/// Parse a `"row,col"` key.
pub fn parse_cell_key(key: &str) -> anyhow::Result<Cell> {
    let (row, col) = key
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("Invalid ship key '{}': expected \"row,col\"", key))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid row in ship key '{}'", key))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid column in ship key '{}'", key))?;
    Ok(Cell::new(row, col))
}

/// A peer's mirror of one board, rebuilt only from server snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub hits: BTreeSet<Cell>,
    pub misses: BTreeSet<Cell>,
    /// Known sequence cells with their colors; empty for an opponent board.
    pub ships: BTreeMap<Cell, Color>,
}

impl BoardView {
    /// Build a view from an initial snapshot, taking ships if present.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> anyhow::Result<Self> {
        let mut view = BoardView::default();
        view.apply_ships(snapshot)?;
        view.apply_state(snapshot);
        Ok(view)
    }

    /// Replace hits and misses with the snapshot's.
    pub fn apply_state(&mut self, snapshot: &BoardSnapshot) {
        self.hits = snapshot.hits.iter().copied().collect();
        self.misses = snapshot.misses.iter().copied().collect();
    }

    /// Replace the ship layout with the snapshot's, if it carries one.
    pub fn apply_ships(&mut self, snapshot: &BoardSnapshot) -> anyhow::Result<()> {
        if let Some(ships) = &snapshot.ships {
            self.ships = ships
                .iter()
                .map(|(key, &color)| Ok((parse_cell_key(key)?, color)))
                .collect::<anyhow::Result<_>>()?;
        }
        Ok(())
    }

    /// Recover the occupancy map by resolving each color to its position in
    /// `palette`. Colors missing from the palette are skipped.
    pub fn occupied(&self, palette: &[Color]) -> BTreeMap<Cell, SequenceId> {
        self.ships
            .iter()
            .filter_map(|(&cell, color)| {
                palette
                    .iter()
                    .position(|c| c == color)
                    .map(|id| (cell, id))
            })
            .collect()
    }

    pub fn is_targeted(&self, cell: Cell) -> bool {
        self.hits.contains(&cell) || self.misses.contains(&cell)
    }
}
