#![cfg(feature = "std")]

//! Terminal rendering and input parsing for the binary.

use std::io::{self, BufRead, Write};

use crate::client::{ClientSession, ClientState};
use crate::core::{Board, Cell};
use crate::protocol::{BoardSnapshot, BoardView};

/// Spreadsheet-style column label: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Format a cell as column label plus 1-based row, e.g. `A5`.
pub fn coord_to_string(cell: Cell) -> String {
    format!("{}{}", column_label(cell.col), cell.row + 1)
}

/// Parse `A5`-style input for a grid of side `grid_size`.
pub fn parse_cell(input: &str, grid_size: usize) -> Result<Cell, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, row_str) = input.split_at(split);
    if letters.is_empty() {
        return Err(format!("Invalid column '{}' - must be a letter", input));
    }
    let col = letters
        .bytes()
        .try_fold(0usize, |acc, b| {
            let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })
        .map(|n| n - 1)
        .filter(|&col| col < grid_size)
        .ok_or_else(|| format!("Column '{}' out of bounds", letters.to_ascii_uppercase()))?;
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    if row == 0 || row > grid_size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, grid_size));
    }
    Ok(Cell::new(row - 1, col))
}

/// Render a board view. Ships are drawn only when `reveal` is set.
pub fn render_board(view: &BoardView, grid_size: usize, reveal: bool) -> String {
    let col_width = column_label(grid_size.saturating_sub(1)).len();
    let row_width = grid_size.to_string().len().max(2);
    let mut out = String::new();
    out.push_str(&" ".repeat(row_width + 2));
    for c in 0..grid_size {
        out.push_str(&format!(" {:>w$}", column_label(c), w = col_width));
    }
    out.push('\n');
    for r in 0..grid_size {
        out.push_str(&format!("  {:>w$}", r + 1, w = row_width));
        for c in 0..grid_size {
            let cell = Cell::new(r, c);
            let ch = if view.hits.contains(&cell) {
                'X'
            } else if view.misses.contains(&cell) {
                'o'
            } else if reveal && view.ships.contains_key(&cell) {
                'S'
            } else {
                '.'
            };
            out.push_str(&format!(" {:>w$}", ch, w = col_width));
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    out
}

/// Render an engine-side board through the same snapshot a peer would get.
pub fn render_engine_board(board: &Board, reveal: bool) -> String {
    let snapshot = BoardSnapshot::of(board, reveal);
    let view = BoardView::from_snapshot(&snapshot).unwrap_or_default();
    render_board(&view, board.grid_size(), reveal)
}

/// Print both boards of a client session.
pub fn print_session(session: &ClientSession) {
    if let Some(view) = session.opponent_board() {
        println!("\nOpponent board:");
        print!("{}", render_board(view, session.grid_size(), false));
    }
    if let Some(view) = session.my_board() {
        println!("\n{}'s board:", session.player_name());
        print!("{}", render_board(view, session.grid_size(), true));
    }
}

/// Prompt text for states that need input.
pub fn prompt_for(state: ClientState) -> Option<&'static str> {
    match state {
        ClientState::Answering => Some("Your answer: "),
        ClientState::Shooting => Some("Target (e.g. A5): "),
        _ => None,
    }
}

/// Print `prompt` and read one line from stdin.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// Read one line without its terminator. A closed input is
/// `UnexpectedEof` rather than an empty line.
pub fn read_line_from<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
