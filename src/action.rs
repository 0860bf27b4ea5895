//! Moves and their text coordinates.
//!
//! A move is a placement of one color on one cell. There is no pass in
//! NoGo; "no move available" is expressed as `Option::<Move>::None`.
//!
//! Coordinates follow the usual Go convention: columns are letters
//! skipping `I`, rows are numbered from the bottom (`A1` is the lower-left
//! corner). Cell indices are row-major from the top-left corner.

use std::fmt;

use crate::board::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub cell: usize,
    pub color: Color,
}

impl Move {
    #[inline]
    pub fn new(cell: usize, color: Color) -> Self {
        Self { cell, color }
    }

    /// Display as "B E5" on a board of side `size`.
    ///
    /// A move does not know its board, so the size has to be supplied.
    pub fn display(self, size: usize) -> MoveDisplay {
        MoveDisplay { mv: self, size }
    }
}

/// Helper returned by [`Move::display`].
pub struct MoveDisplay {
    mv: Move,
    size: usize,
}

impl fmt::Display for MoveDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.mv.color {
            Color::Black => 'B',
            Color::White => 'W',
        };
        write!(f, "{side} {}", format_cell(self.mv.cell, self.size))
    }
}

/// Parse a coordinate such as "D4" on a board of the given size.
///
/// Returns `None` for malformed or off-board coordinates.
pub fn parse_cell(s: &str, size: usize) -> Option<usize> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut col = (col_char as u8 - b'A') as usize;
    // Skip 'I' column
    if col_char > 'I' {
        col -= 1;
    }

    let row: usize = chars.as_str().parse().ok()?;
    if col >= size || row == 0 || row > size {
        return None;
    }
    Some((size - row) * size + col)
}

/// Convert a cell index to a coordinate string (e.g. "D4").
pub fn format_cell(cell: usize, size: usize) -> String {
    let row = cell / size;
    let col = cell % size;

    let mut c = (b'A' + col as u8) as char;
    if c >= 'I' {
        c = (c as u8 + 1) as char;
    }

    format!("{c}{}", size - row)
}
