//! NoGo board and the position interface the search engine consumes.
//!
//! NoGo uses Go's liberty rules with two differences: capturing is
//! forbidden and there is no pass. A placement is legal only if the cell is
//! empty, the new stone's group keeps a liberty, and no adjacent opponent
//! group loses its last liberty. A player with no legal placement loses.

use std::fmt;
use std::ops::Range;

use crate::action::Move;
use crate::constants::N;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// What the search engine needs from a game position.
///
/// Cells are identified by `0..cell_count()`. Implementations must leave
/// the position untouched when a placement is illegal.
pub trait Position: Clone + Send + Sync {
    /// Side length of the square grid, used for coordinates.
    fn size(&self) -> usize;

    /// Total number of cells, occupied or not.
    fn cell_count(&self) -> usize;

    /// Attempt a placement. Returns `true` and mutates `self` if it was legal.
    fn try_place(&mut self, mv: Move) -> bool;

    /// Number of stones currently on the board.
    fn stones(&self) -> usize;

    /// All cell identifiers in enumeration order.
    fn cells(&self) -> Range<usize> {
        0..self.cell_count()
    }

    /// Check a placement on a private copy.
    fn is_legal(&self, mv: Move) -> bool {
        self.clone().try_place(mv)
    }
}

/// Outcome of a placement attempt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    Legal,
    OutOfBounds,
    Occupied,
    /// The placed stone's group would have no liberty.
    Suicide,
    /// An adjacent opponent group would lose its last liberty.
    Capture,
}

impl Placement {
    #[inline]
    pub fn is_legal(self) -> bool {
        self == Placement::Legal
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<Option<Color>>,
    stones: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(N)
    }
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            stones: 0,
        }
    }

    /// Build a board from rows of `X` (black), `O` (white) and `.` (empty),
    /// top row first. Stones are set directly, without legality checks.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let color = match ch {
                    'X' | 'x' => Some(Color::Black),
                    'O' | 'o' => Some(Color::White),
                    _ => None,
                };
                if let Some(color) = color {
                    let idx = board.idx(x, y);
                    board.cells[idx] = Some(color);
                    board.stones += 1;
                }
            }
        }
        board
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    /// Stone at a cell index, `None` if empty or out of range.
    pub fn at(&self, cell: usize) -> Option<Color> {
        self.cells.get(cell).copied().flatten()
    }

    fn neighbors(&self, cell: usize) -> std::iter::Take<std::array::IntoIter<usize, 4>> {
        let s = self.size;
        let (x, y) = (cell % s, cell / s);
        let mut out = [0; 4];
        let mut len = 0;
        for (ok, n) in [
            (x > 0, cell.wrapping_sub(1)),
            (x + 1 < s, cell + 1),
            (y > 0, cell.wrapping_sub(s)),
            (y + 1 < s, cell + s),
        ] {
            if ok {
                out[len] = n;
                len += 1;
            }
        }
        out.into_iter().take(len)
    }

    /// Place a stone. Illegal placements leave the board unchanged.
    pub fn place(&mut self, cell: usize, color: Color) -> Placement {
        if cell >= self.cells.len() {
            return Placement::OutOfBounds;
        }
        if self.cells[cell].is_some() {
            return Placement::Occupied;
        }
        self.cells[cell] = Some(color);

        let opp = color.opponent();
        let captures = self
            .neighbors(cell)
            .any(|n| self.cells[n] == Some(opp) && !self.has_liberty(n));
        let outcome = if captures {
            Placement::Capture
        } else if !self.has_liberty(cell) {
            Placement::Suicide
        } else {
            Placement::Legal
        };

        if outcome.is_legal() {
            self.stones += 1;
        } else {
            self.cells[cell] = None;
        }
        outcome
    }

    /// Every legal placement for `color`, in cell order.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.cells()
            .map(|cell| Move::new(cell, color))
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }

    /// Whether the group through `cell` touches at least one empty cell.
    ///
    /// Stops at the first liberty found.
    fn has_liberty(&self, cell: usize) -> bool {
        let Some(color) = self.cells[cell] else {
            return true;
        };
        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![cell];
        visited[cell] = true;
        while let Some(c) = stack.pop() {
            for n in self.neighbors(c) {
                match self.cells[n] {
                    None => return true,
                    Some(nc) if nc == color && !visited[n] => {
                        visited[n] = true;
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

impl Position for Board {
    fn size(&self) -> usize {
        self.size
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn try_place(&mut self, mv: Move) -> bool {
        self.place(mv.cell, mv.color).is_legal()
    }

    fn stones(&self) -> usize {
        self.stones
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_on_empty_board() {
        let mut board = Board::new(9);
        assert_eq!(board.place(40, Color::Black), Placement::Legal);
        assert_eq!(board.at(40), Some(Color::Black));
        assert_eq!(board.stones(), 1);
    }

    #[test]
    fn test_occupied_and_out_of_bounds() {
        let mut board = Board::new(9);
        board.place(0, Color::Black);
        assert_eq!(board.place(0, Color::White), Placement::Occupied);
        assert_eq!(board.place(81, Color::White), Placement::OutOfBounds);
        assert_eq!(board.stones(), 1);
    }

    #[test]
    fn test_suicide_is_illegal() {
        // White at the corner would have no liberties
        let mut board = Board::from_rows(&[
            ". X .", //
            "X . .", //
            ". . .",
        ]);
        assert_eq!(board.place(0, Color::White), Placement::Suicide);
        assert_eq!(board.at(0), None);
        // Black filling its own eye is fine: the group still has liberties
        assert_eq!(board.place(0, Color::Black), Placement::Legal);
    }

    #[test]
    fn test_capture_is_illegal() {
        // Black at A2 would take the last liberty of the white corner stone
        let mut board = Board::from_rows(&[
            "O X .", //
            ". . .", //
            ". . .",
        ]);
        assert_eq!(board.place(3, Color::Black), Placement::Capture);
        assert_eq!(board.at(3), None);
        assert_eq!(board.stones(), 2);
    }

    #[test]
    fn test_liberty_search_follows_the_group() {
        // The chain's only liberty is at the far end, away from A3
        let board = Board::from_rows(&[
            "X X X", //
            "O O X", //
            ". . .",
        ]);
        assert!(board.has_liberty(0));
        assert!(board.has_liberty(3));
        let closed = Board::from_rows(&[
            "X X O", //
            "O O .", //
            ". . .",
        ]);
        assert!(!closed.has_liberty(0));
    }

    #[test]
    fn test_neighbors_at_edges_and_center() {
        let board = Board::new(3);
        assert_eq!(board.neighbors(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(board.neighbors(4).collect::<Vec<_>>(), vec![3, 5, 1, 7]);
        assert_eq!(board.neighbors(8).collect::<Vec<_>>(), vec![7, 5]);
    }

    #[test]
    fn test_legal_moves_on_empty_board() {
        let board = Board::new(5);
        assert_eq!(board.legal_moves(Color::Black).len(), 25);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["X .", ". O"]);
        assert_eq!(board.to_string(), "X . \n. O \n");
    }
}
