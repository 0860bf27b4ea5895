//! Random playouts (game simulation).
//!
//! A playout alternates random legal placements until the side to move has
//! none left; that side loses. Every ply either places a stone or ends the
//! game, so a playout never exceeds the number of cells.

use crate::action::Move;
use crate::board::{Color, Position};

/// Result of a single playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Playout {
    pub winner: Color,
    /// Stones placed before the game ended
    pub plies: usize,
}

/// Uniformly random legal-move selection.
///
/// Owns the random source of one search tree (or one random agent), so two
/// policies built from different seeds never share state.
#[derive(Debug, Clone)]
pub struct RolloutPolicy {
    rng: fastrand::Rng,
    black: Vec<Move>,
    white: Vec<Move>,
}

impl RolloutPolicy {
    /// Build a policy for positions with `cells` cells.
    pub fn new(cells: usize, rng: fastrand::Rng) -> Self {
        Self {
            rng,
            black: (0..cells).map(|c| Move::new(c, Color::Black)).collect(),
            white: (0..cells).map(|c| Move::new(c, Color::White)).collect(),
        }
    }

    pub fn with_seed(cells: usize, seed: u64) -> Self {
        Self::new(cells, fastrand::Rng::with_seed(seed))
    }

    /// Pick a random legal placement for `color`, or `None` if there is none.
    ///
    /// Shuffles the full move list and returns the first legal entry.
    pub fn random_move<P: Position>(&mut self, pos: &P, color: Color) -> Option<Move> {
        let space = match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        };
        self.rng.shuffle(space);
        space.iter().copied().find(|&mv| pos.is_legal(mv))
    }

    /// Play random moves from `pos` until someone cannot move.
    ///
    /// `to_move` places the first stone.
    pub fn simulate<P: Position>(&mut self, pos: &P, to_move: Color) -> Playout {
        let mut state = pos.clone();
        let mut who = to_move;
        let mut plies = 0;

        while let Some(mv) = self.random_move(&state, who) {
            state.try_place(mv);
            plies += 1;
            who = who.opponent();
        }

        Playout {
            winner: who.opponent(),
            plies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::from_rows(&[
            ". X .", //
            "X . .", //
            ". . .",
        ]);
        let mut policy = RolloutPolicy::with_seed(9, 7);
        for _ in 0..50 {
            let mv = policy.random_move(&board, Color::White).unwrap();
            assert_eq!(mv.color, Color::White);
            assert!(board.is_legal(mv));
            assert_ne!(mv.cell, 0, "corner is suicide for White");
        }
    }

    #[test]
    fn test_random_move_none_when_stuck() {
        let board = Board::from_rows(&[
            ". X", //
            "X .",
        ]);
        let mut policy = RolloutPolicy::with_seed(4, 1);
        assert_eq!(policy.random_move(&board, Color::White), None);
    }

    #[test]
    fn test_simulate_terminates_within_cell_count() {
        let board = Board::new(5);
        let mut policy = RolloutPolicy::with_seed(25, 42);
        for _ in 0..100 {
            let playout = policy.simulate(&board, Color::Black);
            assert!(playout.plies <= 25);
        }
    }

    #[test]
    fn test_simulate_stuck_side_loses() {
        let board = Board::from_rows(&[
            ". X", //
            "X .",
        ]);
        let mut policy = RolloutPolicy::with_seed(4, 3);
        let playout = policy.simulate(&board, Color::White);
        assert_eq!(playout.winner, Color::Black);
        assert_eq!(playout.plies, 0);
    }

    #[test]
    fn test_simulate_is_deterministic_for_a_seed() {
        let board = Board::new(5);
        let mut a = RolloutPolicy::with_seed(25, 9);
        let mut b = RolloutPolicy::with_seed(25, 9);
        for _ in 0..20 {
            assert_eq!(a.simulate(&board, Color::Black), b.simulate(&board, Color::Black));
        }
    }
}
