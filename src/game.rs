//! Playing complete games between two players.

use log::{info, warn};

use crate::action::Move;
use crate::agent::Player;
use crate::board::{Board, Color, Position};

/// How a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    /// The loser had no legal placement.
    NoMove,
    /// The loser proposed an illegal placement.
    IllegalMove(Move),
}

/// Result of a finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Color,
    pub ending: Ending,
    pub moves: Vec<Move>,
    pub board: Board,
}

/// Play one game on `board`; Black moves first.
///
/// The players must hold opposite roles.
pub fn play_game(black: &mut Player, white: &mut Player, mut board: Board) -> GameRecord {
    debug_assert_eq!(black.role(), Color::Black);
    debug_assert_eq!(white.role(), Color::White);

    let mut moves = Vec::with_capacity(board.cell_count());
    let mut turn = Color::Black;

    loop {
        let player = match turn {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };

        let ending = match player.propose_move(&board) {
            None => Ending::NoMove,
            Some(mv) => {
                if mv.color == turn && board.try_place(mv) {
                    moves.push(mv);
                    turn = turn.opponent();
                    continue;
                }
                warn!(
                    "{} proposed illegal move {}",
                    player.name(),
                    mv.display(board.size)
                );
                Ending::IllegalMove(mv)
            }
        };

        let winner = turn.opponent();
        info!("{winner} wins after {} moves ({ending:?})", moves.len());
        return GameRecord {
            winner,
            ending,
            moves,
            board,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_game_ends_with_no_move() {
        let mut black = Player::new("role=black seed=1").unwrap();
        let mut white = Player::new("role=white seed=2").unwrap();
        let record = play_game(&mut black, &mut white, Board::new(5));

        assert_eq!(record.ending, Ending::NoMove);
        assert!(record.moves.len() <= 25);
        assert_eq!(record.board.stones(), record.moves.len());
        // Moves alternate starting with Black
        for (i, mv) in record.moves.iter().enumerate() {
            let expected = if i % 2 == 0 { Color::Black } else { Color::White };
            assert_eq!(mv.color, expected);
        }
        // The side to move after the last stone lost
        let loser = if record.moves.len() % 2 == 0 { Color::Black } else { Color::White };
        assert_eq!(record.winner, loser.opponent());
    }

    #[test]
    fn test_stuck_first_player_loses() {
        let mut black = Player::new("role=black seed=1").unwrap();
        let mut white = Player::new("role=white seed=2").unwrap();
        let board = Board::from_rows(&[
            ". O", //
            "O .",
        ]);
        // Both empty cells are suicide for Black
        let record = play_game(&mut black, &mut white, board);
        assert_eq!(record.winner, Color::White);
        assert!(record.moves.is_empty());
    }
}
