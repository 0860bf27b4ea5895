//! Root-parallel search.
//!
//! Several independent trees search the same position on a bounded thread
//! pool. Trees share nothing; each worker owns its position copy and its
//! random source. Once every worker has finished, each tree's own best move
//! is read and the move recommended by the most trees is played.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rayon::prelude::*;

use crate::action::Move;
use crate::board::{Color, Position};
use crate::budget::Budget;
use crate::error::ConfigError;
use crate::mcts::TreeSearch;

/// Outcome of one parallel search.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelOutcome {
    /// The aggregated decision
    pub best: Option<Move>,
    /// Each worker's own recommendation, in worker order
    pub votes: Vec<Option<Move>>,
    /// Iterations completed by each worker
    pub iterations: Vec<u32>,
}

/// Runs one search tree per worker thread and aggregates by plurality.
pub struct ParallelSearch {
    threads: usize,
    pool: rayon::ThreadPool,
}

impl ParallelSearch {
    /// Build a coordinator with a dedicated pool of `threads` workers.
    pub fn new(threads: usize) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "thread".into(),
                value: threads.to_string(),
            });
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mcts-worker-{i}"))
            .build()?;
        Ok(Self { threads, pool })
    }

    /// Search `position` for `to_move` on every worker.
    ///
    /// Worker `i` seeds its random source with `base_seed + i`.
    pub fn search<P: Position>(
        &self,
        position: &P,
        to_move: Color,
        budget: Budget,
        base_seed: u64,
    ) -> ParallelOutcome {
        let results: Vec<(Option<Move>, u32)> = self.pool.install(|| {
            (0..self.threads)
                .into_par_iter()
                .map(|i| {
                    let rng = fastrand::Rng::with_seed(base_seed.wrapping_add(i as u64));
                    let mut search = TreeSearch::new(position.clone(), to_move, rng);
                    let stats = search.run(budget);
                    let best = search.best_action();
                    search.release();
                    (best, stats.iterations)
                })
                .collect()
        });

        let (votes, iterations): (Vec<_>, Vec<_>) = results.into_iter().unzip();
        let best = plurality_vote(&votes);
        debug!(
            "parallel search: {} workers, {} total iterations, decision {}",
            self.threads,
            iterations.iter().map(|&n| n as u64).sum::<u64>(),
            best.map_or_else(|| "none".to_string(), |mv| mv.display(position.size()).to_string())
        );
        ParallelOutcome {
            best,
            votes,
            iterations,
        }
    }
}

/// Pick the move recommended most often.
///
/// Ties go to the candidate that appeared first. `None` votes are ignored;
/// the result is `None` only when no worker found a move.
pub fn plurality_vote(votes: &[Option<Move>]) -> Option<Move> {
    // Candidates in order of first appearance
    let mut tally: Vec<(Move, usize)> = Vec::new();
    for mv in votes.iter().flatten() {
        match tally.iter_mut().find(|(m, _)| m == mv) {
            Some((_, count)) => *count += 1,
            None => tally.push((*mv, 1)),
        }
    }

    let mut best: Option<(Move, usize)> = None;
    for (mv, count) in tally {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((mv, count));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Seed derived from the wall clock, for runs without a configured seed.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    const A: Move = Move {
        cell: 10,
        color: Color::Black,
    };
    const B: Move = Move {
        cell: 20,
        color: Color::Black,
    };

    #[test]
    fn test_plurality_majority() {
        assert_eq!(plurality_vote(&[Some(A), Some(A), Some(B), Some(A)]), Some(A));
    }

    #[test]
    fn test_plurality_tie_goes_to_first_seen() {
        assert_eq!(plurality_vote(&[Some(B), Some(A), Some(A), Some(B)]), Some(B));
        assert_eq!(plurality_vote(&[Some(A), Some(B)]), Some(A));
    }

    #[test]
    fn test_plurality_ignores_none() {
        assert_eq!(plurality_vote(&[None, Some(B), None]), Some(B));
        assert_eq!(plurality_vote(&[None, None]), None);
        assert_eq!(plurality_vote(&[]), None);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(ParallelSearch::new(0).is_err());
    }

    #[test]
    fn test_parallel_search_runs_every_worker() {
        let coordinator = ParallelSearch::new(4).unwrap();
        let board = Board::new(5);
        let outcome = coordinator.search(&board, Color::Black, Budget::Iterations(100), 17);
        assert_eq!(outcome.votes.len(), 4);
        assert_eq!(outcome.iterations, vec![100; 4]);
        assert!(outcome.votes.iter().all(|v| v.is_some()));
        assert_eq!(outcome.best, plurality_vote(&outcome.votes));
        assert_eq!(outcome.best.unwrap().color, Color::Black);
    }

    #[test]
    fn test_parallel_search_deterministic_with_seed() {
        let coordinator = ParallelSearch::new(3).unwrap();
        let board = Board::new(5);
        let a = coordinator.search(&board, Color::White, Budget::Iterations(150), 99);
        let b = coordinator.search(&board, Color::White, Budget::Iterations(150), 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_search_no_moves() {
        let coordinator = ParallelSearch::new(2).unwrap();
        let board = Board::from_rows(&[
            ". X", //
            "X .",
        ]);
        let outcome = coordinator.search(&board, Color::White, Budget::Iterations(10), 1);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.votes, vec![None, None]);
    }
}
