//! nogo-mcts: a Monte Carlo Tree Search engine for NoGo.
//!
//! NoGo is played on a 9x9 Go board, but capturing is forbidden and a
//! player with no legal placement loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, search parameters, time schedule
//! - [`board`] - NoGo rules and the [`board::Position`] trait the engine searches over
//! - [`action`] - Moves and text coordinates
//! - [`node`] - Arena-backed search tree
//! - [`rollout`] - Random legal-move playouts
//! - [`budget`] - Iteration and time budgets
//! - [`mcts`] - Single-tree UCT search
//! - [`parallel`] - Root-parallel search with plurality voting
//! - [`agent`] - Player configuration and move proposal
//! - [`game`] - Complete games between two players
//!
//! ## Example
//!
//! ```
//! use nogo_mcts::board::{Board, Color};
//! use nogo_mcts::budget::Budget;
//! use nogo_mcts::mcts::tree_search;
//!
//! let board = Board::default();
//! let rng = fastrand::Rng::with_seed(1);
//! let best = tree_search(&board, Color::Black, Budget::Iterations(100), rng);
//! println!("Best move: {}", best.unwrap().display(board.size));
//! ```

pub mod action;
pub mod agent;
pub mod board;
pub mod budget;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod node;
pub mod parallel;
pub mod rollout;
