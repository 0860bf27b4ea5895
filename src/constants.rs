//! Constants for board dimensions, search parameters, and time control.
//!
//! This module contains the configuration constants for the NoGo engine.
//! The board is a plain row-major array of `N * N` cells with no padding.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). NoGo is played on 9x9.
pub const N: usize = 9;

/// Number of cells on the standard board.
pub const CELLS: usize = N * N;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Exploration constant `C` of the UCT formula.
pub const UCT_EXPLORATION: f64 = 0.5;

/// Iteration budget used when neither `simulation` nor `timeout` is configured.
pub const DEFAULT_SIMULATIONS: u32 = 1000;

/// Number of parallel trees used by `mcts-parallel` unless `thread` is given.
pub const DEFAULT_THREADS: usize = 4;

// =============================================================================
// Time Control
// =============================================================================

/// Per-move time factors indexed by game phase (stones placed / 2).
///
/// Openings and endgames get little time; the midgame gets the most.
pub const PHASE_SCHEDULE: [f64; 36] = [
    0.1, 0.1, 0.1, 0.2, 0.2, 0.2, 0.7, 0.7, 0.7, 1.4, 1.4, 1.4, //
    1.5, 1.5, 1.5, 2.0, 2.0, 2.0, 1.5, 1.5, 1.5, 1.5, 1.5, 1.5, //
    1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.4, 0.4, 0.4, 0.2, 0.2, 0.2,
];

/// Fraction of a scheduled time slot actually spent searching.
pub const TIME_MARGIN: f64 = 0.95;

// =============================================================================
// Agent Configuration
// =============================================================================

/// Name used when the configuration does not provide one.
pub const DEFAULT_NAME: &str = "nogo-mcts";

/// Characters that may not appear in an agent name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', '(', ')', ':', ';', ' '];
