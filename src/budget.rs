//! Search budgets.
//!
//! A search runs whole cycles until its budget is spent. The budget is
//! only consulted between cycles, so a deadline can be overrun by at most
//! one playout.

use std::time::{Duration, Instant};

use crate::constants::{PHASE_SCHEDULE, TIME_MARGIN};

/// How long a single search may run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Budget {
    /// Exactly this many search cycles.
    Iterations(u32),
    /// Fixed wall-clock time per move.
    Time(Duration),
    /// Base time scaled by the game-phase schedule.
    Scheduled(Duration),
}

/// Fraction of the base time allotted to a move after `stones` placements.
pub fn phase_factor(stones: usize) -> f64 {
    PHASE_SCHEDULE[(stones / 2).min(PHASE_SCHEDULE.len() - 1)]
}

/// Tracks one search invocation against its budget.
#[derive(Debug, Clone)]
pub struct BudgetController {
    limit: Limit,
    started: Instant,
}

#[derive(Debug, Clone, Copy)]
enum Limit {
    Iterations(u32),
    Time(Duration),
}

impl BudgetController {
    /// Start the clock for a search on a position with `stones` placed.
    pub fn start(budget: Budget, stones: usize) -> Self {
        let limit = match budget {
            Budget::Iterations(n) => Limit::Iterations(n),
            Budget::Time(d) => Limit::Time(d),
            Budget::Scheduled(base) => {
                Limit::Time(base.mul_f64(phase_factor(stones) * TIME_MARGIN))
            }
        };
        Self {
            limit,
            started: Instant::now(),
        }
    }

    /// Whether no further cycle should start after `iterations` completed ones.
    pub fn exhausted(&self, iterations: u32) -> bool {
        match self.limit {
            Limit::Iterations(n) => iterations >= n,
            Limit::Time(d) => self.started.elapsed() >= d,
        }
    }

    /// Time limit for this search, if it is time-bound.
    pub fn time_limit(&self) -> Option<Duration> {
        match self.limit {
            Limit::Iterations(_) => None,
            Limit::Time(d) => Some(d),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_budget() {
        let ctl = BudgetController::start(Budget::Iterations(3), 0);
        assert!(!ctl.exhausted(0));
        assert!(!ctl.exhausted(2));
        assert!(ctl.exhausted(3));
        assert!(ctl.exhausted(4));
        assert_eq!(ctl.time_limit(), None);
    }

    #[test]
    fn test_zero_time_is_exhausted_immediately() {
        let ctl = BudgetController::start(Budget::Time(Duration::ZERO), 0);
        assert!(ctl.exhausted(0));
    }

    #[test]
    fn test_time_budget_not_exhausted_early() {
        let ctl = BudgetController::start(Budget::Time(Duration::from_secs(60)), 0);
        assert!(!ctl.exhausted(1_000_000));
    }

    #[test]
    fn test_phase_factor() {
        assert_eq!(phase_factor(0), 0.1);
        assert_eq!(phase_factor(31), 2.0);
        assert_eq!(phase_factor(71), 0.2);
        // Past the end of the table the last entry applies
        assert_eq!(phase_factor(500), 0.2);
    }

    #[test]
    fn test_scheduled_budget_scales_base() {
        let base = Duration::from_secs(1);
        let opening = BudgetController::start(Budget::Scheduled(base), 0);
        let midgame = BudgetController::start(Budget::Scheduled(base), 30);
        assert_eq!(opening.time_limit(), Some(base.mul_f64(0.1 * TIME_MARGIN)));
        assert_eq!(midgame.time_limit(), Some(base.mul_f64(2.0 * TIME_MARGIN)));
    }
}
