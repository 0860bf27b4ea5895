//! Players and their configuration.
//!
//! A player is configured from a whitespace-separated list of `key=value`
//! pairs, for example `name=mcts role=black search=mcts simulation=2000`.
//!
//! | key          | meaning                                          |
//! |--------------|--------------------------------------------------|
//! | `name`       | display name (no `[]():;` or spaces)             |
//! | `role`       | `black` or `white` (required)                    |
//! | `search`     | `random`, `mcts`, `mcts-parallel`, `alpha-beta`  |
//! | `simulation` | iterations per move                              |
//! | `timeout`    | milliseconds per move                            |
//! | `schedule`   | scale `timeout` by game phase (`0`/`1`)          |
//! | `thread`     | trees for `mcts-parallel` (default 4)            |
//! | `seed`       | random seed                                      |
//!
//! When both `simulation` and `timeout` are given the iteration budget wins.
//! The search strategy is fixed when the player is built.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

use crate::action::Move;
use crate::board::{Color, Position};
use crate::budget::Budget;
use crate::constants::{DEFAULT_NAME, DEFAULT_SIMULATIONS, DEFAULT_THREADS, FORBIDDEN_NAME_CHARS};
use crate::error::ConfigError;
use crate::mcts::tree_search;
use crate::parallel::{ParallelSearch, clock_seed};
use crate::rollout::RolloutPolicy;

/// Which search a player runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Random,
    Mcts,
    MctsParallel,
    AlphaBeta,
}

impl std::str::FromStr for SearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "random" => Ok(SearchMode::Random),
            "mcts" => Ok(SearchMode::Mcts),
            "mcts-parallel" => Ok(SearchMode::MctsParallel),
            "alpha-beta" => Ok(SearchMode::AlphaBeta),
            _ => Err(ConfigError::InvalidSearchMode(s.to_string())),
        }
    }
}

/// Parsed player configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub role: Color,
    pub mode: SearchMode,
    pub budget: Budget,
    pub threads: usize,
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Parse a `key=value` argument string.
    pub fn parse(args: &str) -> Result<Self, ConfigError> {
        let meta: HashMap<&str, &str> = args
            .split_whitespace()
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();

        for key in meta.keys() {
            if !matches!(
                *key,
                "name" | "role" | "search" | "simulation" | "timeout" | "schedule" | "thread" | "seed"
            ) {
                debug!("ignoring unknown option {key}");
            }
        }

        let name = meta.get("name").copied().unwrap_or(DEFAULT_NAME).to_string();
        if name.contains(FORBIDDEN_NAME_CHARS) {
            return Err(ConfigError::InvalidName(name));
        }

        let role = match meta.get("role").copied() {
            Some("black") => Color::Black,
            Some("white") => Color::White,
            other => return Err(ConfigError::InvalidRole(other.unwrap_or("unknown").to_string())),
        };

        let mode: SearchMode = meta.get("search").copied().unwrap_or("random").parse()?;

        let simulation: Option<u32> = parse_value(&meta, "simulation")?;
        let timeout: Option<u64> = parse_value(&meta, "timeout")?;
        let schedule = match meta.get("schedule").copied() {
            None | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => return Err(invalid("schedule", other)),
        };
        let budget = match (simulation, timeout) {
            (Some(n), Some(_)) => {
                warn!("both simulation and timeout given, using simulation={n}");
                Budget::Iterations(n)
            }
            (Some(n), None) => Budget::Iterations(n),
            (None, Some(ms)) if schedule => Budget::Scheduled(Duration::from_millis(ms)),
            (None, Some(ms)) => Budget::Time(Duration::from_millis(ms)),
            (None, None) => Budget::Iterations(DEFAULT_SIMULATIONS),
        };

        let threads = parse_value(&meta, "thread")?.unwrap_or(DEFAULT_THREADS);
        if threads == 0 {
            return Err(invalid("thread", "0"));
        }
        let seed = parse_value(&meta, "seed")?;

        Ok(Self {
            name,
            role,
            mode,
            budget,
            threads,
            seed,
        })
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(
    meta: &HashMap<&str, &str>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    meta.get(key)
        .map(|v| v.parse().map_err(|_| invalid(key, v)))
        .transpose()
}

/// The search strategy, chosen once from the configured mode.
pub enum Strategy {
    Random,
    Mcts,
    MctsParallel(ParallelSearch),
}

/// A NoGo player.
pub struct Player {
    config: AgentConfig,
    strategy: Strategy,
    rng: fastrand::Rng,
}

impl Player {
    /// Build a player from a `key=value` argument string.
    pub fn new(args: &str) -> Result<Self, ConfigError> {
        Self::from_config(AgentConfig::parse(args)?)
    }

    pub fn from_config(config: AgentConfig) -> Result<Self, ConfigError> {
        let strategy = match config.mode {
            SearchMode::Random => Strategy::Random,
            SearchMode::Mcts => Strategy::Mcts,
            SearchMode::MctsParallel => Strategy::MctsParallel(ParallelSearch::new(config.threads)?),
            SearchMode::AlphaBeta => return Err(ConfigError::Unimplemented("alpha-beta")),
        };
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::with_seed(clock_seed()),
        };
        Ok(Self {
            config,
            strategy,
            rng,
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn role(&self) -> Color {
        self.config.role
    }

    /// Choose a move for this player's role, or `None` if it has no legal move.
    pub fn propose_move<P: Position>(&mut self, position: &P) -> Option<Move> {
        let role = self.config.role;
        let seed = self.rng.u64(..);
        match &self.strategy {
            Strategy::Random => {
                RolloutPolicy::with_seed(position.cell_count(), seed).random_move(position, role)
            }
            Strategy::Mcts => {
                tree_search(position, role, self.config.budget, fastrand::Rng::with_seed(seed))
            }
            Strategy::MctsParallel(coordinator) => {
                coordinator.search(position, role, self.config.budget, seed).best
            }
        }
    }
}
