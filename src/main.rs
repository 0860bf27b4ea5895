//! nogo-mcts: a NoGo MCTS engine.
//!
//! ## Usage
//!
//! - `nogo-mcts` - Show a demo
//! - `nogo-mcts demo` - Run one MCTS decision on an empty board
//! - `nogo-mcts play --black "<args>" --white "<args>"` - Play matches

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nogo_mcts::agent::Player;
use nogo_mcts::board::{Board, Color};
use nogo_mcts::budget::Budget;
use nogo_mcts::game::play_game;
use nogo_mcts::mcts::TreeSearch;

/// nogo-mcts: a Monte Carlo Tree Search engine for NoGo
#[derive(Parser)]
#[command(name = "nogo-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play matches between two configured players
    Play {
        /// Black player options, e.g. "search=mcts simulation=1000"
        #[arg(long, default_value = "")]
        black: String,
        /// White player options
        #[arg(long, default_value = "")]
        white: String,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
    /// Run a simple demo of the engine
    Demo {
        /// Search iterations
        #[arg(long, default_value_t = 1000)]
        simulations: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            black,
            white,
            games,
        }) => run_match(&black, &white, games),
        Some(Commands::Demo { simulations }) => {
            run_demo(simulations);
            Ok(())
        }
        None => {
            run_demo(1000);
            Ok(())
        }
    }
}

fn run_match(black_args: &str, white_args: &str, games: usize) -> Result<()> {
    let mut black = Player::new(&format!("{black_args} role=black"))
        .context("invalid black player configuration")?;
    let mut white = Player::new(&format!("{white_args} role=white"))
        .context("invalid white player configuration")?;

    let mut black_wins = 0;
    for game in 1..=games {
        let record = play_game(&mut black, &mut white, Board::default());
        if record.winner == Color::Black {
            black_wins += 1;
        }
        println!(
            "game {game}: {} ({}) wins in {} moves",
            record.winner,
            match record.winner {
                Color::Black => black.name(),
                Color::White => white.name(),
            },
            record.moves.len()
        );
        println!("{}", record.board);
    }
    println!(
        "black {black_wins} - white {} over {games} games",
        games - black_wins
    );
    Ok(())
}

fn run_demo(simulations: u32) {
    println!("nogo-mcts: NoGo MCTS Engine\n");

    let board = Board::default();
    let size = board.size;
    let mut search = TreeSearch::new(board, Color::Black, fastrand::Rng::new());

    println!("Running {simulations} MCTS simulations...");
    let stats = search.run(Budget::Iterations(simulations));
    match search.best_action() {
        Some(mv) => println!("Best move: {}", mv.display(size)),
        None => println!("Best move: none"),
    }
    let root = search.tree().root();
    println!(
        "Root winrate: {:.1}% over {} visits, {} nodes, {:.2}s",
        root.winrate().unwrap_or(0.0) * 100.0,
        root.visits,
        stats.nodes,
        stats.elapsed.as_secs_f64()
    );
    search.release();
}
