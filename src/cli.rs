use crate::routing::{DisjointSelector, GreedySelector, RouteSelector};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// CLI arguments for the ant farm solver
#[derive(Parser, Debug)]
#[command(name = "lem_in", about = "🐜 Move an ant colony across a farm in as few turns as possible")]
pub struct Args {
    /// Farm description (.txt)
    pub file: PathBuf,

    /// How routes are combined and ants spread over them
    #[arg(long, value_enum, default_value_t = Strategy::Disjoint)]
    pub strategy: Strategy,

    /// Do not echo the farm description before the moves
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Print a run summary on stderr
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// More logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Route selection strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Best combination of routes sharing no room or tunnel
    Disjoint,
    /// Plain min-max greedy over every route, shared rooms included.
    /// Routes crossing a tunnel in opposite directions can deadlock.
    Greedy,
}

impl Strategy {
    pub fn selector(self) -> Box<dyn RouteSelector> {
        match self {
            Strategy::Disjoint => Box::new(DisjointSelector),
            Strategy::Greedy => Box::new(GreedySelector),
        }
    }
}

impl Args {
    /// Log level for the `-v` count
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
