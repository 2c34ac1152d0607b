//! # Lem-in
//!
//! Moves a colony of ants from the start room of a farm to its end room in
//! as few turns as possible.
//!
//! Routes between start and end are enumerated exhaustively, a selector
//! spreads the ants over a combination of them, and a step-by-step
//! simulation enforces that interior rooms hold one ant and tunnels carry
//! one ant per turn.

pub mod ant;
pub mod cli;
pub mod error;
pub mod graph;
pub mod routing;
pub mod simulation;
pub mod solver;

pub use ant::{Ant, AntId, AntState};
pub use cli::{Args, Strategy};
pub use error::{Error, ParseError, Result};
pub use graph::{parse_graph, parse_graph_str, Graph, GraphBuilder, RoomId};
pub use routing::{
    enumerate, turns, Assignment, DisjointSelector, GreedySelector, Route, RouteSelector,
};
pub use simulation::{simulate, MovementRecord, SimulationEngine};
pub use solver::{solve, Solution};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        parse_graph, solve, Args, Assignment, Error, Graph, MovementRecord, ParseError, Result,
        Route, RouteSelector, Solution, Strategy,
    };
}
