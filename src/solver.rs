use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::routing::{enumerate_ids, Assignment, Route, RouteSelector};
use crate::simulation::{simulate, MovementRecord};
use colored::Colorize;
use std::time::Duration;
use tracing::{info, warn};

/// Everything computed for one farm
#[derive(Clone, Debug)]
pub struct Solution {
    pub routes: Vec<Route>,
    pub assignment: Assignment,
    pub record: MovementRecord,
}

impl Solution {
    /// Turns predicted by the selector's cost model
    pub fn estimated_turns(&self) -> usize {
        self.assignment.estimated_turns(&self.routes)
    }

    /// Turns the simulation actually took
    pub fn turns(&self) -> usize {
        self.record.len()
    }

    /// Print a run summary on stderr
    pub fn print_summary(&self, graph: &Graph, selector: &dyn RouteSelector, elapsed: Duration) {
        eprintln!("\n{}", "===".bright_blue().bold());
        for (r, count) in self.assignment.used_routes() {
            eprintln!(
                "{} {} {}",
                format!("route {r}").cyan(),
                self.routes[r].names(graph).join("-").dimmed(),
                format!("ants={count}").yellow(),
            );
        }
        eprintln!(
            "{} {:.3} ms {} {} {} {} {} {}",
            "⏱️  Solved in".green().bold(),
            elapsed.as_secs_f64() * 1000.0,
            "|".dimmed(),
            format!("strategy={}", selector.name()).cyan(),
            format!("ants={}", graph.ant_count()).cyan(),
            format!("routes={}/{}", self.assignment.used_routes().count(), self.routes.len()).cyan(),
            format!("estimated={}", self.estimated_turns()).cyan(),
            format!("turns={}", self.turns()).cyan(),
        );
    }
}

/// Enumerate routes, select an assignment and simulate it
pub fn solve(graph: &Graph, selector: &dyn RouteSelector) -> Result<Solution> {
    let routes = enumerate_ids(graph, graph.start(), graph.end());
    if routes.is_empty() {
        warn!(start = graph.name(graph.start()), end = graph.name(graph.end()), "no route");
        return Err(Error::NoPathFound);
    }

    let assignment = selector.select(&routes, graph.ant_count())?;
    let record = simulate(graph, &assignment, &routes)?;

    let solution = Solution {
        routes,
        assignment,
        record,
    };
    info!(
        strategy = selector.name(),
        estimated = solution.estimated_turns(),
        turns = solution.turns(),
        "farm solved"
    );
    Ok(solution)
}
