use crate::ant::Ant;
use crate::error::{Error, Result};
use crate::graph::{Graph, RoomId, TunnelId};
use crate::routing::{Assignment, Route};
use crate::simulation::capacity::CapacityTracker;
use crate::simulation::record::{Move, MovementRecord, Step};
use tracing::{debug, trace, warn};

/// A used route with its tunnels resolved and its ants queued.
///
/// Ants on one lane leave and arrive in assignment order, so
/// `ants[..first_active]` have arrived, `ants[first_active..next_waiting]`
/// are in transit and the rest still wait at start.
struct Lane<'r> {
    rooms: &'r [RoomId],
    tunnels: Vec<TunnelId>,
    /// Indices into the ant list, in assignment order
    ants: Vec<usize>,
    first_active: usize,
    next_waiting: usize,
}

impl Lane<'_> {
    /// Ants that may move this step: those in transit plus the next one at start
    fn window(&self) -> std::ops::Range<usize> {
        self.first_active..(self.next_waiting + 1).min(self.ants.len())
    }
}

/// Step-by-step movement simulation under room and tunnel capacity
pub struct SimulationEngine<'g> {
    graph: &'g Graph,
}

impl<'g> SimulationEngine<'g> {
    /// Create a simulation engine over a graph
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Move every assigned ant from start to end.
    ///
    /// Each step walks used routes by index and, within a route, ants in
    /// assignment order; every ant tries to advance one room. Capacity is
    /// checked against moves already made in the same step. Only one ant
    /// per route can take the first tunnel in a step, so a step visits the
    /// ants in transit and at most one waiting ant per route.
    pub fn run(&self, assignment: &Assignment, routes: &[Route]) -> Result<MovementRecord> {
        let mut lanes = self.plan(assignment, routes)?;

        let mut ants: Vec<Ant> = assignment.ants().map(|(id, r)| Ant::new(id, r)).collect();
        for lane in lanes.iter_mut().filter(|l| l.rooms.len() == 1) {
            // Single-room route: already home
            for &slot in &lane.ants {
                ants[slot].arrive_in_place();
            }
            lane.first_active = lane.ants.len();
            lane.next_waiting = lane.ants.len();
        }
        let mut remaining = ants.iter().filter(|a| !a.has_arrived()).count();

        let mut tracker = CapacityTracker::new(self.graph);
        let mut record = MovementRecord::default();

        while remaining > 0 {
            tracker.begin_step();
            let mut moves = Vec::new();

            for lane in lanes.iter_mut() {
                for k in lane.window() {
                    let ant = &mut ants[lane.ants[k]];
                    let Some(pos) = ant.position() else {
                        continue;
                    };
                    let (from, to) = (lane.rooms[pos], lane.rooms[pos + 1]);
                    if !tracker.try_move(ant.id, from, to, lane.tunnels[pos]) {
                        continue;
                    }

                    let last = pos + 2 == lane.rooms.len();
                    ant.move_to(pos + 1, last);
                    if last {
                        remaining -= 1;
                    }
                    if k == lane.next_waiting {
                        lane.next_waiting += 1;
                    }
                    moves.push(Move { ant: ant.id, room: to });
                }
                while lane.first_active < lane.next_waiting
                    && ants[lane.ants[lane.first_active]].has_arrived()
                {
                    lane.first_active += 1;
                }
            }

            let step = record.len() + 1;
            if moves.is_empty() {
                warn!(step, waiting = remaining, "no ant could move");
                return Err(Error::CapacityDeadlock { step, waiting: remaining });
            }
            trace!(step, moved = moves.len(), remaining, "step done");
            record.push(Step::new(moves));
        }

        debug!(steps = record.len(), ants = ants.len(), "simulation finished");
        Ok(record)
    }

    /// Resolve used routes into lanes, rejecting any route that does not
    /// run from start to end over existing tunnels
    fn plan<'r>(&self, assignment: &Assignment, routes: &'r [Route]) -> Result<Vec<Lane<'r>>> {
        let (start, end) = (self.graph.start(), self.graph.end());
        let mut lanes = Vec::new();

        for (r, _) in assignment.used_routes() {
            let route = routes.get(r).ok_or(Error::InvalidRoute(r))?;
            if route.first() != Some(start) || route.last() != Some(end) {
                return Err(Error::InvalidRoute(r));
            }
            let tunnels = route
                .rooms()
                .windows(2)
                .map(|w| self.graph.tunnel_between(w[0], w[1]))
                .collect::<Option<Vec<_>>>()
                .ok_or(Error::InvalidRoute(r))?;

            lanes.push(Lane {
                rooms: route.rooms(),
                tunnels,
                ants: assignment.ants_on(r).filter_map(|id| id.index()).collect(),
                first_active: 0,
                next_waiting: 0,
            });
        }
        Ok(lanes)
    }
}

/// Run the simulation for an assignment over `routes`
pub fn simulate(graph: &Graph, assignment: &Assignment, routes: &[Route]) -> Result<MovementRecord> {
    SimulationEngine::new(graph).run(assignment, routes)
}
