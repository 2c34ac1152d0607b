use crate::ant::AntId;
use crate::error::{Error, Result};
use crate::graph::RoomId;
use crate::routing::Route;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashSet};
use std::iter;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// Steps a route needs on its own to deliver `ants` ants.
///
/// The first ant walks `edge_count` tunnels, every ant queued behind it
/// lands one step later. An unused route has no cost, hence `NonZeroUsize`.
#[inline]
pub fn turns(route: &Route, ants: NonZeroUsize) -> usize {
    route.edge_count() + ants.get() - 1
}

/// Which route every ant takes.
///
/// Ants are numbered 1..=N in the order they were assigned; that order is
/// also the order in which ants sharing a route leave the start room.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    order: Vec<usize>,
    counts: BTreeMap<usize, usize>,
}

impl Assignment {
    /// Build from the route index of each ant, in assignment order.
    /// Only the first `u32::MAX` ants can be numbered.
    pub fn from_order(order: Vec<usize>) -> Self {
        let mut counts = BTreeMap::new();
        for &route in &order {
            *counts.entry(route).or_insert(0) += 1;
        }
        Self { order, counts }
    }

    /// Total number of ants assigned
    #[inline]
    pub fn ant_count(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ants assigned to `route`; zero when the route is unused
    pub fn count(&self, route: usize) -> usize {
        self.counts.get(&route).copied().unwrap_or(0)
    }

    /// `(route index, ant count)` for every used route, by route index
    pub fn used_routes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&r, &n)| (r, n))
    }

    /// Every ant with its route, by ascending ant id
    pub fn ants(&self) -> impl Iterator<Item = (AntId, usize)> + '_ {
        self.order
            .iter()
            .enumerate()
            .map_while(|(i, &r)| Some((AntId::from_index(i)?, r)))
    }

    /// Ants riding `route`, in assignment order
    pub fn ants_on(&self, route: usize) -> impl Iterator<Item = AntId> + '_ {
        self.ants().filter(move |&(_, r)| r == route).map(|(id, _)| id)
    }

    pub fn route_of(&self, ant: AntId) -> Option<usize> {
        ant.index().and_then(|i| self.order.get(i).copied())
    }

    /// Slowest used route under the independent-route cost model.
    /// Routes sharing rooms may take longer once simulated.
    pub fn estimated_turns(&self, routes: &[Route]) -> usize {
        self.used_routes()
            .filter_map(|(r, n)| Some(turns(routes.get(r)?, NonZeroUsize::new(n)?)))
            .max()
            .unwrap_or(0)
    }
}

/// Strategy turning a set of candidate routes into an [`Assignment`]
pub trait RouteSelector {
    /// Assign `ants` ants to `routes`. Fails with [`Error::NoPathFound`]
    /// when there is at least one ant and nowhere to send it.
    fn select(&self, routes: &[Route], ants: usize) -> Result<Assignment>;

    fn name(&self) -> &'static str;
}

/// Min-max greedy over every route it is given.
///
/// Each ant goes to the route with the lowest virtual cost
/// `edge_count + already assigned`; ties prefer fewer edges, then the
/// lower route index. Routes may share rooms, so the simulation can run
/// longer than the estimate, and routes crossing a tunnel in opposite
/// directions can end in [`Error::CapacityDeadlock`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySelector;

impl RouteSelector for GreedySelector {
    fn select(&self, routes: &[Route], ants: usize) -> Result<Assignment> {
        ensure_routes(routes, ants)?;
        let candidates: Vec<usize> = (0..routes.len()).collect();
        let assignment = distribute(routes, &candidates, ants);
        debug!(
            used = assignment.used_routes().count(),
            turns = assignment.estimated_turns(routes),
            "greedy selection"
        );
        Ok(assignment)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Heuristic search over combinations of routes that share no interior
/// room and no tunnel, distributing ants greedily inside each combination
/// and keeping the one with the fewest estimated turns.
///
/// Every route seeds one combination, which then absorbs each compatible
/// route in ascending edge count. This is not exhaustive: a combination
/// that no single seed grows into is never tried.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisjointSelector;

impl RouteSelector for DisjointSelector {
    fn select(&self, routes: &[Route], ants: usize) -> Result<Assignment> {
        ensure_routes(routes, ants)?;

        let sorted = by_length(routes, &(0..routes.len()).collect::<Vec<_>>());
        let mut best: Option<(usize, Assignment)> = None;

        for &seed in &sorted {
            let mut rooms: HashSet<RoomId> = HashSet::new();
            let mut tunnels: HashSet<(RoomId, RoomId)> = HashSet::new();
            let mut chosen = Vec::new();

            let others = sorted.iter().copied().filter(|&c| c != seed);
            for candidate in iter::once(seed).chain(others) {
                let route = &routes[candidate];
                let clashes = route.interior().iter().any(|r| rooms.contains(r))
                    || route.tunnels().any(|t| tunnels.contains(&t));
                if clashes {
                    continue;
                }
                rooms.extend(route.interior().iter().copied());
                tunnels.extend(route.tunnels());
                chosen.push(candidate);
            }

            let assignment = distribute(routes, &chosen, ants);
            let cost = assignment.estimated_turns(routes);
            trace!(seed, combination = ?chosen, cost, "candidate combination");

            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((cost, assignment));
            }
        }

        // No routes at all means no ants either
        let Some((cost, assignment)) = best else {
            return Ok(Assignment::default());
        };
        debug!(
            used = assignment.used_routes().count(),
            turns = cost,
            "disjoint selection"
        );
        Ok(assignment)
    }

    fn name(&self) -> &'static str {
        "disjoint"
    }
}

fn ensure_routes(routes: &[Route], ants: usize) -> Result<()> {
    if u32::try_from(ants).is_err() {
        return Err(Error::TooManyAnts(ants));
    }
    if routes.is_empty() && ants > 0 {
        return Err(Error::NoPathFound);
    }
    Ok(())
}

/// Candidate indices sorted by (edge count, index)
fn by_length(routes: &[Route], candidates: &[usize]) -> Vec<usize> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by_key(|&i| (routes[i].edge_count(), i));
    sorted
}

/// Greedy min-max distribution of `ants` over `candidates`
fn distribute(routes: &[Route], candidates: &[usize], ants: usize) -> Assignment {
    // Min-heap on (virtual cost, edges, route index)
    let mut heap: BinaryHeap<Reverse<(usize, usize, usize)>> = by_length(routes, candidates)
        .into_iter()
        .map(|i| {
            let edges = routes[i].edge_count();
            Reverse((edges, edges, i))
        })
        .collect();

    let mut order = Vec::with_capacity(ants);
    for _ in 0..ants {
        let Some(Reverse((cost, edges, route))) = heap.pop() else {
            break;
        };
        order.push(route);
        heap.push(Reverse((cost + 1, edges, route)));
    }
    Assignment::from_order(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(ids: &[u32]) -> Route {
        Route::new(ids.iter().map(|&i| RoomId(i)).collect())
    }

    fn n(v: usize) -> NonZeroUsize {
        NonZeroUsize::new(v).unwrap()
    }

    #[test]
    fn test_turns_single_path_single_ant() {
        // start, room1, end: two tunnels, one ant
        assert_eq!(turns(&route(&[0, 1, 2]), n(1)), 2);
        assert_eq!(turns(&route(&[0, 2]), n(1)), 1);
    }

    #[test]
    fn test_turns_grow_with_ants_and_edges() {
        let short = route(&[0, 1]);
        let long = route(&[0, 2, 3, 1]);
        for ants in 1..20 {
            assert!(turns(&short, n(ants + 1)) > turns(&short, n(ants)));
            assert!(turns(&long, n(ants)) > turns(&short, n(ants)));
        }
    }

    #[test]
    fn test_turns_single_room_route() {
        assert_eq!(turns(&route(&[4]), n(3)), 2);
    }

    #[test]
    fn test_assignment_bookkeeping() {
        let a = Assignment::from_order(vec![2, 0, 2, 2]);

        assert_eq!(a.ant_count(), 4);
        assert_eq!(a.count(2), 3);
        assert_eq!(a.count(1), 0);
        assert_eq!(a.used_routes().collect::<Vec<_>>(), vec![(0, 1), (2, 3)]);
        assert_eq!(
            a.ants_on(2).collect::<Vec<_>>(),
            vec![AntId(1), AntId(3), AntId(4)]
        );
        assert_eq!(a.route_of(AntId(2)), Some(0));
        assert_eq!(a.route_of(AntId(5)), None);
        assert_eq!(a.route_of(AntId(0)), None);
    }

    #[test]
    fn test_empty_routes_with_ants() {
        assert!(matches!(GreedySelector.select(&[], 3), Err(Error::NoPathFound)));
        assert!(matches!(DisjointSelector.select(&[], 1), Err(Error::NoPathFound)));
    }

    #[test]
    fn test_empty_routes_without_ants() {
        assert!(GreedySelector.select(&[], 0).unwrap().is_empty());
        assert!(DisjointSelector.select(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_greedy_balances_parallel_routes() {
        // 0 = start, 1 = end
        let routes = vec![route(&[0, 2, 3, 1]), route(&[0, 4, 1])];
        let a = GreedySelector.select(&routes, 5).unwrap();

        assert_eq!(a.ant_count(), 5);
        // Both routes end up needing 4 turns
        assert_eq!(a.count(1), 3);
        assert_eq!(a.count(0), 2);
        assert_eq!(a.estimated_turns(&routes), 4);
    }

    #[test]
    fn test_greedy_tie_breaks() {
        // Both routes equally long: lower index first
        let routes = vec![route(&[0, 2, 1]), route(&[0, 3, 1])];
        let a = GreedySelector.select(&routes, 3).unwrap();

        assert_eq!(a.ants().collect::<Vec<_>>(), vec![(AntId(1), 0), (AntId(2), 1), (AntId(3), 0)]);
    }

    #[test]
    fn test_greedy_prefers_fewer_edges_on_equal_cost() {
        // Route 0 costs 3 + 0, route 1 costs 2 + 1 after its first ant
        let routes = vec![route(&[0, 2, 3, 1]), route(&[0, 4, 1])];
        let a = GreedySelector.select(&routes, 2).unwrap();

        assert_eq!(a.route_of(AntId(1)), Some(1));
        assert_eq!(a.route_of(AntId(2)), Some(1));
    }

    #[test]
    fn test_greedy_skips_routes_that_never_pay_off() {
        let routes = vec![route(&[0, 1]), route(&[0, 2, 3, 4, 5, 6, 1])];
        let a = GreedySelector.select(&routes, 3).unwrap();

        assert_eq!(a.count(0), 3);
        assert_eq!(a.count(1), 0);
        assert_eq!(a.used_routes().count(), 1);
    }

    #[test]
    fn test_assignment_sums_to_ant_count() {
        let routes = vec![route(&[0, 2, 1]), route(&[0, 3, 4, 1]), route(&[0, 1])];
        for ants in 0..50 {
            for a in [
                GreedySelector.select(&routes, ants).unwrap(),
                DisjointSelector.select(&routes, ants).unwrap(),
            ] {
                let total: usize = a.used_routes().map(|(_, c)| c).sum();
                assert_eq!(total, ants);
                assert_eq!(a.ant_count(), ants);
            }
        }
    }

    #[test]
    fn test_disjoint_avoids_shared_rooms() {
        // Routes 0 and 1 share room 2; route 2 is independent
        let routes = vec![
            route(&[0, 2, 1]),
            route(&[0, 3, 2, 1]),
            route(&[0, 4, 5, 1]),
        ];
        let a = DisjointSelector.select(&routes, 6).unwrap();

        assert_eq!(a.count(1), 0);
        assert_eq!(a.count(0) + a.count(2), 6);
    }

    #[test]
    fn test_disjoint_finds_better_combination() {
        // The shortest route blocks two long disjoint ones
        // 0 = start, 1 = end
        let routes = vec![
            route(&[0, 2, 3, 1]),
            route(&[0, 2, 5, 6, 1]),
            route(&[0, 7, 8, 3, 9, 1]),
        ];
        // Seeded by route 0: only route 0 fits, 10 ants -> 3 + 9 = 12 turns.
        // Seeded by route 1: routes 1 and 2 are disjoint -> better.
        let a = DisjointSelector.select(&routes, 10).unwrap();

        assert_eq!(a.count(0), 0);
        assert!(a.count(1) > 0 && a.count(2) > 0);
        assert!(a.estimated_turns(&routes) < 12);
    }

    #[test]
    fn test_disjoint_seed_takes_shorter_compatible_routes() {
        // 0 = start, 1 = end. Route 1 clashes with routes 2 and 3, which
        // both fit route 0. {0, 2, 3} is only reachable from seed 2 or 3
        // by also taking the shorter route 0.
        let routes = vec![
            route(&[0, 2, 1]),
            route(&[0, 3, 6, 1]),
            route(&[0, 3, 5, 1]),
            route(&[0, 7, 6, 1]),
        ];
        let a = DisjointSelector.select(&routes, 12).unwrap();

        assert_eq!(a.count(1), 0);
        assert_eq!((a.count(0), a.count(2), a.count(3)), (5, 4, 3));
        assert_eq!(a.estimated_turns(&routes), 6);
    }

    #[test]
    fn test_too_many_ants() {
        let routes = vec![route(&[0, 1])];
        let ants = usize::try_from(u32::MAX).unwrap() + 1;

        assert!(matches!(GreedySelector.select(&routes, ants), Err(Error::TooManyAnts(n)) if n == ants));
        assert!(matches!(DisjointSelector.select(&routes, ants), Err(Error::TooManyAnts(_))));
    }

    #[test]
    fn test_disjoint_single_room_route() {
        let routes = vec![route(&[0])];
        let a = DisjointSelector.select(&routes, 4).unwrap();

        assert_eq!(a.count(0), 4);
        assert_eq!(a.estimated_turns(&routes), 3);
    }
}
