pub mod enumerate;
pub mod select;

pub use enumerate::{enumerate, enumerate_ids};
pub use select::{turns, Assignment, DisjointSelector, GreedySelector, RouteSelector};

use crate::graph::{Graph, RoomId};

/// Simple path of rooms from start to end
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Route {
    rooms: Vec<RoomId>,
}

impl Route {
    pub fn new(rooms: Vec<RoomId>) -> Self {
        Self { rooms }
    }

    /// Resolve room names against a graph. Unknown names yield `None`.
    pub fn from_names(graph: &Graph, names: &[&str]) -> Option<Self> {
        names
            .iter()
            .map(|n| graph.id_of(n))
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }

    #[inline]
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of rooms, start and end included
    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.rooms.len().saturating_sub(1)
    }

    #[inline]
    pub fn first(&self) -> Option<RoomId> {
        self.rooms.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<RoomId> {
        self.rooms.last().copied()
    }

    /// Rooms strictly between start and end
    pub fn interior(&self) -> &[RoomId] {
        if self.rooms.len() < 3 {
            &[]
        } else {
            &self.rooms[1..self.rooms.len() - 1]
        }
    }

    /// Consecutive room pairs, each normalised as (low id, high id)
    pub fn tunnels(&self) -> impl Iterator<Item = (RoomId, RoomId)> + '_ {
        self.rooms.windows(2).map(|w| (w[0].min(w[1]), w[0].max(w[1])))
    }

    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.rooms.iter().map(|&id| graph.name(id)).collect()
    }
}
