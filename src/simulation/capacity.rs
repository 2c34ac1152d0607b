use crate::ant::AntId;
use crate::graph::{Graph, RoomId, TunnelId};

/// Room and tunnel capacity bookkeeping for one simulation
pub struct CapacityTracker {
    /// Ant holding each room; unbounded rooms are never recorded
    occupant: Vec<Option<AntId>>,
    /// Whether a room is capacity limited
    bounded: Vec<bool>,
    /// Step stamp of each tunnel's last traversal, avoids clearing per step
    tunnel_step: Vec<u32>,
    /// Current step counter
    current_step: u32,
}

impl CapacityTracker {
    /// Create a tracker for every room and tunnel of `graph`
    pub fn new(graph: &Graph) -> Self {
        Self {
            occupant: vec![None; graph.room_count()],
            bounded: graph.rooms().map(|(_, r)| !r.role.is_unbounded()).collect(),
            tunnel_step: vec![0u32; graph.tunnel_count()],
            current_step: 0,
        }
    }

    /// Open a new step: every tunnel becomes available again
    #[inline]
    pub fn begin_step(&mut self) {
        self.current_step = self.current_step.wrapping_add(1);
        if self.current_step == 0 {
            self.tunnel_step.fill(0);
            self.current_step = 1;
        }
    }

    /// Ant currently holding a bounded room
    #[inline]
    pub fn occupant(&self, room: RoomId) -> Option<AntId> {
        self.occupant.get(room.index()).copied().flatten()
    }

    #[inline]
    pub fn can_enter(&self, room: RoomId) -> bool {
        !self.bounded[room.index()] || self.occupant[room.index()].is_none()
    }

    #[inline]
    pub fn tunnel_free(&self, tunnel: TunnelId) -> bool {
        self.tunnel_step[tunnel.index()] != self.current_step
    }

    /// Move `ant` from `from` to `to` through `tunnel` if both the room and
    /// the tunnel still have room this step. Commits on success.
    pub fn try_move(&mut self, ant: AntId, from: RoomId, to: RoomId, tunnel: TunnelId) -> bool {
        if !self.can_enter(to) || !self.tunnel_free(tunnel) {
            return false;
        }

        if self.bounded[from.index()] && self.occupant[from.index()] == Some(ant) {
            self.occupant[from.index()] = None;
        }
        if self.bounded[to.index()] {
            self.occupant[to.index()] = Some(ant);
        }
        self.tunnel_step[tunnel.index()] = self.current_step;
        true
    }
}
