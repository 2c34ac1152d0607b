use crate::error::ParseError;
use crate::graph::room::{Room, RoomId, TunnelId};
use std::collections::{HashMap, HashSet};

/// Validated farm: rooms in an arena, tunnels indexed, start/end designated.
/// Immutable once built.
#[derive(Clone, Debug)]
pub struct Graph {
    rooms: Vec<Room>,
    index: HashMap<String, RoomId>,
    tunnels: Vec<(RoomId, RoomId)>,
    start: RoomId,
    end: RoomId,
    ants: usize,
}

impl Graph {
    /// Start an empty builder
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build a graph from room names and tunnels in one go.
    /// Coordinates are all zero; mostly useful for tests.
    pub fn from_parts(
        ants: usize,
        rooms: &[&str],
        tunnels: &[(&str, &str)],
        start: &str,
        end: &str,
    ) -> std::result::Result<Self, ParseError> {
        let mut builder = Graph::builder();
        for name in rooms {
            builder.add_room(*name, 0, 0)?;
        }
        builder.mark_start(start)?;
        builder.mark_end(end)?;
        for (a, b) in tunnels {
            builder.add_tunnel(a, b)?;
        }
        builder.set_ants(ants);
        builder.build()
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Look a room up by name
    #[inline]
    pub fn id_of(&self, name: &str) -> Option<RoomId> {
        self.index.get(name).copied()
    }

    /// Name of a room. `id` must come from this graph.
    #[inline]
    pub fn name(&self, id: RoomId) -> &str {
        &self.rooms[id.index()].name
    }

    #[inline]
    pub fn start(&self) -> RoomId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> RoomId {
        self.end
    }

    #[inline]
    pub fn ant_count(&self) -> usize {
        self.ants
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .zip((0..).map(RoomId))
            .map(|(r, id)| (id, r))
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn tunnel_count(&self) -> usize {
        self.tunnels.len()
    }

    /// Endpoints of a tunnel in declaration order
    #[inline]
    pub fn tunnel(&self, id: TunnelId) -> Option<(RoomId, RoomId)> {
        self.tunnels.get(id.index()).copied()
    }

    /// Tunnel joining two rooms, in either direction
    pub fn tunnel_between(&self, a: RoomId, b: RoomId) -> Option<TunnelId> {
        self.room(a)?.tunnel_to(b)
    }

    /// Start and end rooms are not capacity limited
    #[inline]
    pub fn is_unbounded(&self, id: RoomId) -> bool {
        self.room(id).is_some_and(|r| r.role.is_unbounded())
    }
}

/// Incremental, validating graph construction.
///
/// Rooms must be added before tunnels reference them. Every check the
/// core relies on (unique names, resolvable tunnels, single start/end,
/// positive ant count) happens here.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    rooms: Vec<Room>,
    index: HashMap<String, RoomId>,
    tunnels: Vec<(RoomId, RoomId)>,
    tunnel_keys: HashSet<(RoomId, RoomId)>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    ants: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ants(&mut self, ants: usize) {
        self.ants = ants;
    }

    #[inline]
    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    #[inline]
    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    /// Declare a room
    pub fn add_room(
        &mut self,
        name: &str,
        x: i64,
        y: i64,
    ) -> std::result::Result<RoomId, ParseError> {
        validate_name(name)?;
        if self.index.contains_key(name) {
            return Err(ParseError::DuplicateRoom(name.to_string()));
        }

        let id = u32::try_from(self.rooms.len())
            .map(RoomId)
            .map_err(|_| ParseError::TooManyRooms)?;
        self.rooms.push(Room::new(name, x, y));
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Designate an already declared room as start
    pub fn mark_start(&mut self, name: &str) -> std::result::Result<RoomId, ParseError> {
        if self.start.is_some() {
            return Err(ParseError::MultipleStartRooms);
        }
        let id = self.resolve(name)?;
        let room = &mut self.rooms[id.index()];
        room.role = room.role.with_start();
        self.start = Some(id);
        Ok(id)
    }

    /// Designate an already declared room as end
    pub fn mark_end(&mut self, name: &str) -> std::result::Result<RoomId, ParseError> {
        if self.end.is_some() {
            return Err(ParseError::MultipleEndRooms);
        }
        let id = self.resolve(name)?;
        let room = &mut self.rooms[id.index()];
        room.role = room.role.with_end();
        self.end = Some(id);
        Ok(id)
    }

    /// Declare a bidirectional tunnel between two known rooms
    pub fn add_tunnel(&mut self, a: &str, b: &str) -> std::result::Result<TunnelId, ParseError> {
        let ia = self.resolve(a)?;
        let ib = self.resolve(b)?;
        if ia == ib {
            return Err(ParseError::SelfLink(a.to_string()));
        }
        let key = (ia.min(ib), ia.max(ib));
        if !self.tunnel_keys.insert(key) {
            return Err(ParseError::DuplicateTunnel(a.to_string(), b.to_string()));
        }

        let id = u32::try_from(self.tunnels.len())
            .map(TunnelId)
            .map_err(|_| ParseError::TooManyTunnels)?;
        self.tunnels.push((ia, ib));
        self.rooms[ia.index()].add_link(ib, id);
        self.rooms[ib.index()].add_link(ia, id);
        Ok(id)
    }

    /// Finish construction
    pub fn build(self) -> std::result::Result<Graph, ParseError> {
        // Ant ids are 32-bit
        if self.ants == 0 || u32::try_from(self.ants).is_err() {
            return Err(ParseError::InvalidAntCount);
        }
        let start = self.start.ok_or(ParseError::MissingStartRoom)?;
        let end = self.end.ok_or(ParseError::MissingEndRoom)?;

        Ok(Graph {
            rooms: self.rooms,
            index: self.index,
            tunnels: self.tunnels,
            start,
            end,
            ants: self.ants,
        })
    }

    fn resolve(&self, name: &str) -> std::result::Result<RoomId, ParseError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::UnknownRoom(name.to_string()))
    }
}

fn validate_name(name: &str) -> std::result::Result<(), ParseError> {
    if name.is_empty() || name.starts_with('L') || name.starts_with('#') {
        return Err(ParseError::ReservedRoomPrefix);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ParseError::RoomNameWithSpaces);
    }
    if name.contains('-') {
        return Err(ParseError::RoomNameWithDash);
    }
    Ok(())
}
