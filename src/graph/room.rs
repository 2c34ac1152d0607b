use std::fmt;

/// Index of a room in the graph arena
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Cast to `usize` for direct use as a `Vec` index
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a tunnel, in declaration order
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TunnelId(pub u32);

impl TunnelId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a room is used for in the farm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Normal,
    Start,
    End,
    /// Degenerate farm where the ants are already home
    StartEnd,
}

impl Role {
    #[inline]
    pub fn is_start(self) -> bool {
        matches!(self, Role::Start | Role::StartEnd)
    }

    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, Role::End | Role::StartEnd)
    }

    /// Start and end rooms hold any number of ants
    #[inline]
    pub fn is_unbounded(self) -> bool {
        self != Role::Normal
    }

    pub(crate) fn with_start(self) -> Self {
        match self {
            Role::End | Role::StartEnd => Role::StartEnd,
            _ => Role::Start,
        }
    }

    pub(crate) fn with_end(self) -> Self {
        match self {
            Role::Start | Role::StartEnd => Role::StartEnd,
            _ => Role::End,
        }
    }
}

/// One side of a tunnel as seen from a room
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub room: RoomId,
    pub tunnel: TunnelId,
}

/// Graph node: name, coordinates and neighbors in declaration order
#[derive(Clone, Debug)]
pub struct Room {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub role: Role,
    links: Vec<Link>,
}

impl Room {
    /// Create a normal room with no tunnels yet
    pub fn new(name: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            role: Role::Normal,
            links: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn add_link(&mut self, room: RoomId, tunnel: TunnelId) {
        self.links.push(Link { room, tunnel });
    }

    /// Tunnels leaving this room, in the order they were declared
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Neighbor ids in declaration order
    pub fn neighbors(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.links.iter().map(|l| l.room)
    }

    /// Tunnel connecting this room to `other`, if any
    pub fn tunnel_to(&self, other: RoomId) -> Option<TunnelId> {
        self.links.iter().find(|l| l.room == other).map(|l| l.tunnel)
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.links.len()
    }
}
