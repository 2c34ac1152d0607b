use std::fmt;

/// Ant identifier, numbered from 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AntId(pub u32);

impl AntId {
    /// Id of the ant stored at zero-based position `index`; `None` when
    /// the id would not fit in 32 bits
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()?.checked_add(1).map(AntId)
    }

    /// Zero-based position; `None` for the invalid id 0
    #[inline]
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for AntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Where an ant is in its journey
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    /// Still in the start room
    Waiting,
    /// Standing on the given position of its route
    InTransit(usize),
    /// In the end room; never moves again
    Arrived,
}

/// An ant bound to one route
#[derive(Clone, Debug)]
pub struct Ant {
    pub id: AntId,
    /// Index of the route it follows
    pub route: usize,
    pub moves: u32,
    state: AntState,
}

impl Ant {
    /// Create a new ant waiting at the start
    pub fn new(id: AntId, route: usize) -> Self {
        Self {
            id,
            route,
            moves: 0,
            state: AntState::Waiting,
        }
    }

    #[inline]
    pub fn state(&self) -> AntState {
        self.state
    }

    #[inline]
    pub fn has_arrived(&self) -> bool {
        self.state == AntState::Arrived
    }

    /// Position on the route, 0 being the start room. `None` once arrived.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self.state {
            AntState::Waiting => Some(0),
            AntState::InTransit(i) => Some(i),
            AntState::Arrived => None,
        }
    }

    /// Step to route position `index`; `last` marks the end room
    pub fn move_to(&mut self, index: usize, last: bool) {
        self.state = if last {
            AntState::Arrived
        } else {
            AntState::InTransit(index)
        };
        self.moves += 1;
    }

    /// Mark as home without moving, for routes that start in the end room
    pub fn arrive_in_place(&mut self) {
        self.state = AntState::Arrived;
    }
}
