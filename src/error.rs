use thiserror::Error;

/// Problems found while reading a farm description
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid data format, invalid number of ants")]
    InvalidAntCount,
    #[error("invalid data format, multiple start rooms")]
    MultipleStartRooms,
    #[error("invalid data format, multiple end rooms")]
    MultipleEndRooms,
    #[error("invalid data format, no start room found")]
    MissingStartRoom,
    #[error("invalid data format, no end room found")]
    MissingEndRoom,
    #[error("invalid data format, room name cannot start with 'L' or '#'")]
    ReservedRoomPrefix,
    #[error("invalid data format, room name cannot contain spaces")]
    RoomNameWithSpaces,
    #[error("invalid data format, room name cannot contain '-'")]
    RoomNameWithDash,
    #[error("invalid data format, invalid coordinates for room: {0}")]
    InvalidCoordinates(String),
    #[error("invalid data format, duplicate room: {0}")]
    DuplicateRoom(String),
    #[error("invalid data format, link references unknown room: {0}")]
    UnknownRoom(String),
    #[error("invalid data format, duplicate tunnel between rooms {0} and {1}")]
    DuplicateTunnel(String, String),
    #[error("invalid data format, room {0} links to itself")]
    SelfLink(String),
    #[error("invalid data format, {0} must be followed by a room")]
    DanglingMarker(&'static str),
    #[error("invalid data format, too many rooms")]
    TooManyRooms,
    #[error("invalid data format, too many tunnels")]
    TooManyTunnels,
    #[error("invalid data format, unrecognised line {0}")]
    InvalidLine(usize),
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Farm description rejected
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Input file does not look like a farm description
    #[error("Wrong file format")]
    WrongFileFormat,
    /// No route connects start and end
    #[error("No valid paths found")]
    NoPathFound,
    /// More ants than 32-bit ant ids can number
    #[error("too many ants: {0}")]
    TooManyAnts(usize),
    /// A route handed to the simulator that it cannot walk
    #[error("internal error: route {0} does not lead from start to end through known tunnels")]
    InvalidRoute(usize),
    /// A step where nobody could move while ants were still on their way.
    /// Never expected in correct operation.
    #[error("internal error: capacity deadlock at step {step} with {waiting} ants waiting")]
    CapacityDeadlock { step: usize, waiting: usize },
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
