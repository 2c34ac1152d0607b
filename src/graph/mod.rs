pub mod graph;
pub mod parser;
pub mod room;

pub use graph::{Graph, GraphBuilder};
pub use parser::{check_file_format, parse_graph, parse_graph_str};
pub use room::{Link, Role, Room, RoomId, TunnelId};
