use crate::graph::{Graph, Link, Room, RoomId};
use crate::routing::Route;
use std::iter;
use tracing::debug;

/// Every simple route between two rooms, looked up by name.
///
/// Unknown names give an empty result, as does a pair with no path.
pub fn enumerate(graph: &Graph, start: &str, end: &str) -> Vec<Route> {
    match (graph.id_of(start), graph.id_of(end)) {
        (Some(s), Some(e)) => enumerate_ids(graph, s, e),
        _ => Vec::new(),
    }
}

/// Depth-first enumeration of all simple routes from `start` to `end`.
///
/// Neighbors are tried in declaration order, so the output order is the
/// pre-order in which routes are discovered. The search never extends a
/// path past `end` and never revisits a room already on the path.
pub fn enumerate_ids(graph: &Graph, start: RoomId, end: RoomId) -> Vec<Route> {
    if graph.room(start).is_none() || graph.room(end).is_none() {
        return Vec::new();
    }
    if start == end {
        return vec![Route::new(vec![start])];
    }

    let mut routes = Vec::new();
    let mut on_path = vec![false; graph.room_count()];
    // Explicit stack of (room, next link to try); it doubles as the current path
    let mut stack: Vec<(RoomId, usize)> = vec![(start, 0)];
    on_path[start.index()] = true;

    while let Some(frame) = stack.last_mut() {
        let (room, cursor) = *frame;
        let links = links_of(graph, room);

        if cursor == links.len() {
            on_path[room.index()] = false;
            stack.pop();
            continue;
        }
        frame.1 += 1;

        let next = links[cursor].room;
        if on_path[next.index()] {
            continue;
        }
        if next == end {
            let rooms = stack.iter().map(|&(r, _)| r).chain(iter::once(end)).collect();
            routes.push(Route::new(rooms));
            continue;
        }

        on_path[next.index()] = true;
        stack.push((next, 0));
    }

    debug!(
        start = graph.name(start),
        end = graph.name(end),
        routes = routes.len(),
        "routes enumerated"
    );
    routes
}

fn links_of(graph: &Graph, id: RoomId) -> &[Link] {
    graph.room(id).map(Room::links).unwrap_or_default()
}
