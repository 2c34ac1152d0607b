use crate::error::{Error, ParseError, Result};
use crate::graph::graph::{Graph, GraphBuilder};
use std::fs;
use std::path::Path;
use tracing::debug;

const START_MARKER: &str = "##start";
const END_MARKER: &str = "##end";

/// Farm descriptions are plain `.txt` files
pub fn check_file_format(path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some("txt") => Ok(()),
        _ => Err(Error::WrongFileFormat),
    }
}

/// Read and parse a farm description from a file path.
/// Returns the graph together with the raw text so it can be echoed.
pub fn parse_graph(path: impl AsRef<Path>) -> Result<(Graph, String)> {
    let path = path.as_ref();
    check_file_format(path)?;
    let src = fs::read_to_string(path)?;
    let graph = parse_graph_str(&src)?;
    debug!(
        path = %path.display(),
        rooms = graph.room_count(),
        tunnels = graph.tunnel_count(),
        ants = graph.ant_count(),
        "farm loaded"
    );
    Ok((graph, src))
}

/// Parse a farm description held in memory
pub fn parse_graph_str(src: &str) -> std::result::Result<Graph, ParseError> {
    let mut builder = GraphBuilder::new();
    let mut ants: Option<usize> = None;
    let mut pending_start = false;
    let mut pending_end = false;

    for (line_no, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line == START_MARKER || line == END_MARKER {
            // Markers only make sense once the ant count is known
            if ants.is_none() {
                return Err(ParseError::InvalidAntCount);
            }
            if line == START_MARKER {
                if pending_start || builder.has_start() {
                    return Err(ParseError::MultipleStartRooms);
                }
                pending_start = true;
            } else {
                if pending_end || builder.has_end() {
                    return Err(ParseError::MultipleEndRooms);
                }
                pending_end = true;
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        if ants.is_none() {
            ants = Some(parse_ant_count(line)?);
            continue;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(link), None, None, None) => {
                if let Some(marker) = dangling(pending_start, pending_end) {
                    return Err(ParseError::DanglingMarker(marker));
                }
                let (a, b) = link
                    .split_once('-')
                    .ok_or(ParseError::InvalidLine(line_no + 1))?;
                builder.add_tunnel(a, b)?;
            }
            (Some(name), Some(x), Some(y), None) => {
                let x = x.parse::<i64>();
                let y = y.parse::<i64>();
                let (Ok(x), Ok(y)) = (x, y) else {
                    return Err(ParseError::InvalidCoordinates(name.to_string()));
                };
                builder.add_room(name, x, y)?;
                if pending_start {
                    builder.mark_start(name)?;
                    pending_start = false;
                }
                if pending_end {
                    builder.mark_end(name)?;
                    pending_end = false;
                }
            }
            (Some(_), Some(_), Some(_), Some(_)) => return Err(ParseError::RoomNameWithSpaces),
            _ => return Err(ParseError::InvalidLine(line_no + 1)),
        }
    }

    if let Some(marker) = dangling(pending_start, pending_end) {
        return Err(ParseError::DanglingMarker(marker));
    }
    builder.set_ants(ants.ok_or(ParseError::InvalidAntCount)?);
    builder.build()
}

fn parse_ant_count(line: &str) -> std::result::Result<usize, ParseError> {
    match line.parse::<usize>() {
        Ok(n) if n > 0 && u32::try_from(n).is_ok() => Ok(n),
        _ => Err(ParseError::InvalidAntCount),
    }
}

fn dangling(pending_start: bool, pending_end: bool) -> Option<&'static str> {
    if pending_start {
        Some(START_MARKER)
    } else if pending_end {
        Some(END_MARKER)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::room::Role;

    #[test]
    fn test_parse_valid_farm() {
        let src = "10\n##start\nstart 0 0\nroom1 1 1\nroom2 2 2\n##end\nend 3 3\nstart-room1\nroom1-room2\nroom2-end\n";
        let g = parse_graph_str(src).unwrap();

        assert_eq!(g.ant_count(), 10);
        assert_eq!(g.room_count(), 4);
        assert_eq!(g.name(g.start()), "start");
        assert_eq!(g.name(g.end()), "end");

        let expected: [(&str, i64, i64, &[&str]); 4] = [
            ("start", 0, 0, &["room1"]),
            ("room1", 1, 1, &["start", "room2"]),
            ("room2", 2, 2, &["room1", "end"]),
            ("end", 3, 3, &["room2"]),
        ];
        for (name, x, y, links) in expected {
            let room = g.room(g.id_of(name).unwrap()).unwrap();
            assert_eq!((room.x, room.y), (x, y), "coordinates of {name}");
            let got: Vec<&str> = room.neighbors().map(|id| g.name(id)).collect();
            assert_eq!(got, links, "links of {name}");
        }
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let src = "# farm\n3\n\n##start\n#note\na 0 0\n##end\nb 1 1\n# tunnels\na-b\n";
        let g = parse_graph_str(src).unwrap();

        assert_eq!(g.room_count(), 2);
        assert_eq!(g.tunnel_count(), 1);
    }

    #[test]
    fn test_missing_ant_count() {
        let src = "# This is a comment\n##start\nroom1 0 0\n##end\nroom2 1 1\nroom1-room2\n";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::InvalidAntCount);
    }

    #[test]
    fn test_zero_and_negative_ants() {
        for count in ["0", "-3", "many", "4294967296", "99999999999999999999999"] {
            let src = format!("{count}\n##start\na 0 0\n##end\nb 1 1\na-b\n");
            assert_eq!(parse_graph_str(&src).unwrap_err(), ParseError::InvalidAntCount);
        }
    }

    #[test]
    fn test_multiple_start_rooms() {
        let src = "2\n##start\nA 1 1\n##start\nB 2 2\nC 3 3\nA-B\nB-C";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::MultipleStartRooms);
    }

    #[test]
    fn test_multiple_end_rooms() {
        let src = "10\n##start\nstart 0 0\n##end\nend1 1 1\nroom1 2 2\n##end\nend2 3 3\nstart-room1\nroom1-end1\nroom1-end2";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::MultipleEndRooms);
    }

    #[test]
    fn test_room_name_rules() {
        let src = "3\n##start\nLroom 1 1\n##end\nroom2 2 2\nLroom-room2\n";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::ReservedRoomPrefix);

        let src = "10\n##start\ninvalid room 0 0\n##end\nend 1 1\ninvalid room-end\n";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::RoomNameWithSpaces);
    }

    #[test]
    fn test_duplicate_room() {
        let src = "3\nroom1 0 0\nroom2 1 1\nroom1 2 2\n##start\nstart 3 3\n##end\nend 4 4\nroom1-room2\n";
        assert_eq!(
            parse_graph_str(src).unwrap_err(),
            ParseError::DuplicateRoom("room1".into())
        );
    }

    #[test]
    fn test_invalid_coordinates() {
        let src = "3\n##start\nstart 0 0\nmiddle abc 2\n##end\nend 2 2\nstart-middle\nmiddle-end\n";
        assert_eq!(
            parse_graph_str(src).unwrap_err(),
            ParseError::InvalidCoordinates("middle".into())
        );
    }

    #[test]
    fn test_link_to_unknown_room() {
        let src = "3\nroom1 0 0\nroom2 1 1\n##start\nroom3 2 2\n##end\nroom4 3 3\nroom1-room2\nroom2-nonexistent\n";
        let err = parse_graph_str(src).unwrap_err();
        assert!(err.to_string().contains("link references unknown room: nonexistent"));
    }

    #[test]
    fn test_duplicate_tunnel() {
        let src = "3\n##start\nstart 0 0\n##end\nend 1 1\nroom1 2 2\nroom2 3 3\nstart-room1\nroom1-end\nstart-room1\n";
        assert_eq!(
            parse_graph_str(src).unwrap_err().to_string(),
            "invalid data format, duplicate tunnel between rooms start and room1"
        );
    }

    #[test]
    fn test_marker_without_room() {
        let src = "1\n##start\na 0 0\n##end\na-a\n";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::DanglingMarker("##end"));

        let src = "1\n##start\na 0 0\n##end";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::DanglingMarker("##end"));
    }

    #[test]
    fn test_start_end_on_same_room() {
        let src = "4\n##start\n##end\nhome 0 0\n";
        let g = parse_graph_str(src).unwrap();

        assert_eq!(g.start(), g.end());
        assert_eq!(g.room(g.start()).unwrap().role, Role::StartEnd);
    }

    #[test]
    fn test_garbage_line() {
        let src = "1\n##start\na 0 0\n##end\nb 1 1\na b\n";
        assert_eq!(parse_graph_str(src).unwrap_err(), ParseError::InvalidLine(6));
    }

    #[test]
    fn test_file_format() {
        assert!(check_file_format("farm.txt").is_ok());
        assert!(matches!(check_file_format("farm.csv"), Err(Error::WrongFileFormat)));
        assert!(matches!(check_file_format("farm"), Err(Error::WrongFileFormat)));
    }
}
