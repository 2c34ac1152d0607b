use crate::ant::AntId;
use crate::graph::{Graph, RoomId};
use std::fmt;

/// One ant entering one room
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub ant: AntId,
    pub room: RoomId,
}

/// Every move made during one step, by ascending ant id
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    moves: Vec<Move>,
}

impl Step {
    pub fn new(mut moves: Vec<Move>) -> Self {
        moves.sort_by_key(|m| m.ant);
        Self { moves }
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Render as `L1-room L2-room ...`
    pub fn render(&self, graph: &Graph) -> String {
        let mut line = String::with_capacity(self.moves.len() * 8);
        for (i, m) in self.moves.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&m.ant.to_string());
            line.push('-');
            line.push_str(graph.name(m.room));
        }
        line
    }
}

/// The full history of a simulation, one entry per step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementRecord {
    steps: Vec<Step>,
}

impl MovementRecord {
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Room names resolved against `graph`, one line per step
    pub fn display<'a>(&'a self, graph: &'a Graph) -> RecordDisplay<'a> {
        RecordDisplay { record: self, graph }
    }
}

/// [`fmt::Display`] adapter for a [`MovementRecord`]
pub struct RecordDisplay<'a> {
    record: &'a MovementRecord,
    graph: &'a Graph,
}

impl fmt::Display for RecordDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.record.steps() {
            writeln!(f, "{}", step.render(self.graph))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_sorted_by_ant() {
        let step = Step::new(vec![
            Move { ant: AntId(3), room: RoomId(0) },
            Move { ant: AntId(1), room: RoomId(1) },
        ]);

        assert_eq!(step.moves()[0].ant, AntId(1));
        assert_eq!(step.moves()[1].ant, AntId(3));
    }

    #[test]
    fn test_record_rendering() {
        let g = Graph::from_parts(2, &["s", "mid", "e"], &[("s", "mid"), ("mid", "e")], "s", "e")
            .unwrap();
        let mid = g.id_of("mid").unwrap();
        let mut record = MovementRecord::default();
        record.push(Step::new(vec![Move { ant: AntId(1), room: mid }]));
        record.push(Step::new(vec![
            Move { ant: AntId(2), room: mid },
            Move { ant: AntId(1), room: g.end() },
        ]));

        assert_eq!(record.len(), 2);
        assert_eq!(record.display(&g).to_string(), "L1-mid\nL1-e L2-mid\n");
    }

    #[test]
    fn test_empty_record_renders_nothing() {
        let g = Graph::from_parts(1, &["home"], &[], "home", "home").unwrap();
        let record = MovementRecord::default();

        assert!(record.is_empty());
        assert_eq!(record.display(&g).to_string(), "");
    }
}
