//! Adjacency detection
//!
//! Decides whether a caret touches a bracket token and which way the
//! complement has to be searched for.

use crate::matcher::{find_all, LineMatch, Match};
use crate::registry::{Registry, Side};

/// Scan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Open tokens search forward, close tokens backward
    pub fn from_side(side: Side) -> Self {
        match side {
            Side::Open => Direction::Forward,
            Side::Close => Direction::Backward,
        }
    }

    /// The side that deepens nesting when scanning this way
    pub fn opening_side(self) -> Side {
        match self {
            Direction::Forward => Side::Open,
            Direction::Backward => Side::Close,
        }
    }
}

/// A bracket touching the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacent {
    pub entry: LineMatch,
    pub direction: Direction,
}

/// Pick the bracket touching `cursor` from a line's ordered matches.
///
/// A token starting at the caret wins over one ending at it.
pub fn pick_adjacent(matches: &[Match], line: usize, cursor: usize, registry: &Registry) -> Option<Adjacent> {
    let right = matches.iter().find(|m| m.index >= cursor).filter(|m| m.index == cursor);
    let left = || {
        matches
            .iter()
            .take_while(|m| m.index < cursor)
            .last()
            .filter(|m| m.end() == cursor)
    };

    let found = right.or_else(left)?;
    let bracket = registry.lookup(&found.token)?;
    Some(Adjacent {
        entry: found.clone().at_line(line),
        direction: Direction::from_side(bracket.side),
    })
}

/// Find the bracket touching `cursor` on a line of text
pub fn find_adjacent(line_text: &str, line: usize, registry: &Registry, cursor: usize) -> Option<Adjacent> {
    let matches: Vec<Match> = find_all(line_text, registry.pattern(), None, None).collect();
    pick_adjacent(&matches, line, cursor, registry)
}
