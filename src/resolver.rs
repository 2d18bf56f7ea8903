//! Pair resolver
//!
//! Stack-based scan from a bracket to its complement, line by line,
//! in either direction. Only brackets of the entry's own pair take
//! part; other pairs are skipped without being tracked.

use std::sync::Arc;

use log::{debug, trace};

use crate::adjacency::Direction;
use crate::deadline::Deadline;
use crate::document::Document;
use crate::matcher::{LineMatch, Match};
use crate::registry::{PairId, Registry, Side};
use crate::session::Session;

/// Why a resolution stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The complement was found
    Resolved,
    /// The deadline expired before the complement was found
    TimedOut,
    /// The scan ran off the first or last line
    BoundaryReached,
}

/// Result of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMatch {
    pub start: LineMatch,
    /// Complement, present only when resolved
    pub end: Option<LineMatch>,
    pub termination: Termination,
}

impl PairMatch {
    fn unresolved(start: &LineMatch, termination: Termination) -> Self {
        Self {
            start: start.clone(),
            end: None,
            termination,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.end.is_some()
    }
}

/// Scratch state of one in-flight resolution
struct Traversal {
    pair_id: PairId,
    opening: Side,
    stack: Vec<Match>,
}

impl Traversal {
    /// Feed one candidate; true when it closes the entry bracket
    fn step(&mut self, candidate: &Match, registry: &Registry) -> bool {
        let Some(bracket) = registry.lookup(&candidate.token) else {
            return false;
        };
        if bracket.definition.pair_id != self.pair_id {
            return false;
        }
        if bracket.side == self.opening {
            self.stack.push(candidate.clone());
            return false;
        }
        match self.stack.last() {
            Some(top) if top.token == bracket.opposite() => {
                self.stack.pop();
                self.stack.is_empty()
            }
            _ => false,
        }
    }
}

/// Find the complement of `entry`.
///
/// The deadline is polled before every line, the entry line included.
/// An entry that is not a registered token is reported as
/// `BoundaryReached` without scanning.
pub fn resolve<D: Document + ?Sized>(
    session: &mut Session,
    doc: &D,
    entry: &LineMatch,
    direction: Direction,
    deadline: &Deadline,
) -> PairMatch {
    let registry = Arc::clone(session.registry());
    let Some(bracket) = registry.lookup(&entry.token) else {
        debug!("{:?} is not a registered bracket", entry.token);
        return PairMatch::unresolved(entry, Termination::BoundaryReached);
    };

    let mut traversal = Traversal {
        pair_id: bracket.definition.pair_id,
        opening: direction.opening_side(),
        stack: vec![entry.to_match()],
    };
    let line_count = doc.line_count();
    let mut line = entry.line;

    loop {
        if deadline.expired() {
            debug!("resolution of {:?} timed out at line {}", entry.token, line);
            return PairMatch::unresolved(entry, Termination::TimedOut);
        }
        trace!("scanning line {} at depth {}", line, traversal.stack.len());

        // The entry line is scanned only past the entry bracket
        let entry_line: Vec<Match>;
        let matches: &[Match] = if line == entry.line {
            entry_line = match direction {
                Direction::Forward => session.matches_between(doc, line, Some(entry.end()), None),
                Direction::Backward => session.matches_between(doc, line, None, Some(entry.index)),
            };
            &entry_line
        } else {
            session.line_matches(doc, line)
        };
        let found = match direction {
            Direction::Forward => matches.iter().find(|m| traversal.step(m, &registry)),
            Direction::Backward => matches.iter().rev().find(|m| traversal.step(m, &registry)),
        };

        if let Some(end) = found {
            return PairMatch {
                start: entry.clone(),
                end: Some(end.clone().at_line(line)),
                termination: Termination::Resolved,
            };
        }

        line = match direction {
            Direction::Forward if line + 1 < line_count => line + 1,
            Direction::Backward if line > 0 => line - 1,
            _ => {
                debug!("no complement for {:?} at {}:{}", entry.token, entry.line, entry.index);
                return PairMatch::unresolved(entry, Termination::BoundaryReached);
            }
        };
    }
}
