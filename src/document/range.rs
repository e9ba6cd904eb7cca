use crate::document::node::NodeId;

/// A position inside a text leaf, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub leaf: NodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(leaf: NodeId, offset: usize) -> Self {
        Self { leaf, offset }
    }
}

/// An immutable start/end pair captured from the live selection at event
/// time. A range must be captured before any asynchronous work is
/// dispatched; it is never re-read from ambient state. Document edits made
/// after capture silently invalidate it (see the inject documentation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedRange {
    /// Start position, first in document order
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl CapturedRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A range over `start..end` characters of a single leaf
    pub fn in_leaf(leaf: NodeId, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(leaf, start),
            end: Position::new(leaf, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}
