//! CopyAction - Copies determined by the diff engine

use super::{FileEntry, Root};
use std::fmt;

/// Which way a copy goes between the two roots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From root A to root B
    AToB,

    /// From root B to root A
    BToA,
}

impl Direction {
    /// Pick (source, destination) out of the pair
    pub fn endpoints<'a>(&self, root_a: &'a Root, root_b: &'a Root) -> (&'a Root, &'a Root) {
        match self {
            Direction::AToB => (root_a, root_b),
            Direction::BToA => (root_b, root_a),
        }
    }

    /// Short arrow label for display
    pub fn label(&self) -> &'static str {
        match self {
            Direction::AToB => "A -> B",
            Direction::BToA => "B -> A",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Copy of a file present on one side and absent on the other
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAction {
    pub entry: FileEntry,
    pub direction: Direction,
}

impl CopyAction {
    pub fn new(entry: FileEntry, direction: Direction) -> Self {
        Self { entry, direction }
    }

    /// Relative path being copied
    pub fn path(&self) -> &str {
        &self.entry.path
    }
}
