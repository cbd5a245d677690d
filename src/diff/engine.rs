//! Sync plan types

use crate::types::{CopyAction, Direction};

/// Ordered list of copies plus statistics
///
/// All A → B copies come before any B → A copy.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Copies to execute, in order
    pub actions: Vec<CopyAction>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,
}

impl SyncPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            stats: PlanStats::default(),
        }
    }

    /// Add an action to the plan and update statistics
    pub fn add_action(&mut self, action: CopyAction) {
        match action.direction {
            Direction::AToB => self.stats.a_to_b += 1,
            Direction::BToA => self.stats.b_to_a += 1,
        }
        self.stats.total_bytes += action.entry.size_or_zero();
        self.actions.push(action);
    }

    /// Check if there is nothing to copy
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of copies in the plan
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Actions going in one direction, in plan order
    pub fn actions_in(&self, direction: Direction) -> impl Iterator<Item = &CopyAction> {
        self.actions
            .iter()
            .filter(move |action| action.direction == direction)
    }
}

impl Default for SyncPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a sync plan
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanStats {
    /// Number of copies from A to B
    pub a_to_b: usize,

    /// Number of copies from B to A
    pub b_to_a: usize,

    /// Total known bytes to transfer (unknown sizes count as zero)
    pub total_bytes: u64,
}

impl PlanStats {
    /// Total number of copies in both directions
    pub fn total_files(&self) -> usize {
        self.a_to_b + self.b_to_a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileEntry;

    fn copy(path: &str, size: u64, direction: Direction) -> CopyAction {
        CopyAction::new(FileEntry::new(path).with_size(size), direction)
    }

    #[test]
    fn test_new_plan_is_empty() {
        let plan = SyncPlan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
        assert_eq!(plan.stats, PlanStats::default());
        assert_eq!(plan.stats.total_files(), 0);
    }

    #[test]
    fn test_add_action_updates_stats() {
        let mut plan = SyncPlan::new();
        plan.add_action(copy("a.txt", 100, Direction::AToB));
        plan.add_action(copy("b.txt", 200, Direction::AToB));
        plan.add_action(copy("c.txt", 50, Direction::BToA));

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.stats.a_to_b, 2);
        assert_eq!(plan.stats.b_to_a, 1);
        assert_eq!(plan.stats.total_files(), 3);
        assert_eq!(plan.stats.total_bytes, 350);
    }

    #[test]
    fn test_unknown_size_adds_no_bytes() {
        let mut plan = SyncPlan::new();
        plan.add_action(CopyAction::new(FileEntry::new("x"), Direction::BToA));
        assert_eq!(plan.stats.total_bytes, 0);
        assert_eq!(plan.stats.b_to_a, 1);
    }

    #[test]
    fn test_actions_in_filters_direction() {
        let mut plan = SyncPlan::new();
        plan.add_action(copy("a.txt", 1, Direction::AToB));
        plan.add_action(copy("b.txt", 1, Direction::BToA));

        let a_to_b: Vec<&str> = plan.actions_in(Direction::AToB).map(|a| a.path()).collect();
        let b_to_a: Vec<&str> = plan.actions_in(Direction::BToA).map(|a| a.path()).collect();
        assert_eq!(a_to_b, vec!["a.txt"]);
        assert_eq!(b_to_a, vec!["b.txt"]);
    }
}
