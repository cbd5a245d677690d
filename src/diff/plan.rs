//! Sync plan generation

use crate::diff::SyncPlan;
use crate::types::{CopyAction, Direction, Listing};

/// Generate the copies that make both listings hold the same paths
///
/// Every path of `listing_a` missing from `listing_b` becomes an A → B copy,
/// then every path of `listing_b` missing from `listing_a` becomes a B → A
/// copy. Within a direction the order is the listing's iteration order.
///
/// Only presence is compared. A path present on both sides is left alone even
/// when its content hashes differ.
///
/// # Example
/// ```
/// use duosync::diff::generate_sync_plan;
/// use duosync::types::{FileEntry, Listing, Root};
///
/// let mut a = Listing::new(Root::new("left").unwrap());
/// let b = Listing::new(Root::new("right").unwrap());
/// a.insert(FileEntry::new("a.txt").with_size(4));
///
/// let plan = generate_sync_plan(&a, &b);
/// assert_eq!(plan.stats.a_to_b, 1);
/// assert_eq!(plan.stats.b_to_a, 0);
/// ```
pub fn generate_sync_plan(listing_a: &Listing, listing_b: &Listing) -> SyncPlan {
    let mut plan = SyncPlan::new();

    for entry in listing_a.missing_from(listing_b) {
        plan.add_action(CopyAction::new(entry.clone(), Direction::AToB));
    }
    for entry in listing_b.missing_from(listing_a) {
        plan.add_action(CopyAction::new(entry.clone(), Direction::BToA));
    }

    plan
}
