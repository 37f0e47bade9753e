//! Cycle checks for the self-referential task relations.
//!
//! Both `parent_task_id` and `depends_on_task_id` form chains through the
//! task table. Neither relation may loop back onto the task being updated:
//! a task must not become its own ancestor, and a dependency chain must not
//! circle back to the dependent. The walk carries a visited set so a
//! pre-existing loop elsewhere in the table terminates instead of spinning.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// Link table for one relation: child id -> linked id (parent or blocker).
pub type LinkMap = HashMap<DbId, DbId>;

/// Returns `true` if pointing `task`'s link at `candidate` would close a
/// cycle through the given relation (including `task == candidate`).
pub fn creates_cycle(task: DbId, candidate: DbId, links: &LinkMap) -> bool {
    if task == candidate {
        return true;
    }

    let mut seen = HashSet::new();
    let mut current = Some(candidate);
    while let Some(id) = current {
        if id == task {
            return true;
        }
        if !seen.insert(id) {
            // Loop that does not involve `task`; the new link is still fine.
            return false;
        }
        current = links.get(&id).copied();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(DbId, DbId)]) -> LinkMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn self_reference_is_a_cycle() {
        assert!(creates_cycle(1, 1, &links(&[])));
    }

    #[test]
    fn direct_two_node_cycle_is_detected() {
        // 2 already points at 1; linking 1 -> 2 would loop.
        assert!(creates_cycle(1, 2, &links(&[(2, 1)])));
    }

    #[test]
    fn long_chain_cycle_is_detected() {
        // 4 -> 3 -> 2 -> 1; linking 1 -> 4 closes the loop.
        assert!(creates_cycle(1, 4, &links(&[(4, 3), (3, 2), (2, 1)])));
    }

    #[test]
    fn unrelated_link_is_allowed() {
        assert!(!creates_cycle(1, 5, &links(&[(5, 6), (6, 7)])));
    }

    #[test]
    fn pre_existing_loop_elsewhere_terminates() {
        // 5 <-> 6 loop already in the table; the walk must not spin.
        assert!(!creates_cycle(1, 5, &links(&[(5, 6), (6, 5)])));
    }

    #[test]
    fn reparenting_within_a_tree_is_allowed() {
        // 3 -> 2 -> 1; moving 3 under 1 directly is fine.
        assert!(!creates_cycle(3, 1, &links(&[(3, 2), (2, 1)])));
    }
}
