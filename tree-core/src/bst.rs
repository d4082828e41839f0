//! Step-by-step binary search tree construction.
//!
//! Every operation here is persistent: it returns a new root and leaves the
//! input tree untouched. Nodes on the path to the change are rebuilt, all
//! other subtrees are shared with the previous snapshot.

use crate::{
    tree::{Children, NodeValue, Subtree, TreeNode},
    types::NodeId,
};
use std::{cmp::Ordering, sync::Arc};

/// Hands out node ids for one tree-building session.
///
/// Ids increase monotonically and are never handed out twice until
/// [`IdAllocator::reset`] is called together with discarding the tree.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: NodeId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts numbering at `next`, e.g. after ids used by an existing tree.
    pub fn starting_at(next: NodeId) -> Self {
        Self { next }
    }

    pub fn allocate(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out since the last reset.
    pub fn peek(&self) -> NodeId {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// Inserts `value` into the search tree rooted at `root`.
///
/// - Without a root, a fresh leaf flagged `is_new` is returned.
/// - Smaller values descend left, greater values descend right. Every
///   rebuilt ancestor has `is_new == false`.
/// - An equal value is a no-op: the returned root is `root` itself (same
///   allocation) and no id is consumed.
///
/// Nodes that are not binary are left as they are; the builder never
/// creates them.
///
/// ### Parameters
/// - `root` - Current snapshot, or `None` for an empty tree.
/// - `value` - Number to insert.
/// - `ids` - Allocator for the new node's id.
///
/// ### Returns
/// The root of the new snapshot.
pub fn insert(root: Option<&Subtree>, value: i64, ids: &mut IdAllocator) -> Subtree {
    let Some(node) = root else {
        let mut leaf = TreeNode::leaf(ids.allocate(), value);
        leaf.is_new = true;
        return leaf.into_subtree();
    };

    let Children::Binary { left, right } = &node.children else {
        log::warn!("skipping insert of {value} below non-binary node {}", node.id);
        return Arc::clone(node);
    };

    match NodeValue::Number(value).cmp(&node.value) {
        Ordering::Less => {
            let new_left = insert(left.as_ref(), value, ids);
            if left.as_ref().is_some_and(|l| Arc::ptr_eq(l, &new_left)) {
                return Arc::clone(node);
            }
            rebuilt(node, Some(new_left), right.clone())
        }
        Ordering::Greater => {
            let new_right = insert(right.as_ref(), value, ids);
            if right.as_ref().is_some_and(|r| Arc::ptr_eq(r, &new_right)) {
                return Arc::clone(node);
            }
            rebuilt(node, left.clone(), Some(new_right))
        }
        Ordering::Equal => Arc::clone(node),
    }
}

fn rebuilt(node: &TreeNode, left: Option<Subtree>, right: Option<Subtree>) -> Subtree {
    TreeNode {
        id: node.id,
        value: node.value.clone(),
        children: Children::Binary { left, right },
        is_new: false,
    }
    .into_subtree()
}

/// Returns `root` with every `is_new` flag cleared.
///
/// Subtrees that contain no flagged node are shared, so clearing an
/// already clean tree returns the same allocation.
pub fn clear_flags(root: &Subtree) -> Subtree {
    let children = match &root.children {
        Children::Binary { left, right } => Children::Binary {
            left: left.as_ref().map(clear_flags),
            right: right.as_ref().map(clear_flags),
        },
        Children::Ternary {
            left,
            middle,
            right,
        } => Children::Ternary {
            left: left.as_ref().map(clear_flags),
            middle: middle.as_ref().map(clear_flags),
            right: right.as_ref().map(clear_flags),
        },
        Children::General(children) => Children::General(children.iter().map(clear_flags).collect()),
    };

    let unchanged = !root.is_new
        && root
            .children
            .iter()
            .zip(children.iter())
            .all(|(old, new)| Arc::ptr_eq(old, new));
    if unchanged {
        return Arc::clone(root);
    }

    TreeNode {
        id: root.id,
        value: root.value.clone(),
        children,
        is_new: false,
    }
    .into_subtree()
}

/// Folds [`insert`] over `values`, starting from an empty tree.
///
/// The node created by the last distinct value keeps its `is_new` flag;
/// flags of earlier insertions are cleared between steps, matching what
/// the playback controller does tick by tick.
pub fn build_from(values: &[i64], ids: &mut IdAllocator) -> Option<Subtree> {
    values.iter().fold(None, |root, &value| {
        let cleared = root.as_ref().map(clear_flags);
        Some(insert(cleared.as_ref(), value, ids))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn shape(node: &TreeNode) -> String {
        match (node.left(), node.right()) {
            (None, None) => node.value.to_string(),
            (l, r) => format!(
                "{}({},{})",
                node.value,
                l.map(|l| shape(l)).unwrap_or_default(),
                r.map(|r| shape(r)).unwrap_or_default()
            ),
        }
    }

    #[test]
    fn insert_into_empty_tree_flags_new_leaf() {
        let mut ids = IdAllocator::new();
        let root = insert(None, 42, &mut ids);

        assert_eq!(root.id, 0);
        assert_eq!(root.value, NodeValue::Number(42));
        assert!(root.is_new);
        assert!(root.is_leaf());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn insert_places_values_by_order() {
        let mut ids = IdAllocator::new();
        let root = build_from(&[50, 30, 70, 20, 40, 60, 80], &mut ids).unwrap();

        assert_eq!(shape(&root), "50(30(20,40),70(60,80))");
        assert!(root.is_bst());
    }

    #[test]
    fn insert_keeps_previous_snapshot_intact() {
        let mut ids = IdAllocator::new();
        let before = build_from(&[50, 30], &mut ids).unwrap();
        let after = insert(Some(&before), 70, &mut ids);

        assert_eq!(shape(&before), "50(30,)");
        assert_eq!(shape(&after), "50(30,70)");
        // The untouched left subtree is shared.
        assert!(Arc::ptr_eq(before.left().unwrap(), after.left().unwrap()));
        assert!(!after.is_new);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut ids = IdAllocator::new();
        let root = build_from(&[50, 30, 70], &mut ids).unwrap();
        let next_id = ids.peek();

        let again = insert(Some(&root), 30, &mut ids);

        assert!(Arc::ptr_eq(&root, &again));
        assert_eq!(ids.peek(), next_id);
        assert_eq!(again.ids(), root.ids());
    }

    #[test]
    fn clear_flags_resets_only_flagged_path() {
        let mut ids = IdAllocator::new();
        let base = build_from(&[50, 30], &mut ids).unwrap();
        let base = clear_flags(&base);
        let with_new = insert(Some(&base), 70, &mut ids);

        assert_eq!(with_new.new_ids(), vec![2]);

        let cleared = clear_flags(&with_new);
        assert!(cleared.new_ids().is_empty());
        assert_eq!(cleared.ids(), with_new.ids());
        assert!(Arc::ptr_eq(with_new.left().unwrap(), cleared.left().unwrap()));
        // Nothing left to clear: same allocation comes back.
        assert!(Arc::ptr_eq(&cleared, &clear_flags(&cleared)));
    }

    #[test]
    fn build_scenario_flags_only_latest_insert() {
        let mut ids = IdAllocator::new();
        let root = build_from(&[50, 30, 70, 20], &mut ids).unwrap();

        assert_eq!(shape(&root), "50(30(20,),70)");
        let twenty = root.left().and_then(|l| l.left()).unwrap();
        assert_eq!(root.new_ids(), vec![twenty.id]);
    }

    #[test]
    fn insert_leaves_non_binary_nodes_alone() {
        let mut ids = IdAllocator::starting_at(10);
        let ternary = TreeNode::ternary(0, 5, None, None, None).into_subtree();

        let out = insert(Some(&ternary), 7, &mut ids);

        assert!(Arc::ptr_eq(&ternary, &out));
        assert_eq!(ids.peek(), 10);
    }

    proptest! {
        #[test]
        fn any_sequence_yields_a_search_tree(values in proptest::collection::vec(-500i64..500, 1..40)) {
            let mut ids = IdAllocator::new();
            let root = build_from(&values, &mut ids).unwrap();

            prop_assert!(root.is_bst());

            let mut distinct = values.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(root.len(), distinct.len());
        }

        #[test]
        fn ids_are_unique_within_a_session(values in proptest::collection::vec(0i64..50, 1..40)) {
            let mut ids = IdAllocator::new();
            let root = build_from(&values, &mut ids).unwrap();

            let mut seen = root.ids();
            let total = seen.len();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), total);
            prop_assert_eq!(ids.peek(), total);
        }
    }
}
