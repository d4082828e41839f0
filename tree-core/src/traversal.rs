//! Depth-first visiting orders over binary trees.

use crate::{
    error::ParseKindError,
    tree::{NodeValue, TreeNode},
    types::NodeId,
};
use std::{fmt, str::FromStr};

/// Which depth-first order to walk a binary tree in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    /// Node, left subtree, right subtree.
    #[default]
    Preorder,
    /// Left subtree, node, right subtree.
    Inorder,
    /// Left subtree, right subtree, node.
    Postorder,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 3] = [
        TraversalKind::Preorder,
        TraversalKind::Inorder,
        TraversalKind::Postorder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalKind::Preorder => "preorder",
            TraversalKind::Inorder => "inorder",
            TraversalKind::Postorder => "postorder",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraversalKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TraversalKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseKindError(wanted.to_owned()))
    }
}

/// Returns the ids of `root`'s nodes in the order `kind` visits them.
///
/// An absent root yields an empty order. Only binary child slots are
/// followed; ternary and general nodes contribute themselves but not their
/// children.
///
/// Each call builds its own sequence and the caller concatenates, so the
/// walk holds no state between calls.
pub fn traversal_order(root: Option<&TreeNode>, kind: TraversalKind) -> Vec<NodeId> {
    let Some(node) = root else {
        return Vec::new();
    };

    let left = traversal_order(node.left().map(|l| &**l), kind);
    let right = traversal_order(node.right().map(|r| &**r), kind);
    let own = [node.id];
    let (own, left, right) = (own.as_slice(), left.as_slice(), right.as_slice());

    match kind {
        TraversalKind::Preorder => [own, left, right].concat(),
        TraversalKind::Inorder => [left, own, right].concat(),
        TraversalKind::Postorder => [left, right, own].concat(),
    }
}

/// Same walk as [`traversal_order`], reporting node values instead of ids.
pub fn traversal_values(root: Option<&TreeNode>, kind: TraversalKind) -> Vec<NodeValue> {
    let Some(node) = root else {
        return Vec::new();
    };
    traversal_order(Some(node), kind)
        .into_iter()
        .filter_map(|id| node.find(id).map(|n| n.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use pretty_assertions::assert_eq;

    fn numbers(values: Vec<NodeValue>) -> Vec<i64> {
        values.iter().filter_map(NodeValue::as_number).collect()
    }

    #[test]
    fn example_tree_orders() {
        let tree = Preset::BinaryExample.tree();

        assert_eq!(
            numbers(traversal_values(Some(&tree), TraversalKind::Preorder)),
            vec![10, 5, 2, 7, 15, 12, 20]
        );
        assert_eq!(
            numbers(traversal_values(Some(&tree), TraversalKind::Inorder)),
            vec![2, 5, 7, 10, 12, 15, 20]
        );
        assert_eq!(
            numbers(traversal_values(Some(&tree), TraversalKind::Postorder)),
            vec![2, 7, 5, 12, 20, 15, 10]
        );
    }

    #[test]
    fn empty_tree_has_empty_order() {
        for kind in TraversalKind::ALL {
            assert!(traversal_order(None, kind).is_empty());
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let tree = Preset::Complete.tree();
        let first = traversal_order(Some(&tree), TraversalKind::Inorder);
        let second = traversal_order(Some(&tree), TraversalKind::Inorder);

        assert_eq!(first, second);
        assert_eq!(first.len(), tree.len());
    }

    #[test]
    fn every_order_visits_each_node_once() {
        let tree = Preset::Degenerate.tree();
        for kind in TraversalKind::ALL {
            let mut ids = traversal_order(Some(&tree), kind);
            ids.sort_unstable();
            let mut expected = tree.ids();
            expected.sort_unstable();
            assert_eq!(ids, expected, "{kind} must visit every node once");
        }
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("InOrder".parse::<TraversalKind>(), Ok(TraversalKind::Inorder));
        assert_eq!(" postorder ".parse::<TraversalKind>(), Ok(TraversalKind::Postorder));
        assert!("levelorder".parse::<TraversalKind>().is_err());
    }
}
