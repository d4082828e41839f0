use crate::types::NodeId;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable subtree.
///
/// Successive snapshots of a tree share every subtree that did not change,
/// so `Arc::ptr_eq` tells whether a subtree was rebuilt.
pub type Subtree = Arc<TreeNode>;

/// The payload of a node: a number for search trees, a label for the
/// gallery fixtures.
///
/// Values are totally ordered. Numbers compare numerically and sort before
/// labels, labels compare lexically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeValue {
    Number(i64),
    Label(String),
}

impl NodeValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            NodeValue::Number(n) => Some(*n),
            NodeValue::Label(_) => None,
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Number(n) => write!(f, "{n}"),
            NodeValue::Label(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeValue {
    fn from(n: i64) -> Self {
        NodeValue::Number(n)
    }
}

impl From<i32> for NodeValue {
    fn from(n: i32) -> Self {
        NodeValue::Number(i64::from(n))
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::Label(s.to_owned())
    }
}

/// Outgoing edges of a node.
///
/// Every child is owned by exactly one parent in the displayed tree.
#[derive(Clone, Debug)]
pub enum Children {
    Binary {
        left: Option<Subtree>,
        right: Option<Subtree>,
    },
    Ternary {
        left: Option<Subtree>,
        middle: Option<Subtree>,
        right: Option<Subtree>,
    },
    General(Vec<Subtree>),
}

impl Children {
    pub const NONE: Children = Children::Binary {
        left: None,
        right: None,
    };

    /// Present children in display order (left to right).
    pub fn iter(&self) -> impl Iterator<Item = &Subtree> {
        let slots: Vec<&Subtree> = match self {
            Children::Binary { left, right } => left.iter().chain(right.iter()).collect(),
            Children::Ternary {
                left,
                middle,
                right,
            } => left
                .iter()
                .chain(middle.iter())
                .chain(right.iter())
                .collect(),
            Children::General(children) => children.iter().collect(),
        };
        slots.into_iter()
    }
}

/// A node of an immutable tree.
///
/// Nodes are never mutated after construction. Operations that "change" a
/// tree (see [`crate::bst`]) build new nodes along the changed path and share
/// the rest.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: NodeValue,
    pub children: Children,
    /// Set only on the node inserted by the most recent builder step.
    pub is_new: bool,
}

impl TreeNode {
    pub fn leaf(id: NodeId, value: impl Into<NodeValue>) -> Self {
        Self {
            id,
            value: value.into(),
            children: Children::NONE,
            is_new: false,
        }
    }

    pub fn binary(
        id: NodeId,
        value: impl Into<NodeValue>,
        left: Option<Subtree>,
        right: Option<Subtree>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            children: Children::Binary { left, right },
            is_new: false,
        }
    }

    pub fn ternary(
        id: NodeId,
        value: impl Into<NodeValue>,
        left: Option<Subtree>,
        middle: Option<Subtree>,
        right: Option<Subtree>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            children: Children::Ternary {
                left,
                middle,
                right,
            },
            is_new: false,
        }
    }

    pub fn general(id: NodeId, value: impl Into<NodeValue>, children: Vec<Subtree>) -> Self {
        Self {
            id,
            value: value.into(),
            children: Children::General(children),
            is_new: false,
        }
    }

    pub fn into_subtree(self) -> Subtree {
        Arc::new(self)
    }

    /// Left child of a binary node, `None` for other shapes.
    pub fn left(&self) -> Option<&Subtree> {
        match &self.children {
            Children::Binary { left, .. } => left.as_ref(),
            _ => None,
        }
    }

    /// Right child of a binary node, `None` for other shapes.
    pub fn right(&self) -> Option<&Subtree> {
        match &self.children {
            Children::Binary { right, .. } => right.as_ref(),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().next().is_none()
    }

    /// `true` if every node in this tree has the binary shape.
    pub fn is_binary(&self) -> bool {
        match &self.children {
            Children::Binary { left, right } => left
                .iter()
                .chain(right.iter())
                .all(|child| child.is_binary()),
            _ => false,
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(|c| c.len()).sum::<usize>()
    }

    /// Number of levels; a single node has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(|c| c.height()).max().unwrap_or(0)
    }

    /// All node ids in preorder (node first, then children left to right).
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = vec![self.id];
        for child in self.children.iter() {
            ids.extend(child.ids());
        }
        ids
    }

    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Ids of nodes currently flagged as newly inserted.
    pub fn new_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        if self.is_new {
            ids.push(self.id);
        }
        for child in self.children.iter() {
            ids.extend(child.new_ids());
        }
        ids
    }

    /// Checks the search-tree ordering: every left descendant strictly
    /// smaller, every right descendant strictly greater.
    pub fn is_bst(&self) -> bool {
        fn within(node: &TreeNode, lo: Option<&NodeValue>, hi: Option<&NodeValue>) -> bool {
            let Children::Binary { left, right } = &node.children else {
                return false;
            };
            if lo.is_some_and(|lo| node.value <= *lo) || hi.is_some_and(|hi| node.value >= *hi) {
                return false;
            }
            left.as_ref()
                .is_none_or(|l| within(l, lo, Some(&node.value)))
                && right
                    .as_ref()
                    .is_none_or(|r| within(r, Some(&node.value), hi))
        }
        within(self, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Subtree {
        let l = TreeNode::leaf(1, 5).into_subtree();
        let r = TreeNode::binary(2, 15, Some(TreeNode::leaf(3, 12).into_subtree()), None)
            .into_subtree();
        TreeNode::binary(0, 10, Some(l), Some(r)).into_subtree()
    }

    #[test]
    fn counts_and_height() {
        let t = sample();
        assert_eq!(t.len(), 4);
        assert_eq!(t.height(), 3);
        assert_eq!(t.ids(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn find_locates_nested_nodes() {
        let t = sample();
        assert_eq!(t.find(3).map(|n| n.value.clone()), Some(NodeValue::Number(12)));
        assert!(t.find(99).is_none());
    }

    #[test]
    fn is_bst_detects_violations_deep_in_the_tree() {
        assert!(sample().is_bst());

        // 3 sits in the right subtree of 10 but is smaller than 10.
        let bad_right = TreeNode::binary(2, 15, Some(TreeNode::leaf(3, 3).into_subtree()), None)
            .into_subtree();
        let bad = TreeNode::binary(0, 10, None, Some(bad_right));
        assert!(!bad.is_bst());
    }

    #[test]
    fn shape_queries() {
        let t = sample();
        assert!(t.is_binary());
        assert!(t.left().is_some_and(|l| l.is_leaf()));

        let ternary = TreeNode::ternary(
            0,
            "root",
            None,
            Some(TreeNode::leaf(1, "mid").into_subtree()),
            None,
        );
        assert!(!ternary.is_binary());
        assert!(ternary.left().is_none());
        assert_eq!(ternary.children.iter().count(), 1);
    }

    #[test]
    fn numbers_sort_before_labels() {
        assert!(NodeValue::Number(1_000) < NodeValue::from("a"));
        assert!(NodeValue::Number(-3) < NodeValue::Number(2));
        assert_eq!(NodeValue::from("B").to_string(), "B");
    }
}
