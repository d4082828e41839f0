/// Identifier for a node in a [`crate::tree::TreeNode`] tree.
///
/// Ids are handed out by [`crate::bst::IdAllocator`] and are unique within
/// one tree. They are not indices; a tree keeps its ids across snapshots.
pub type NodeId = usize;
