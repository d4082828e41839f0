//! Fixed example trees for the gallery and the traversal demo.

use crate::{
    bst::IdAllocator,
    tree::{NodeValue, Subtree, TreeNode},
};

/// One of the built-in example trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Preset {
    /// `10(5(2, 7), 15(12, 20))`, the reference tree for the traversal demo.
    #[default]
    BinaryExample,
    Full,
    Complete,
    Perfect,
    Degenerate,
    Ternary,
    General,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::BinaryExample,
        Preset::Full,
        Preset::Complete,
        Preset::Perfect,
        Preset::Degenerate,
        Preset::Ternary,
        Preset::General,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::BinaryExample => "Binary search tree",
            Preset::Full => "Full binary tree",
            Preset::Complete => "Complete binary tree",
            Preset::Perfect => "Perfect binary tree",
            Preset::Degenerate => "Degenerate tree",
            Preset::Ternary => "Ternary tree",
            Preset::General => "General tree",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::BinaryExample => {
                "Every left descendant is smaller and every right descendant larger than its ancestor."
            }
            Preset::Full => "Every node has either zero or two children.",
            Preset::Complete => {
                "All levels are filled except possibly the last, which is filled from the left."
            }
            Preset::Perfect => "All inner nodes have two children and all leaves share one depth.",
            Preset::Degenerate => "Each node has a single child, so the tree behaves like a list.",
            Preset::Ternary => "Each node has up to three children: left, middle and right.",
            Preset::General => "Each node may have any number of ordered children.",
        }
    }

    /// `true` for the binary presets that the traversal animation accepts.
    pub fn is_traversable(self) -> bool {
        !matches!(self, Preset::Ternary | Preset::General)
    }

    /// Builds a fresh copy of the fixture. Ids start at zero.
    pub fn tree(self) -> Subtree {
        let mut f = Fixture::default();
        match self {
            Preset::BinaryExample => {
                let (two, seven) = (f.leaf(2), f.leaf(7));
                let five = f.bin(5, Some(two), Some(seven));
                let (twelve, twenty) = (f.leaf(12), f.leaf(20));
                let fifteen = f.bin(15, Some(twelve), Some(twenty));
                f.bin(10, Some(five), Some(fifteen))
            }
            Preset::Full => {
                let b = f.leaf("B");
                let (d, e) = (f.leaf("D"), f.leaf("E"));
                let c = f.bin("C", Some(d), Some(e));
                f.bin("A", Some(b), Some(c))
            }
            Preset::Complete => {
                let (d, e) = (f.leaf("D"), f.leaf("E"));
                let b = f.bin("B", Some(d), Some(e));
                let g = f.leaf("F");
                let c = f.bin("C", Some(g), None);
                f.bin("A", Some(b), Some(c))
            }
            Preset::Perfect => {
                let (d, e) = (f.leaf("D"), f.leaf("E"));
                let b = f.bin("B", Some(d), Some(e));
                let (g, h) = (f.leaf("F"), f.leaf("G"));
                let c = f.bin("C", Some(g), Some(h));
                f.bin("A", Some(b), Some(c))
            }
            Preset::Degenerate => {
                let four = f.leaf(4);
                let three = f.bin(3, None, Some(four));
                let two = f.bin(2, None, Some(three));
                f.bin(1, None, Some(two))
            }
            Preset::Ternary => {
                let (l1, l2) = (f.leaf("L1"), f.leaf("L2"));
                let l = f.tri("L", Some(l1), None, Some(l2));
                let m1 = f.leaf("M1");
                let m = f.tri("M", None, Some(m1), None);
                let (r1, r2, r3) = (f.leaf("R1"), f.leaf("R2"), f.leaf("R3"));
                let r = f.tri("R", Some(r1), Some(r2), Some(r3));
                f.tri("Root", Some(l), Some(m), Some(r))
            }
            Preset::General => {
                let team = vec![f.leaf("Dev"), f.leaf("QA")];
                let cto = f.general("CTO", team);
                let cfo = f.leaf("CFO");
                let ops = vec![f.leaf("Ops")];
                let coo = f.general("COO", ops);
                f.general("CEO", vec![cto, cfo, coo])
            }
        }
    }
}

#[derive(Default)]
struct Fixture {
    ids: IdAllocator,
}

impl Fixture {
    fn leaf(&mut self, value: impl Into<NodeValue>) -> Subtree {
        TreeNode::leaf(self.ids.allocate(), value).into_subtree()
    }

    fn bin(
        &mut self,
        value: impl Into<NodeValue>,
        left: Option<Subtree>,
        right: Option<Subtree>,
    ) -> Subtree {
        TreeNode::binary(self.ids.allocate(), value, left, right).into_subtree()
    }

    fn tri(
        &mut self,
        value: impl Into<NodeValue>,
        left: Option<Subtree>,
        middle: Option<Subtree>,
        right: Option<Subtree>,
    ) -> Subtree {
        TreeNode::ternary(self.ids.allocate(), value, left, middle, right).into_subtree()
    }

    fn general(&mut self, value: impl Into<NodeValue>, children: Vec<Subtree>) -> Subtree {
        TreeNode::general(self.ids.allocate(), value, children).into_subtree()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_unique_ids() {
        for preset in Preset::ALL {
            let tree = preset.tree();
            let mut ids = tree.ids();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), tree.len(), "{} has duplicate ids", preset.name());
        }
    }

    #[test]
    fn traversable_presets_are_binary() {
        for preset in Preset::ALL {
            assert_eq!(preset.tree().is_binary(), preset.is_traversable(), "{preset:?}");
        }
    }

    #[test]
    fn binary_example_is_a_search_tree() {
        let tree = Preset::BinaryExample.tree();
        assert!(tree.is_bst());
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn named_variants_have_expected_sizes() {
        assert_eq!(Preset::Full.tree().len(), 5);
        assert_eq!(Preset::Complete.tree().len(), 6);
        assert_eq!(Preset::Perfect.tree().len(), 7);
        assert_eq!(Preset::Degenerate.tree().height(), 4);
        assert_eq!(Preset::General.tree().len(), 7);
        assert_eq!(Preset::Ternary.tree().len(), 10);
    }
}
