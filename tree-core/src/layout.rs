//! Span-based placement of tree nodes on a canvas.
//!
//! Every subtree is given a horizontal span. A node sits at the midpoint of
//! its span and hands disjoint sub-spans to its children:
//!
//! - binary nodes split the span in halves (an absent child still keeps its
//!   half, so left children always sit left of their parent);
//! - ternary nodes reserve a band of [`LayoutConfig::middle_band_width`]
//!   centred under the parent for the middle child;
//! - general nodes split the span into one equal band per child.
//!
//! Rows are `row_height` apart, starting `top_margin` below the canvas top.
//! The output is recomputed from scratch for every snapshot and depends only
//! on the tree shape, the canvas size, and the configuration.

use crate::{
    config::LayoutConfig,
    tree::{Children, Subtree, TreeNode},
    types::NodeId,
};
use glam::Vec2;

/// A node with its canvas position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
    pub id: NodeId,
    pub label: String,
    pub pos: Vec2,
    pub depth: usize,
    /// Horizontal range `(start, end)` allotted to this node's subtree.
    pub span: (f32, f32),
    pub is_new: bool,
    /// Index of the parent in [`PositionedTree::nodes`].
    pub parent: Option<usize>,
    /// Indices of the children in [`PositionedTree::nodes`], left to right.
    pub children: Vec<usize>,
}

/// Render-ready copy of a tree, nodes stored in preorder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionedTree {
    pub nodes: Vec<PositionedNode>,
    /// Row spacing actually used, after fitting the canvas height.
    pub row_height: f32,
}

impl PositionedTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Parent/child pairs, one per drawn edge.
    pub fn edges(&self) -> impl Iterator<Item = (&PositionedNode, &PositionedNode)> {
        self.nodes.iter().flat_map(move |parent| {
            parent
                .children
                .iter()
                .map(move |&child| (parent, &self.nodes[child]))
        })
    }
}

#[derive(Clone, Copy)]
struct Geometry {
    row_height: f32,
    top_margin: f32,
    middle_band_width: f32,
}

/// Positions every node of `root` on a `width` x `height` canvas.
///
/// The root's span is `[0, width]`, so every `x` lies inside the canvas.
/// The configured row height is shrunk (never grown) when the deepest row
/// would otherwise fall below `height - top_margin`.
///
/// ### Parameters
/// - `root` - Tree to place, or `None` for an empty canvas.
/// - `width`, `height` - Canvas size; negative values are treated as zero.
/// - `cfg` - Row spacing, margins, and the ternary middle band.
///
/// ### Returns
/// A [`PositionedTree`] with nodes in preorder; empty for `None`.
pub fn layout(
    root: Option<&TreeNode>,
    width: f32,
    height: f32,
    cfg: &LayoutConfig,
) -> PositionedTree {
    let Some(root) = root else {
        return PositionedTree {
            nodes: Vec::new(),
            row_height: cfg.row_height,
        };
    };

    let width = width.max(0.0);
    let height = height.max(0.0);

    let levels = root.height();
    let row_height = if levels > 1 {
        let room = (height - 2.0 * cfg.top_margin).max(0.0) / (levels - 1) as f32;
        cfg.row_height.min(room)
    } else {
        cfg.row_height
    };

    let geo = Geometry {
        row_height,
        top_margin: cfg.top_margin,
        middle_band_width: cfg.middle_band_width,
    };

    PositionedTree {
        nodes: place(root, (0.0, width), 0, None, 0, geo),
        row_height,
    }
}

/// Places `node` at index `base` and its subtree right after it.
///
/// Returns the subtree's nodes in preorder; the caller splices them in.
fn place(
    node: &TreeNode,
    span: (f32, f32),
    depth: usize,
    parent: Option<usize>,
    base: usize,
    geo: Geometry,
) -> Vec<PositionedNode> {
    let (lo, hi) = span;
    let mut out = vec![PositionedNode {
        id: node.id,
        label: node.value.to_string(),
        pos: Vec2::new((lo + hi) * 0.5, depth as f32 * geo.row_height + geo.top_margin),
        depth,
        span,
        is_new: node.is_new,
        parent,
        children: Vec::new(),
    }];

    for (child, child_span) in child_spans(node, span, geo) {
        let start = base + out.len();
        out[0].children.push(start);
        out.extend(place(child, child_span, depth + 1, Some(base), start, geo));
    }
    out
}

fn slot(child: &Option<Subtree>, span: (f32, f32)) -> Option<(&TreeNode, (f32, f32))> {
    child.as_deref().map(|c| (c, span))
}

fn child_spans(
    node: &TreeNode,
    (lo, hi): (f32, f32),
    geo: Geometry,
) -> Vec<(&TreeNode, (f32, f32))> {
    let mid = (lo + hi) * 0.5;

    match &node.children {
        Children::Binary { left, right } => [slot(left, (lo, mid)), slot(right, (mid, hi))]
            .into_iter()
            .flatten()
            .collect(),
        Children::Ternary {
            left,
            middle,
            right,
        } => {
            let band = geo.middle_band_width.min((hi - lo) / 3.0);
            let (a, b) = (mid - band * 0.5, mid + band * 0.5);
            [
                slot(left, (lo, a)),
                slot(middle, (a, b)),
                slot(right, (b, hi)),
            ]
            .into_iter()
            .flatten()
            .collect()
        }
        Children::General(children) => {
            let n = children.len();
            let band = (hi - lo) / n.max(1) as f32;
            children
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let start = lo + band * i as f32;
                    let end = if i + 1 == n { hi } else { lo + band * (i + 1) as f32 };
                    (&**c, (start, end))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bst, presets::Preset, tree::TreeNode};
    use proptest::prelude::*;

    fn cfg() -> LayoutConfig {
        LayoutConfig {
            row_height: 80.0,
            top_margin: 40.0,
            middle_band_width: 60.0,
            node_radius: 20.0,
        }
    }

    fn x_of(tree: &PositionedTree, label: &str) -> f32 {
        tree.nodes.iter().find(|n| n.label == label).unwrap().pos.x
    }

    /// Sibling spans are ordered, disjoint and nested in the parent span.
    fn spans_are_disjoint(tree: &PositionedTree) -> bool {
        tree.nodes.iter().all(|parent| {
            let spans: Vec<(f32, f32)> = parent.children.iter().map(|&c| tree.nodes[c].span).collect();
            let nested = spans
                .iter()
                .all(|&(a, b)| a >= parent.span.0 - 1e-3 && b <= parent.span.1 + 1e-3 && a <= b);
            let ordered = spans.windows(2).all(|w| w[0].1 <= w[1].0 + 1e-3);
            nested && ordered
        })
    }

    #[test]
    fn empty_tree_has_no_nodes() {
        let out = layout(None, 800.0, 600.0, &cfg());
        assert!(out.is_empty());
    }

    #[test]
    fn single_leaf_sits_at_span_midpoint() {
        let leaf = TreeNode::leaf(0, 1);
        let out = layout(Some(&leaf), 800.0, 600.0, &cfg());

        assert_eq!(out.len(), 1);
        assert_eq!(out.nodes[0].pos, Vec2::new(400.0, 40.0));
        assert!(out.nodes[0].children.is_empty());
    }

    #[test]
    fn binary_children_halve_the_span() {
        let tree = Preset::BinaryExample.tree();
        let out = layout(Some(&tree), 800.0, 600.0, &cfg());

        assert_eq!(x_of(&out, "10"), 400.0);
        assert_eq!(x_of(&out, "5"), 200.0);
        assert_eq!(x_of(&out, "15"), 600.0);
        assert_eq!(x_of(&out, "2"), 100.0);
        assert_eq!(x_of(&out, "20"), 700.0);

        let two = out.nodes.iter().find(|n| n.label == "2").unwrap();
        assert_eq!(two.depth, 2);
        assert_eq!(two.pos.y, 2.0 * 80.0 + 40.0);
    }

    #[test]
    fn missing_left_child_keeps_right_child_on_the_right() {
        let tree = Preset::Degenerate.tree();
        let out = layout(Some(&tree), 800.0, 600.0, &cfg());

        assert_eq!(x_of(&out, "1"), 400.0);
        assert_eq!(x_of(&out, "2"), 600.0);
        assert_eq!(x_of(&out, "3"), 700.0);
    }

    #[test]
    fn ternary_middle_child_is_centred_in_its_band() {
        let tree = Preset::Ternary.tree();
        let out = layout(Some(&tree), 900.0, 600.0, &cfg());

        let root = &out.nodes[0];
        let middle = out.nodes.iter().find(|n| n.label == "M").unwrap();
        assert_eq!(middle.pos.x, root.pos.x);
        assert_eq!(middle.span, (420.0, 480.0));
        assert_eq!(x_of(&out, "L"), 210.0);
        assert_eq!(x_of(&out, "R"), 690.0);
        assert!(spans_are_disjoint(&out));
    }

    #[test]
    fn general_children_get_equal_bands() {
        let tree = Preset::General.tree();
        let out = layout(Some(&tree), 600.0, 600.0, &cfg());

        assert_eq!(x_of(&out, "CTO"), 100.0);
        assert_eq!(x_of(&out, "CFO"), 300.0);
        assert_eq!(x_of(&out, "COO"), 500.0);
        assert!(spans_are_disjoint(&out));
    }

    #[test]
    fn row_height_shrinks_to_fit_canvas() {
        let tree = Preset::Degenerate.tree();
        let out = layout(Some(&tree), 400.0, 200.0, &cfg());

        // Four levels in 200 - 2 * 40 = 120 pixels of room.
        assert_eq!(out.row_height, 40.0);
        let deepest = out.nodes.iter().map(|n| n.pos.y).fold(0.0, f32::max);
        assert!(deepest <= 200.0 - 40.0);
    }

    #[test]
    fn parent_and_child_indices_agree() {
        let tree = Preset::Complete.tree();
        let out = layout(Some(&tree), 800.0, 600.0, &cfg());

        assert_eq!(out.nodes[0].parent, None);
        for (i, node) in out.nodes.iter().enumerate() {
            for &c in &node.children {
                assert_eq!(out.nodes[c].parent, Some(i));
            }
        }
        assert_eq!(out.edges().count(), tree.len() - 1);
    }

    #[test]
    fn layout_is_deterministic() {
        let tree = Preset::Perfect.tree();
        let a = layout(Some(&tree), 640.0, 480.0, &cfg());
        let b = layout(Some(&tree), 640.0, 480.0, &cfg());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn nodes_stay_inside_canvas_and_spans_never_overlap(
            values in proptest::collection::vec(-100i64..100, 1..30),
            width in 1.0f32..2000.0,
        ) {
            let mut ids = bst::IdAllocator::new();
            let tree = bst::build_from(&values, &mut ids).unwrap();
            let out = layout(Some(&tree), width, 600.0, &cfg());

            prop_assert_eq!(out.len(), tree.len());
            prop_assert!(out.nodes.iter().all(|n| n.pos.x >= 0.0 && n.pos.x <= width));
            prop_assert!(spans_are_disjoint(&out));
        }
    }
}
