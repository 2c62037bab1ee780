// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling ordering by `z_index` and insertion order.
//!
//! `z_index` only competes among siblings: a child never paints above something its
//! parent is painted below. Equal `z_index` falls back to insertion order, with later
//! siblings on top. The comparator includes the insertion index, so the result is a
//! strict total order and does not depend on sort stability.

use core::cmp::Ordering;

use smallvec::SmallVec;

use crate::tree::Tree;
use crate::types::NodeId;

/// Child buffer sized for the common case of a handful of children.
pub type ChildOrder = SmallVec<[NodeId; 8]>;

/// Bottom-to-top comparison of two siblings given as `(z_index, insertion_index)`.
fn paint_cmp(a: (i32, usize), b: (i32, usize)) -> Ordering {
    a.0.cmp(&b.0).then(a.1.cmp(&b.1))
}

impl Tree {
    /// Children of `id` in paint order: bottom first, topmost last.
    ///
    /// Returns an empty buffer for stale identifiers.
    pub fn children_in_paint_order(&self, id: NodeId) -> ChildOrder {
        let mut keyed = self.keyed_children(id);
        keyed.sort_unstable_by(|a, b| paint_cmp((a.0, a.1), (b.0, b.1)));
        keyed.into_iter().map(|(_, _, child)| child).collect()
    }

    /// Children of `id` in hit-test order: topmost first. The exact reverse of
    /// [`Tree::children_in_paint_order`].
    pub fn children_in_hit_order(&self, id: NodeId) -> ChildOrder {
        let mut keyed = self.keyed_children(id);
        keyed.sort_unstable_by(|a, b| paint_cmp((b.0, b.1), (a.0, a.1)));
        keyed.into_iter().map(|(_, _, child)| child).collect()
    }

    fn keyed_children(&self, id: NodeId) -> SmallVec<[(i32, usize, NodeId); 8]> {
        let Some(node) = self.node_opt(id) else {
            return SmallVec::new();
        };
        node.children
            .iter()
            .enumerate()
            .map(|(order, &child)| (self.node(child).visual.z_index, order, child))
            .collect()
    }
}
