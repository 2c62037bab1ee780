// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, and coordinate-space queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};
use understory_hit_geometry::Geometry;

use crate::types::{Fill, NodeFlags, NodeId, TransformOrigin, VisualNode};
use crate::util::transform_rect_bbox;

/// Arena of visual nodes.
///
/// Nodes are addressed by generational [`NodeId`]s. Parent links are plain back
/// references used for upward coordinate-space walks; a node's children are owned
/// by its slot in insertion order, which is also the paint order tie-break for
/// equal `z_index`.
///
/// Mutations take effect immediately: there is no commit step and no cached
/// world-space state, so every query reflects the current snapshot.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_visual_tree::{Tree, VisualNode};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(
///     None,
///     VisualNode {
///         bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
///         ..VisualNode::default()
///     },
/// );
/// let child = tree.insert(
///     Some(root),
///     VisualNode {
///         bounds: Rect::new(50.0, 50.0, 150.0, 150.0),
///         ..VisualNode::default()
///     },
/// );
///
/// assert_eq!(tree.hit_test(root, Point::new(100.0, 100.0)), vec![child, root]);
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visual: VisualNode,
}

impl Node {
    fn new(generation: u32, visual: VisualNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            visual,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// Being last, the new node paints above its existing siblings of equal `z_index`.
    /// A stale `parent` leaves the node detached as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, visual: VisualNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, visual));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, visual)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            if self.is_alive(p) {
                self.link_parent(id, p);
            } else {
                tracing::warn!(?p, "insert under stale parent; node left detached");
            }
        }
        id
    }

    /// Remove a node and its whole subtree. Stale identifiers are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            // Detach first so the recursive call does not touch our child list.
            self.node_mut(child).parent = None;
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to become the last child of `new_parent` (or a root if `None`).
    ///
    /// Reparenting under the node itself or one of its descendants would create a
    /// cycle; such requests are refused and leave the tree unchanged.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return;
            }
            if self.is_ancestor_or_self(id, p) {
                tracing::warn!(?id, ?p, "refusing to reparent a node under its own subtree");
                return;
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update the arranged bounds.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.bounds = bounds;
        }
    }

    /// Update the render transform.
    pub fn set_render_transform(&mut self, id: NodeId, tf: Option<Affine>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.render_transform = tf;
        }
    }

    /// Update the render transform anchor.
    pub fn set_transform_origin(&mut self, id: NodeId, origin: TransformOrigin) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.transform_origin = origin;
        }
    }

    /// Update the geometric clip.
    pub fn set_clip(&mut self, id: NodeId, clip: Option<Geometry>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.clip = clip;
        }
    }

    /// Enable or disable clipping to the node's own rectangle.
    pub fn set_clip_to_bounds(&mut self, id: NodeId, clip_to_bounds: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.clip_to_bounds = clip_to_bounds;
        }
    }

    /// Update the painted region.
    pub fn set_fill(&mut self, id: NodeId, fill: Fill) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.fill = fill;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.z_index = z;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.flags = flags;
        }
    }

    /// Show or hide a node (and with it, its subtree).
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.visual.flags.set(NodeFlags::VISIBLE, visible);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// The visual data of a live node.
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.node_opt(id).map(|n| &n.visual)
    }

    /// Returns the z-index of a node if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        self.node_opt(id).map(|n| n.visual.z_index)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.visual.flags)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in insertion order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Transform from the node's local space into its parent's space.
    pub fn transform_to_parent(&self, id: NodeId) -> Option<Affine> {
        self.get(id).map(VisualNode::transform_to_parent)
    }

    /// Transform from the node's local space into the space its tree root is arranged
    /// in (the root's parent space), composed by walking parent links upward.
    pub fn local_to_root(&self, id: NodeId) -> Option<Affine> {
        let mut tf = self.get(id)?.transform_to_parent();
        let mut current = self.node(id).parent;
        while let Some(parent_id) = current {
            let parent = self.node(parent_id);
            tf = parent.visual.transform_to_parent() * tf;
            current = parent.parent;
        }
        Some(tf)
    }

    /// Map a root-space point into the node's local space.
    ///
    /// Returns `None` for stale ids and for nodes collapsed by a non-invertible transform
    /// somewhere along their ancestor chain.
    pub fn root_to_local(&self, id: NodeId, point: Point) -> Option<Point> {
        let tf = self.local_to_root(id)?;
        let det = tf.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(tf.inverse() * point)
    }

    /// Root-space bounding box of the accumulated clip acting on a node: its own clip
    /// intersected with every ancestor's. Returns `None` when nothing clips the node
    /// (or the id is stale).
    ///
    /// Boxes are loose under rotation and for curved clips.
    pub fn effective_clip(&self, id: NodeId) -> Option<Rect> {
        let mut clip: Option<Rect> = None;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_opt(node_id)?;
            if let Some(local) = node.visual.local_clip_bbox() {
                let to_root = self.local_to_root(node_id)?;
                let root_rect = transform_rect_bbox(to_root, local);
                clip = Some(match clip {
                    Some(c) => c.intersect(root_rect),
                    None => root_rect,
                });
            }
            current = node.parent;
        }
        clip
    }

    /// Root-space bounding box of a node's local rectangle, restricted by its
    /// effective clip. Returns `None` for stale identifiers.
    pub fn root_bounds(&self, id: NodeId) -> Option<Rect> {
        let visual = self.get(id)?;
        let bounds = transform_rect_bbox(self.local_to_root(id)?, visual.local_rect());
        Some(match self.effective_clip(id) {
            Some(clip) => bounds.intersect(clip),
            None => bounds,
        })
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).parent;
        }
        false
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
