// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_visual_tree --heading-base-level=0

//! Understory Visual Tree: a retained visual tree with precise, z-order-aware hit testing.
//!
//! Understory Visual Tree answers "which visuals are under this point?" for a hierarchy of
//! arranged rectangles that may be transformed, clipped, reordered with `z_index`, hidden,
//! or filled with arbitrary geometry.
//!
//! - Represents visuals with arranged bounds, an optional render transform about a
//!   configurable origin, clip-to-bounds, an optional geometry clip, a fill, and flags.
//! - Hit tests by walking the tree top-down, mapping the query point into each node's local
//!   space. No world-space cache exists, so results always reflect the latest mutation.
//! - Reports hits topmost first: a child before its parent, a later or higher-z sibling
//!   before an earlier or lower-z one.
//!
//! ## Hit rules
//!
//! A node is reported when all of the following hold:
//!
//! - it and every ancestor up to the query root are [visible](NodeFlags::VISIBLE) and pass
//!   the [`QueryFilter`];
//! - the point passes every clip on the way down, including the node's own;
//! - the point lies inside the node's [`Fill`]. [`Fill::None`] visuals are never reported,
//!   but their children still are.
//!
//! A child arranged outside its parent is still hit unless some ancestor clips. A node
//! whose transform cannot be inverted is skipped along with its subtree.
//!
//! ## Not a layout engine
//!
//! Bounds are taken as already arranged by upstream layout. Scrolling is modeled with
//! [`ScrollViewport`], which is an ordinary pair of clip and content nodes.
//!
//! ## API overview
//!
//! - [`Tree`]: arena of nodes with generational [`NodeId`] handles.
//! - [`VisualNode`]: per-node data. See [`TransformOrigin`], [`Fill`], and [`NodeFlags`].
//! - [`Tree::hit_test`] / [`Tree::hit_test_filtered`]: every hit, topmost first.
//! - [`Tree::hit_test_first`] / [`Tree::hit_test_first_filtered`]: the topmost [`Hit`] with
//!   its path and local point.
//! - [`Tree::children_in_paint_order`] / [`Tree::children_in_hit_order`].
//! - [`Tree::local_to_root`], [`Tree::root_to_local`], [`Tree::effective_clip`], and
//!   [`Tree::root_bounds`] for coordinate-space conversions.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_visual_tree::{Fill, Tree, VisualNode};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(
//!     None,
//!     VisualNode {
//!         bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
//!         fill: Fill::None,
//!         ..VisualNode::default()
//!     },
//! );
//! let button = tree.insert(
//!     Some(root),
//!     VisualNode {
//!         bounds: Rect::new(50.0, 50.0, 150.0, 100.0),
//!         ..VisualNode::default()
//!     },
//! );
//!
//! assert_eq!(tree.hit_test(root, Point::new(60.0, 60.0)), vec![button]);
//! assert!(tree.hit_test(root, Point::new(10.0, 10.0)).is_empty());
//! ```
//!
//! Geometry types come from [`understory_hit_geometry`] and are re-exported here.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod paint_order;
mod scroll;
mod tree;
mod types;
mod util;

pub use hit_test::{Hit, QueryFilter};
pub use paint_order::ChildOrder;
pub use scroll::ScrollViewport;
pub use tree::Tree;
pub use types::{Fill, NodeFlags, NodeId, TransformOrigin, VisualNode};

pub use understory_hit_geometry::{EffectiveShape, FillRule, Geometry};
