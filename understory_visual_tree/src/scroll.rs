// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll viewports expressed as ordinary nodes.
//!
//! A [`ScrollViewport`] owns two nodes: a *presenter* that clips to the viewport
//! rectangle and paints nothing, and a *content* node inside it, shifted by the
//! negated scroll offset. Scrolled children are inserted under
//! [`ScrollViewport::content`]. Hit testing needs no scroll-specific logic: the clip
//! and the shifted bounds are all it sees.

use kurbo::{Point, Rect, Size, Vec2};

use crate::tree::Tree;
use crate::types::{Fill, NodeId, VisualNode};

/// Scroll state bound to a presenter/content node pair.
#[derive(Clone, Debug)]
pub struct ScrollViewport {
    presenter: NodeId,
    content: NodeId,
    viewport: Rect,
    extent: Size,
    offset: Vec2,
}

impl ScrollViewport {
    /// Insert a presenter under `parent` arranged at `viewport` (parent coordinates),
    /// with a content node of size `extent` scrolled to the origin.
    pub fn new(tree: &mut Tree, parent: NodeId, viewport: Rect, extent: Size) -> Self {
        let presenter = tree.insert(
            Some(parent),
            VisualNode {
                bounds: viewport,
                clip_to_bounds: true,
                fill: Fill::None,
                ..VisualNode::default()
            },
        );
        let content = tree.insert(
            Some(presenter),
            VisualNode {
                bounds: extent.to_rect(),
                fill: Fill::None,
                ..VisualNode::default()
            },
        );
        Self {
            presenter,
            content,
            viewport,
            extent,
            offset: Vec2::ZERO,
        }
    }

    /// The clipping node.
    pub fn presenter(&self) -> NodeId {
        self.presenter
    }

    /// The node scrolled children belong under.
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Current scroll offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Largest offset that keeps the viewport within the content, per axis.
    pub fn max_offset(&self) -> Vec2 {
        Vec2::new(
            (self.extent.width - self.viewport.width()).max(0.0),
            (self.extent.height - self.viewport.height()).max(0.0),
        )
    }

    /// Scroll to `offset`, clamped to `[0, max_offset]` on each axis.
    pub fn set_offset(&mut self, tree: &mut Tree, offset: Vec2) {
        let max = self.max_offset();
        let clamped = Vec2::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y));
        if clamped != offset {
            tracing::trace!(?offset, ?clamped, "scroll offset clamped");
        }
        self.offset = clamped;
        self.sync(tree);
    }

    /// Scroll by `delta` relative to the current offset.
    pub fn scroll_by(&mut self, tree: &mut Tree, delta: Vec2) {
        self.set_offset(tree, self.offset + delta);
    }

    /// Re-arrange the presenter, keeping the offset within the new limits.
    pub fn set_viewport(&mut self, tree: &mut Tree, viewport: Rect) {
        self.viewport = viewport;
        tree.set_bounds(self.presenter, viewport);
        self.set_offset(tree, self.offset);
    }

    /// Resize the content, keeping the offset within the new limits.
    pub fn set_extent(&mut self, tree: &mut Tree, extent: Size) {
        self.extent = extent;
        self.set_offset(tree, self.offset);
    }

    fn sync(&self, tree: &mut Tree) {
        let origin = Point::ZERO - self.offset;
        tree.set_bounds(self.content, Rect::from_origin_size(origin, self.extent));
    }
}
