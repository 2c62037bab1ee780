// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the visual tree: node identifiers, flags, and per-visual geometry.

use kurbo::{Affine, Point, Rect, Size};
use understory_hit_geometry::{EffectiveShape, Geometry};

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and hit-test participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. Invisible nodes and their subtrees are never hit.
        const VISIBLE          = 0b0000_0001;
        /// Node takes part in input hit testing. Only consulted when a
        /// [`QueryFilter`](crate::QueryFilter) asks for it.
        const HIT_TEST_VISIBLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::HIT_TEST_VISIBLE
    }
}

/// The local point a render transform is applied around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOrigin {
    /// Fractions of the node's size: `(0, 0)` is the top-left corner, `(1, 1)` the
    /// bottom-right one.
    Relative {
        /// Horizontal fraction of the width.
        x: f64,
        /// Vertical fraction of the height.
        y: f64,
    },
    /// A fixed point in the node's local space.
    Absolute(Point),
}

impl TransformOrigin {
    /// The center of the node.
    pub const CENTER: Self = Self::Relative { x: 0.5, y: 0.5 };
    /// The top-left corner of the node.
    pub const TOP_LEFT: Self = Self::Relative { x: 0.0, y: 0.0 };

    /// Resolve against a node size into a local-space point.
    pub fn resolve(self, size: Size) -> Point {
        match self {
            Self::Relative { x, y } => Point::new(size.width * x, size.height * y),
            Self::Absolute(p) => p,
        }
    }
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

/// The region of a visual that counts as painted for hit testing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Fill {
    /// Nothing is painted (no background, empty path). The node itself is never hit,
    /// though its descendants still can be.
    None,
    /// The whole local rectangle is painted, as for a container with a background.
    #[default]
    Bounds,
    /// Only the interior of this local-space geometry is painted.
    Geometry(Geometry),
}

/// Data describing one visual.
///
/// `bounds` is produced by layout in the parent's coordinate space. The node's own
/// local space starts at `bounds.origin()`, so its local rectangle is
/// `(0, 0, width, height)`; `clip` and `fill` geometry are expressed in that space.
#[derive(Clone, Debug)]
pub struct VisualNode {
    /// Arranged rectangle in parent coordinates.
    pub bounds: Rect,
    /// Optional render transform applied around [`VisualNode::transform_origin`].
    /// Purely positional: it never clips.
    pub render_transform: Option<Affine>,
    /// Anchor of `render_transform`.
    pub transform_origin: TransformOrigin,
    /// Restrict this node and its descendants to the local rectangle.
    pub clip_to_bounds: bool,
    /// Optional geometric clip in local coordinates, applied to this node and its descendants.
    pub clip: Option<Geometry>,
    /// Painted region used for containment.
    pub fill: Fill,
    /// Order among siblings. Higher is drawn on top and hit first.
    pub z_index: i32,
    /// Visibility and hit-test flags.
    pub flags: NodeFlags,
}

impl Default for VisualNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            render_transform: None,
            transform_origin: TransformOrigin::default(),
            clip_to_bounds: false,
            clip: None,
            fill: Fill::default(),
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}

impl VisualNode {
    /// The node's rectangle in its own local space.
    pub fn local_rect(&self) -> Rect {
        self.bounds.size().to_rect()
    }

    /// Transform mapping local coordinates into the parent's coordinate space.
    pub fn transform_to_parent(&self) -> Affine {
        let offset = Affine::translate(self.bounds.origin().to_vec2());
        match self.render_transform {
            Some(tf) => {
                let origin = self
                    .transform_origin
                    .resolve(self.bounds.size())
                    .to_vec2();
                offset * Affine::translate(origin) * tf * Affine::translate(-origin)
            }
            None => offset,
        }
    }

    /// Transform mapping parent coordinates into local space, or `None` when the
    /// render transform collapses the node (zero determinant).
    pub fn transform_from_parent(&self) -> Option<Affine> {
        match self.render_transform {
            None => Some(Affine::translate(-self.bounds.origin().to_vec2())),
            Some(_) => {
                let tf = self.transform_to_parent();
                let det = tf.determinant();
                if det == 0.0 || !det.is_finite() {
                    return None;
                }
                Some(tf.inverse())
            }
        }
    }

    /// Whether `local` survives this node's own clip contribution.
    pub fn clip_contains(&self, local: Point) -> bool {
        if self.clip_to_bounds && !self.local_rect().contains_local(local) {
            return false;
        }
        match &self.clip {
            Some(clip) => clip.contains(local),
            None => true,
        }
    }

    /// Whether `local` lies inside the node's painted region.
    pub fn fill_contains(&self, local: Point) -> bool {
        match &self.fill {
            Fill::None => false,
            Fill::Bounds => self.local_rect().contains_local(local),
            Fill::Geometry(g) => g.contains(local),
        }
    }

    /// Local-space bounding box of this node's own clip, if it has one.
    pub(crate) fn local_clip_bbox(&self) -> Option<Rect> {
        let geometry = self.clip.as_ref().map(|g| g.bounding_box());
        let rect = self.clip_to_bounds.then(|| self.local_rect());
        match (rect, geometry) {
            (Some(r), Some(g)) => Some(r.intersect(g)),
            (Some(r), None) => Some(r),
            (None, Some(g)) => Some(g),
            (None, None) => None,
        }
    }
}
