// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Hit Geometry: point containment for the fill and clip geometry of visuals.
//!
//! This crate answers a single question for a scene or visual tree: "does this
//! local-space point lie inside this shape?". It is deliberately decoupled from any
//! particular tree, transform stack, or event router; callers are expected to map the
//! query point into the shape's local coordinates first.
//!
//! # Key types
//!
//! - [`EffectiveShape`] – a trait implemented by shapes that can report whether a
//!   local-space point lies inside their painted region.
//! - [`Geometry`] – an owned shape suitable for storing on a visual as its fill or its
//!   clip: rectangle, rounded rectangle, ellipse, or a path with a [`FillRule`].
//! - [`FillRule`] – how a self-intersecting or nested path decides "inside".
//!
//! ## Shapes and scope
//!
//! [`EffectiveShape`] is implemented for several [`kurbo`] primitives:
//!
//! - [`Rect`] – closed containment: all four edges are inside. Note that this differs
//!   from [`Rect::contains`], which excludes the right and bottom edges.
//! - [`RoundedRect`], [`Circle`] and [`Ellipse`] – filled interiors.
//! - [`BezPath`] – filled interior using the non-zero winding rule. Wrap the path in
//!   [`Geometry::Path`] to choose [`FillRule::EvenOdd`] instead.
//!
//! Every shape includes its outline: a point within [`OUTLINE_TOLERANCE`] of the boundary
//! is inside, including vertices, where the winding number alone is unreliable.
//! Strokes are not modeled otherwise: only filled regions count as hits.
//!
//! ```rust
//! use kurbo::{BezPath, Point};
//! use understory_hit_geometry::{EffectiveShape, FillRule, Geometry};
//!
//! let mut triangle = BezPath::new();
//! triangle.move_to((100.0, 0.0));
//! triangle.line_to((0.0, 100.0));
//! triangle.line_to((100.0, 100.0));
//! triangle.close_path();
//!
//! let shape = Geometry::path(triangle, FillRule::NonZero);
//! assert!(shape.contains_local(Point::new(90.0, 90.0)));
//! // Vertices and edges belong to the shape.
//! assert!(shape.contains_local(Point::new(100.0, 100.0)));
//! assert!(!shape.contains_local(Point::new(10.0, 10.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;

use kurbo::{BezPath, Circle, Ellipse, ParamCurveNearest, PathSeg, Point, Rect, RoundedRect, Shape};

pub use geometry::{FillRule, Geometry};

/// Distance from a shape's outline within which a point still counts as inside.
///
/// Also used as the flattening and nearest-point accuracy for curved outlines.
pub const OUTLINE_TOLERANCE: f64 = 1e-6;

/// Trait for shapes that can answer "is this local-space point inside me?".
///
/// Implementors describe the *painted* region of a visual. A visual with no fill at a
/// point must report `false` there even when its bounding box contains the point.
pub trait EffectiveShape {
    /// Returns `true` when `pt`, in the shape's local coordinates, is inside the shape.
    fn contains_local(&self, pt: Point) -> bool;

    /// A conservative axis-aligned bounding box of the shape in local coordinates.
    fn bounding_box_local(&self) -> Rect;
}

impl EffectiveShape for Rect {
    fn contains_local(&self, pt: Point) -> bool {
        contains_closed(self.abs(), pt)
    }

    fn bounding_box_local(&self) -> Rect {
        self.abs()
    }
}

impl EffectiveShape for RoundedRect {
    fn contains_local(&self, pt: Point) -> bool {
        shape_contains(self, pt)
    }

    fn bounding_box_local(&self) -> Rect {
        self.bounding_box()
    }
}

impl EffectiveShape for Circle {
    fn contains_local(&self, pt: Point) -> bool {
        shape_contains(self, pt)
    }

    fn bounding_box_local(&self) -> Rect {
        self.bounding_box()
    }
}

impl EffectiveShape for Ellipse {
    fn contains_local(&self, pt: Point) -> bool {
        shape_contains(self, pt)
    }

    fn bounding_box_local(&self) -> Rect {
        self.bounding_box()
    }
}

/// Non-zero winding containment for a bare path.
impl EffectiveShape for BezPath {
    fn contains_local(&self, pt: Point) -> bool {
        shape_contains(self, pt)
    }

    fn bounding_box_local(&self) -> Rect {
        self.bounding_box()
    }
}

/// Generic containment test for any [`kurbo::Shape`].
///
/// Rejects against the (closed) bounding box first, then accepts points on the outline,
/// then falls back to the shape's own non-zero `contains`. We avoid a blanket
/// `impl<T: Shape> EffectiveShape for T` so engines can provide specialized
/// implementations without running into coherence issues.
pub fn shape_contains<S: Shape>(shape: &S, pt: Point) -> bool {
    if !contains_closed(shape.bounding_box(), pt) {
        return false;
    }
    on_outline(shape.path_segments(OUTLINE_TOLERANCE), pt) || shape.contains(pt)
}

/// Whether `pt` lies within [`OUTLINE_TOLERANCE`] of any of `segments`.
pub fn on_outline(segments: impl IntoIterator<Item = PathSeg>, pt: Point) -> bool {
    let max_sq = OUTLINE_TOLERANCE * OUTLINE_TOLERANCE;
    segments
        .into_iter()
        .any(|seg| seg.nearest(pt, OUTLINE_TOLERANCE).distance_sq <= max_sq)
}

/// Inclusive on every edge, unlike [`Rect::contains`]. Expects a normalized rect.
pub(crate) fn contains_closed(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}
