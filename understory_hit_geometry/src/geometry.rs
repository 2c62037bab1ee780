// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned fill/clip geometry.

use kurbo::{BezPath, Ellipse, Point, Rect, RoundedRect, Shape};

use crate::{EffectiveShape, contains_closed, on_outline, shape_contains};

/// Rule deciding which regions of a path count as "inside".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// A point is inside when the path winds around it a non-zero number of times.
    #[default]
    NonZero,
    /// A point is inside when a ray from it crosses the path an odd number of times.
    EvenOdd,
}

impl FillRule {
    /// Whether a winding number counts as inside under this rule.
    pub const fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => winding % 2 != 0,
        }
    }
}

/// A shape in a visual's local coordinate space, used as its fill or its clip.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// Ellipse (possibly rotated).
    Ellipse(Ellipse),
    /// Arbitrary path filled with the given rule.
    Path {
        /// The outline.
        path: BezPath,
        /// How overlapping sub-paths are resolved.
        fill_rule: FillRule,
    },
}

impl Geometry {
    /// Convenience constructor for [`Geometry::Path`].
    pub fn path(path: BezPath, fill_rule: FillRule) -> Self {
        Self::Path { path, fill_rule }
    }

    /// A conservative bounding box in local coordinates.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(r) => r.abs(),
            Self::RoundedRect(rr) => rr.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
            Self::Path { path, .. } => path.bounding_box(),
        }
    }

    /// Whether `pt` (local coordinates) lies inside the filled region or on its outline.
    ///
    /// Same as [`EffectiveShape::contains_local`], without importing the trait.
    pub fn contains(&self, pt: Point) -> bool {
        self.contains_local(pt)
    }
}

impl EffectiveShape for Geometry {
    fn contains_local(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains_local(pt),
            Self::RoundedRect(rr) => rr.contains_local(pt),
            Self::Ellipse(e) => e.contains_local(pt),
            Self::Path { path, fill_rule } => match fill_rule {
                FillRule::NonZero => shape_contains(path, pt),
                FillRule::EvenOdd => {
                    contains_closed(path.bounding_box(), pt)
                        && (on_outline(path.segments(), pt)
                            || fill_rule.is_inside(path.winding(pt)))
                }
            },
        }
    }

    fn bounding_box_local(&self) -> Rect {
        self.bounding_box()
    }
}

impl From<Rect> for Geometry {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<RoundedRect> for Geometry {
    fn from(rr: RoundedRect) -> Self {
        Self::RoundedRect(rr)
    }
}

impl From<Ellipse> for Geometry {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

impl From<BezPath> for Geometry {
    fn from(path: BezPath) -> Self {
        Self::path(path, FillRule::NonZero)
    }
}
