// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

/// Map the four corners of `rect` through `affine` and return their axis-aligned
/// bounding box. Exact for translations and scales, loose under rotation or shear.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let first = affine * corners[0];
    corners[1..]
        .iter()
        .map(|&p| affine * p)
        .fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;
    use kurbo::Vec2;

    #[test]
    fn translation_is_exact() {
        let r = transform_rect_bbox(
            Affine::translate(Vec2::new(5.0, -5.0)),
            Rect::new(0.0, 0.0, 10.0, 20.0),
        );
        assert_eq!(r, Rect::new(5.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn rotation_expands() {
        let r = transform_rect_bbox(Affine::rotate(FRAC_PI_4), Rect::new(-10.0, -10.0, 10.0, 10.0));
        let half_diagonal = 10.0 * core::f64::consts::SQRT_2;
        assert!((r.x1 - half_diagonal).abs() < 1e-9, "{r:?}");
        assert!((r.y0 + half_diagonal).abs() < 1e-9, "{r:?}");
    }

    #[test]
    fn negative_scale_keeps_min_max_order() {
        let r = transform_rect_bbox(Affine::scale(-1.0), Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(r, Rect::new(-3.0, -4.0, -1.0, -2.0));
    }
}
