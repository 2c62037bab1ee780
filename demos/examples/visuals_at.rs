// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing a small scene with z-order, a rotated badge, a triangle, and a scrolled list.
//!
//! Run:
//! - `cargo run -p understory_demos --example visuals_at`
//! - `RUST_LOG=trace cargo run -p understory_demos --example visuals_at` to see clamping
//!   and skipped-subtree diagnostics.

use std::collections::HashMap;

use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};
use understory_hit_geometry::{FillRule, Geometry};
use understory_visual_tree::{
    Fill, NodeId, QueryFilter, ScrollViewport, TransformOrigin, Tree, VisualNode,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut tree = Tree::new();
    let mut names: HashMap<NodeId, &str> = HashMap::new();

    let root = tree.insert(
        None,
        VisualNode {
            bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
            fill: Fill::None,
            ..VisualNode::default()
        },
    );
    names.insert(root, "root");

    // Two overlapping panels; the first is raised above the second.
    let raised = tree.insert(
        Some(root),
        VisualNode {
            bounds: Rect::new(20.0, 20.0, 140.0, 140.0),
            z_index: 1,
            ..VisualNode::default()
        },
    );
    let panel = tree.insert(
        Some(root),
        VisualNode {
            bounds: Rect::new(80.0, 80.0, 200.0, 200.0),
            ..VisualNode::default()
        },
    );
    names.insert(raised, "raised");
    names.insert(panel, "panel");

    // A badge rotated 45 degrees about its center, hanging off the panel.
    let badge = tree.insert(
        Some(panel),
        VisualNode {
            bounds: Rect::new(100.0, -20.0, 140.0, 20.0),
            render_transform: Some(Affine::rotate(core::f64::consts::FRAC_PI_4)),
            transform_origin: TransformOrigin::CENTER,
            ..VisualNode::default()
        },
    );
    names.insert(badge, "badge");

    // A triangle whose fill is its path, not its bounds.
    let mut triangle = BezPath::new();
    triangle.move_to((100.0, 0.0));
    triangle.line_to((0.0, 100.0));
    triangle.line_to((100.0, 100.0));
    triangle.close_path();
    let arrow = tree.insert(
        Some(root),
        VisualNode {
            bounds: Rect::new(220.0, 20.0, 320.0, 120.0),
            fill: Fill::Geometry(Geometry::path(triangle, FillRule::NonZero)),
            ..VisualNode::default()
        },
    );
    names.insert(arrow, "arrow");

    // A scrolled list of rows inside a clipped viewport.
    let mut list = ScrollViewport::new(
        &mut tree,
        root,
        Rect::new(220.0, 150.0, 380.0, 250.0),
        Size::new(160.0, 250.0),
    );
    names.insert(list.presenter(), "list presenter");
    names.insert(list.content(), "list content");
    for (i, name) in ["row 0", "row 1", "row 2", "row 3", "row 4"].into_iter().enumerate() {
        let top = 50.0 * i as f64;
        let row = tree.insert(
            Some(list.content()),
            VisualNode {
                bounds: Rect::new(0.0, top, 160.0, top + 50.0),
                ..VisualNode::default()
            },
        );
        names.insert(row, name);
    }

    let describe = |tree: &Tree, pt: Point| {
        let hits: Vec<&str> = tree
            .hit_test(root, pt)
            .into_iter()
            .map(|id| names.get(&id).copied().unwrap_or("?"))
            .collect();
        println!("  ({:>5.1}, {:>5.1}) -> {hits:?}", pt.x, pt.y);
    };

    println!("Visuals at points, topmost first:");
    for pt in [
        Point::new(100.0, 100.0),
        Point::new(150.0, 150.0),
        Point::new(200.0, 80.0),
        Point::new(310.0, 110.0),
        Point::new(230.0, 30.0),
        Point::new(300.0, 170.0),
        Point::new(300.0, 240.0),
        Point::new(300.0, 280.0),
    ] {
        describe(&tree, pt);
    }

    list.scroll_by(&mut tree, Vec2::new(0.0, 120.0));
    println!("After scrolling the list by 120 (offset {:?}):", list.offset());
    describe(&tree, Point::new(300.0, 170.0));
    describe(&tree, Point::new(300.0, 240.0));

    list.scroll_by(&mut tree, Vec2::new(0.0, 1_000.0));
    println!("Scrolling past the end clamps to {:?}", list.offset());

    tree.set_visible(raised, false);
    println!("With 'raised' hidden:");
    describe(&tree, Point::new(100.0, 100.0));

    if let Some(hit) =
        tree.hit_test_first_filtered(root, Point::new(300.0, 170.0), QueryFilter::new())
    {
        let path: Vec<&str> = hit
            .path
            .iter()
            .map(|id| names.get(id).copied().unwrap_or("?"))
            .collect();
        println!(
            "Topmost at (300, 170): {} via {path:?}, local point {:?}",
            names.get(&hit.node).copied().unwrap_or("?"),
            hit.local_point
        );
    }
}
