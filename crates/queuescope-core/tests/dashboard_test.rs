//! End-to-end behavior of the queue and cluster dashboards: records in,
//! chart plans and scene geometry out.
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::f64::consts::TAU;

use pretty_assertions::assert_eq;
use queuescope_core::chart::donut::{self, EPSILON};
use queuescope_core::dashboard::ChartKind;
use queuescope_core::geometry::Path;
use queuescope_core::grid::{self, panels_per_row};
use queuescope_core::layout::FoldedSet;
use queuescope_core::scene::Shape;
use queuescope_core::svg::{SvgOptions, to_svg};
use queuescope_core::{ChartDatum, Point, QueueDashboard, QueueRecord, QueueTree, TreeLayout};

// ── Fixtures ────────────────────────────────────────────────────────

fn two_leaves() -> Vec<QueueRecord> {
    vec![
        QueueRecord::new("root")
            .with_children(["A", "B"])
            .with_capacities(100.0, 100.0, 35.0),
        QueueRecord::new("A")
            .with_parent("root")
            .with_capacities(60.0, 100.0, 25.0),
        QueueRecord::new("B")
            .with_parent("root")
            .with_capacities(40.0, 90.0, 10.0),
    ]
}

fn deep() -> Vec<QueueRecord> {
    vec![
        QueueRecord::new("root").with_children(["eng", "ops"]),
        QueueRecord::new("eng").with_parent("root").with_children(["batch", "adhoc"]),
        QueueRecord::new("batch").with_parent("eng").with_children(["nightly"]),
        QueueRecord::new("nightly").with_parent("batch"),
        QueueRecord::new("adhoc").with_parent("eng"),
        QueueRecord::new("ops").with_parent("root").with_children(["oncall"]),
        QueueRecord::new("oncall").with_parent("ops"),
    ]
}

// ── Two-leaf tree ───────────────────────────────────────────────────

#[test]
fn root_selection_charts_leaf_usage() {
    let mut dash = QueueDashboard::new(1600.0);
    dash.load(two_leaves());

    let plan = dash.chart_plan();
    assert_eq!(plan[0].title, "LeafQueues Used Capacities");
    assert_eq!(
        plan[0].data,
        vec![ChartDatum::new("A", 25.0), ChartDatum::new("B", 10.0)]
    );
    assert!(matches!(plan[0].kind, ChartKind::Donut(_)));
}

#[test]
fn leaf_selection_charts_three_bars() {
    let mut dash = QueueDashboard::new(1600.0);
    dash.load(two_leaves());
    dash.select("A");

    let plan = dash.chart_plan();
    assert_eq!(plan.len(), 1);
    assert_eq!(
        plan[0].data,
        vec![
            ChartDatum::new("Cap", 60.0),
            ChartDatum::new("MaxCap", 100.0),
            ChartDatum::new("UsedCap", 25.0),
        ]
    );

    let chart = dash.scene().layer("chart-0").unwrap();
    let bars = chart.elements.iter().filter(|e| e.style.class == Some("bar")).count();
    assert_eq!(bars, 3);
}

// ── Grid ────────────────────────────────────────────────────────────

#[test]
fn grid_columns_follow_available_width() {
    assert_eq!(panels_per_row(850.0), 1);
    assert_eq!(panels_per_row(900.0), 2);
    let second = grid::layout(1, 900.0, 0.0);
    assert!((second.x1 - 460.0).abs() < f64::EPSILON);
    assert!((second.y1 - 30.0).abs() < f64::EPSILON);
}

#[test]
fn panels_never_overlap() {
    for width in [0.0, 430.0, 860.0, 1500.0, 4000.0] {
        let rects: Vec<_> = (0..12).map(|i| grid::layout(i, width, 75.0)).collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?} at width {width}");
            }
        }
    }
}

// ── Donut ───────────────────────────────────────────────────────────

#[test]
fn all_zero_donut_splits_in_thirds_and_dashes() {
    let data = [
        ChartDatum::new("x", 0.0),
        ChartDatum::new("y", 0.0),
        ChartDatum::new("z", 0.0),
    ];
    let pie = donut::pie(&data);
    assert!(pie.all_zero);
    for slice in &pie.slices {
        assert!((slice.span() - TAU / 3.0).abs() < 1e-9);
    }

    let rect = grid::layout(0, 1000.0, 0.0);
    let layer = donut::render_donut_chart(
        &data,
        "Zeros",
        &rect,
        &donut::DonutOptions::default(),
        &queuescope_core::Palette::default(),
    );
    let arcs: Vec<_> = layer.elements.iter().filter(|e| e.style.class == Some("arc")).collect();
    assert_eq!(arcs.len(), 3);
    assert!(arcs.iter().all(|a| a.style.dash == Some((10.0, 10.0))));
    // Outlines take the series colors when everything is zero.
    assert_ne!(arcs[0].style.stroke, arcs[1].style.stroke);
}

#[test]
fn donut_spans_are_proportional_to_floored_values() {
    let data = [
        ChartDatum::new("a", 3.0),
        ChartDatum::new("b", 0.0),
        ChartDatum::new("c", 1.0),
    ];
    let pie = donut::pie(&data);
    let floored: f64 = 4.0 + EPSILON;
    let expected = [3.0 / floored, EPSILON / floored, 1.0 / floored];
    for (slice, share) in pie.slices.iter().zip(expected) {
        assert!((slice.span() / TAU - share).abs() < 1e-6);
    }
    let last = pie.slices.last().unwrap();
    assert!((last.end_angle - TAU).abs() < 1e-9);
}

// ── Tree layout ─────────────────────────────────────────────────────

#[test]
fn layout_is_deterministic_and_rows_are_unique() {
    let tree = QueueTree::build(deep());
    let a = TreeLayout::compute(&tree, &FoldedSet::new());
    let b = TreeLayout::compute(&tree, &FoldedSet::new());
    assert_eq!(a, b);

    let rows: HashSet<u64> = a.nodes().iter().map(|n| n.position.y.to_bits()).collect();
    assert_eq!(rows.len(), a.nodes().len());
    assert_eq!(rows.len(), 7);
}

#[test]
fn fold_hides_exactly_the_descendants() {
    let tree = QueueTree::build(deep());
    let open = TreeLayout::compute(&tree, &FoldedSet::new());
    let folded: FoldedSet = ["eng"].into_iter().collect();
    let closed = TreeLayout::compute(&tree, &folded);

    let visible: Vec<_> = closed.nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(visible, ["root", "eng", "ops", "oncall"]);
    assert_eq!(open.nodes().len() - closed.nodes().len(), 3);
    // Rows close up below the fold.
    assert_eq!(closed.position_of("ops"), Some(Point::new(50.0, 80.0)));
}

#[test]
fn connector_is_a_basis_curve() {
    let d = Path::basis(&[Point::new(20.0, 20.0), Point::new(30.0, 50.0), Point::new(50.0, 50.0)]).to_svg_d();
    insta::assert_snapshot!(d, @"M20,20L21.67,25C23.33,30,26.67,40,31.67,45C36.67,50,43.33,50,46.67,50L50,50");
}

// ── Scene ───────────────────────────────────────────────────────────

#[test]
fn fold_survives_redraw_and_resets_on_load() {
    let mut dash = QueueDashboard::new(1600.0);
    dash.load(deep());
    assert!(dash.toggle_fold("eng"));
    dash.select("ops");
    assert!(dash.folded().contains("eng"));
    assert!(dash.layout().node("batch").is_none());

    dash.load(deep());
    assert!(dash.folded().is_empty());
    assert_eq!(dash.selected(), Some("root"));
}

#[test]
fn charts_start_right_of_the_banner() {
    let mut dash = QueueDashboard::new(1600.0);
    dash.load(deep());
    // max depth 3 → banner 190
    let banner = dash.layout().banner_width();
    assert!((banner - 190.0).abs() < f64::EPSILON);
    let frame = dash
        .scene()
        .layer("chart-0")
        .unwrap()
        .elements
        .iter()
        .find(|e| e.style.class == Some("chart-frame"))
        .unwrap();
    match frame.shape {
        Shape::Rect { origin, .. } => assert!((origin.x - (banner + 30.0)).abs() < f64::EPSILON),
        ref other => panic!("frame is not a rect: {other:?}"),
    }
}

#[test]
fn empty_snapshot_is_background_only() {
    let mut dash = QueueDashboard::new(800.0);
    dash.load(Vec::new());
    assert!(dash.chart_plan().is_empty());
    assert!(dash.scene().layer("grid").is_some());
    assert!(dash.scene().layer("queues").is_some_and(|l| l.is_empty()));
}

#[test]
fn svg_output_carries_titles_and_animation() {
    let mut dash = QueueDashboard::new(1200.0);
    dash.load(two_leaves());
    dash.select("A");
    let svg = to_svg(dash.scene(), &SvgOptions::default());
    assert!(svg.contains("<title>Cap = 60</title>"));
    assert!(svg.contains(r#"attributeName="width""#));
    assert!(svg.contains(">Queue Capacities</text>"));
}
