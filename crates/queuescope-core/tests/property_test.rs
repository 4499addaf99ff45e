//! Layout and chart invariants over generated inputs: arbitrary queue
//! graphs (dangling names, cycles, shared children), fold sets, canvas
//! widths and value lists.

use std::collections::HashSet;
use std::f64::consts::TAU;

use proptest::prelude::*;
use queuescope_core::chart::donut::{self, EPSILON};
use queuescope_core::grid;
use queuescope_core::layout::FoldedSet;
use queuescope_core::scene::Shape;
use queuescope_core::{ChartDatum, QueueDashboard, QueueRecord, QueueTree, TreeLayout};

// ── Generators ──────────────────────────────────────────────────────

fn queue_name(i: usize) -> String {
    if i == 0 { "root".to_owned() } else { format!("q{i}") }
}

/// Every record lists random child indices. Indices past the end dangle;
/// cycles, self-references and shared children all come up.
fn arbitrary_graph() -> impl Strategy<Value = Vec<QueueRecord>> {
    prop::collection::vec(prop::collection::vec(0usize..14, 0..4), 1..12).prop_map(|links| {
        let n = links.len();
        links
            .iter()
            .enumerate()
            .map(|(i, children)| {
                let children = children
                    .iter()
                    .map(|&c| if c < n { queue_name(c) } else { format!("ghost{c}") });
                QueueRecord::new(queue_name(i)).with_children(children)
            })
            .collect()
    })
}

/// A proper tree: node `i > 0` hangs under a random earlier node. Some
/// nodes also list a child that does not exist.
fn arbitrary_tree() -> impl Strategy<Value = Vec<QueueRecord>> {
    prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..14).prop_map(|nodes| {
        let parents: Vec<usize> = nodes
            .iter()
            .enumerate()
            .map(|(k, (parent, _))| parent.index(k + 1))
            .collect();
        (0..=nodes.len())
            .map(|i| {
                let mut children: Vec<String> = (1..=nodes.len())
                    .filter(|&c| parents[c - 1] == i)
                    .map(queue_name)
                    .collect();
                if i > 0 && nodes[i - 1].1 {
                    children.push(format!("ghost{i}"));
                }
                let record = QueueRecord::new(queue_name(i)).with_children(children);
                if i > 0 {
                    record.with_parent(queue_name(parents[i - 1]))
                } else {
                    record
                }
            })
            .collect()
    })
}

fn chart_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop_oneof![Just(0.0), 0.0f64..1000.0], 1..12)
}

// ── Tree layout ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rows_are_unique_and_layout_is_deterministic(
        records in arbitrary_graph(),
        folds in prop::collection::vec(0usize..14, 0..4),
    ) {
        let tree = QueueTree::build(records);
        let folded: FoldedSet = folds.into_iter().map(queue_name).collect();
        let layout = TreeLayout::compute(&tree, &folded);

        let rows: HashSet<u64> = layout.nodes().iter().map(|n| n.position.y.to_bits()).collect();
        prop_assert_eq!(rows.len(), layout.nodes().len());
        let names: HashSet<&str> = layout.nodes().iter().map(|n| n.name.as_str()).collect();
        prop_assert_eq!(names.len(), layout.nodes().len());
        prop_assert_eq!(&layout, &TreeLayout::compute(&tree, &folded));
    }

    #[test]
    fn fold_then_unfold_restores_the_layout(
        records in arbitrary_graph(),
        pick in any::<prop::sample::Index>(),
    ) {
        let tree = QueueTree::build(records);
        let open = TreeLayout::compute(&tree, &FoldedSet::new());
        let name = open.nodes()[pick.index(open.nodes().len())].name.clone();

        let mut folded = FoldedSet::new();
        folded.toggle(&name);
        let closed = TreeLayout::compute(&tree, &folded);
        prop_assert!(closed.nodes().len() <= open.nodes().len());

        folded.toggle(&name);
        prop_assert_eq!(TreeLayout::compute(&tree, &folded), open);
    }

    #[test]
    fn fold_hides_exactly_the_subtree(
        records in arbitrary_tree(),
        pick in any::<prop::sample::Index>(),
    ) {
        let tree = QueueTree::build(records);
        let open = TreeLayout::compute(&tree, &FoldedSet::new());
        let nodes = open.nodes();
        let at = pick.index(nodes.len());
        let target = &nodes[at];

        // Pre-order: the subtree is the run of deeper nodes right after it.
        let end = nodes[at + 1..]
            .iter()
            .position(|n| n.depth <= target.depth)
            .map_or(nodes.len(), |p| at + 1 + p);
        let expected: Vec<&str> = nodes[..=at]
            .iter()
            .chain(&nodes[end..])
            .map(|n| n.name.as_str())
            .collect();

        let folded: FoldedSet = [target.name.clone()].into_iter().collect();
        let closed = TreeLayout::compute(&tree, &folded);
        let visible: Vec<&str> = closed.nodes().iter().map(|n| n.name.as_str()).collect();
        prop_assert_eq!(visible, expected);
    }
}

// ── Grid ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn panels_never_overlap(
        width in -200.0f64..5000.0,
        left in 0.0f64..600.0,
        i in 0usize..60,
        j in 0usize..60,
    ) {
        prop_assume!(i != j);
        let a = grid::layout(i, width, left);
        let b = grid::layout(j, width, left);
        prop_assert!(!a.overlaps(&b), "{:?} overlaps {:?}", a, b);
        prop_assert!(a.x1 >= left + grid::PANEL_GAP);
    }
}

// ── Charts ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn donut_spans_follow_floored_values(values in chart_values()) {
        let data: Vec<ChartDatum> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| ChartDatum::new(format!("s{i}"), v))
            .collect();
        let pie = donut::pie(&data);
        let floored: f64 = values.iter().map(|v| v.max(EPSILON)).sum();

        let mut angle = 0.0;
        for (slice, value) in pie.slices.iter().zip(&values) {
            prop_assert!((slice.start_angle - angle).abs() < 1e-9);
            prop_assert!((slice.span() / TAU - value.max(EPSILON) / floored).abs() < 1e-6);
            angle = slice.end_angle;
        }
        prop_assert!((angle - TAU).abs() < 1e-6);
        prop_assert_eq!(pie.all_zero, values.iter().all(|v| *v <= EPSILON));
    }

    #[test]
    fn charts_stay_inside_the_canvas(
        records in arbitrary_tree(),
        width in 200.0f64..3000.0,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut dash = QueueDashboard::new(width);
        dash.load(records);
        let nodes = dash.layout().nodes();
        let name = nodes[pick.index(nodes.len())].name.clone();
        dash.select(&name);

        for layer in &dash.scene().layers {
            for frame in layer.elements.iter().filter(|e| e.style.class == Some("chart-frame")) {
                if let Shape::Rect { origin, height, .. } = &frame.shape {
                    let bottom = origin.y + height;
                    prop_assert!(bottom <= dash.height(), "{} past {}", bottom, dash.height());
                }
            }
        }
    }
}
