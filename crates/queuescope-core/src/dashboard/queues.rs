// ── Queue dashboard ──
//
// Tree on the left, charts for the selected queue on the right. Owns the
// tree, the fold and selection state, and the tooltip.

use tracing::{debug, warn};

use super::{ChartKind, PlannedChart, background, render_plan, separator};
use crate::chart::{ChartDatum, DonutOptions};
use crate::geometry::{Point, count};
use crate::grid::{GridLayoutAllocator, PANEL_GAP};
use crate::layout::{FoldedSet, NODE_RADIUS, TreeLayout};
use crate::model::QueueRecord;
use crate::palette::{self, Palette};
use crate::scene::{Element, Layer, Scene, Shape, Target};
use crate::tooltip::TooltipController;
use crate::tree::{QueueNode, QueueTree};

/// Vertical room per queue when sizing the canvas.
const ROW_PITCH: f64 = 35.0;
const CAPACITY_LABEL_WIDTH: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct QueueDashboard {
    width: f64,
    height: f64,
    palette: Palette,
    tree: QueueTree,
    folded: FoldedSet,
    selected: Option<String>,
    hovered: Option<String>,
    layout: TreeLayout,
    tooltip: TooltipController,
    scene: Scene,
    generation: u64,
}

impl QueueDashboard {
    pub fn new(width: f64) -> Self {
        let mut dashboard = Self {
            width,
            height: 0.0,
            palette: Palette::queues(),
            tree: QueueTree::default(),
            folded: FoldedSet::new(),
            selected: None,
            hovered: None,
            layout: TreeLayout::default(),
            tooltip: TooltipController::new(),
            scene: Scene::default(),
            generation: 0,
        };
        dashboard.redraw();
        dashboard
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self.redraw();
        self
    }

    /// Replace the tree. Fold and selection state start over; the root is
    /// selected when present.
    pub fn load(&mut self, records: Vec<QueueRecord>) {
        self.tree = QueueTree::build(records);
        self.folded.clear();
        self.hovered = None;
        self.selected = self.tree.root().map(|r| r.name().to_owned());
        self.tooltip.reset();
        debug!(queues = self.tree.len(), "queue dashboard loaded");
        self.redraw();
    }

    pub fn select(&mut self, name: &str) {
        debug!(queue = name, "select");
        self.selected = Some(name.to_owned());
        self.redraw();
    }

    /// Fold or unfold `name`. Only queues with children fold; returns
    /// whether anything changed.
    pub fn toggle_fold(&mut self, name: &str) -> bool {
        if !self.tree.by_name(name).is_some_and(QueueNode::has_children) {
            return false;
        }
        let folded = self.folded.toggle(name);
        debug!(queue = name, folded, "fold toggled");
        self.redraw();
        true
    }

    /// Charts for the current selection, in panel order.
    pub fn chart_plan(&self) -> Vec<PlannedChart> {
        let Some(name) = self.selected.as_deref() else {
            return Vec::new();
        };
        let Some(queue) = self.tree.by_name(name) else {
            warn!(queue = name, "selected queue not in tree");
            return Vec::new();
        };

        let mut plan = Vec::new();
        if queue.is_root() {
            let leaves = self
                .tree
                .leaves()
                .map(|leaf| ChartDatum::new(leaf.name(), leaf.record.used_capacity))
                .collect();
            plan.push(PlannedChart::new(
                "LeafQueues Used Capacities",
                leaves,
                ChartKind::Donut(DonutOptions::default().with_side_labels()),
            ));
        } else {
            let r = &queue.record;
            plan.push(PlannedChart::new(
                "Queue Capacities",
                vec![
                    ChartDatum::new("Cap", r.capacity),
                    ChartDatum::new("MaxCap", r.max_capacity),
                    ChartDatum::new("UsedCap", r.used_capacity),
                ],
                ChartKind::Bar {
                    label_width: CAPACITY_LABEL_WIDTH,
                },
            ));
        }

        if !queue.is_leaf() {
            let children: Vec<_> = self.tree.children_of(queue.id).collect();
            let series = |value: fn(&QueueRecord) -> f64| -> Vec<ChartDatum> {
                children
                    .iter()
                    .map(|c| ChartDatum::new(c.name(), value(&c.record)))
                    .collect()
            };
            plan.push(PlannedChart::new(
                "Children Capacities",
                series(|r: &QueueRecord| r.capacity),
                ChartKind::Donut(DonutOptions::default().with_side_labels()),
            ));
            plan.push(PlannedChart::new(
                "Children Used Capacities",
                series(|r: &QueueRecord| r.used_capacity),
                ChartKind::Donut(DonutOptions::default().with_side_labels()),
            ));
        }
        plan
    }

    /// Rebuild the whole scene. Restarts entrance transitions.
    pub fn redraw(&mut self) {
        self.layout = TreeLayout::compute(&self.tree, &self.folded);
        let banner = self.layout.banner_width();

        let mut grid = GridLayoutAllocator::new(self.width - banner, banner);
        let charts = render_plan(&self.chart_plan(), &mut grid, &self.palette);
        self.height = self.min_height().max(grid.bottom() + PANEL_GAP);

        let mut scene = Scene::new(self.width, self.height);
        scene.push_layer(background(self.width, self.height));
        if !self.tree.is_empty() {
            scene.push_layer(separator(banner, self.height));
        }
        scene.push_layer(self.tree_layer());
        for layer in charts {
            scene.push_layer(layer);
        }

        self.scene = scene;
        self.generation += 1;
    }

    fn tree_layer(&self) -> Layer {
        let mut layer = Layer::new("queues");
        for connector in self.layout.connectors() {
            layer.push(
                Element::new(Shape::Path(connector.path.clone()))
                    .stroke(palette::CONNECTOR, 2.0)
                    .class("queue"),
            );
        }
        for node in self.layout.nodes() {
            let fill = if self.selected.as_deref() == Some(node.name.as_str()) {
                self.palette.color(2)
            } else if self.hovered.as_deref() == Some(node.name.as_str()) {
                self.palette.color(1)
            } else {
                self.palette.color(0)
            };
            let target = Target::Queue(node.name.clone());
            layer.push(
                Element::new(Shape::Circle {
                    center: node.position,
                    radius: NODE_RADIUS,
                })
                .fill(fill)
                .class("queue")
                .target(target.clone()),
            );
            layer.push(
                Element::new(Shape::text(node.label_at(), node.label()))
                    .fill(palette::TEXT)
                    .class("queue")
                    .target(target),
            );
        }
        layer
    }

    /// Swap in a fresh tree layer without touching the charts, so running
    /// entrance transitions keep going.
    fn refresh_tree_layer(&mut self) {
        let layer = self.tree_layer();
        if let Some(slot) = self.scene.layers.iter_mut().find(|l| l.id == "queues") {
            *slot = layer;
        }
    }

    /// Pointer moved over the canvas: update hover highlight and tooltip.
    pub fn pointer_moved(&mut self, pointer: Point) {
        let hovered = match self.scene.hit_test(pointer).and_then(|e| e.target.as_ref()) {
            Some(Target::Queue(name)) => Some(name.clone()),
            _ => None,
        };
        if hovered != self.hovered {
            self.hovered = hovered;
            self.refresh_tree_layer();
        }
        self.tooltip.track(&self.scene, pointer);
    }

    pub fn pointer_left(&mut self) {
        self.tooltip.on_leave();
        if self.hovered.take().is_some() {
            self.refresh_tree_layer();
        }
    }

    /// Single activation: select the queue under the pointer.
    pub fn click(&mut self, pointer: Point) -> Option<String> {
        let name = self.queue_at(pointer)?;
        self.select(&name);
        Some(name)
    }

    /// Double activation: fold or unfold the queue under the pointer.
    pub fn double_click(&mut self, pointer: Point) -> Option<String> {
        let name = self.queue_at(pointer)?;
        self.toggle_fold(&name).then_some(name)
    }

    pub fn queue_at(&self, pointer: Point) -> Option<String> {
        match self.scene.hit_test(pointer)?.target.as_ref()? {
            Target::Queue(name) => Some(name.clone()),
            Target::Datum(_) => None,
        }
    }

    pub fn resize(&mut self, width: f64) {
        if (width - self.width).abs() > f64::EPSILON {
            self.width = width;
            self.redraw();
        }
    }

    /// Tall enough for the tree, at least 16:9.
    fn min_height(&self) -> f64 {
        (count(self.tree.len()) * ROW_PITCH).max(self.width * 9.0 / 16.0)
    }

    /// Canvas height from the last redraw. Grows past the minimum when
    /// the charts stack deeper than the tree.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tree(&self) -> &QueueTree {
        &self.tree
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn folded(&self) -> &FoldedSet {
        &self.folded
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Bumped on every full redraw; hosts restart transition clocks when
    /// it changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Name of the visible queue `offset` rows away from the selection,
    /// clamped to the first and last rows.
    pub fn neighbor(&self, offset: isize) -> Option<&str> {
        let nodes = self.layout.nodes();
        let current = self
            .selected
            .as_deref()
            .and_then(|s| nodes.iter().position(|n| n.name == s))
            .unwrap_or(0);
        let last = nodes.len().checked_sub(1)?;
        let target = current.saturating_add_signed(offset).min(last);
        nodes.get(target).map(|n| n.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<QueueRecord> {
        vec![
            QueueRecord::new("root")
                .with_children(["a", "b"])
                .with_capacities(100.0, 100.0, 30.0),
            QueueRecord::new("a")
                .with_parent("root")
                .with_capacities(60.0, 100.0, 20.0),
            QueueRecord::new("b")
                .with_parent("root")
                .with_capacities(40.0, 80.0, 10.0),
        ]
    }

    fn titles(plan: &[PlannedChart]) -> Vec<&str> {
        plan.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn load_selects_root() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        assert_eq!(dash.selected(), Some("root"));
        assert_eq!(
            titles(&dash.chart_plan()),
            ["LeafQueues Used Capacities", "Children Capacities", "Children Used Capacities"]
        );
    }

    #[test]
    fn leaf_selection_is_a_single_bar_chart() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        dash.select("a");
        let plan = dash.chart_plan();
        assert_eq!(titles(&plan), ["Queue Capacities"]);
        let labels: Vec<_> = plan[0].data.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Cap", "MaxCap", "UsedCap"]);
    }

    #[test]
    fn unknown_selection_renders_no_charts() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        dash.select("nope");
        assert!(dash.chart_plan().is_empty());
        assert!(dash.scene().layer("chart-0").is_none());
    }

    #[test]
    fn canvas_height_is_at_least_sixteen_by_nine() {
        let mut dash = QueueDashboard::new(1600.0);
        dash.load(records());
        assert!((dash.height() - 900.0).abs() < f64::EPSILON);
    }

    #[test]
    fn canvas_grows_to_fit_stacked_charts() {
        // Banner 130 leaves room for one panel per row.
        let mut dash = QueueDashboard::new(624.0);
        dash.load(records());
        assert_eq!(dash.chart_plan().len(), 3);
        assert!((dash.height() - 1020.0).abs() < f64::EPSILON);
        assert!((dash.scene().height - dash.height()).abs() < f64::EPSILON);
        for id in ["chart-0", "chart-1", "chart-2"] {
            let frame = dash
                .scene()
                .layer(id)
                .and_then(|l| l.elements.iter().find(|e| e.style.class == Some("chart-frame")));
            match frame.map(|e| &e.shape) {
                Some(Shape::Rect { origin, height, .. }) => assert!(origin.y + height <= dash.height()),
                other => panic!("{id}: no frame rect, got {other:?}"),
            }
        }
    }

    #[test]
    fn click_and_double_click_hit_tree_nodes() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        // "a" sits at (50, 50).
        assert_eq!(dash.click(Point::new(52.0, 48.0)).as_deref(), Some("a"));
        assert_eq!(dash.selected(), Some("a"));
        assert_eq!(dash.double_click(Point::new(20.0, 20.0)).as_deref(), Some("root"));
        assert!(dash.folded().contains("root"));
        assert_eq!(dash.layout().nodes().len(), 1);
        // Leaves do not fold.
        assert!(!dash.toggle_fold("b"));
    }

    #[test]
    fn hover_does_not_restart_transitions() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        let generation = dash.generation();
        dash.pointer_moved(Point::new(50.0, 50.0));
        assert_eq!(dash.hovered(), Some("a"));
        assert_eq!(dash.generation(), generation);
        dash.pointer_left();
        assert_eq!(dash.hovered(), None);
    }

    #[test]
    fn neighbor_walks_visible_rows() {
        let mut dash = QueueDashboard::new(1200.0);
        dash.load(records());
        assert_eq!(dash.neighbor(1), Some("a"));
        assert_eq!(dash.neighbor(-1), Some("root"));
        assert_eq!(dash.neighbor(10), Some("b"));
    }
}
