// ── Cluster dashboard ──

use strum::IntoEnumIterator;

use super::{ChartKind, PlannedChart, background, render_plan};
use crate::chart::{ChartDatum, DonutOptions};
use crate::geometry::Point;
use crate::grid::{GridLayoutAllocator, PANEL_GAP};
use crate::model::{ClusterMetrics, Resource};
use crate::palette::Palette;
use crate::scene::Scene;
use crate::tooltip::TooltipController;

/// Minimum canvas height; grows when narrow widths stack the donuts.
pub const CLUSTER_HEIGHT: f64 = 1200.0;

/// Five donuts over the cluster metric record.
#[derive(Debug, Clone)]
pub struct ClusterDashboard {
    width: f64,
    height: f64,
    palette: Palette,
    metrics: ClusterMetrics,
    tooltip: TooltipController,
    scene: Scene,
    generation: u64,
}

impl ClusterDashboard {
    pub fn new(width: f64) -> Self {
        let mut dashboard = Self {
            width,
            height: CLUSTER_HEIGHT,
            palette: Palette::default(),
            metrics: ClusterMetrics::default(),
            tooltip: TooltipController::new(),
            scene: Scene::default(),
            generation: 0,
        };
        dashboard.redraw();
        dashboard
    }

    pub fn load(&mut self, metrics: ClusterMetrics) {
        self.metrics = metrics;
        self.tooltip.reset();
        self.redraw();
    }

    pub fn chart_plan(&self) -> Vec<PlannedChart> {
        let m = &self.metrics;
        let donut = || DonutOptions::default().with_side_labels();
        let mut plan = vec![
            PlannedChart::new(
                "Finished Apps",
                vec![
                    ChartDatum::new("Completed", m.apps_completed),
                    ChartDatum::new("Killed", m.apps_killed),
                    ChartDatum::new("Failed", m.apps_failed),
                ],
                ChartKind::Donut(donut()),
            ),
            PlannedChart::new(
                "Running Apps",
                vec![
                    ChartDatum::new("Pending", m.apps_pending),
                    ChartDatum::new("Running", m.apps_running),
                ],
                ChartKind::Donut(donut()),
            ),
            PlannedChart::new(
                "Nodes",
                vec![
                    ChartDatum::new("Active", m.active_nodes),
                    ChartDatum::new("Unhealthy", m.unhealthy_nodes),
                    ChartDatum::new("Decommissioned", m.decommissioned_nodes),
                ],
                ChartKind::Donut(donut().with_center("Active", m.active_nodes)),
            ),
        ];

        for resource in Resource::iter() {
            let title = match resource.unit() {
                Some(unit) => format!("Resource: {resource} ({unit})"),
                None => format!("Resource: {resource}"),
            };
            plan.push(PlannedChart::new(
                title,
                vec![
                    ChartDatum::new("Allocated", m.allocated(resource)),
                    ChartDatum::new("Reserved", m.reserved(resource)),
                    ChartDatum::new("Available", m.available(resource)),
                ],
                ChartKind::Donut(donut().with_center("Total", m.total(resource))),
            ));
        }
        plan
    }

    pub fn redraw(&mut self) {
        let mut grid = GridLayoutAllocator::new(self.width, 0.0);
        let charts = render_plan(&self.chart_plan(), &mut grid, &self.palette);
        self.height = CLUSTER_HEIGHT.max(grid.bottom() + PANEL_GAP);

        let mut scene = Scene::new(self.width, self.height);
        scene.push_layer(background(self.width, self.height));
        for layer in charts {
            scene.push_layer(layer);
        }
        self.scene = scene;
        self.generation += 1;
    }

    pub fn pointer_moved(&mut self, pointer: Point) {
        self.tooltip.track(&self.scene, pointer);
    }

    pub fn pointer_left(&mut self) {
        self.tooltip.on_leave();
    }

    pub fn resize(&mut self, width: f64) {
        if (width - self.width).abs() > f64::EPSILON {
            self.width = width;
            self.redraw();
        }
    }

    pub fn metrics(&self) -> &ClusterMetrics {
        &self.metrics
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
