//! Layout and charting engine behind the queuescope dashboards.
//!
//! This crate turns scheduler data into screen geometry. It never draws
//! anything itself; every view is expressed as a retained [`Scene`] that a
//! host (the SVG writer, the terminal UI) rasterizes:
//!
//! - **[`QueueTree`]**: arena-indexed queue hierarchy built from flat
//!   [`QueueRecord`]s. Dangling references are dropped, not fatal.
//!
//! - **[`TreeLayout`]**: depth-first placement of the visible tree with a
//!   threaded sequence counter, basis-spline connectors, and a [`FoldedSet`]
//!   kept beside the tree so folds survive redraws.
//!
//! - **Charts** ([`chart`]): bar and donut renderers that map
//!   [`ChartDatum`] lists into scene layers with entrance transitions and
//!   tooltip targets. Panels come from the [`grid`] allocator.
//!
//! - **Dashboards** ([`dashboard`]): [`QueueDashboard`] owns the tree,
//!   fold and selection state, and the per-dashboard [`TooltipController`];
//!   [`ClusterDashboard`] charts the cluster metric record on the same
//!   primitives.
//!
//! - **Ingest** ([`source`]): reads scheduler snapshots from disk.

pub mod animation;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod model;
pub mod palette;
pub mod scene;
pub mod source;
pub mod svg;
pub mod tooltip;
pub mod tree;

// ── Primary re-exports ──────────────────────────────────────────────
pub use chart::{ChartDatum, DatumAccess, DonutOptions};
pub use dashboard::{ClusterDashboard, PlannedChart, QueueDashboard};
pub use error::CoreError;
pub use geometry::Point;
pub use grid::{GridLayoutAllocator, PanelRect};
pub use layout::{FoldedSet, TreeLayout};
pub use model::{ClusterMetrics, QueueRecord, Resource};
pub use palette::{Palette, Rgb};
pub use scene::{Element, Layer, Scene, Shape, Target};
pub use tooltip::{Tooltip, TooltipController};
pub use tree::{NodeId, QueueNode, QueueTree};
