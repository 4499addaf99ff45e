//! Records consumed from the data layer.
//!
//! These are plain serde types in the shape the scheduler UI has always
//! used: one [`QueueRecord`] per queue, one [`ClusterMetrics`] aggregate.

mod metrics;
mod queue;

pub use metrics::{ClusterMetrics, Resource};
pub use queue::QueueRecord;
pub(crate) use queue::lenient_flag;
