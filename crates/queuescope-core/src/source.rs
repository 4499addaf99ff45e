//! Snapshot ingest.
//!
//! Queue snapshots come in two shapes: a flat JSON array of
//! [`QueueRecord`]s, or the scheduler REST payload where queues nest under
//! `scheduler.schedulerInfo` and each level lists its children in
//! `queues.queue`. Cluster metrics come wrapped in `clusterMetrics` or bare.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{ClusterMetrics, QueueRecord, lenient_flag};
use crate::tree::ROOT;

/// One level of the nested scheduler payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchedulerQueue {
    #[serde(default = "root_name")]
    queue_name: String,
    #[serde(default)]
    capacity: f64,
    #[serde(default)]
    used_capacity: f64,
    #[serde(default)]
    max_capacity: f64,
    #[serde(default)]
    absolute_capacity: f64,
    #[serde(default)]
    absolute_max_capacity: f64,
    #[serde(default)]
    absolute_used_capacity: f64,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    user_limit: Option<f64>,
    #[serde(default)]
    user_limit_factor: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    preemption_disabled: Option<bool>,
    #[serde(default)]
    queues: Option<QueueList>,
}

#[derive(Debug, Default, Deserialize)]
struct QueueList {
    #[serde(default)]
    queue: Vec<SchedulerQueue>,
}

fn root_name() -> String {
    ROOT.to_owned()
}

impl SchedulerQueue {
    /// Pre-order flattening; each child learns its parent's name.
    fn flatten_into(self, parent: Option<String>, out: &mut Vec<QueueRecord>) {
        let children = self.queues.map(|q| q.queue).unwrap_or_default();
        out.push(QueueRecord {
            children: children.iter().map(|c| c.queue_name.clone()).collect(),
            parent,
            capacity: self.capacity,
            max_capacity: self.max_capacity,
            used_capacity: self.used_capacity,
            abs_capacity: self.absolute_capacity,
            abs_max_capacity: self.absolute_max_capacity,
            abs_used_capacity: self.absolute_used_capacity,
            state: self.state,
            user_limit: self.user_limit,
            user_limit_factor: self.user_limit_factor,
            preemption_disabled: self.preemption_disabled,
            name: self.queue_name,
        });
        let name = out.last().map(|r| r.name.clone());
        for child in children {
            child.flatten_into(name.clone(), out);
        }
    }
}

/// Flatten a scheduler REST payload into queue records.
pub fn queues_from_scheduler_json(json: &str) -> Result<Vec<QueueRecord>, CoreError> {
    let value: Value = serde_json::from_str(json)?;
    queues_from_scheduler_value(value)
}

fn queues_from_scheduler_value(mut value: Value) -> Result<Vec<QueueRecord>, CoreError> {
    let info = value
        .pointer_mut("/scheduler/schedulerInfo")
        .map(Value::take)
        .ok_or_else(|| CoreError::MissingField {
            field: "scheduler.schedulerInfo".into(),
        })?;
    let root: SchedulerQueue = serde_json::from_value(info)?;
    let mut records = Vec::new();
    root.flatten_into(None, &mut records);
    debug!(queues = records.len(), "flattened scheduler payload");
    Ok(records)
}

/// Parse either snapshot shape.
pub fn parse_queues(json: &str) -> Result<Vec<QueueRecord>, CoreError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => queues_from_scheduler_value(value),
        _ => Err(CoreError::Parse {
            message: "expected a queue array or a scheduler payload".into(),
        }),
    }
}

pub fn parse_cluster_metrics(json: &str) -> Result<ClusterMetrics, CoreError> {
    let mut value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(CoreError::Parse {
            message: "expected a cluster metrics object".into(),
        });
    }
    let metrics = match value.get_mut("clusterMetrics") {
        Some(inner) => inner.take(),
        None => value,
    };
    Ok(serde_json::from_value(metrics)?)
}

fn read(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_queues(path: &Path) -> Result<Vec<QueueRecord>, CoreError> {
    parse_queues(&read(path)?)
}

pub fn load_cluster_metrics(path: &Path) -> Result<ClusterMetrics, CoreError> {
    parse_cluster_metrics(&read(path)?)
}
