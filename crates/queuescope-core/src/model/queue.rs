// ── Queue record ──

use serde::{Deserialize, Deserializer, Serialize};

/// One scheduler queue, as delivered by the data layer.
///
/// Capacities are percentages in `0..=100`. `capacity` and friends are
/// relative to the parent queue; the `abs_*` fields are relative to the
/// whole cluster. The tree is described twice (parent name and child
/// names); traversal follows `children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub max_capacity: f64,
    #[serde(default)]
    pub used_capacity: f64,
    #[serde(default)]
    pub abs_capacity: f64,
    #[serde(default)]
    pub abs_max_capacity: f64,
    #[serde(default)]
    pub abs_used_capacity: f64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub user_limit: Option<f64>,
    #[serde(default)]
    pub user_limit_factor: Option<f64>,
    /// Reported as a boolean by newer schedulers and as `0`/`1` by older ones.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub preemption_disabled: Option<bool>,
}

impl QueueRecord {
    /// Bare record with a name and child list; capacities default to zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_capacities(mut self, capacity: f64, max_capacity: f64, used_capacity: f64) -> Self {
        self.capacity = capacity;
        self.max_capacity = max_capacity;
        self.used_capacity = used_capacity;
        self
    }

    pub fn is_root(&self) -> bool {
        self.name == "root"
    }

    /// A queue without declared children is a leaf, whether or not the
    /// named children actually resolve.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Cluster-relative capacity triple. The root reports its own
    /// relative numbers, which are cluster-relative by definition.
    pub fn absolute_capacities(&self) -> [(&'static str, f64); 3] {
        if self.is_root() {
            [
                ("Absolute Capacity", 100.0),
                ("Absolute Used", self.used_capacity),
                ("Absolute Max Capacity", 100.0),
            ]
        } else {
            [
                ("Absolute Capacity", self.abs_capacity),
                ("Absolute Used", self.abs_used_capacity),
                ("Absolute Max Capacity", self.abs_max_capacity),
            ]
        }
    }
}

pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
        Some(serde_json::Value::String(s)) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "name": "a",
            "parent": "root",
            "children": [],
            "capacity": 60,
            "maxCapacity": 100,
            "usedCapacity": 12.5,
            "absCapacity": 60,
            "absMaxCapacity": 100,
            "absUsedCapacity": 7.5,
            "state": "RUNNING",
            "preemptionDisabled": 1
        }"#;
        let record: QueueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "a");
        assert_eq!(record.parent.as_deref(), Some("root"));
        assert!((record.used_capacity - 12.5).abs() < f64::EPSILON);
        assert_eq!(record.preemption_disabled, Some(true));
        assert!(record.is_leaf());
    }

    #[test]
    fn missing_fields_default() {
        let record: QueueRecord = serde_json::from_str(r#"{"name":"root"}"#).unwrap();
        assert!(record.is_root());
        assert!(record.children.is_empty());
        assert!(record.preemption_disabled.is_none());
    }

    #[test]
    fn root_absolute_capacities_are_pinned() {
        let root = QueueRecord::new("root").with_capacities(100.0, 100.0, 42.0);
        let caps = root.absolute_capacities();
        assert!((caps[0].1 - 100.0).abs() < f64::EPSILON);
        assert!((caps[1].1 - 42.0).abs() < f64::EPSILON);
        assert!((caps[2].1 - 100.0).abs() < f64::EPSILON);
    }
}
