// ── Cluster metric record ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cluster-wide aggregate counters, one record per snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterMetrics {
    pub apps_submitted: f64,
    pub apps_completed: f64,
    pub apps_pending: f64,
    pub apps_running: f64,
    pub apps_failed: f64,
    pub apps_killed: f64,

    #[serde(rename = "reservedMB")]
    pub reserved_mb: f64,
    #[serde(rename = "availableMB")]
    pub available_mb: f64,
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: f64,
    #[serde(rename = "totalMB")]
    pub total_mb: f64,

    pub reserved_virtual_cores: f64,
    pub available_virtual_cores: f64,
    pub allocated_virtual_cores: f64,
    pub total_virtual_cores: f64,

    pub containers_allocated: f64,
    pub containers_reserved: f64,
    pub containers_pending: f64,

    pub total_nodes: f64,
    pub active_nodes: f64,
    pub lost_nodes: f64,
    pub unhealthy_nodes: f64,
    pub decommissioned_nodes: f64,
    pub rebooted_nodes: f64,
}

/// A schedulable resource with allocated/reserved/available/total counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Resource {
    #[strum(to_string = "Memory")]
    Memory,
    #[strum(to_string = "VCores")]
    VirtualCores,
}

impl Resource {
    /// Unit suffix shown in chart titles, if any.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::Memory => Some("MB"),
            Self::VirtualCores => None,
        }
    }
}

impl ClusterMetrics {
    pub fn allocated(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Memory => self.allocated_mb,
            Resource::VirtualCores => self.allocated_virtual_cores,
        }
    }

    pub fn reserved(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Memory => self.reserved_mb,
            Resource::VirtualCores => self.reserved_virtual_cores,
        }
    }

    pub fn available(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Memory => self.available_mb,
            Resource::VirtualCores => self.available_virtual_cores,
        }
    }

    pub fn total(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Memory => self.total_mb,
            Resource::VirtualCores => self.total_virtual_cores,
        }
    }
}
