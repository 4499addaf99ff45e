//! Screen identifiers.

use std::fmt;

/// The two dashboards, navigable by number keys 1-2 or Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Queues,
    Cluster,
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 2] = [Self::Queues, Self::Cluster];

    pub fn number(self) -> u8 {
        match self {
            Self::Queues => 1,
            Self::Cluster => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Queues),
            2 => Some(Self::Cluster),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Queues => Self::Cluster,
            Self::Cluster => Self::Queues,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Queues => "Queues",
            Self::Cluster => "Cluster",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
