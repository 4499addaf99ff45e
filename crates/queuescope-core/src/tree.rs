//! Queue hierarchy.
//!
//! Records arrive flat; the tree resolves child names into arena indices
//! once per load. Names that do not resolve are logged and skipped. The
//! tree is immutable after construction and rebuilt wholesale on refresh.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::QueueRecord;

pub const ROOT: &str = "root";

/// Index of a node in its [`QueueTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueNode {
    pub id: NodeId,
    pub record: QueueRecord,
    /// Children that resolved, in declared order.
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl QueueNode {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_root(&self) -> bool {
        self.record.is_root()
    }

    /// Declared leaf: the record lists no children at all.
    pub fn is_leaf(&self) -> bool {
        self.record.is_leaf()
    }

    /// Whether the node has anything to fold.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueueTree {
    nodes: Vec<QueueNode>,
    by_name: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl QueueTree {
    pub fn build(records: impl IntoIterator<Item = QueueRecord>) -> Self {
        let mut nodes: Vec<QueueNode> = Vec::new();
        let mut by_name = HashMap::new();

        for record in records {
            if by_name.contains_key(&record.name) {
                warn!(queue = %record.name, "duplicate queue record ignored");
                continue;
            }
            let id = NodeId(nodes.len());
            by_name.insert(record.name.clone(), id);
            nodes.push(QueueNode {
                id,
                record,
                children: Vec::new(),
                parent: None,
            });
        }

        for node in &mut nodes {
            for child in &node.record.children {
                match by_name.get(child) {
                    Some(&child_id) if child_id != node.id => node.children.push(child_id),
                    Some(_) => warn!(queue = %node.record.name, "queue lists itself as a child"),
                    None => warn!(queue = %node.record.name, child = %child, "dangling child reference"),
                }
            }
            node.parent = match node.record.parent.as_deref() {
                Some(parent) => {
                    let resolved = by_name.get(parent).copied();
                    if resolved.is_none() {
                        warn!(queue = %node.record.name, parent, "dangling parent reference");
                    }
                    resolved
                }
                None => None,
            };
        }

        let root = by_name.get(ROOT).copied();
        if root.is_none() && !nodes.is_empty() {
            warn!("no root queue in snapshot");
        }
        debug!(queues = nodes.len(), "queue tree built");

        Self { nodes, by_name, root }
    }

    pub fn root(&self) -> Option<&QueueNode> {
        self.root.map(|id| self.node(id))
    }

    pub fn get(&self, id: NodeId) -> Option<&QueueNode> {
        self.nodes.get(id.0)
    }

    pub fn by_name(&self, name: &str) -> Option<&QueueNode> {
        self.by_name.get(name).map(|&id| self.node(id))
    }

    /// Resolved children of `id`, in declared order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &QueueNode> {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.children.iter().map(|&c| self.node(c)))
    }

    /// Every declared leaf, in record order. Orphans count too.
    pub fn leaves(&self) -> impl Iterator<Item = &QueueNode> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// All nodes in record order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Ids only come from this arena, so lookups cannot miss.
    fn node(&self, id: NodeId) -> &QueueNode {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<QueueRecord> {
        vec![
            QueueRecord::new("root").with_children(["a", "b", "ghost"]),
            QueueRecord::new("a").with_parent("root").with_children(["a1"]),
            QueueRecord::new("b").with_parent("root"),
            QueueRecord::new("a1").with_parent("a"),
            QueueRecord::new("orphan").with_parent("nowhere"),
        ]
    }

    #[test]
    fn resolves_children_and_skips_dangling() {
        let tree = QueueTree::build(records());
        let root = tree.root().map(|r| r.id);
        let names: Vec<_> = root
            .into_iter()
            .flat_map(|id| tree.children_of(id))
            .map(QueueNode::name)
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(tree.len(), 5);
        assert!(tree.by_name("orphan").is_some_and(|o| o.parent.is_none()));
    }

    #[test]
    fn leaves_are_declared_in_record_order() {
        let tree = QueueTree::build(records());
        let leaves: Vec<_> = tree.leaves().map(QueueNode::name).collect();
        assert_eq!(leaves, ["b", "a1", "orphan"]);
    }

    #[test]
    fn duplicates_keep_the_first_record() {
        let tree = QueueTree::build(vec![
            QueueRecord::new("root").with_capacities(100.0, 100.0, 1.0),
            QueueRecord::new("root").with_capacities(100.0, 100.0, 2.0),
        ]);
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_some_and(|r| (r.record.used_capacity - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn missing_root_is_empty_traversal() {
        let tree = QueueTree::build(vec![QueueRecord::new("a")]);
        assert!(tree.root().is_none());
        assert!(QueueTree::build(Vec::new()).is_empty());
    }
}
