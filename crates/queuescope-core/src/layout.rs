//! Tree placement.
//!
//! Depth-first from the root with one sequence counter threaded through the
//! whole walk, so every visible node gets its own row. Fold state lives in
//! a [`FoldedSet`] beside the tree and survives redraws.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::geometry::{Path, Point, count};
use crate::tree::{NodeId, QueueTree};

pub const ORIGIN: f64 = 20.0;
pub const INDENT: f64 = 30.0;
pub const ROW: f64 = 30.0;
/// Chart area starts this far right of the deepest column.
pub const BANNER_PADDING: f64 = 100.0;
pub const NODE_RADIUS: f64 = 10.0;

/// Names of folded queues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FoldedSet(BTreeSet<String>);

impl FoldedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `name`; returns whether it is folded afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.0.remove(name) {
            false
        } else {
            self.0.insert(name.to_owned());
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FoldedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: NodeId,
    pub name: String,
    pub position: Point,
    pub depth: usize,
    pub sequence: usize,
    pub folded: bool,
    pub has_children: bool,
}

impl PlacedNode {
    pub fn label(&self) -> String {
        if self.folded {
            format!("{} (+)", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn label_at(&self) -> Point {
        self.position.offset(30.0, 5.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub parent: NodeId,
    pub child: NodeId,
    pub path: Path,
}

/// Positions for one traversal of the visible tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    nodes: Vec<PlacedNode>,
    connectors: Vec<Connector>,
    max_depth: usize,
}

impl TreeLayout {
    pub fn compute(tree: &QueueTree, folded: &FoldedSet) -> Self {
        let mut pass = Pass {
            tree,
            folded,
            sequence: 0,
            visited: HashSet::new(),
            out: Self::default(),
        };
        if let Some(root) = tree.root() {
            pass.place(root.id, 0, 0);
        }
        pass.out
    }

    /// Visible nodes in pre-order, which is also top-to-bottom order.
    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Width of the tree column left of the charts.
    pub fn banner_width(&self) -> f64 {
        count(self.max_depth) * INDENT + BANNER_PADDING
    }

    pub fn node(&self, name: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn position_of(&self, name: &str) -> Option<Point> {
        self.node(name).map(|n| n.position)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn node_position(depth: usize, sequence: usize) -> Point {
    Point::new(ORIGIN + INDENT * count(depth), ORIGIN + ROW * count(sequence))
}

struct Pass<'a> {
    tree: &'a QueueTree,
    folded: &'a FoldedSet,
    sequence: usize,
    visited: HashSet<NodeId>,
    out: TreeLayout,
}

impl Pass<'_> {
    fn place(&mut self, id: NodeId, depth: usize, sequence: usize) -> Point {
        self.visited.insert(id);
        self.out.max_depth = self.out.max_depth.max(depth);

        let position = node_position(depth, sequence);
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return position;
        };
        let folded = node.has_children() && self.folded.contains(node.name());
        self.out.nodes.push(PlacedNode {
            id,
            name: node.name().to_owned(),
            position,
            depth,
            sequence,
            folded,
            has_children: node.has_children(),
        });
        if folded {
            return position;
        }

        for &child in &node.children {
            if self.visited.contains(&child) {
                warn!(queue = %node.name(), "queue reached twice; skipping repeated subtree");
                continue;
            }
            self.sequence += 1;
            let child_at = self.place(child, depth + 1, self.sequence);
            let path = Path::basis(&[position, child_at.offset(-20.0, 0.0), child_at]);
            self.out.connectors.push(Connector {
                parent: id,
                child,
                path,
            });
        }
        position
    }
}
