use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node arena. Node identity is the index into `nodes`; connections refer to other nodes by that
/// index.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Graph {
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with `n` unconnected nodes.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![Node::default(); n],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends an unconnected node and returns its index.
    pub fn add_node(&mut self) -> usize {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }

    /// Adds a directed connection `from -> to`.
    pub fn connect(&mut self, from: usize, to: usize) {
        self.nodes[from].connections.push(Connection { target: to });
    }

    /// Adds connections in both directions.
    pub fn link(&mut self, a: usize, b: usize) {
        self.connect(a, b);
        self.connect(b, a);
    }

    pub fn positions(&self) -> Vec<GridPos> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.nodes.len();
        for (node, n) in self.nodes.iter().enumerate() {
            if let Some(c) = n.connections.iter().find(|c| c.target >= len) {
                return Err(Error::MissingTarget {
                    node,
                    target: c.target,
                });
            }
        }
        Ok(())
    }

    /// Stable sort by descending connection count.
    ///
    /// Connection targets are rewritten through the permutation so every connection keeps
    /// pointing at the same logical node. Returns `order` where `order[new] == old`.
    pub(crate) fn sort_by_connection_count(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by(|&a, &b| {
            self.nodes[b]
                .connections
                .len()
                .cmp(&self.nodes[a].connections.len())
        });

        let mut new_index = vec![0usize; order.len()];
        for (new, &old) in order.iter().enumerate() {
            new_index[old] = new;
        }

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        self.nodes = order
            .iter()
            .filter_map(|&old| old_nodes[old].take())
            .map(|mut n| {
                for c in &mut n.connections {
                    c.target = new_index[c.target];
                }
                n
            })
            .collect();

        order
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub connections: Vec<Connection>,
    /// Assigned by the layout. The incoming value is ignored.
    pub position: GridPos,
}

/// Directed edge record. Multiple connections to the same target are allowed; self-loops are
/// accepted but only ever lengthen a path, so they never change a hop distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    pub target: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    pub fn offset(self, d: i32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            z: self.z + d,
        }
    }
}
