//! # Balance Colorings
//!
//! Node colorings of a [`SignedGraph`] under the two structural-balance
//! interpretations:
//!
//! - [`assign_partition`]: strict balance, two factions, by sign
//!   propagation from the root.
//! - [`assign_clusters`]: weak balance, any number of clusters, where
//!   negative edges into uncolored nodes open new clusters.
//!
//! Both walk the graph breadth-first from [`SignedGraph::root`] over the
//! undirected [`Adjacency`](crate::signed::Adjacency), so the result never
//! depends on the order in which edges happen to be listed. Both take the
//! externally computed balance flag as given: when it is `false`, every node
//! is unclassified and no traversal happens.
//!
//! Assignments are rebuilt wholesale on every call. Colors here are
//! abstract; [`palette`] turns them into RGB values.

use std::ops::Index;

use indexmap::IndexMap;
use thiserror::Error;

use crate::signed::{NodeId, SignedEdge, SignedGraph};

pub mod cluster;
pub mod palette;
pub mod partition;

pub use cluster::{assign_clusters, ClusterColor};
pub use palette::{ClusterPalette, Rgb};
pub use partition::{assign_partition, PartitionColor};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColoringError {
    #[error(
        "graph is flagged as balanced, but edge {edge} requires {node} to be {required} while it is already {assigned}"
    )]
    InconsistentBalance {
        node: NodeId,
        edge: SignedEdge,
        assigned: PartitionColor,
        required: PartitionColor,
    },
}

/// A color for every node of a graph, in node order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAssignment<C> {
    colors: IndexMap<NodeId, C>,
}

impl<C: Clone> ColorAssignment<C> {
    /// Every node of `graph` mapped to `color`.
    pub fn uniform(graph: &SignedGraph, color: C) -> Self {
        graph
            .nodes()
            .iter()
            .map(|n| (n.clone(), color.clone()))
            .collect()
    }
}

impl<C> ColorAssignment<C> {
    /// Pairs the `i`-th node of `graph` with the `i`-th color.
    pub(crate) fn from_indexed(graph: &SignedGraph, colors: impl IntoIterator<Item = C>) -> Self {
        graph.nodes().iter().cloned().zip(colors).collect()
    }

    pub fn get(&self, node: &NodeId) -> Option<&C> {
        self.colors.get(node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &C)> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Nodes holding a color matching `pred`, in node order.
    pub fn nodes_where(&self, pred: impl Fn(&C) -> bool) -> Vec<&NodeId> {
        self.colors
            .iter()
            .filter(|(_, c)| pred(c))
            .map(|(n, _)| n)
            .collect()
    }
}

impl<C> FromIterator<(NodeId, C)> for ColorAssignment<C> {
    fn from_iter<T: IntoIterator<Item = (NodeId, C)>>(iter: T) -> Self {
        ColorAssignment {
            colors: iter.into_iter().collect(),
        }
    }
}

impl<C> Index<&NodeId> for ColorAssignment<C> {
    type Output = C;

    fn index(&self, node: &NodeId) -> &C {
        &self.colors[node]
    }
}

impl<C> Index<&str> for ColorAssignment<C> {
    type Output = C;

    fn index(&self, node: &str) -> &C {
        &self.colors[&NodeId::from(node)]
    }
}

#[cfg(test)]
mod tests;
