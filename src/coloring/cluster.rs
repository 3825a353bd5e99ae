use std::collections::VecDeque;

use derive_more::Display;
use tracing::{debug, trace};

use super::ColorAssignment;
use crate::signed::{Sign, SignedGraph};

/// Node color under weak balance: a cluster index, counted from `0` (the
/// root's cluster) in order of discovery.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusterColor {
    #[display(fmt = "cluster {}", _0)]
    Cluster(usize),
    #[default]
    Unclassified,
}

impl ClusterColor {
    pub fn index(self) -> Option<usize> {
        match self {
            ClusterColor::Cluster(i) => Some(i),
            ClusterColor::Unclassified => None,
        }
    }
}

impl ColorAssignment<ClusterColor> {
    /// Number of distinct clusters assigned.
    pub fn n_clusters(&self) -> usize {
        self.iter()
            .filter_map(|(_, c)| c.index())
            .max()
            .map_or(0, |m| m + 1)
    }
}

/// Groups the nodes of a weakly balanced graph into clusters.
///
/// The root opens cluster `0`. During the breadth-first walk, a node is
/// colored the first time it is reached and never again:
///
/// - across a positive edge it joins the cluster of the node it was reached from,
/// - across a negative edge it opens the next unused cluster.
///
/// Edges into already colored nodes are left alone, so the number of
/// clusters is at most one more than the number of negative edges. Nodes
/// the root cannot reach stay [`ClusterColor::Unclassified`], as does every
/// node when `is_weakly_balanced` is `false`.
pub fn assign_clusters(graph: &SignedGraph, is_weakly_balanced: bool) -> ColorAssignment<ClusterColor> {
    if !is_weakly_balanced || graph.is_empty() {
        return ColorAssignment::uniform(graph, ClusterColor::Unclassified);
    }

    let adjacency = graph.adjacency();
    let mut colors = vec![ClusterColor::Unclassified; graph.n_nodes()];
    colors[0] = ClusterColor::Cluster(0);
    let mut next = 1;
    let mut queue = VecDeque::from([0]);

    while let Some(u) = queue.pop_front() {
        for n in adjacency.neighbours(u) {
            if colors[n.node] != ClusterColor::Unclassified {
                continue;
            }
            colors[n.node] = match n.sign {
                Sign::Positive => colors[u],
                Sign::Negative => {
                    trace!(node = %graph.nodes()[n.node], cluster = next, "opened cluster");
                    next += 1;
                    ClusterColor::Cluster(next - 1)
                }
            };
            queue.push_back(n.node);
        }
    }

    debug!(clusters = next, "clustered graph");
    ColorAssignment::from_indexed(graph, colors)
}
