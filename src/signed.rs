//! # Signed Graphs
//!
//! The canonical sparse representation: an insertion-ordered node set and
//! an ordered list of directed, signed edges.
//!
//! Edges are stored with a direction, but every consumer in this crate
//! treats them as undirected relations: [`SignedGraph::relation_between`]
//! succeeds whichever endpoint is asked about first, and
//! [`SignedGraph::adjacency`] lists each edge under both endpoints.
//!
//! The first node in insertion order is the [root](SignedGraph::root) of
//! every coloring.

use std::fmt;

use ahash::HashMap;
use derive_more::{Display, From};
use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

pub mod adjacency;
pub mod sign;

pub use adjacency::{Adjacency, Neighbour};
pub use sign::{Sign, SignParseError};

/// A stable, string-valued node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_owned())
    }
}

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A directed edge carrying a [`Sign`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub sign: Sign,
}

impl SignedEdge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, sign: Sign) -> Self {
        SignedEdge {
            source: source.into(),
            target: target.into(),
            sign,
        }
    }

    /// Whether this edge connects `a` and `b`, in either direction.
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

impl fmt::Display for SignedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.sign, self.target)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: SignedEdge, node: NodeId },
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: NodeId, to: NodeId },
    #[error("node {0} appears twice")]
    DuplicateNode(NodeId),
    #[error("invalid sign for edge {from} -> {to}: {error}")]
    Sign {
        from: NodeId,
        to: NodeId,
        error: SignParseError,
    },
}

/// The sparse signed graph. The single source of truth for every derived
/// view (matrix, colorings).
///
/// Equality compares the node order and the relation seen between every
/// ordered pair of nodes, i.e. two graphs are equal when they produce the
/// same [`DenseMatrix`](crate::matrix::DenseMatrix). Storage direction and
/// edge listing order only matter through [`relation_between`](Self::relation_between).
#[derive(Debug, Clone, Default)]
pub struct SignedGraph {
    nodes: IndexSet<NodeId>,
    edges: Vec<SignedEdge>,
    /// `(source, target)` node positions to the position in `edges`.
    edge_index: HashMap<(usize, usize), usize>,
}

impl SignedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a node list and an edge list, checking that
    /// every endpoint exists and that no ordered pair is stored twice.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = SignedEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = SignedGraph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Builds a graph from the nested association format: every key is a
    /// node, mapped to its outgoing `(target, sign)` pairs.
    ///
    /// Keys become nodes in the order given. A target that is never a key
    /// is appended after all keys, in the order it is first seen.
    pub fn from_adjacency<K, T, S, I, L>(entries: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (K, L)>,
        L: IntoIterator<Item = (T, S)>,
        K: Into<NodeId>,
        T: Into<NodeId>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, l)| {
                (
                    k.into(),
                    l.into_iter()
                        .map(|(t, s)| (t.into(), s))
                        .collect::<Vec<(NodeId, S)>>(),
                )
            })
            .collect::<Vec<_>>();

        let mut graph = SignedGraph::new();
        for (node, _) in &entries {
            graph.add_node(node.clone())?;
        }
        for (_, targets) in &entries {
            for (target, _) in targets {
                graph.nodes.insert(target.clone());
            }
        }

        for (source, targets) in entries {
            for (target, symbol) in targets {
                let sign = symbol.as_ref().parse::<Sign>().map_err(|error| GraphError::Sign {
                    from: source.clone(),
                    to: target.clone(),
                    error,
                })?;
                graph.add_edge(SignedEdge {
                    source: source.clone(),
                    target,
                    sign,
                })?;
            }
        }
        Ok(graph)
    }

    /// The inverse of [`from_adjacency`](Self::from_adjacency): every node,
    /// in order, with its outgoing edges in listing order.
    pub fn to_adjacency(&self) -> Vec<(NodeId, Vec<(NodeId, Sign)>)> {
        let mut adjacency = self
            .nodes
            .iter()
            .map(|n| (n.clone(), Vec::new()))
            .collect::<Vec<_>>();
        for e in &self.edges {
            if let Some(s) = self.index_of(&e.source) {
                adjacency[s].1.push((e.target.clone(), e.sign));
            }
        }
        adjacency
    }

    pub fn add_node(&mut self, node: impl Into<NodeId>) -> Result<usize, GraphError> {
        let (index, fresh) = self.nodes.insert_full(node.into());
        if !fresh {
            return Err(GraphError::DuplicateNode(self.nodes[index].clone()));
        }
        Ok(index)
    }

    pub fn add_edge(&mut self, edge: SignedEdge) -> Result<(), GraphError> {
        let position = |node: &NodeId| {
            self.index_of(node).ok_or_else(|| GraphError::UnknownNode {
                node: node.clone(),
                edge: edge.clone(),
            })
        };
        let key = (position(&edge.source)?, position(&edge.target)?);
        if self.edge_index.contains_key(&key) {
            return Err(GraphError::DuplicateEdge {
                from: edge.source,
                to: edge.target,
            });
        }
        self.edge_index.insert(key, self.edges.len());
        self.edges.push(edge);
        Ok(())
    }

    pub fn nodes(&self) -> &IndexSet<NodeId> {
        &self.nodes
    }

    pub fn edges(&self) -> &[SignedEdge] {
        &self.edges
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node every coloring starts from: the first in insertion order.
    pub fn root(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn index_of(&self, node: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    fn stored(&self, source: &NodeId, target: &NodeId) -> Option<&SignedEdge> {
        let key = (self.index_of(source)?, self.index_of(target)?);
        self.edge_index.get(&key).map(|&i| &self.edges[i])
    }

    /// The sign relating `a` and `b`, whichever direction the edge was
    /// stored in. An edge stored as `a -> b` takes precedence over `b -> a`.
    pub fn relation_between(&self, a: &NodeId, b: &NodeId) -> Option<Sign> {
        self.stored(a, b)
            .or_else(|| self.stored(b, a))
            .map(|e| e.sign)
    }

    /// The undirected neighbour index used by the colorings.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::new(self)
    }

    /// Number of positive and negative edges.
    pub fn sign_counts(&self) -> (usize, usize) {
        self.edges
            .iter()
            .fold((0, 0), |(p, n), e| match e.sign {
                Sign::Positive => (p + 1, n),
                Sign::Negative => (p, n + 1),
            })
    }
}

impl PartialEq for SignedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.iter().eq(other.nodes.iter())
            && self
                .nodes
                .iter()
                .cartesian_product(self.nodes.iter())
                .all(|(a, b)| self.relation_between(a, b) == other.relation_between(a, b))
    }
}

impl Eq for SignedGraph {}

impl fmt::Display for SignedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, targets) in self.to_adjacency() {
            writeln!(
                f,
                "{node}: [{}]",
                targets
                    .iter()
                    .map(|(t, s)| format!("{t}{s}"))
                    .join(", ")
            )?;
        }
        Ok(())
    }
}
