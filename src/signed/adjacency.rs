use super::{NodeId, Sign, SignedGraph};

/// An undirected neighbour index over a [`SignedGraph`].
///
/// Node `i` here is the `i`-th node of the graph. Every stored edge
/// `u -> v` appears once under `u` and once under `v` (a self-loop only
/// once), so traversal never depends on storage direction. Neighbours of a
/// node are listed in edge listing order.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbours: Vec<Vec<Neighbour>>,
}

/// One end of an edge, seen from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub node: usize,
    pub sign: Sign,
    /// Position of the underlying edge in [`SignedGraph::edges`].
    pub edge: usize,
}

impl Adjacency {
    pub fn new(graph: &SignedGraph) -> Self {
        let mut neighbours = vec![Vec::new(); graph.n_nodes()];
        for (edge, e) in graph.edges().iter().enumerate() {
            // Construction guarantees both endpoints exist.
            let (Some(s), Some(t)) = (graph.index_of(&e.source), graph.index_of(&e.target)) else {
                continue;
            };
            neighbours[s].push(Neighbour {
                node: t,
                sign: e.sign,
                edge,
            });
            if s != t {
                neighbours[t].push(Neighbour {
                    node: s,
                    sign: e.sign,
                    edge,
                });
            }
        }
        Adjacency { neighbours }
    }

    pub fn neighbours(&self, node: usize) -> &[Neighbour] {
        &self.neighbours[node]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbours[node].len()
    }

    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Neighbours of `node` resolved to their ids.
    pub fn neighbour_ids<'a>(
        &'a self,
        graph: &'a SignedGraph,
        node: usize,
    ) -> impl Iterator<Item = (&'a NodeId, Sign)> + 'a {
        self.neighbours[node]
            .iter()
            .filter_map(move |n| graph.nodes().get_index(n.node).map(|id| (id, n.sign)))
    }
}
