//! Random complete signed graphs, for seeding an editor with something to
//! look at.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use crate::signed::{NodeId, Sign, SignedEdge, SignedGraph};

/// `A`..`Z`, then `A1`..`Z1`, `A2`, and so on.
pub fn node_name(i: usize) -> NodeId {
    let letter = char::from(b'A' + (i % 26) as u8);
    match i / 26 {
        0 => NodeId(letter.to_string()),
        round => NodeId(format!("{letter}{round}")),
    }
}

/// A complete graph on `n` nodes where every pair `i < j` is joined by one
/// edge `i -> j` with a uniformly random sign. The same seed always gives
/// the same graph.
pub fn complete(n: usize, seed: u64) -> SignedGraph {
    complete_with_rng(n, &mut SmallRng::seed_from_u64(seed))
}

pub fn complete_with_rng(n: usize, rng: &mut impl Rng) -> SignedGraph {
    let nodes: Vec<NodeId> = (0..n).map(node_name).collect();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, source) in nodes.iter().enumerate() {
        for target in &nodes[i + 1..] {
            let sign = if rng.gen_bool(0.5) {
                Sign::Positive
            } else {
                Sign::Negative
            };
            edges.push(SignedEdge::new(source.clone(), target.clone(), sign));
        }
    }
    let graph = SignedGraph::from_parts(nodes, edges);
    debug_assert!(graph.is_ok());
    let graph = graph.unwrap_or_default();
    debug!(n, edges = graph.n_edges(), "generated complete graph");
    graph
}
