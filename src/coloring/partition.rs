use std::collections::VecDeque;

use derive_more::Display;
use tracing::{debug, warn};

use super::{ColorAssignment, ColoringError};
use crate::signed::{Sign, SignedGraph};

/// Node color under strict balance.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartitionColor {
    /// The root's faction.
    FactionA,
    FactionB,
    /// The balance flag is unset, or the node cannot be reached from the root.
    #[default]
    Unclassified,
}

impl PartitionColor {
    /// The other faction. `Unclassified` has no opposite and maps to itself.
    pub fn opposite(self) -> Self {
        match self {
            PartitionColor::FactionA => PartitionColor::FactionB,
            PartitionColor::FactionB => PartitionColor::FactionA,
            PartitionColor::Unclassified => PartitionColor::Unclassified,
        }
    }

    /// The color a neighbour must have across an edge of sign `sign`.
    pub fn across(self, sign: Sign) -> Self {
        match sign {
            Sign::Positive => self,
            Sign::Negative => self.opposite(),
        }
    }

    pub fn is_classified(self) -> bool {
        self != PartitionColor::Unclassified
    }
}

/// Splits the nodes of a strictly balanced graph into two factions.
///
/// The root is [`PartitionColor::FactionA`]. Moving along a positive edge
/// keeps the faction and moving along a negative one flips it. Nodes the
/// root cannot reach stay [`PartitionColor::Unclassified`], as does every
/// node when `is_balanced` is `false`.
///
/// If the graph contradicts the flag, i.e. two paths from the root give a
/// node different factions, this fails with
/// [`ColoringError::InconsistentBalance`] instead of picking one.
pub fn assign_partition(
    graph: &SignedGraph,
    is_balanced: bool,
) -> Result<ColorAssignment<PartitionColor>, ColoringError> {
    if !is_balanced || graph.is_empty() {
        return Ok(ColorAssignment::uniform(graph, PartitionColor::Unclassified));
    }

    let adjacency = graph.adjacency();
    let mut colors = vec![PartitionColor::Unclassified; graph.n_nodes()];
    colors[0] = PartitionColor::FactionA;
    let mut queue = VecDeque::from([0]);

    while let Some(u) = queue.pop_front() {
        for n in adjacency.neighbours(u) {
            let required = colors[u].across(n.sign);
            match colors[n.node] {
                PartitionColor::Unclassified => {
                    colors[n.node] = required;
                    queue.push_back(n.node);
                }
                assigned if assigned == required => {}
                assigned => {
                    let edge = graph.edges()[n.edge].clone();
                    warn!(%edge, "sign conflict in a graph flagged as balanced");
                    return Err(ColoringError::InconsistentBalance {
                        node: graph.nodes()[n.node].clone(),
                        edge,
                        assigned,
                        required,
                    });
                }
            }
        }
    }

    debug!(
        unreachable = colors.iter().filter(|c| !c.is_classified()).count(),
        "partitioned graph into factions"
    );
    Ok(ColorAssignment::from_indexed(graph, colors))
}
