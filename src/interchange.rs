//! # Wire Formats
//!
//! The JSON shapes exchanged with the outside world:
//!
//! - [`AdjacencyGraph`]: `{"A": [["B", "+"]], "B": []}`, the static input
//!   graph and the body of a submission.
//! - [`Classification`]: a graph in force-graph form (`nodes` and `links`)
//!   with the `isbalanced` / `isweakbalanced` flags computed by the
//!   classification service.
//! - [`SubmissionPayload`]: `{"graphData": <AdjacencyGraph>}`, sent to that
//!   service after a commit.
//!
//! Key order in these objects is node order, so it is preserved on both
//! read and write.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    session::BalanceFlags,
    signed::{GraphError, NodeId, Sign, SignedEdge, SignedGraph},
};

/// Node id to ordered `[target, sign]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyGraph(pub IndexMap<String, Vec<(String, String)>>);

impl TryFrom<&AdjacencyGraph> for SignedGraph {
    type Error = GraphError;

    fn try_from(value: &AdjacencyGraph) -> Result<Self, Self::Error> {
        SignedGraph::from_adjacency(
            value
                .0
                .iter()
                .map(|(n, ts)| (n.as_str(), ts.iter().map(|(t, s)| (t.as_str(), s)))),
        )
    }
}

impl From<&SignedGraph> for AdjacencyGraph {
    fn from(graph: &SignedGraph) -> Self {
        AdjacencyGraph(
            graph
                .to_adjacency()
                .into_iter()
                .map(|(n, ts)| {
                    (
                        n.0,
                        ts.into_iter()
                            .map(|(t, s)| (t.0, s.to_string()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceLink {
    pub source: String,
    pub target: String,
    pub sign: String,
}

/// A graph as node and link lists, the shape force-directed renderers take.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForceGraphData {
    pub nodes: Vec<ForceNode>,
    pub links: Vec<ForceLink>,
}

impl TryFrom<&ForceGraphData> for SignedGraph {
    type Error = GraphError;

    fn try_from(value: &ForceGraphData) -> Result<Self, Self::Error> {
        let edges = value
            .links
            .iter()
            .map(|l| {
                let sign = l.sign.parse::<Sign>().map_err(|error| GraphError::Sign {
                    from: l.source.as_str().into(),
                    to: l.target.as_str().into(),
                    error,
                })?;
                Ok(SignedEdge::new(l.source.as_str(), l.target.as_str(), sign))
            })
            .collect::<Result<Vec<_>, GraphError>>()?;
        SignedGraph::from_parts(
            value.nodes.iter().map(|n| NodeId::from(n.id.as_str())),
            edges,
        )
    }
}

impl From<&SignedGraph> for ForceGraphData {
    fn from(graph: &SignedGraph) -> Self {
        ForceGraphData {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| ForceNode { id: n.0.clone() })
                .collect(),
            links: graph
                .edges()
                .iter()
                .map(|e| ForceLink {
                    source: e.source.0.clone(),
                    target: e.target.0.clone(),
                    sign: e.sign.to_string(),
                })
                .collect(),
        }
    }
}

/// A graph together with its externally computed balance flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub isbalanced: bool,
    pub isweakbalanced: bool,
    pub originalgraphdata: ForceGraphData,
}

impl Classification {
    pub fn new(graph: &SignedGraph, flags: BalanceFlags) -> Self {
        Classification {
            isbalanced: flags.balanced,
            isweakbalanced: flags.weakly_balanced,
            originalgraphdata: graph.into(),
        }
    }

    pub fn flags(&self) -> BalanceFlags {
        BalanceFlags {
            balanced: self.isbalanced,
            weakly_balanced: self.isweakbalanced,
        }
    }

    pub fn graph(&self) -> Result<SignedGraph, GraphError> {
        SignedGraph::try_from(&self.originalgraphdata)
    }
}

/// The body of a submission to the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "graphData")]
    pub graph_data: AdjacencyGraph,
}

impl From<&SignedGraph> for SubmissionPayload {
    fn from(graph: &SignedGraph) -> Self {
        SubmissionPayload {
            graph_data: graph.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::signed::tests::chain;

    const CLASSIFICATION: &str = r#"{
        "originalgraphdata": {
            "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
            "links": [
                {"source": "A", "target": "B", "sign": "+"},
                {"source": "B", "target": "C", "sign": "-"}
            ]
        },
        "isbalanced": true,
        "isweakbalanced": false
    }"#;

    #[test]
    fn reads_classification() {
        let classification: Classification = serde_json::from_str(CLASSIFICATION).unwrap();

        assert_eq!(
            classification.flags(),
            BalanceFlags {
                balanced: true,
                weakly_balanced: false
            }
        );
        assert_eq!(classification.graph().unwrap(), chain());
    }

    #[test]
    fn reads_adjacency_in_key_order() {
        let adjacency: AdjacencyGraph =
            serde_json::from_str(r#"{"C": [["A", "-"]], "A": [["B", "+"]], "B": []}"#).unwrap();
        let graph = SignedGraph::try_from(&adjacency).unwrap();

        let order: Vec<_> = graph.nodes().iter().map(NodeId::as_str).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(AdjacencyGraph::from(&graph), adjacency);
    }

    #[test]
    fn rejects_unknown_sign() {
        let adjacency: AdjacencyGraph =
            serde_json::from_str(r#"{"A": [["B", "?"]], "B": []}"#).unwrap();
        assert!(matches!(
            SignedGraph::try_from(&adjacency),
            Err(GraphError::Sign { .. })
        ));

        let mut data = ForceGraphData::from(&chain());
        data.links[0].sign = "/".into();
        assert!(SignedGraph::try_from(&data).is_err());
    }

    #[test]
    fn rejects_link_to_unknown_node() {
        let mut data = ForceGraphData::from(&chain());
        data.links[0].target = "Z".into();
        assert!(matches!(
            SignedGraph::try_from(&data),
            Err(GraphError::UnknownNode { .. })
        ));
    }

    #[test]
    fn submission_body() {
        let payload = SubmissionPayload::from(&chain());

        assert_snapshot!(
            serde_json::to_string(&payload).unwrap(),
            @r#"{"graphData":{"A":[["B","+"]],"B":[["C","-"]],"C":[]}}"#
        );
    }

    #[test]
    fn classification_round_trip() {
        let flags = BalanceFlags {
            balanced: false,
            weakly_balanced: true,
        };
        let classification = Classification::new(&chain(), flags);
        let json = serde_json::to_string(&classification).unwrap();
        let back: Classification = serde_json::from_str(&json).unwrap();

        assert_eq!(back, classification);
        assert_eq!(back.flags(), flags);
    }
}
