use ahash::HashSet;
use insta::assert_snapshot;
use itertools::Itertools;
use proptest::prelude::*;

use super::*;
use crate::signed::{
    tests::{arb_graph, arb_grouped_graph, chain},
    Sign, SignedEdge,
};

use ClusterColor::Cluster;
use PartitionColor::{FactionA, FactionB, Unclassified};

fn triangle(ab: &str, bc: &str, ca: &str) -> SignedGraph {
    SignedGraph::from_adjacency([
        ("A", vec![("B", ab)]),
        ("B", vec![("C", bc)]),
        ("C", vec![("A", ca)]),
    ])
    .unwrap()
}

fn partition_of(graph: &SignedGraph) -> Vec<PartitionColor> {
    assign_partition(graph, true)
        .unwrap()
        .iter()
        .map(|(_, c)| *c)
        .collect()
}

#[test]
fn chain_partition() {
    let colors = assign_partition(&chain(), true).unwrap();

    assert_eq!(colors["A"], FactionA);
    assert_eq!(colors["B"], FactionA);
    assert_eq!(colors["C"], FactionB);
}

#[test]
fn chain_clusters() {
    let colors = assign_clusters(&chain(), true);

    assert_eq!(colors["A"], colors["B"]);
    assert_ne!(colors["A"], colors["C"]);
    assert_eq!(colors["A"], Cluster(0));
    assert_eq!(colors["C"], Cluster(1));
    assert_eq!(colors.n_clusters(), 2);
}

#[test]
fn positive_triangle_is_one_faction() {
    assert_eq!(partition_of(&triangle("+", "+", "+")), [FactionA; 3]);
}

#[test]
fn triangle_with_one_negative_edge_conflicts() {
    let graph = triangle("+", "+", "-");

    let err = assign_partition(&graph, true).unwrap_err();
    let ColoringError::InconsistentBalance {
        assigned, required, ..
    } = &err;
    assert_ne!(assigned, required);
    assert_snapshot!(
        err.to_string(),
        @"graph is flagged as balanced, but edge B -[+]-> C requires C to be FactionA while it is already FactionB"
    );

    // Without the flag nothing is attempted.
    let colors = assign_partition(&graph, false).unwrap();
    assert!(colors.iter().all(|(_, c)| *c == Unclassified));
}

#[test]
fn propagation_does_not_follow_listing_order() {
    // Edges listed so that the first one touches neither the root nor any
    // node reachable from it yet.
    let mut graph = SignedGraph::from_adjacency([
        ("A", vec![]),
        ("B", vec![]),
        ("C", vec![("D", "-")]),
        ("D", vec![("B", "+")]),
        ("E", vec![("A", "-")]),
    ])
    .unwrap();
    graph
        .add_edge(SignedEdge::new("B", "A", Sign::Negative))
        .unwrap();

    assert_eq!(
        partition_of(&graph),
        [FactionA, FactionB, FactionA, FactionB, FactionB]
    );
}

#[test]
fn unreachable_nodes_stay_unclassified() {
    let graph = SignedGraph::from_adjacency([
        ("A", vec![("B", "-")]),
        ("B", vec![]),
        ("C", vec![("D", "+")]),
        ("D", vec![]),
    ])
    .unwrap();

    let partition = assign_partition(&graph, true).unwrap();
    let unreachable = partition
        .nodes_where(|c| !c.is_classified())
        .into_iter()
        .map(NodeId::as_str)
        .collect_vec();
    assert_eq!(unreachable, ["C", "D"]);

    let clusters = assign_clusters(&graph, true);
    assert_eq!(clusters["C"], ClusterColor::Unclassified);
    assert_eq!(clusters["D"], ClusterColor::Unclassified);
    assert_eq!(clusters.n_clusters(), 2);
}

#[test]
fn first_cluster_assignment_wins() {
    // B is reached positively from A before the negative C-B edge is seen.
    let graph = SignedGraph::from_adjacency([
        ("A", vec![("B", "+"), ("C", "-")]),
        ("B", vec![]),
        ("C", vec![("B", "-"), ("D", "-")]),
        ("D", vec![]),
    ])
    .unwrap();

    let colors = assign_clusters(&graph, true);

    assert_eq!(
        colors.iter().map(|(_, c)| *c).collect_vec(),
        [Cluster(0), Cluster(0), Cluster(1), Cluster(2)]
    );
}

#[test]
fn empty_graph_has_no_colors() {
    let graph = SignedGraph::new();
    assert!(assign_partition(&graph, true).unwrap().is_empty());
    assert!(assign_clusters(&graph, true).is_empty());
}

#[test]
fn negative_self_loop_conflicts() {
    let graph = SignedGraph::from_adjacency([("A", vec![("A", "-")])]).unwrap();
    assert!(assign_partition(&graph, true).is_err());
    assert_eq!(assign_clusters(&graph, true)["A"], Cluster(0));
}

#[test]
fn faction_colors() {
    assert_eq!(Rgb::from(FactionA).to_string(), "#d62728");
    assert_eq!(Rgb::from(FactionB).to_string(), "#1f77b4");
    assert_eq!(Rgb::from(Unclassified).to_string(), "#808080");
}

#[test]
fn categorical_palette_is_distinct_beyond_the_fixed_list() {
    let colors = ClusterPalette::Categorical.colors(200);

    assert_eq!(colors[0], Rgb::RED);
    assert_eq!(colors.iter().collect::<HashSet<_>>().len(), 200);
    assert!(!colors.contains(&Rgb::NEUTRAL));
    assert_eq!(ClusterPalette::Categorical.colors(12), colors[..12].to_vec());
}

#[test]
fn palettes_stay_distinct_past_every_hue_ring() {
    let categorical = ClusterPalette::Categorical.colors(5000);
    assert_eq!(categorical.iter().collect::<HashSet<_>>().len(), 5000);
    assert!(!categorical.contains(&Rgb::NEUTRAL));

    let seeded = ClusterPalette::Seeded(3).colors(3000);
    assert_eq!(seeded.iter().collect::<HashSet<_>>().len(), 3000);
    assert!(!seeded.contains(&Rgb::NEUTRAL));
}

#[test]
fn negative_star_gets_one_color_per_leaf() {
    let leaves = (1..=2000).map(|i| format!("L{i}")).collect_vec();
    let graph = SignedGraph::from_adjacency([(
        "hub".to_string(),
        leaves.iter().map(|l| (l.clone(), "-")).collect_vec(),
    )])
    .unwrap();

    let clusters = assign_clusters(&graph, true);
    assert_eq!(clusters.n_clusters(), 2001);
    let colors = ClusterPalette::Categorical.resolve(&clusters);
    assert_eq!(colors.iter().collect::<HashSet<_>>().len(), 2001);
}

#[test]
fn rgb_from_u24() {
    assert_eq!(Rgb::from_u24(0xd62728), Rgb::RED);
    assert_eq!(Rgb::from_u24(0xff_1f77b4), Rgb::BLUE);
}

#[test]
fn seeded_palette_is_reproducible() {
    let a = ClusterPalette::Seeded(7).colors(20);
    let b = ClusterPalette::Seeded(7).colors(20);
    let other = ClusterPalette::Seeded(8).colors(20);

    assert_eq!(a, b);
    assert_ne!(a, other);
    assert_eq!(a.iter().collect::<HashSet<_>>().len(), 20);
    assert!(!a.contains(&Rgb::NEUTRAL));
}

#[test]
fn hsv_primaries() {
    assert_eq!(Rgb::from_hsv(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::from_hsv(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
    assert_eq!(Rgb::from_hsv(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    assert_eq!(Rgb::from_hsv(0.0, 0.0, 0.5), Rgb::new(128, 128, 128));
}

fn path_sign(graph: &SignedGraph, target: usize) -> Option<Sign> {
    // Breadth-first search recording the product of signs along the tree path.
    let adjacency = graph.adjacency();
    let mut signs = vec![None; graph.n_nodes()];
    signs[0] = Some(Sign::Positive);
    let mut queue = std::collections::VecDeque::from([0]);
    while let Some(u) = queue.pop_front() {
        for n in adjacency.neighbours(u) {
            if signs[n.node].is_none() {
                signs[n.node] = signs[u].map(|s| s * n.sign);
                queue.push_back(n.node);
            }
        }
    }
    signs[target]
}

proptest! {
    #[test]
    fn flag_unset_means_unclassified(graph in arb_graph()) {
        let partition = assign_partition(&graph, false).unwrap();
        let clusters = assign_clusters(&graph, false);

        prop_assert_eq!(partition.len(), graph.n_nodes());
        prop_assert_eq!(clusters.len(), graph.n_nodes());
        prop_assert!(partition.iter().all(|(_, c)| *c == Unclassified));
        prop_assert!(clusters.iter().all(|(_, c)| *c == ClusterColor::Unclassified));
    }

    #[test]
    fn factions_follow_path_sign((graph, labels) in arb_grouped_graph(2)) {
        let colors = assign_partition(&graph, true).unwrap();

        for (i, (_, color)) in colors.iter().enumerate() {
            match path_sign(&graph, i) {
                Some(Sign::Positive) => prop_assert_eq!(*color, FactionA),
                Some(Sign::Negative) => prop_assert_eq!(*color, FactionB),
                None => prop_assert_eq!(*color, Unclassified),
            }
            // Same faction as the root exactly when the hidden label matches.
            if color.is_classified() {
                prop_assert_eq!(*color == FactionA, labels[i] == labels[0]);
            }
        }
    }

    #[test]
    fn partition_agrees_with_sign_relations((graph, _) in arb_grouped_graph(2)) {
        let colors = assign_partition(&graph, true).unwrap();
        for e in graph.edges() {
            let (s, t) = (colors[&e.source], colors[&e.target]);
            if s.is_classified() {
                prop_assert_eq!(s.across(e.sign), t);
            }
        }
    }

    #[test]
    fn clusters_bounded_by_negative_edges(graph in arb_graph()) {
        let colors = assign_clusters(&graph, true);
        let (_, negative) = graph.sign_counts();

        let distinct = colors
            .iter()
            .filter_map(|(_, c)| c.index())
            .unique()
            .count();
        prop_assert!(distinct <= negative + 1);
        prop_assert_eq!(distinct, colors.n_clusters());
    }

    #[test]
    fn clusters_never_span_hidden_groups((graph, labels) in arb_grouped_graph(4)) {
        // Clusters only grow along positive edges, so each one lies inside
        // a single hidden group.
        let colors = assign_clusters(&graph, true);
        let by_cluster = colors
            .iter()
            .enumerate()
            .filter_map(|(i, (_, c))| c.index().map(|k| (k, labels[i])))
            .into_group_map();
        for (_, groups) in by_cluster {
            prop_assert!(groups.iter().all_equal());
        }
    }
}
