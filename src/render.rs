//! # Rendering Interface
//!
//! What a renderer needs from this crate: a color per node and a label per
//! edge. Both are pure and cheap enough to be called on every frame.
//!
//! [`to_dot`] writes a colored graph as Graphviz DOT, so a coloring can be
//! inspected without the interactive canvas.

use std::fmt::{self, Write};

use crate::{
    coloring::{ClusterColor, ClusterPalette, ColorAssignment, PartitionColor, Rgb},
    signed::{NodeId, Sign, SignedGraph},
};

/// A node-coloring function.
pub trait NodeColoring {
    /// The color of `node`. Nodes without a color are [`Rgb::NEUTRAL`].
    fn node_color(&self, node: &NodeId) -> Rgb;
}

impl NodeColoring for ColorAssignment<PartitionColor> {
    fn node_color(&self, node: &NodeId) -> Rgb {
        self.get(node)
            .copied()
            .unwrap_or(PartitionColor::Unclassified)
            .into()
    }
}

/// A cluster assignment together with the colors of its clusters.
#[derive(Debug, Clone)]
pub struct ClusterColoring<'a> {
    assignment: &'a ColorAssignment<ClusterColor>,
    colors: Vec<Rgb>,
}

impl<'a> ClusterColoring<'a> {
    pub fn new(assignment: &'a ColorAssignment<ClusterColor>, palette: ClusterPalette) -> Self {
        ClusterColoring {
            colors: palette.resolve(assignment),
            assignment,
        }
    }

    pub fn cluster_colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl NodeColoring for ClusterColoring<'_> {
    fn node_color(&self, node: &NodeId) -> Rgb {
        self.assignment
            .get(node)
            .and_then(|c| c.index())
            .and_then(|i| self.colors.get(i).copied())
            .unwrap_or(Rgb::NEUTRAL)
    }
}

impl<F: Fn(&NodeId) -> Rgb> NodeColoring for F {
    fn node_color(&self, node: &NodeId) -> Rgb {
        self(node)
    }
}

/// The hover text of an edge.
pub fn edge_label(source: &NodeId, target: &NodeId, sign: Sign) -> String {
    format!("link: {source} -> {target}, {sign}")
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Writes `graph` as a DOT digraph: nodes filled with their color, edges
/// labelled with [`edge_label`]. Output order is node order, then edge
/// listing order.
pub fn dot_serialize_fmt(
    writer: &mut impl Write,
    graph: &SignedGraph,
    coloring: &impl NodeColoring,
) -> fmt::Result {
    writeln!(writer, "digraph {{")?;
    for node in graph.nodes() {
        writeln!(
            writer,
            "  {} [style=filled, fillcolor=\"{}\"];",
            quoted(node.as_str()),
            coloring.node_color(node)
        )?;
    }
    for e in graph.edges() {
        writeln!(
            writer,
            "  {} -> {} [label={}];",
            quoted(e.source.as_str()),
            quoted(e.target.as_str()),
            quoted(&edge_label(&e.source, &e.target, e.sign))
        )?;
    }
    writeln!(writer, "}}")
}

pub fn to_dot(graph: &SignedGraph, coloring: &impl NodeColoring) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = dot_serialize_fmt(&mut out, graph, coloring);
    out
}
