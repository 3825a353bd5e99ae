//! # Dense Sign Matrix
//!
//! An editable `N × N` view of a [`SignedGraph`], with rows and columns in
//! node order. The matrix is a snapshot: it is derived from the graph with
//! [`to_matrix`], changed one cell at a time with [`DenseMatrix::edit`]
//! (which returns a new snapshot), and turned back into a graph with
//! [`commit`].
//!
//! Editing can change the sign of a relation but can never create one:
//! cells that are [`Cell::Empty`] in the current snapshot reject every edit.
//! Text outside `+`, `-`, `/` is accepted by `edit` and caught by `commit`,
//! which validates the whole matrix before building anything.

use std::fmt;

use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, warn};

use crate::signed::{GraphError, NodeId, SignedEdge, SignedGraph};

pub mod cell;
pub use cell::Cell;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("cell ({row}, {col}) has no relation and cannot be edited")]
    ImmutableCell { row: NodeId, col: NodeId },
    #[error("cell ({row}, {col}) is outside a {dimension}x{dimension} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        dimension: usize,
    },
    #[error("node {0} is not a row of this matrix")]
    UnknownNode(NodeId),
    #[error(
        "invalid symbol {symbol:?} at ({row}, {col}); only '+', '-' and '/' are allowed ({invalid} invalid cells in total)"
    )]
    InvalidSymbol {
        row: NodeId,
        col: NodeId,
        symbol: String,
        invalid: usize,
    },
    #[error("matrix has dimension {matrix} but the graph has {graph} nodes")]
    DimensionMismatch { matrix: usize, graph: usize },
    #[error("row {index} of the matrix is {matrix} but node {index} of the graph is {graph}")]
    NodeOrderMismatch {
        index: usize,
        matrix: NodeId,
        graph: NodeId,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A square matrix of [`Cell`]s labelled by node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    labels: IndexSet<NodeId>,
    cells: Vec<Cell>,
}

/// Derives the matrix of `graph`: cell `(i, j)` holds the sign of
/// [`relation_between`](SignedGraph::relation_between) the `i`-th and
/// `j`-th node, or [`Cell::Empty`].
pub fn to_matrix(graph: &SignedGraph) -> DenseMatrix {
    let labels = graph.nodes().clone();
    let cells = labels
        .iter()
        .cartesian_product(labels.iter())
        .map(|(row, col)| Cell::from(graph.relation_between(row, col)))
        .collect();
    DenseMatrix { labels, cells }
}

/// Validates `matrix` and rebuilds a graph over the nodes of `graph` from
/// it, in row-major order. Every non-empty cell becomes one edge
/// `row -> col`.
///
/// Nothing is built unless every cell is valid. The result replaces
/// `graph` wholesale; no edges of `graph` are carried over.
pub fn commit(matrix: &DenseMatrix, graph: &SignedGraph) -> Result<SignedGraph, MatrixError> {
    if matrix.dimension() != graph.n_nodes() {
        return Err(MatrixError::DimensionMismatch {
            matrix: matrix.dimension(),
            graph: graph.n_nodes(),
        });
    }
    if let Some((index, (m, g))) = matrix
        .labels
        .iter()
        .zip(graph.nodes())
        .enumerate()
        .find(|(_, (m, g))| m != g)
    {
        return Err(MatrixError::NodeOrderMismatch {
            index,
            matrix: m.clone(),
            graph: g.clone(),
        });
    }

    let invalid = matrix.invalid_cells();
    if let Some(&(row, col, symbol)) = invalid.first() {
        warn!(
            invalid = invalid.len(),
            "rejecting commit of matrix with invalid cells"
        );
        return Err(MatrixError::InvalidSymbol {
            row: matrix.labels[row].clone(),
            col: matrix.labels[col].clone(),
            symbol: symbol.to_owned(),
            invalid: invalid.len(),
        });
    }

    let nodes = graph.nodes();
    let edges = matrix.iter().filter_map(|(row, col, cell)| {
        cell.sign()
            .map(|sign| SignedEdge::new(nodes[row].clone(), nodes[col].clone(), sign))
    });
    let rebuilt = SignedGraph::from_parts(nodes.iter().cloned(), edges)?;
    debug!(
        nodes = rebuilt.n_nodes(),
        edges = rebuilt.n_edges(),
        "committed matrix"
    );
    Ok(rebuilt)
}

impl DenseMatrix {
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &IndexSet<NodeId> {
        &self.labels
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        let dimension = self.dimension();
        if row >= dimension || col >= dimension {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                dimension,
            });
        }
        Ok(row * dimension + col)
    }

    fn position(&self, row: &NodeId, col: &NodeId) -> Result<(usize, usize), MatrixError> {
        let find = |n: &NodeId| {
            self.labels
                .get_index_of(n)
                .ok_or_else(|| MatrixError::UnknownNode(n.clone()))
        };
        Ok((find(row)?, find(col)?))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.offset(row, col).ok().map(|o| &self.cells[o])
    }

    pub fn cell_by_id(&self, row: &NodeId, col: &NodeId) -> Option<&Cell> {
        let (row, col) = self.position(row, col).ok()?;
        self.cell(row, col)
    }

    /// Returns a copy of this matrix with cell `(row, col)` set to `value`.
    ///
    /// Fails with [`MatrixError::ImmutableCell`] if the cell is currently
    /// [`Cell::Empty`], whatever `value` is. The value itself is not
    /// checked here; see [`commit`].
    pub fn edit(
        &self,
        row: usize,
        col: usize,
        value: impl Into<Cell>,
    ) -> Result<DenseMatrix, MatrixError> {
        let offset = self.offset(row, col)?;
        if self.cells[offset].is_empty() {
            debug!(row, col, "rejected edit of an empty cell");
            return Err(MatrixError::ImmutableCell {
                row: self.labels[row].clone(),
                col: self.labels[col].clone(),
            });
        }
        let mut edited = self.clone();
        edited.cells[offset] = value.into();
        Ok(edited)
    }

    /// [`edit`](Self::edit), addressing the cell by node ids.
    pub fn edit_by_id(
        &self,
        row: &NodeId,
        col: &NodeId,
        value: impl Into<Cell>,
    ) -> Result<DenseMatrix, MatrixError> {
        let (row, col) = self.position(row, col)?;
        self.edit(row, col, value)
    }

    /// Every cell, row-major, with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let dimension = self.dimension();
        self.cells
            .iter()
            .enumerate()
            .map(move |(o, c)| (o / dimension, o % dimension, c))
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let dimension = self.dimension();
        (row < dimension).then(|| &self.cells[row * dimension..(row + 1) * dimension])
    }

    /// Coordinates and text of every cell holding something other than
    /// `+`, `-` or `/`, row-major.
    pub fn invalid_cells(&self) -> Vec<(usize, usize, &str)> {
        self.iter()
            .filter_map(|(r, c, cell)| match cell {
                Cell::Invalid(text) => Some((r, c, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Shorthand for [`commit`].
    pub fn commit(&self, graph: &SignedGraph) -> Result<SignedGraph, MatrixError> {
        commit(self, graph)
    }
}

impl From<&SignedGraph> for DenseMatrix {
    fn from(graph: &SignedGraph) -> Self {
        to_matrix(graph)
    }
}

/// A table with a `Node` header row and one row per node.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER: &str = "Node";
        let first = self
            .labels
            .iter()
            .map(|l| l.as_str().chars().count())
            .chain([HEADER.len()])
            .max()
            .unwrap_or(HEADER.len());
        let widths = (0..self.dimension())
            .map(|c| {
                (0..self.dimension())
                    .filter_map(|r| self.cell(r, c))
                    .map(|cell| cell.symbol().chars().count())
                    .chain([self.labels[c].as_str().chars().count()])
                    .max()
                    .unwrap_or(1)
            })
            .collect::<Vec<_>>();

        write!(f, "{HEADER:<first$}")?;
        for (label, width) in self.labels.iter().zip(&widths) {
            write!(f, " {:>width$}", label.as_str())?;
        }
        writeln!(f)?;

        for (r, label) in self.labels.iter().enumerate() {
            write!(f, "{:<first$}", label.as_str())?;
            for (cell, width) in self.row(r).unwrap_or_default().iter().zip(&widths) {
                write!(f, " {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
