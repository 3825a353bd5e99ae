//! # Editing Session
//!
//! The one piece of long-lived state: the current graph, its balance flags,
//! and at most one pending (edited, uncommitted) matrix snapshot.
//!
//! Every transition either succeeds completely or leaves the session as it
//! was. A rejected edit keeps the previous snapshot, a rejected commit
//! keeps the previous graph, and a failed submission keeps everything,
//! pending edits included.

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    coloring::{assign_clusters, assign_partition, ClusterColor, ColorAssignment, ColoringError, PartitionColor},
    matrix::{to_matrix, Cell, DenseMatrix, MatrixError},
    signed::{NodeId, SignedGraph},
};

/// The two balance predicates, as computed by the classification service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceFlags {
    pub balanced: bool,
    pub weakly_balanced: bool,
}

#[derive(Error, Debug)]
#[error("balance classification failed: {message}")]
pub struct OracleError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        OracleError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        OracleError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Whatever decides whether a graph is balanced. Usually a remote service;
/// this crate only consumes its answer.
pub trait BalanceOracle {
    fn classify(&self, graph: &SignedGraph) -> Result<BalanceFlags, OracleError>;
}

impl<F: Fn(&SignedGraph) -> Result<BalanceFlags, OracleError>> BalanceOracle for F {
    fn classify(&self, graph: &SignedGraph) -> Result<BalanceFlags, OracleError> {
        self(graph)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Coloring(#[from] ColoringError),
    #[error("submission failed, local state unchanged")]
    Submission(#[source] OracleError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    graph: SignedGraph,
    flags: BalanceFlags,
    pending: Option<DenseMatrix>,
}

impl Session {
    pub fn new(graph: SignedGraph, flags: BalanceFlags) -> Self {
        Session {
            graph,
            flags,
            pending: None,
        }
    }

    pub fn graph(&self) -> &SignedGraph {
        &self.graph
    }

    pub fn flags(&self) -> BalanceFlags {
        self.flags
    }

    pub fn has_pending_edits(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending snapshot, or a fresh matrix of the current graph.
    pub fn matrix(&self) -> DenseMatrix {
        self.pending
            .clone()
            .unwrap_or_else(|| to_matrix(&self.graph))
    }

    pub fn edit(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<Cell>,
    ) -> Result<&DenseMatrix, SessionError> {
        let edited = self.matrix().edit(row, col, value)?;
        Ok(self.pending.insert(edited))
    }

    pub fn edit_by_id(
        &mut self,
        row: &NodeId,
        col: &NodeId,
        value: impl Into<Cell>,
    ) -> Result<&DenseMatrix, SessionError> {
        let edited = self.matrix().edit_by_id(row, col, value)?;
        Ok(self.pending.insert(edited))
    }

    /// Throws away pending edits.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    /// Validates the pending matrix and returns the graph it describes,
    /// without installing it.
    pub fn commit(&self) -> Result<SignedGraph, SessionError> {
        Ok(self.matrix().commit(&self.graph)?)
    }

    /// Commits, asks `oracle` to classify the result, and installs both.
    ///
    /// The session only changes if both steps succeed.
    pub fn submit(&mut self, oracle: &impl BalanceOracle) -> Result<BalanceFlags, SessionError> {
        let graph = self.commit()?;
        let flags = oracle.classify(&graph).map_err(|e| {
            warn!(error = %e, "submission rejected");
            SessionError::Submission(e)
        })?;
        info!(
            balanced = flags.balanced,
            weakly_balanced = flags.weakly_balanced,
            "submission accepted"
        );
        self.graph = graph;
        self.flags = flags;
        self.pending = None;
        Ok(flags)
    }

    /// Installs a new graph and flags received from elsewhere, dropping
    /// pending edits.
    pub fn replace(&mut self, graph: SignedGraph, flags: BalanceFlags) {
        *self = Session::new(graph, flags);
    }

    pub fn partition_colors(&self) -> Result<ColorAssignment<PartitionColor>, SessionError> {
        Ok(assign_partition(&self.graph, self.flags.balanced)?)
    }

    pub fn cluster_colors(&self) -> ColorAssignment<ClusterColor> {
        assign_clusters(&self.graph, self.flags.weakly_balanced)
    }
}
