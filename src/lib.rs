//! # Signet
//!
//! Signet is a Rust library for working with signed graphs: graphs whose
//! edges are labelled `+` or `-`. It colors the nodes of such a graph
//! according to the two structural-balance interpretations, and keeps an
//! editable dense sign matrix in sync with the sparse edge list.
//!
//! Whether a graph *is* balanced is decided elsewhere; the balance flags
//! are inputs to the coloring, never outputs.

pub mod coloring;
pub mod generate;
#[cfg(feature = "serde")]
pub mod interchange;
pub mod matrix;
pub mod render;
pub mod session;
pub mod signed;
