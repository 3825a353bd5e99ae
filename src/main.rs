use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use signet::{
    coloring::ClusterPalette,
    generate,
    interchange::{AdjacencyGraph, Classification, SubmissionPayload},
    matrix::to_matrix,
    render::{to_dot, ClusterColoring, NodeColoring},
    session::{BalanceFlags, Session},
    signed::{NodeId, SignedGraph},
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` directives, falling back to `warn` when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

#[derive(Parser, Debug)]
#[command(
    name = "signet-cli",
    about = "Color signed graphs by structural balance and edit them as sign matrices."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Color a classified graph (`{"originalgraphdata", "isbalanced", "isweakbalanced"}`).
    Color {
        /// Classification JSON, or `-` for stdin.
        input: PathBuf,
        /// Strict balance gives two factions, weak balance gives clusters.
        #[arg(long, value_enum, default_value_t = Mode::Strict)]
        mode: Mode,
        /// Seed for cluster colors; the categorical palette is used without one.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Format::Dot)]
        format: Format,
    },
    /// Print the sign matrix of an adjacency-list graph.
    Matrix {
        /// Adjacency JSON (`{"A": [["B", "+"]], ...}`), or `-` for stdin.
        input: PathBuf,
    },
    /// Edit matrix cells, commit, and print the resulting submission body.
    Edit {
        /// Adjacency JSON, or `-` for stdin.
        input: PathBuf,
        /// `ROW,COL=VALUE` with node ids, e.g. `A,B=-`. Applied in order.
        #[arg(long = "set", value_name = "ROW,COL=VALUE", required = true)]
        edits: Vec<CellEdit>,
    },
    /// Print a random complete signed graph as adjacency JSON.
    Generate {
        #[arg(value_name = "N", default_value_t = 4)]
        nodes: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Strict,
    Weak,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Dot,
    Json,
}

#[derive(Clone, Debug)]
struct CellEdit {
    row: NodeId,
    col: NodeId,
    value: String,
}

impl FromStr for CellEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cell, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ROW,COL=VALUE, got {s:?}"))?;
        let (row, col) = cell
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COL before '=', got {cell:?}"))?;
        Ok(CellEdit {
            row: row.trim().into(),
            col: col.trim().into(),
            value: value.trim().to_string(),
        })
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Color {
            input,
            mode,
            seed,
            format,
        } => {
            let classification: Classification = read_json(&input)?;
            let graph = classification
                .graph()
                .context("classification does not describe a valid graph")?;
            let session = Session::new(graph, classification.flags());
            let palette = seed.map_or(ClusterPalette::Categorical, ClusterPalette::Seeded);
            let out = match mode {
                Mode::Strict => {
                    let colors = session.partition_colors()?;
                    render(session.graph(), &colors, format)?
                }
                Mode::Weak => {
                    let clusters = session.cluster_colors();
                    info!(clusters = clusters.n_clusters(), "assigned clusters");
                    render(
                        session.graph(),
                        &ClusterColoring::new(&clusters, palette),
                        format,
                    )?
                }
            };
            print!("{out}");
        }
        Command::Matrix { input } => {
            let graph = read_adjacency(&input)?;
            print!("{}", to_matrix(&graph));
        }
        Command::Edit { input, edits } => {
            let graph = read_adjacency(&input)?;
            let mut session = Session::new(graph, BalanceFlags::default());
            for edit in &edits {
                session
                    .edit_by_id(&edit.row, &edit.col, edit.value.as_str())
                    .with_context(|| {
                        format!("failed to set ({}, {}) to {:?}", edit.row, edit.col, edit.value)
                    })?;
            }
            let committed = session.commit().context("edited matrix was rejected")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&SubmissionPayload::from(&committed))?
            );
        }
        Command::Generate { nodes, seed } => {
            let graph = generate::complete(nodes, seed);
            println!(
                "{}",
                serde_json::to_string_pretty(&AdjacencyGraph::from(&graph))?
            );
        }
    }
    Ok(())
}

fn render(graph: &SignedGraph, coloring: &impl NodeColoring, format: Format) -> Result<String> {
    Ok(match format {
        Format::Dot => to_dot(graph, coloring),
        Format::Json => {
            // Keyed in node order.
            let colors: IndexMap<String, String> = graph
                .nodes()
                .iter()
                .map(|n| (n.to_string(), coloring.node_color(n).to_string()))
                .collect();
            let mut out = serde_json::to_string_pretty(&colors)?;
            out.push('\n');
            out
        }
    })
}

fn read_adjacency(path: &Path) -> Result<SignedGraph> {
    let adjacency: AdjacencyGraph = read_json(path)?;
    SignedGraph::try_from(&adjacency)
        .with_context(|| format!("{} does not describe a valid graph", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse JSON from {}", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(log_filter("debug").to_string(), "debug");
        assert_eq!(log_filter("signet=trace").to_string(), "signet=trace");
        assert_eq!(log_filter("").to_string(), "warn");
    }

    #[test]
    fn parses_cell_edits() {
        let edit: CellEdit = "A, B=-".parse().unwrap();
        assert_eq!((edit.row.as_str(), edit.col.as_str()), ("A", "B"));
        assert_eq!(edit.value, "-");
        assert!("A=+".parse::<CellEdit>().is_err());
    }
}
