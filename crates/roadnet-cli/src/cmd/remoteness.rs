//! `roadnet remoteness`: mean reachable distance from one or more nodes.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use roadnet_core::NodeId;
use roadnet_core::metrics::remoteness_many;
use roadnet_core::search::find_intersections;
use serde::Serialize;
use tracing::warn;

use super::Session;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet remoteness`.
#[derive(Args, Debug)]
pub struct RemotenessArgs {
    /// Source node id.
    #[arg(long, required_unless_present = "at", conflicts_with = "at")]
    pub source: Option<NodeId>,

    /// Use every node where all of these roads meet as a source.
    #[arg(long, num_args = 1..)]
    pub at: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RemotenessRow {
    pub node: NodeId,
    pub remoteness: f64,
}

#[derive(Debug, Serialize)]
pub struct RemotenessReport {
    pub sources: Vec<RemotenessRow>,
}

/// Execute `roadnet remoteness`.
pub fn run_remoteness(
    args: &RemotenessArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let sources: Vec<NodeId> = match args.source {
        Some(node) => vec![node],
        None => {
            let found = find_intersections(&session.network, args.at.as_slice())
                .with_context(|| format!("Failed to locate {}", args.at.join(" & ")))?;
            if found.is_empty() {
                warn!(roads = ?args.at, "roads do not meet");
            }
            found.into_iter().collect()
        }
    };

    let report = RemotenessReport {
        sources: remoteness_many(&session.network, &sources)?
            .into_iter()
            .map(|(node, remoteness)| RemotenessRow { node, remoteness })
            .collect(),
    };
    render_mode(output, &report, render_text, render_human)
}

fn render_text(report: &RemotenessReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.sources {
        writeln!(w, "{} {:.6}", row.node, row.remoteness)?;
    }
    Ok(())
}

fn render_human(report: &RemotenessReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Remoteness")?;
    if report.sources.is_empty() {
        return writeln!(w, "no matching nodes");
    }
    for row in &report.sources {
        pretty_kv(w, &format!("node {}", row.node), format!("{:.6}", row.remoteness))?;
    }
    Ok(())
}
