//! `roadnet intersections`: nodes shared by every named road.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use roadnet_core::search::find_intersections;
use roadnet_core::{Coordinate, GraphProvider, NodeId};
use serde::Serialize;

use super::Session;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet intersections`.
#[derive(Args, Debug)]
pub struct IntersectionsArgs {
    /// Road names, matched exactly.
    #[arg(required = true)]
    pub roads: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Junction {
    pub node: NodeId,
    /// Ingestion key of the node.
    pub key: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Serialize)]
pub struct IntersectionReport {
    pub roads: Vec<String>,
    pub nodes: Vec<Junction>,
}

/// Execute `roadnet intersections`.
pub fn run_intersections(
    args: &IntersectionsArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let network = &session.network;
    let found = find_intersections(network, args.roads.as_slice())
        .with_context(|| format!("Failed to intersect {}", args.roads.join(" & ")))?;

    let report = IntersectionReport {
        roads: args.roads.clone(),
        nodes: found
            .into_iter()
            .map(|node| Junction {
                node,
                key: network.external_key(node),
                coordinate: network.coordinate(node),
            })
            .collect(),
    };
    render_mode(output, &report, render_text, render_human)
}

fn render_text(report: &IntersectionReport, w: &mut dyn Write) -> std::io::Result<()> {
    for junction in &report.nodes {
        writeln!(w, "{}", junction.node)?;
    }
    Ok(())
}

fn render_human(report: &IntersectionReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &report.roads.join(" & "))?;
    if report.nodes.is_empty() {
        return writeln!(w, "roads do not meet");
    }
    for junction in &report.nodes {
        let key = junction.key.map_or_else(|| "-".to_string(), |k| k.to_string());
        let at = junction
            .coordinate
            .map_or_else(String::new, |c| format!(" at ({:.5}, {:.5})", c.x, c.y));
        pretty_kv(w, &format!("node {}", junction.node), format!("key {key}{at}"))?;
    }
    Ok(())
}
