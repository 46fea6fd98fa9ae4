//! `roadnet load`: sampled relative load on one road.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use roadnet_core::NodeId;
use roadnet_core::metrics::{EdgeLoad, SegmentLoad, estimate_load};
use serde::Serialize;

use super::Session;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet load`.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Road name, matched exactly.
    pub road: String,

    /// Nodes to sample (default from config, else 10).
    #[arg(long, short = 'k')]
    pub sample_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub road: String,
    pub seed: u64,
    pub sample: Vec<NodeId>,
    pub mean: f64,
    pub edges: Vec<EdgeLoad>,
    pub segments: Vec<SegmentLoad>,
}

/// Execute `roadnet load`.
pub fn run_load(args: &LoadArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let sample_size = args
        .sample_size
        .unwrap_or(session.config.sampling.load_sample_size);
    let mut rng = session.rng();
    let load = estimate_load(&session.network, &args.road, sample_size, &mut rng)
        .with_context(|| format!("Failed to estimate load on '{}'", args.road))?;

    let report = LoadReport {
        mean: load.mean(),
        segments: load.segments(),
        road: load.road,
        seed: session.seed,
        sample: load.sample,
        edges: load.edges,
    };
    render_mode(output, &report, render_load_text, render_load_human)
}

fn render_load_text(report: &LoadReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "mean {:.6}", report.mean)?;
    for edge in &report.edges {
        writeln!(w, "{} {} {:.6}", edge.source, edge.target, edge.load)?;
    }
    Ok(())
}

fn render_load_human(report: &LoadReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Load on {}", report.road))?;
    pretty_kv(w, "edges", report.edges.len().to_string())?;
    pretty_kv(w, "sample", report.sample.len().to_string())?;
    pretty_kv(w, "seed", report.seed.to_string())?;
    pretty_kv(w, "mean load", format!("{:.6}", report.mean))?;
    writeln!(w)?;
    writeln!(w, "{:>8}  {:>8}  {:>10}", "from", "to", "load")?;
    for edge in &report.edges {
        writeln!(w, "{:>8}  {:>8}  {:>10.6}", edge.source, edge.target, edge.load)?;
    }
    Ok(())
}
