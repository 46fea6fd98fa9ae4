//! `roadnet efficiency`: global efficiency, sampled or exhaustive.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use roadnet_core::metrics::efficiency;
use serde::Serialize;

use super::Session;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet efficiency`.
#[derive(Args, Debug)]
pub struct EfficiencyArgs {
    /// Nodes to sample (default from config, else 20).
    #[arg(long, short = 'k', conflicts_with = "exhaustive")]
    pub sample_size: Option<usize>,

    /// Use every ordered node pair instead of a sample.
    #[arg(long)]
    pub exhaustive: bool,
}

#[derive(Debug, Serialize)]
pub struct EfficiencyReport {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub efficiency: f64,
}

/// Execute `roadnet efficiency`.
pub fn run_efficiency(
    args: &EfficiencyArgs,
    output: OutputMode,
    session: &Session,
) -> anyhow::Result<()> {
    let sample_size = (!args.exhaustive).then(|| {
        args.sample_size
            .unwrap_or(session.config.sampling.efficiency_sample_size)
    });
    let mut rng = session.rng();
    let value = efficiency(&session.network, sample_size, &mut rng)
        .context("Failed to compute efficiency")?;

    let report = EfficiencyReport {
        mode: if sample_size.is_some() { "sampled" } else { "exhaustive" },
        sample_size,
        seed: sample_size.map(|_| session.seed),
        efficiency: value,
    };
    render_mode(output, &report, render_text, render_human)
}

fn render_text(report: &EfficiencyReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{:.6}", report.efficiency)
}

fn render_human(report: &EfficiencyReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Global efficiency")?;
    pretty_kv(w, "mode", report.mode)?;
    if let Some(k) = report.sample_size {
        pretty_kv(w, "sample", k.to_string())?;
    }
    if let Some(seed) = report.seed {
        pretty_kv(w, "seed", seed.to_string())?;
    }
    pretty_kv(w, "efficiency", format!("{:.6}", report.efficiency))
}
