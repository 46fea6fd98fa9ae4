//! `roadnet stats`: size and shape of the loaded network.

use std::io::Write;

use clap::Args;
use roadnet_core::graph::GraphStats;

use super::Session;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `roadnet stats`.
pub fn run_stats(_args: &StatsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let stats = GraphStats::from_network(&session.network);
    render_mode(output, &stats, render_stats_text, render_stats_human)
}

fn rows(stats: &GraphStats) -> [(&'static str, String); 8] {
    [
        ("nodes", stats.node_count.to_string()),
        ("edges", stats.edge_count.to_string()),
        ("density", format!("{:.6}", stats.density)),
        ("components", stats.weakly_connected_component_count.to_string()),
        ("one_way_edges", stats.one_way_edge_count.to_string()),
        ("max_in_degree", stats.max_in_degree.to_string()),
        ("max_out_degree", stats.max_out_degree.to_string()),
        ("road_names", stats.road_name_count.to_string()),
    ]
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    for (key, value) in rows(stats) {
        writeln!(w, "{key} {value}")?;
    }
    Ok(())
}

fn render_stats_human(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Network")?;
    for (key, value) in rows(stats) {
        pretty_kv(w, key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadnet_core::{RoadAttributes, RoadNetwork};

    #[test]
    fn text_rows_are_key_value_pairs() {
        let net = RoadNetwork::from_edges(
            3,
            [
                (0, 1, RoadAttributes::new("A", 1.0, 25)),
                (1, 0, RoadAttributes::new("A", 1.0, 25)),
                (1, 2, RoadAttributes::new("B", 1.0, 25)),
            ],
        )
        .expect("valid network");
        let mut buf = Vec::new();
        render_stats_text(&GraphStats::from_network(&net), &mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("nodes 3\n"));
        assert!(text.contains("edges 3\n"));
        assert!(text.contains("one_way_edges 1\n"));
        assert!(text.contains("road_names 2\n"));
    }
}
