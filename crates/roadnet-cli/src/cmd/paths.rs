//! `roadnet paths`: shortest-path distances from one node.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use roadnet_core::NodeId;
use roadnet_core::path::{ShortestPaths, shortest_paths};
use serde::Serialize;

use super::Session;
use crate::output::{OutputMode, fmt_metric, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Source node id.
    #[arg(long)]
    pub source: NodeId,

    /// Report only this target, with its route.
    #[arg(long)]
    pub target: Option<NodeId>,
}

/// Distance from the source to one node. `None` means unreachable.
#[derive(Debug, Serialize)]
pub struct DistanceRow {
    pub node: NodeId,
    pub distance: Option<f64>,
    pub predecessor: Option<NodeId>,
}

#[derive(Debug, Serialize)]
pub struct DistanceMap {
    pub source: NodeId,
    pub reachable: usize,
    pub distances: Vec<DistanceRow>,
}

#[derive(Debug, Serialize)]
pub struct Route {
    pub source: NodeId,
    pub target: NodeId,
    pub distance: Option<f64>,
    /// Node sequence `source ..= target`; empty when unreachable.
    pub path: Vec<NodeId>,
}

/// Execute `roadnet paths`.
pub fn run_paths(args: &PathsArgs, output: OutputMode, session: &Session) -> anyhow::Result<()> {
    let paths = shortest_paths(&session.network, args.source)
        .with_context(|| format!("Failed to search from node {}", args.source))?;

    match args.target {
        Some(target) => {
            let route = build_route(&paths, target, session)?;
            render_mode(output, &route, render_route_text, render_route_human)
        }
        None => {
            let map = distance_map(&paths);
            render_mode(output, &map, render_map_text, render_map_human)
        }
    }
}

fn build_route(paths: &ShortestPaths, target: NodeId, session: &Session) -> anyhow::Result<Route> {
    use roadnet_core::GraphProvider;

    if !session.network.contains_node(target) {
        return Err(roadnet_core::NetworkError::NodeNotFound(target).into());
    }
    let distance = paths.distance(target);
    Ok(Route {
        source: paths.source(),
        target,
        distance: distance.is_finite().then_some(distance),
        path: paths.path_to(target).unwrap_or_default(),
    })
}

fn distance_map(paths: &ShortestPaths) -> DistanceMap {
    let distances: Vec<DistanceRow> = paths
        .distances()
        .iter()
        .zip(paths.predecessors())
        .enumerate()
        .map(|(node, (&d, &predecessor))| DistanceRow {
            node,
            distance: d.is_finite().then_some(d),
            predecessor,
        })
        .collect();
    DistanceMap {
        source: paths.source(),
        reachable: paths.reachable().count(),
        distances,
    }
}

fn render_map_text(map: &DistanceMap, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &map.distances {
        let pred = row.predecessor.map_or_else(|| "-".to_string(), |p| p.to_string());
        writeln!(
            w,
            "{} {} {}",
            row.node,
            fmt_metric(row.distance.unwrap_or(f64::INFINITY)),
            pred
        )?;
    }
    Ok(())
}

fn render_map_human(map: &DistanceMap, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Shortest paths from node {}", map.source))?;
    pretty_kv(w, "reachable", format!("{} of {}", map.reachable, map.distances.len()))?;
    writeln!(w)?;
    writeln!(w, "{:>8}  {:>14}  {:>8}", "node", "distance", "via")?;
    for row in &map.distances {
        let pred = row.predecessor.map_or_else(|| "-".to_string(), |p| p.to_string());
        writeln!(
            w,
            "{:>8}  {:>14}  {:>8}",
            row.node,
            fmt_metric(row.distance.unwrap_or(f64::INFINITY)),
            pred
        )?;
    }
    Ok(())
}

fn join_path(path: &[NodeId]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
}

fn render_route_text(route: &Route, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", fmt_metric(route.distance.unwrap_or(f64::INFINITY)))?;
    if !route.path.is_empty() {
        writeln!(w, "{}", join_path(&route.path))?;
    }
    Ok(())
}

fn render_route_human(route: &Route, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Route {} -> {}", route.source, route.target))?;
    pretty_kv(w, "distance", fmt_metric(route.distance.unwrap_or(f64::INFINITY)))?;
    if !route.path.is_empty() {
        pretty_kv(w, "hops", (route.path.len() - 1).to_string())?;
        pretty_kv(w, "path", join_path(&route.path))?;
    }
    Ok(())
}
