#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::Session;
use input::NetworkSource;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "roadnet: shortest paths and network metrics for road graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Network hand-over file (JSON segment list).
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "synthetic")]
    network: Option<PathBuf>,

    /// Generate a random regular network with this many nodes instead.
    #[arg(long, global = true, value_name = "N")]
    synthetic: Option<usize>,

    /// Seed for sampling and synthetic networks.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Configuration file (default: ./roadnet.toml if present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Inspect",
        about = "Summarize the network",
        long_about = "Print node and edge counts, density, component count, one-way edges and degree maxima.",
        after_help = "EXAMPLES:\n    roadnet --network slc.json stats\n\n    # Emit machine-readable output\n    roadnet --synthetic 100 stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Shortest-path distances from a node",
        long_about = "Run Dijkstra from --source. With --target, print one distance and its route; otherwise print every distance and predecessor.",
        after_help = "EXAMPLES:\n    roadnet --network slc.json paths --source 0\n\n    roadnet --network slc.json paths --source 0 --target 42"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Estimate relative load on a road",
        long_about = "Sample nodes and report, for every edge of the road, the share of shortest trips between sampled nodes that use it.",
        after_help = "EXAMPLES:\n    roadnet --network slc.json load \"I-80 WB FWY\" --sample-size 20 --seed 7"
    )]
    Load(cmd::load::LoadArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Global efficiency of the network",
        long_about = "Mean reciprocal shortest-path distance over sampled (default) or all ordered node pairs.",
        after_help = "EXAMPLES:\n    roadnet --network slc.json efficiency --sample-size 50\n\n    roadnet --synthetic 200 efficiency --exhaustive"
    )]
    Efficiency(cmd::efficiency::EfficiencyArgs),

    #[command(
        next_help_heading = "Metrics",
        about = "Mean reachable distance from a node",
        long_about = "Mean finite shortest-path distance from --source, or from every node where the --at roads meet.",
        after_help = "EXAMPLES:\n    roadnet --network slc.json remoteness --source 12\n\n    roadnet --network slc.json remoteness --at \"Main St\" \"1st Ave\""
    )]
    Remoteness(cmd::remoteness::RemotenessArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Nodes where named roads meet",
        after_help = "EXAMPLES:\n    roadnet --network slc.json intersections \"Main St\" \"1st Ave\""
    )]
    Intersections(cmd::intersections::IntersectionsArgs),

    #[command(about = "Generate shell completions")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ROADNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "roadnet_core=debug,roadnet=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("ROADNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Resolve config, seed and network into a [`Session`].
fn open_session(cli: &Cli) -> anyhow::Result<Session> {
    let config = config::load_config(cli.config.as_deref())?;
    let seed = cli
        .seed
        .or(config.sampling.seed)
        .unwrap_or_else(rand::random::<u64>);
    info!(seed, "sampling seed");

    let source = NetworkSource::resolve(
        cli.network.clone(),
        cli.synthetic,
        config.network.path.clone(),
        config.network.synthetic_degree,
    )?;
    let network = source.load(seed)?;
    Ok(Session {
        network,
        seed,
        config,
    })
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let session = open_session(cli)?;
    debug!(command = ?cli.command, "dispatching");

    match &cli.command {
        Commands::Stats(args) => cmd::stats::run_stats(args, output, &session),
        Commands::Paths(args) => cmd::paths::run_paths(args, output, &session),
        Commands::Load(args) => cmd::load::run_load(args, output, &session),
        Commands::Efficiency(args) => cmd::efficiency::run_efficiency(args, output, &session),
        Commands::Remoteness(args) => cmd::remoteness::run_remoteness(args, output, &session),
        Commands::Intersections(args) => {
            cmd::intersections::run_intersections(args, output, &session)
        }
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = render_error(output, &CliError::from(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::parse_from(["roadnet", "--synthetic", "50", "stats", "--seed", "3"]);
        assert_eq!(cli.synthetic, Some(50));
        assert_eq!(cli.seed, Some(3));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn network_and_synthetic_conflict() {
        let parsed =
            Cli::try_parse_from(["roadnet", "--network", "a.json", "--synthetic", "5", "stats"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn json_flag_selects_json() {
        let cli = Cli::parse_from(["roadnet", "stats", "--json"]);
        assert!(cli.output_mode().is_json());
    }

    #[test]
    fn format_flag_parses() {
        let cli = Cli::parse_from(["roadnet", "--format", "text", "stats"]);
        assert_eq!(cli.format, Some(OutputMode::Text));
    }

    #[test]
    fn paths_requires_source() {
        assert!(Cli::try_parse_from(["roadnet", "paths"]).is_err());
        let cli = Cli::parse_from(["roadnet", "paths", "--source", "4", "--target", "9"]);
        match cli.command {
            Commands::Paths(args) => {
                assert_eq!(args.source, 4);
                assert_eq!(args.target, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn load_takes_road_and_sample_size() {
        let cli = Cli::parse_from(["roadnet", "load", "I-80 WB FWY", "-k", "12"]);
        match cli.command {
            Commands::Load(args) => {
                assert_eq!(args.road, "I-80 WB FWY");
                assert_eq!(args.sample_size, Some(12));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn efficiency_sample_and_exhaustive_conflict() {
        assert!(
            Cli::try_parse_from(["roadnet", "efficiency", "--exhaustive", "--sample-size", "4"])
                .is_err()
        );
    }

    #[test]
    fn remoteness_needs_source_or_roads() {
        assert!(Cli::try_parse_from(["roadnet", "remoteness"]).is_err());
        assert!(
            Cli::try_parse_from(["roadnet", "remoteness", "--source", "1", "--at", "Oak"]).is_err()
        );
        let cli = Cli::parse_from(["roadnet", "remoteness", "--at", "Main St", "1st Ave"]);
        match cli.command {
            Commands::Remoteness(args) => assert_eq!(args.at, vec!["Main St", "1st Ave"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn intersections_requires_a_road() {
        assert!(Cli::try_parse_from(["roadnet", "intersections"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
