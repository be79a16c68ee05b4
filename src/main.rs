use clap::{Parser, Subcommand};
use queuegraph::analysis::sensitivity::sweep_scenario;
use queuegraph::analysis::summary::{ScenarioSummary, summarize};
use queuegraph::config::Config;
use queuegraph::graph::network::Network;
use queuegraph::scenario::evaluator::{ScenarioResult, compare, evaluate};
use queuegraph::scenario::random::RandomNetwork;
use queuegraph::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "queuegraph", version, about = "Queueing estimates of intersection congestion")]
struct Cli {
    /// Study description (TOML). Defaults to the built-in Dhaka corridor study.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve every intersection under one scenario
    Evaluate {
        #[arg(long, default_value = "before")]
        scenario: String,
    },
    /// Occupancy change per intersection between two scenarios
    Compare {
        #[arg(long, default_value = "before")]
        before: String,
        #[arg(long, default_value = "after")]
        after: String,
    },
    /// Arrival-rate sweep around a scenario's baseline
    Sensitivity,
    /// Hourly occupancy for each lane configuration
    Timeseries,
    /// Evaluate a seeded synthetic network
    Random {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 30)]
        nodes: usize,
    },
}

#[derive(Serialize)]
struct Evaluation<'a> {
    result: &'a ScenarioResult,
    summary: ScenarioSummary,
}

#[derive(Serialize)]
struct RandomRun<'a> {
    network: &'a Network,
    evaluation: Evaluation<'a>,
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::from_path(p),
        None => Config::dhaka(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load(cli.config)?;

    match cli.command {
        Command::Evaluate { scenario } => {
            let network = config.build_network()?;
            let result = evaluate(&network, &config.scenario(&scenario)?)?;
            let summary = summarize(&result, &config.thresholds);
            info!(
                scenario = %scenario,
                congested = summary.congested().len(),
                "evaluation finished"
            );
            print(&Evaluation {
                result: &result,
                summary,
            })
        }
        Command::Compare { before, after } => {
            let network = config.build_network()?;
            let b = evaluate(&network, &config.scenario(&before)?)?;
            let a = evaluate(&network, &config.scenario(&after)?)?;
            print(&compare(&b, &a))
        }
        Command::Sensitivity => {
            let job = config
                .sensitivity
                .as_ref()
                .ok_or(Error::MissingSection("sensitivity"))?;
            let scenario = config.scenario(&job.scenario)?;
            print(&sweep_scenario(&scenario, &job.nodes, &job.offsets)?)
        }
        Command::Timeseries => {
            let simulator = config
                .build_timeseries()
                .ok_or(Error::MissingSection("timeseries"))??;
            print(&simulator.run()?)
        }
        Command::Random { seed, nodes } => {
            let (network, scenario) = RandomNetwork::default().build(seed, nodes)?;
            let result = evaluate(&network, &scenario)?;
            let summary = summarize(&result, &config.thresholds);
            info!(
                seed,
                congested = summary.congested().len(),
                "random network evaluated"
            );
            print(&RandomRun {
                network: &network,
                evaluation: Evaluation {
                    result: &result,
                    summary,
                },
            })
        }
    }
}
