#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the complaint map dashboard.
//!
//! With a subcommand it runs that tool directly. Without one it asks which
//! tool to run (serve, rankings, inspect) and guides through the options.
//!
//! Uses `indicatif-log-bridge` (via [`complaint_map_cli_utils::init_logger`])
//! so that log lines and the loading spinner never fight for the terminal.

mod report;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use complaint_map_analytics_models::TOP_N_SLIDER;
use complaint_map_cli_utils::{LoadSpinner, MultiProgress};
use complaint_map_data::Dataset;
use complaint_map_data::paths::DataPaths;
use complaint_map_server::ServerConfig;
use dialoguer::{Input, Select};

#[derive(Parser)]
#[command(name = "complaint_map_cli", about = "Complaint cluster dashboard tools")]
struct Cli {
    /// Cluster table (defaults to `CLUSTER_DATA_PATH` or `data/cluster_data.csv`)
    #[arg(long, global = true)]
    clusters: Option<PathBuf>,

    /// Comment table (defaults to `COMMENT_DATA_PATH` or `data/example_comment.csv`)
    #[arg(long, global = true)]
    comments: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve,
    /// Print the top zones, organizations, and clusters
    Rankings {
        /// Ranks per list (3-15)
        #[arg(long)]
        top_n: Option<u32>,
    },
    /// Show one cluster with randomly sampled comments
    Inspect {
        /// Cluster identifier such as `12_3`
        cluster: String,
        /// Comments to sample
        #[arg(long)]
        samples: Option<u32>,
    },
}

/// Top-level tool selection.
enum Tool {
    Server,
    Rankings,
    Inspect,
}

impl Tool {
    const ALL: &[Self] = &[Self::Server, Self::Rankings, Self::Inspect];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start server",
            Self::Rankings => "Show rankings",
            Self::Inspect => "Inspect a cluster",
        }
    }
}

fn data_paths(cli: &Cli) -> DataPaths {
    let mut paths = DataPaths::from_env();
    if let Some(clusters) = &cli.clusters {
        paths.clusters.clone_from(clusters);
    }
    if let Some(comments) = &cli.comments {
        paths.comments.clone_from(comments);
    }
    paths
}

fn load(
    multi: &MultiProgress,
    paths: &DataPaths,
) -> Result<Arc<Dataset>, Box<dyn std::error::Error>> {
    let progress = LoadSpinner::start(multi, "Loading tables");
    Ok(complaint_map_data::shared(paths, &progress)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = complaint_map_cli_utils::init_logger();
    let cli = Cli::parse();
    let paths = data_paths(&cli);

    match cli.command {
        Some(Commands::Serve) => serve(ServerConfig {
            data: paths,
            ..ServerConfig::from_env()
        })
        .await?,
        Some(Commands::Rankings { top_n }) => {
            let dataset = load(&multi, &paths)?;
            report::print_rankings(&dataset, TOP_N_SLIDER.resolve(top_n));
        }
        Some(Commands::Inspect { cluster, samples }) => {
            let dataset = load(&multi, &paths)?;
            report::inspect(&dataset, &cluster, samples)?;
        }
        None => interactive(&multi, paths).await?,
    }

    Ok(())
}

async fn interactive(
    multi: &MultiProgress,
    paths: DataPaths,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Complaint Map");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Server => {
            // actix-web owns its runtime, so run it off the tokio workers.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(complaint_map_server::interactive::run())
            })
            .await??;
        }
        Tool::Rankings => {
            let top_n: u32 = Input::new()
                .with_prompt(format!(
                    "Ranks per list ({}-{})",
                    TOP_N_SLIDER.min, TOP_N_SLIDER.max
                ))
                .default(TOP_N_SLIDER.default)
                .interact_text()?;
            let dataset = load(multi, &paths)?;
            report::print_rankings(&dataset, TOP_N_SLIDER.resolve(Some(top_n)));
        }
        Tool::Inspect => {
            let dataset = load(multi, &paths)?;
            let ids: Vec<String> = dataset
                .commented_cluster_ids()
                .map(|id| id.to_string())
                .collect();
            if ids.is_empty() {
                println!("No clusters have comments.");
                return Ok(());
            }
            let idx = Select::new()
                .with_prompt("Cluster")
                .items(&ids)
                .default(0)
                .interact()?;
            report::inspect(&dataset, &ids[idx], None)?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(complaint_map_server::run_server(config))
    })
    .await??;
    Ok(())
}
