use std::path::PathBuf;

use amazon_frames::{Config, Dataset, DatasetKind, Layer, Registry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "amazon-frames",
    version,
    about = "Dataset registry for the Amazon deforestation frames pipeline"
)]
struct Cli {
    /// JSON config file (data_path, start_date, end_date, base_unit, box_scale, input_box_size)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data root; overrides the config file and DATA_PATH
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every dataset and its resolved path
    Paths {
        #[arg(long)]
        layer: Option<String>,
    },
    /// Resolve one dataset path
    Resolve { layer: String, dataset: String },
    /// Print the quarterly sampling grid
    Grid,
    /// Print box side and input box size
    Spatial,
    /// Report which resolved paths exist on disk
    Check,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amazon_frames=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(root) = cli.data_path {
        config = config.with_data_path(root);
    }
    let registry = Registry::from_config(&config).context("Invalid configuration")?;

    match cli.command {
        Commands::Paths { layer } => {
            let layer = layer.map(|l| l.parse::<Layer>()).transpose()?;
            let entries: Vec<_> = registry
                .entries()
                .into_iter()
                .filter(|e| layer.is_none_or(|l| e.layer == l))
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in &entries {
                    println!("{:<8} {:<24} {:<5} {}", e.layer, e.key, e.kind, e.path.display());
                }
            }
        }
        Commands::Resolve { layer, dataset } => {
            let layer: Layer = layer.parse()?;
            let path = registry.resolve_named(layer, &dataset)?;
            if cli.json {
                println!("{}", json!({ "layer": layer, "dataset": dataset, "path": path }));
            } else {
                println!("{}", path.display());
            }
        }
        Commands::Grid => {
            let grid = registry.sampling_grid();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                for date in &grid {
                    println!("{}", date);
                }
            }
        }
        Commands::Spatial => {
            let spatial = registry.spatial();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(spatial)?);
            } else {
                println!("box_side: {}", spatial.box_side());
                println!("input_box_size: {}", spatial.input_box_size());
                println!("degrees_per_pixel: {}", spatial.degrees_per_pixel());
            }
        }
        Commands::Check => {
            // The registry never touches disk; this is a consumer-side probe.
            let mut missing = Vec::new();
            for e in registry.entries() {
                let present = match e.kind {
                    DatasetKind::Directory => e.path.is_dir(),
                    DatasetKind::File => e.path.is_file(),
                };
                if !present {
                    warn!(dataset = %e.dataset, path = %e.path.display(), "missing");
                    missing.push(e.dataset);
                }
                if !cli.json {
                    let status = if present { "ok     " } else { "missing" };
                    println!("{} {}", status, e.path.display());
                }
            }
            if cli.json {
                let missing: Vec<String> = missing.iter().map(Dataset::to_string).collect();
                println!("{}", json!({ "root": registry.root(), "missing": missing }));
            }
        }
    }

    Ok(())
}
