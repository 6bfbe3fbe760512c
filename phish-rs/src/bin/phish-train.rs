//! Train the phishing classifier and write its artifacts
//!
//! # Usage
//!
//! ```bash
//! # Default datasets and settings
//! phish-train
//!
//! # Custom config, explicit datasets
//! phish-train --config train.toml --output-dir models data/a.csv data/b.csv
//!
//! # Machine-readable report
//! phish-train --report-json data/a.csv data/b.csv > report.json
//! ```

use clap::Parser;
use phish_rs::{training, TrainingConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "phish-train")]
#[command(about = "Train the phishing email classifier", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the artifact files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the training report as JSON instead of text
    #[arg(long)]
    report_json: bool,

    /// Dataset CSV files (override the configured ones)
    datasets: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phish_rs=info,phish_train=info".into());
    if cli.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            TrainingConfig::from_file(path)?
        }
        None => TrainingConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if !cli.datasets.is_empty() {
        config.datasets = cli.datasets;
    }

    info!("Loading data...");
    let report = training::run(&config)?;

    if cli.report_json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("Accuracy: {}", report.accuracy);
    println!("Classification Report:\n{}", report.report);
    println!("{:>8} {:>10} {:>11}", "Actual", "Predicted", "Confidence");
    for row in &report.preview {
        println!("{:>8} {:>10} {:>11.6}", row.actual, row.predicted, row.confidence);
    }
    println!();
    println!("Vectorizer: {}", report.artifacts.vectorizer.display());
    println!("Scaler:     {}", report.artifacts.scaler.display());
    println!("Model:      {}", report.artifacts.model.display());

    Ok(())
}
