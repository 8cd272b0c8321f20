//! NVDA Forecast CLI
//!
//! Command-line client for the NVDA Forecast inference service.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use nvda_forecast::api::{ForecastClient, Framework, Tag};
use nvda_forecast::matrix::{normalize, InputMode};
use nvda_forecast::session::{OperationOutcome, PredictionSession};
use nvda_forecast::utils::{load_config, Config, PredictConfig};

#[derive(Parser)]
#[command(name = "nvda-forecast")]
#[command(about = "Client for the NVDA Forecast inference service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Service base URL (overrides config and NVDA_API_BASE)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a regression prediction for a pasted matrix
    Predict {
        /// Matrix text: CSV rows or JSON, e.g. [[0.1,0.2],[0.3,0.4]]
        #[arg(short, long)]
        input: Option<String>,

        /// Read the matrix from a file instead
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Input mode
        #[arg(short, long)]
        mode: Option<InputMode>,

        /// Model framework
        #[arg(short = 'F', long)]
        framework: Option<Framework>,

        /// Dataset tag
        #[arg(short, long)]
        tag: Option<Tag>,
    },

    /// Request a classification prediction for a pasted matrix
    Classify {
        /// Matrix text: CSV rows or JSON
        #[arg(short, long)]
        input: Option<String>,

        /// Read the matrix from a file instead
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Input mode
        #[arg(short, long)]
        mode: Option<InputMode>,

        /// Model framework
        #[arg(short = 'F', long)]
        framework: Option<Framework>,

        /// Dataset tag
        #[arg(short, long)]
        tag: Option<Tag>,
    },

    /// Check service health
    Health,

    /// Generate sample configuration file
    Config {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    // Load configuration; the CLI flag beats NVDA_API_BASE beats the file.
    let config = load_config(&cli.config)?;
    let base_url = cli
        .base_url
        .unwrap_or_else(|| config.api.resolved_base_url());
    let client = ForecastClient::with_timeout(
        base_url,
        std::time::Duration::from_secs(config.api.timeout_secs),
    );

    match cli.command {
        Commands::Predict {
            input,
            file,
            mode,
            framework,
            tag,
        } => {
            let raw = read_matrix_text(input, file)?;
            let params = merge_params(&config, mode, framework, tag);
            predict(&client, &raw, &params).await?;
        }
        Commands::Classify {
            input,
            file,
            mode,
            framework,
            tag,
        } => {
            let raw = read_matrix_text(input, file)?;
            let params = merge_params(&config, mode, framework, tag);
            classify(&client, &raw, &params).await?;
        }
        Commands::Health => {
            health(&client).await?;
        }
        Commands::Config { output } => {
            Config::create_sample_config(&output)?;
            println!("Sample configuration written to {}", output);
        }
    }

    Ok(())
}

/// Matrix text from the flag, a file, or stdin.
fn read_matrix_text(input: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = input {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read matrix file: {:?}", path));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read matrix from stdin")?;
    Ok(buffer)
}

/// Config defaults overridden by whatever the CLI supplied.
fn merge_params(
    config: &Config,
    mode: Option<InputMode>,
    framework: Option<Framework>,
    tag: Option<Tag>,
) -> PredictConfig {
    PredictConfig {
        tag: tag.unwrap_or(config.predict.tag),
        framework: framework.unwrap_or(config.predict.framework),
        mode: mode.unwrap_or(config.predict.mode),
    }
}

async fn predict(client: &ForecastClient, raw: &str, params: &PredictConfig) -> Result<()> {
    info!(
        "requesting regression prediction: tag={} framework={} mode={}",
        params.tag.as_str(),
        params.framework.as_str(),
        params.mode.as_str()
    );

    let mut session = PredictionSession::new();
    let outcome = session.run(client, raw, params).await?;

    match outcome {
        OperationOutcome::Success(result) => {
            println!("Framework:  {}", result.framework.as_str());
            println!("Tag:        {}", result.tag.as_str());
            println!("Prediction: {}", result.y_pred);
            if result.scaled {
                let note = result.note.as_deref().unwrap_or("value is in scaled space");
                println!("Note:       {}", note);
            }
            Ok(())
        }
        OperationOutcome::Failure(message) => anyhow::bail!("{}", message),
    }
}

async fn classify(client: &ForecastClient, raw: &str, params: &PredictConfig) -> Result<()> {
    let x = normalize(raw, params.mode, params.framework)?;
    info!(
        "requesting classification: tag={} framework={} rows={}",
        params.tag.as_str(),
        params.framework.as_str(),
        x.len()
    );

    let result = client
        .predict_classification(params.tag, params.framework, x)
        .await?;

    println!("Framework:  {}", result.framework.as_str());
    println!("Tag:        {}", result.tag.as_str());
    println!("P(up):      {:.4}", result.p_up);
    println!("Label:      {}", result.label);
    println!("Threshold:  {:.2}", result.threshold);
    Ok(())
}

async fn health(client: &ForecastClient) -> Result<()> {
    let response = client.health().await?;
    println!("{} -> {}", client.base_url(), response.status);
    Ok(())
}
