use chart_analyzer::normalizer::to_data_url;
use chart_analyzer::utils::encode_image_file;
use chart_analyzer::{
    extract_indicators, normalize_image, render_report, AnalysisPipeline, AnalyzeResponse, ConfigArgs,
    PipelineOutcome,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chart-analyzer", version, about = "Two-stage AI analysis of trading chart images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Analyze a single chart image and print the indicators
    Analyze {
        /// PNG or JPEG chart image
        file: PathBuf,

        /// Print the full response as JSON instead of a report
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config } => {
            let config = config.into_config()?;
            info!("Starting chart analyzer service");
            chart_analyzer::server::start_server(config).await?;
        }
        Command::Analyze { file, json, config } => {
            let config = config.into_config()?;
            let image = encode_image_file(&file, config.max_image_bytes).await?;
            let pipeline = AnalysisPipeline::from_config(config)?;

            info!("Analyzing {}", file.display());

            match pipeline.run(Some(image.as_str())).await {
                PipelineOutcome::Success(result) => {
                    let indicators = extract_indicators(&result);
                    if json {
                        let response = AnalyzeResponse::succeeded(
                            result.analysis_text,
                            result.prediction_text,
                            to_data_url(&normalize_image(Some(image.as_str()))?),
                            indicators,
                        );
                        println!("{}", serde_json::to_string_pretty(&response)?);
                    } else {
                        println!("{}", render_report(&indicators));
                        println!("--- Analysis ---\n{}\n", result.analysis_text);
                        println!("--- Prediction ---\n{}", result.prediction_text);
                    }
                }
                PipelineOutcome::Failure { kind, message } => {
                    error!("Analysis failed ({}): {}", kind, message);
                    anyhow::bail!("Analysis failed: {}", message);
                }
            }
        }
    }

    Ok(())
}
