use anyhow::Context;
use clap::Parser;
use leadsync_core::{ApiConfig, LeadPipeline, PipelineOptions};
use shared_types::SearchRequest;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch leads, verify their emails and push them to the CRM", long_about = None)]
struct Args {
    /// JSON file holding the contact search request
    #[arg(long)]
    request: PathBuf,

    #[arg(long)]
    skip_verify: bool,

    #[arg(long)]
    skip_push: bool,

    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("lead-pipeline.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        // Logs go to stderr so stdout carries only the report
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file_path.as_deref());

    let (config, config_path) = match &args.config {
        Some(path) => (ApiConfig::load_from(path)?, path.clone()),
        None => ApiConfig::load()?,
    };
    let settings = config.settings_response(&config_path);
    tracing::info!("Using config at {}", settings.config_file_path);
    for key in settings.api_keys {
        tracing::info!(
            "{} key: {}",
            key.name,
            key.key.as_deref().unwrap_or("not configured")
        );
    }

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file {}", args.request.display()))?;
    let mut request: SearchRequest =
        serde_json::from_str(&raw).context("Failed to parse search request")?;
    if request.api_key.trim().is_empty() {
        if let Some(key) = config.apollo_api_key() {
            request.api_key = key.to_string();
        }
    }

    let pipeline = LeadPipeline::from_config(&config)?;
    let options = PipelineOptions {
        verify: !args.skip_verify,
        push: !args.skip_push,
    };

    let report = pipeline
        .fetch_verify_push(
            &request,
            config.hunter_api_key(),
            config.hubspot_access_token(),
            options,
        )
        .await
        .inspect_err(|err| {
            if err.is_retryable() {
                tracing::warn!("Contact fetch failed with a temporary error; try again later");
            }
        })?;

    tracing::info!(
        "Pipeline finished: {} contacts, {} CRM results",
        report.total,
        report.crm_results.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
