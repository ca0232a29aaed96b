//! brand-compliance service and offline checker.
//!
//! Usage:
//!   brand-compliance serve [--bind 127.0.0.1:8790]
//!   brand-compliance check --input request.json [--content-type EMAIL]

use anyhow::{Context, Result};
use brand_compliance::{
    ContentType, ReviewService,
    clients::generator_from_config,
    config::Config,
    http::{HttpState, start_http_server},
    review::ReviewRequest,
};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brand-compliance")]
#[command(about = "Brand compliance scoring and content analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Review a single request file and print the result as JSON
    Check {
        /// JSON file with content, brand, options, contentType, targetAudience
        #[arg(long)]
        input: PathBuf,
        /// Override the request's content type
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;

    // Logs go to stderr so `check` output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new("brand_compliance=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let generator = generator_from_config(&config)?;
    let provider = generator
        .as_ref()
        .map(|g| g.name().to_string())
        .unwrap_or_else(|| "none".to_string());
    let service = ReviewService::from_config(&config, generator);

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            info!(
                "Starting brand-compliance (provider={}, non_interactive={})",
                provider, config.retry.non_interactive
            );
            let state = HttpState {
                config: Arc::new(config),
                service: Arc::new(service),
                provider,
            };
            start_http_server(state).await?;
        }
        Commands::Check {
            input,
            content_type,
        } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut req: ReviewRequest =
                serde_json::from_str(&raw).context("Failed to parse review request")?;
            if let Some(ct) = content_type {
                req.content_type = ContentType::parse(&ct);
            }
            let result = service.review(&req).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
