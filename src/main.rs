//! Classmate - educational assistant service
//!
//! Serves the chat, lecture summary and reminder APIs, and exposes the
//! response engine directly from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use classmate::{
    chat::ChatService,
    config::ClassmateConfig,
    engine::{Initializer, SummaryExtractor},
    server::ServerBuilder,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "classmate")]
#[command(author = "Classmate AI Team")]
#[command(version)]
#[command(about = "Educational assistant with rule-based chat and lecture summaries")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CLASSMATE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Ask the assistant a single question
    Ask {
        /// Question text
        message: String,
    },

    /// Summarize a text file and print the result as JSON
    Summarize {
        /// File holding the lecture text
        file: PathBuf,
    },

    /// Run diagnostics
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            run_server(config, host, port).await?;
        }
        Commands::Ask { message } => {
            ask(&config, &message).await?;
        }
        Commands::Summarize { file } => {
            summarize(&file).await?;
        }
        Commands::Doctor => {
            run_doctor(&config);
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("classmate={},tower_http={}", log_level, log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Explicit path first, then the default location, then built-in defaults
fn load_config(path: Option<&Path>) -> Result<ClassmateConfig> {
    if let Some(path) = path {
        return ClassmateConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match ClassmateConfig::default_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Using config file {}", path.display());
            ClassmateConfig::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        _ => Ok(ClassmateConfig::default()),
    }
}

async fn run_server(config: ClassmateConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    tracing::info!("Starting Classmate");

    let mut builder = ServerBuilder::new().config(config);
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    let server = builder.build()?;

    server.start().await?;

    tracing::info!("Classmate is running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    server.stop().await?;

    Ok(())
}

async fn ask(config: &ClassmateConfig, message: &str) -> Result<()> {
    let initializer = Arc::new(Initializer::simulated(config.engine.warmup_delay()));
    let service = ChatService::from_config(config, initializer)?;

    let reply = service.respond(message).await;
    println!("{}", reply.content);
    eprintln!("(source: {})", reply.source);
    Ok(())
}

async fn summarize(file: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let result = SummaryExtractor::extract(&content);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_doctor(config: &ClassmateConfig) {
    println!("Classmate Doctor");
    println!();

    println!("Checking configuration...");
    match ClassmateConfig::default_path() {
        Some(path) if path.exists() => {
            println!("  ✓ Configuration file found: {}", path.display())
        }
        _ => println!("  ℹ No configuration file found (using defaults)"),
    }

    println!();
    println!("Checking upstream text generation...");
    if config.upstream.api_key().is_some() {
        println!(
            "  ✓ {} is set, {} will be tried first",
            config.upstream.api_key_env, config.upstream.model
        );
    } else {
        println!(
            "  ℹ {} not set, answers come from the rule engine",
            config.upstream.api_key_env
        );
    }

    println!();
    println!("Doctor check complete!");
}

fn show_config(config: Option<&ClassmateConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    println!("{}", config.to_toml()?);
    Ok(())
}
