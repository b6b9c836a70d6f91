use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use sift_core::Event;
use sift_pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "siftctl", version, about = "Sift event pipeline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the configured pipeline over NDJSON events on stdin
    Run {
        /// Pipeline config file (YAML)
        #[arg(short = 'c', long = "config")]
        config: PathBuf,
    },
    /// Parse and build a pipeline config, then report its stages
    Check {
        /// Pipeline config file (YAML)
        #[arg(short = 'c', long = "config")]
        config: PathBuf,
    },
}

fn init_tracing() {
    let env = std::env::var("SIFT_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // stdout carries the event stream; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn init_metrics() {
    if let Ok(addr) = std::env::var("SIFT_METRICS_ADDR") {
        if let Ok(sock) = addr.parse::<std::net::SocketAddr>() {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            match builder.with_http_listener(sock).install() {
                Ok(_) => info!(addr = %addr, "Prometheus metrics exporter listening"),
                Err(e) => warn!(error = %e, "failed to install metrics exporter"),
            }
        } else {
            warn!(addr = %addr, "invalid SIFT_METRICS_ADDR; expected host:port");
        }
    }
}

fn load_pipeline(path: &Path) -> Result<Pipeline> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading pipeline config {}", path.display()))?;
    let filters = sift_filter::load_chain(&raw)
        .with_context(|| format!("building pipeline from {}", path.display()))?;
    Ok(Pipeline::new(filters))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    init_metrics();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let pipeline = load_pipeline(&config)?;
            let names = pipeline.stage_names();
            info!(stages = names.len(), "pipeline config ok");
            for name in names {
                println!("{}", name);
            }
        }
        Commands::Run { config } => {
            let pipeline = load_pipeline(&config)?;
            let cap = std::env::var("SIFT_QUEUE_CAP")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(2048);
            let (tx, mut rx) = sift_pipeline::spawn(cap, pipeline);

            // stdin is line oriented and blocking; feed the loop from a
            // blocking task and consume processed events here.
            let reader = tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                let mut read = 0u64;
                let mut skipped = 0u64;
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(l) => l,
                        Err(e) => {
                            warn!(error = %e, "stdin read failed; stopping");
                            break;
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match Event::from_json_str(&line) {
                        Ok(event) => {
                            read += 1;
                            if tx.blocking_send(event).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            skipped += 1;
                            warn!(error = %e, "skipping malformed event");
                        }
                    }
                }
                (read, skipped)
            });

            let mut written = 0u64;
            while let Some(event) = rx.recv().await {
                println!("{}", event.to_json_string()?);
                written += 1;
            }
            let (read, skipped) = reader.await.unwrap_or((0, 0));
            info!(read, written, skipped, "run finished");
        }
    }
    Ok(())
}
