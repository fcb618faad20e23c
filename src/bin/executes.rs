//! executes-server binary
//!
//! Runs an executes session fed by host events on stdin (one JSON object per
//! line) and writes session outputs to stdout.
//!
//! ## Configuration (env / TOML via `config` crate)
//!
//! | Key                        | Default   | Description                        |
//! |----------------------------|-----------|------------------------------------|
//! | `EXECUTES_SPAWN_DIR`       | `spawns`  | Directory of `<map>.json` files    |
//! | `EXECUTES_SEED`            | *(none)*  | Scenario selection seed            |
//! | `EXECUTES_LOG_ASSIGNMENTS` | `true`    | Log every placement at round start |
//!
//! Command-line flags override file and environment values.

use anyhow::{Context, Result};
use clap::Parser;
use executes::{host::HostAgent, session::ExecutesSession, types::ExecutesConfig};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "executes-server", about = "Executes round orchestrator", version)]
struct Args {
    /// Optional TOML config file
    #[arg(long, env = "EXECUTES_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of per-map spawn files
    #[arg(long)]
    spawn_dir: Option<PathBuf>,

    /// Scenario selection seed
    #[arg(long)]
    seed: Option<u64>,

    /// Map already running on the host (hot reload)
    #[arg(long)]
    map: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise logging (stderr, stdout carries session outputs)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("executes=debug".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config =
        ExecutesConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = args.spawn_dir {
        config.spawn_dir = dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    log::info!(
        "Starting executes-server (spawn_dir='{}', seed={:?})",
        config.spawn_dir.display(),
        config.seed,
    );

    let mut session = ExecutesSession::from_config(config);
    if let Some(map) = args.map.as_deref() {
        session.on_map_start(map);
    }

    let agent = HostAgent::new(Arc::new(Mutex::new(session)));
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = agent.run(stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => {
            log::info!("executes-server shutting down (SIGINT)");
        }
    }

    Ok(())
}
