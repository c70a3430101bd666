#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// The engine
pub mod engine;

// Re-export commonly used types
pub use data::{FetchError, HistoryCache, KeyValueStore, LabSeqClient, ReqwestTransport, Transport};
pub use domain::{DisplayMode, HistoryEntry, SequenceResult};
pub use engine::{EngineError, LabSeqEngine};
pub use models::ChartPoint;

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Utc;
// CLI argument parsing
use clap::{Parser, Subcommand};

use crate::config::{API, ClientConfig, PERSISTENCE};
use crate::data::{FileStore, MemoryStore};
use crate::ui::render;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Query the LabSeq sequence service", long_about = None)]
pub struct Cli {
    /// Base URL of the LabSeq service
    #[arg(long, global = true, env = API.base_url_env, default_value = API.base_url)]
    pub api_url: String,

    /// Directory holding the saved history
    #[arg(long, global = true, default_value = PERSISTENCE.store.directory)]
    pub state_dir: PathBuf,

    /// Extra attempts after a failed lookup
    #[arg(long, global = true, default_value_t = API.client.retries)]
    pub retries: u32,

    #[arg(long, global = true, default_value_t = API.client.timeout_ms)]
    pub timeout_ms: u64,

    /// Keep history in memory only, nothing is read from or written to disk
    #[arg(long, global = true, default_value_t = false)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up l(n) for one index
    Get {
        /// Non-negative integer index (validated before anything is sent)
        #[arg(allow_hyphen_values = true)]
        index: String,
        #[arg(long, value_enum, default_value_t = DisplayMode::default())]
        mode: DisplayMode,
        /// Also draw the growth chart for recent lookups
        #[arg(long, default_value_t = false)]
        chart: bool,
    },
    /// Re-run a lookup listed in history
    Reload {
        index: u64,
        #[arg(long, value_enum, default_value_t = DisplayMode::default())]
        mode: DisplayMode,
    },
    /// List recent lookups, most recent first
    History {
        #[arg(long, value_enum, default_value_t = DisplayMode::default())]
        mode: DisplayMode,
    },
    /// Forget every saved lookup
    Clear,
    /// Digit growth of recent lookups by index
    Chart,
    /// Probe the service health endpoint
    Health,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.api_url.clone())
            .with_retries(self.retries)
            .with_timeout_ms(self.timeout_ms)
    }
}

/// Build the engine the arguments ask for and run one command.
/// Returns the text to print on success.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", cli);

    let config = cli.client_config();
    let transport = ReqwestTransport::new(&config)
        .with_context(|| format!("Failed to build HTTP client for {}", config.base_url))?;
    let client = LabSeqClient::new(transport, &config);

    if cli.ephemeral {
        let mut engine = LabSeqEngine::new(client, HistoryCache::new(MemoryStore::new()));
        execute(&mut engine, cli.command).await
    } else {
        let store = FileStore::new(cli.state_dir);
        let mut engine = LabSeqEngine::new(client, HistoryCache::new(store));
        execute(&mut engine, cli.command).await
    }
}

/// Run one command against an engine. Failed lookups come back as errors
/// carrying the user-facing message.
pub async fn execute<T: Transport, S: KeyValueStore>(
    engine: &mut LabSeqEngine<T, S>,
    command: Command,
) -> anyhow::Result<String> {
    match command {
        Command::Get { index, mode, chart } => {
            engine.set_display_mode(mode);
            if chart {
                engine.toggle_chart();
            }
            let outcome = engine.calculate(&index).await;
            lookup_output(engine, outcome)
        }
        Command::Reload { index, mode } => {
            if engine.history_entry(index).is_none() {
                bail!("LabSeq({}) is not in history", index);
            }
            engine.set_display_mode(mode);
            let outcome = engine.load_from_history(index).await;
            lookup_output(engine, outcome)
        }
        Command::History { mode } => Ok(render::render_history(
            engine.history(),
            mode,
            &Utc::now(),
        )),
        Command::Clear => {
            let count = engine.history().len();
            engine.clear_history();
            Ok(format!("Cleared {} saved lookup(s).", count))
        }
        Command::Chart => Ok(render::render_chart(&engine.chart_points())),
        Command::Health => {
            let status = engine.check_api_health().await;
            Ok(format!("API status: {}", status.label()))
        }
    }
}

fn lookup_output<T: Transport, S: KeyValueStore>(
    engine: &LabSeqEngine<T, S>,
    outcome: Result<SequenceResult, EngineError>,
) -> anyhow::Result<String> {
    let panel = render::render_view(engine.view());
    if outcome.is_err() {
        bail!(panel);
    }
    if engine.view().show_chart {
        let chart = render::render_chart(&engine.chart_points());
        return Ok(format!("{}\n\n{}", panel, chart));
    }
    Ok(panel)
}
