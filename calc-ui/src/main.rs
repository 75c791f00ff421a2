use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use calc_core::navigation::resolve_route;
use calc_core::{CalculationApi, CalculatorKind, ResultsView, StalePolicy};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use calc_ui::app::{self, Backend};
use calc_ui::components::WindowPreferences;
use calc_ui::config::{AppConfig, Overrides};
use calc_ui::{headless, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Wireless engineering calculators backed by a remote analysis service.
///
/// Opens the desktop window by default. `run` submits one page without a
/// window and prints the result.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Service backend to use.
    #[arg(long)]
    backend: Option<String>,

    /// Base URL of the calculation service.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (default: none).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// What to do with replies to superseded submissions:
    /// `last-completed` or `latest-only`.
    #[arg(long)]
    stale_policy: Option<StalePolicy>,

    /// Log filter, e.g. `debug` or `info,calc_http=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the desktop window (default).
    Gui {
        /// Route of the page to show first; `/` is the home page.
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// Submit one page and print the rendered result.
    Run {
        /// Page slug, e.g. `link-budget`.
        page: CalculatorKind,
        /// Field assignment `name=value`; repeatable.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// List pages with their fields and defaults.
    Pages,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            stale_policy: self.stale_policy,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

/// Starts the async runtime and builds the configured client on it.
fn start_backend(config: &AppConfig) -> anyhow::Result<(Runtime, Arc<dyn CalculationApi>)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let api = runtime
        .block_on(app::create_api(&config.endpoint))
        .context("failed to create calculation client")?;
    Ok((runtime, api))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let log_control = logging::init_logging();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    match &log_control {
        Some(control) => control.apply(&config.log)?,
        None => warn!("a tracing subscriber was already installed; log settings ignored"),
    }
    debug!(?config, "configuration loaded");

    let command = cli.command.unwrap_or(Command::Gui {
        route: "/".to_string(),
    });
    match command {
        Command::Pages => print!("{}", headless::describe_pages()),
        Command::Run { page, set } => {
            let (runtime, api) = start_backend(&config)?;
            let view = runtime.block_on(headless::run_once(
                &*api,
                page,
                &set,
                config.stale_policy,
            ))?;
            print!("{view}");
            if let ResultsView::Error(message) = view {
                anyhow::bail!("calculation failed: {message}");
            }
        }
        Command::Gui { route } => {
            let start = resolve_route(&route)
                .with_context(|| format!("no page at route '{route}'"))?;
            let (runtime, api) = start_backend(&config)?;
            info!(base_url = %config.endpoint.base_url, "opening window");
            calc_ui::run_gui(
                start,
                Backend {
                    api,
                    runtime: runtime.handle().clone(),
                    stale_policy: config.stale_policy,
                },
                WindowPreferences::default(),
            );
        }
    }

    Ok(())
}
