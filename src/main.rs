//! Binary entry point for agentic-router.
//!
//! This binary provides a debugging CLI over the routing pipeline.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use agentic_router::cli::{
    ConfigFormat, cmd_classify, cmd_config, cmd_models, cmd_process, cmd_route, cmd_strategy,
};
use agentic_router::config::RouterConfig;
use agentic_router::models::IntelligenceLevel;
use agentic_router::observability::{self, InitOptions, ObservabilityHandle};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable pointing at a config file.
const ENV_CONFIG_PATH: &str = "AGENTIC_ROUTER_CONFIG_PATH";

/// Agentic Router - rule-based decision and model routing for AI assistants.
#[derive(Parser)]
#[command(name = "agentic-router")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = ENV_CONFIG_PATH)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Show classifier signals for a request.
    Classify {
        /// The request text.
        text: String,
    },

    /// Show the memory search strategy for a request.
    Strategy {
        /// The request text.
        text: String,
    },

    /// Show the models selected for a request.
    Route {
        /// The request text.
        text: String,

        /// Context size in tokens.
        #[arg(long)]
        context_size: Option<usize>,

        /// Maximum number of models (defaults to the configured router cap).
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// List the model registry.
    Models,

    /// Run a request through the full pipeline against the echo backend.
    Process {
        /// The request text.
        text: String,

        /// Requesting user.
        #[arg(short, long)]
        user: Option<String>,

        /// Intelligence level (name or 1-5).
        #[arg(short, long, value_parser = parse_level)]
        level: Option<IntelligenceLevel>,

        /// Print Prometheus metrics to stderr after the request.
        #[arg(long)]
        metrics: bool,
    },

    /// Print the effective configuration.
    Config {
        /// Output format: toml or json.
        #[arg(short, long, default_value = "toml")]
        format: ConfigFormat,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let show_metrics = matches!(cli.command, Commands::Process { metrics: true, .. });
    let observability = match observability::init_from_config(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics: show_metrics,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    // Applied after init so invalid values are logged.
    let config = config.with_env_overrides();

    match run_command(cli.command, &config, &observability).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(
    command: Commands,
    config: &RouterConfig,
    observability: &ObservabilityHandle,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Classify { text } => cmd_classify(&mut out, &text).context("classify failed"),
        Commands::Strategy { text } => cmd_strategy(&mut out, &text).context("strategy failed"),
        Commands::Route {
            text,
            context_size,
            max,
        } => cmd_route(
            &mut out,
            &text,
            context_size,
            max.unwrap_or(config.router_max_models),
            config.large_context_threshold,
        )
        .context("route failed"),
        Commands::Models => cmd_models(&mut out).context("models failed"),
        Commands::Process {
            text,
            user,
            level,
            metrics,
        } => {
            cmd_process(&mut out, config, &text, user.as_deref(), level)
                .await
                .context("process failed")?;
            if metrics && let Some(rendered) = observability.render_metrics() {
                eprint!("{rendered}");
            }
            Ok(())
        },
        Commands::Config { format } => {
            cmd_config(&mut out, config, format).context("config failed")
        },
    }
}

/// Loads configuration from the given file or the default locations.
///
/// Runs before logging is initialized, so skipped default files are reported
/// on stderr directly.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<RouterConfig> {
    match path {
        Some(path) => RouterConfig::load_from_file(path)
            .with_context(|| format!("reading {}", path.display())),
        None => Ok(RouterConfig::load_first(
            &RouterConfig::default_paths(),
            |path, e| eprintln!("Ignoring invalid config file {}: {e}", path.display()),
        )),
    }
}

fn parse_level(s: &str) -> Result<IntelligenceLevel, String> {
    IntelligenceLevel::parse(s).ok_or_else(|| {
        format!("unknown intelligence level '{s}' (expected reactive..orchestrative or 1-5)")
    })
}
