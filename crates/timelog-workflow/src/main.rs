/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: Terminal UI session or one-shot catalog/parse commands
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timelog_adapter::{ParserClient, RemoteParser};
use timelog_workflow::{AppConfig, Catalog, ProjectId, Session};

use crate::cli::run::RunArgs;
use crate::tui::{ExportTarget, LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "timelog", version, about = "Turn free-form time logs into structured rows")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Project/task catalog (.json, .yaml, .yml)
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,
    /// Base URL of the parsing service
    #[arg(long = "parser-url", value_name = "URL", global = true)]
    parser_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// List catalog projects
    Projects,
    /// Print the selectable task paths of a project
    Paths {
        #[arg(long, value_name = "ID")]
        project: ProjectId,
        #[arg(long, value_name = "QUERY")]
        filter: Option<String>,
    },
    /// Validate the catalog and probe the parser
    Check {
        /// Skip the parser health probe
        #[arg(long)]
        offline: bool,
    },
    /// Parse one time log without the terminal UI
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let command = args.command.clone().unwrap_or(Command::Tui);

    let log_buffer: LogBufferHandle = Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
    let tui_mode = matches!(command, Command::Tui);
    init_tracing(&args.log_level, tui_mode.then(|| log_buffer.clone()))?;

    let config = AppConfig::load(args.config_path.as_deref())
        .context("load config")?
        .with_overrides(args.catalog, args.parser_url);
    info!(
        catalog = %config.catalog_path.display(),
        parser = %config.parser.base_url,
        "starting timelog"
    );

    let catalog = Arc::new(
        Catalog::load(&config.catalog_path)
            .with_context(|| format!("load catalog {}", config.catalog_path.display()))?,
    );

    match command {
        Command::Projects => {
            cli::inspect::list_projects(&catalog);
            Ok(())
        }
        Command::Paths { project, filter } => {
            cli::inspect::print_paths(&catalog, project, filter.as_deref())
        }
        Command::Check { offline } => {
            let client = build_client(&config)?;
            cli::inspect::check(&catalog, &client, offline).await
        }
        Command::Run(run_args) => {
            let client = build_client(&config)?;
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            tokio::select! {
                result = cli::run::run(catalog, &client, &run_args, &config.export.file_name) => result,
                _ = shutdown.cancelled() => Err(anyhow!("interrupted")),
            }
        }
        Command::Tui => {
            let parser: Arc<dyn RemoteParser> = Arc::new(build_client(&config)?);
            let export = ExportTarget {
                directory: config.export_dir(),
                file_name: config.export.file_name.clone(),
            };
            tui::run_tui_with_log(Session::new(catalog), parser, log_buffer, export).await
        }
    }
}

fn build_client(config: &AppConfig) -> Result<ParserClient> {
    ParserClient::with_config(config.client_config(), &config.parser.base_url)
        .context("create parser client")
}

fn init_tracing(log_level: &str, buffer: Option<LogBufferHandle>) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => {
            EnvFilter::try_new(directives).context("invalid RUST_LOG")?
        }
        _ => EnvFilter::try_new(log_level).context("invalid log level")?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match buffer {
        Some(buffer) => builder
            .with_ansi(false)
            .with_writer(LogWriterFactory::new(buffer))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
