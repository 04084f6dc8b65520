//! `stackkv` — run the line protocol over stdin or a script file

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stackkv_cli::{run, ProtocolConfig, Session};
use stackkv_core::{Config, Store};

#[derive(Parser)]
#[command(name = "stackkv")]
#[command(about = "In-memory key-value store with nested transactions")]
#[command(version)]
struct Cli {
    /// Script file to execute (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Prompt shown before each line (default: "> " on a terminal, none otherwise)
    #[arg(long)]
    prompt: Option<String>,

    /// Do not print ERROR lines for unparseable input
    #[arg(long)]
    quiet_errors: bool,

    /// Log filter, overrides RUST_LOG (e.g. "debug", "stackkv_core=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Log the final engine state on exit (raises the default log level to info)
    #[arg(long)]
    dump_state: bool,

    /// Pre-size the engine for large inputs
    #[arg(long)]
    large: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log filter '{}'", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if cli.dump_state { "info" } else { "warn" })
        }),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let engine_config = if cli.large { Config::large() } else { Config::default() };
    engine_config.validate().map_err(anyhow::Error::msg)?;

    let interactive = cli.file.is_none() && io::stdin().is_terminal();
    let protocol = ProtocolConfig {
        prompt: cli.prompt.or_else(|| interactive.then(|| "> ".to_string())),
        report_errors: !cli.quiet_errors,
        ..ProtocolConfig::default()
    };
    protocol.validate().map_err(anyhow::Error::msg)?;

    let mut session = Session::new(Store::with_config(engine_config), protocol);
    let stdout = io::stdout().lock();

    let summary = match &cli.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            info!(path = %path.display(), "running script");
            run(BufReader::new(file), stdout, &mut session)?
        }
        None => run(io::stdin().lock(), stdout, &mut session)?,
    };

    if cli.dump_state {
        info!(state = ?session.store().inspect(), "final state");
    }
    if summary.errors > 0 {
        info!(errors = summary.errors, "some input lines were rejected");
    }
    Ok(())
}
