//! cvharvest command-line entry point.
//!
//! Exit code 0 when text was extracted, 1 for every failure, including a
//! malformed invocation. Logs go to stderr so `--print-result` output on
//! stdout stays machine-readable.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use cvharvest::{Processor, ProcessorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "cvharvest", version)]
#[command(about = "Extract text from a CV/resume URL and report it to a callback endpoint", long_about = None)]
struct Cli {
    /// URL of the CV file (.pdf, .docx or .doc)
    file_url: String,

    /// Application identifier echoed back in the callback body
    application_id: String,

    /// Endpoint receiving the JSON result
    callback_url: String,

    /// Bearer token for the callback request
    auth_token: String,

    /// Configuration file (default: cvharvest.toml in this or a parent directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the callback body as JSON on stdout
    #[arg(long)]
    print_result: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false).compact();

    tracing_subscriber::registry().with(env_filter).with(stderr_layer).init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProcessorConfig> {
    match path {
        Some(path) => ProcessorConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let discovered = ProcessorConfig::discover().context("Failed to discover configuration")?;
            Ok(discovered.unwrap_or_default())
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let processor = Processor::new(config).context("Failed to initialize processor")?;

    let outcome = processor
        .process(&cli.file_url, &cli.application_id, &cli.callback_url, &cli.auth_token)
        .await;

    if cli.print_result {
        println!("{}", serde_json::to_string_pretty(&outcome.payload)?);
    }

    Ok(outcome.is_success())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::from(1);
            }
        },
    };

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
